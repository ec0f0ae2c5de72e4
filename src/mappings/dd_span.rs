// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A span in the trace agent's model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DdSpan {
    /// Name of the service the span is associated with
    pub service: String,
    /// Operation name
    pub name: String,
    /// Resource name, the endpoint for web spans
    pub resource: String,
    /// Low 64 bits of the trace id
    pub trace_id: u64,
    pub span_id: u64,
    /// 0 if the span has no parent
    pub parent_id: u64,
    /// Nanoseconds since the Unix epoch
    pub start: i64,
    /// Nanoseconds
    pub duration: i64,
    /// 1 if the span is in error, 0 otherwise
    pub error: i32,
    /// String valued tags
    pub meta: HashMap<String, String>,
    /// Numeric valued tags
    pub metrics: HashMap<String, f64>,
    #[serde(rename = "type")]
    pub r#type: String,
}
