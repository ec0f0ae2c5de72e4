// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! # Transform
//!
//! Conversion of a finished OpenTelemetry span into a trace agent span.
//!
//! The span status is reported through the `opentelemetry.status*` tags, and decides whether
//! the span is flagged as an error: client spans are in error for codes in the 4xx HTTP
//! class, all other spans for codes in the 5xx class.
//!
//! Attributes are then applied, global tags first and span attributes second, through the
//! rules in [`tags`]. A span attribute overwrites a global tag with the same key.

pub mod status;
pub mod tags;

#[cfg(test)]
mod transform_tests;

use std::time::SystemTime;

use opentelemetry::{trace::SpanKind, SpanId, TraceId};

use crate::core::constants::{
    ERROR_MSG_TAG, ERROR_TYPE_TAG, OPERATION_NAME, STATUS_CODE_TAG, STATUS_DESCRIPTION_TAG,
    STATUS_TAG,
};

use super::{CachedConfig, DdSpan, SdkSpan};
use status::code_details;
use tags::set_tag;

fn otel_span_id_to_dd_id(span_id: SpanId) -> u64 {
    u64::from_be_bytes(span_id.to_bytes())
}

// Returns (low, high)
fn otel_trace_id_to_dd_id(trace_id: TraceId) -> (u64, u64) {
    let trace_id = u128::from_be_bytes(trace_id.to_bytes());
    (trace_id as u64, (trace_id >> 64) as u64)
}

/// Nanoseconds since the Unix epoch, negative for times before it
fn time_as_unix_nanos(time: SystemTime) -> i64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(d) => d.as_nanos() as i64,
        Err(e) => (e.duration().as_nanos() as i64).wrapping_neg(),
    }
}

/// Converts a finished span into a trace agent span.
///
/// This never fails: unknown status codes, span kinds and attribute types all have a
/// fallback mapping.
pub fn otel_span_to_dd_span(otel_span: &SdkSpan, cfg: &CachedConfig) -> DdSpan {
    let (trace_id_lower_half, _) = otel_trace_id_to_dd_id(otel_span.trace_id);
    let parent_id = if otel_span.has_parent() {
        otel_span_id_to_dd_id(otel_span.parent_span_id)
    } else {
        0
    };
    let start = time_as_unix_nanos(otel_span.start_time);
    let end = time_as_unix_nanos(otel_span.end_time);

    let mut dd_span = DdSpan {
        trace_id: trace_id_lower_half,
        span_id: otel_span_id_to_dd_id(otel_span.span_id),
        parent_id,
        name: OPERATION_NAME.to_string(),
        resource: otel_span.name.to_string(),
        service: cfg.service().to_string(),
        start,
        // not validated, a span ending before it started keeps its negative duration
        duration: end.wrapping_sub(start),
        // room for the three status tags plus one entry per global tag and per attribute
        meta: std::collections::HashMap::with_capacity(
            3 + cfg.global_tags().len() + otel_span.attributes.len(),
        ),
        ..Default::default()
    };

    let code = code_details(otel_span.status_code);
    let is_error = match otel_span.span_kind {
        SpanKind::Client => {
            dd_span.r#type = "client".to_string();
            code.is_client_error()
        }
        SpanKind::Server => {
            dd_span.r#type = "server".to_string();
            code.is_server_error()
        }
        SpanKind::Producer | SpanKind::Consumer | SpanKind::Internal => code.is_server_error(),
    };

    let description = otel_span.status_message.as_ref();
    if is_error {
        dd_span.error = 1;
        dd_span
            .meta
            .insert(ERROR_TYPE_TAG.to_string(), code.message.to_string());
        if !description.is_empty() {
            dd_span
                .meta
                .insert(ERROR_MSG_TAG.to_string(), description.to_string());
        }
    }

    dd_span.meta.insert(
        STATUS_CODE_TAG.to_string(),
        otel_span.status_code.to_string(),
    );
    dd_span
        .meta
        .insert(STATUS_TAG.to_string(), code.message.into_owned());
    if !description.is_empty() {
        dd_span
            .meta
            .insert(STATUS_DESCRIPTION_TAG.to_string(), description.to_string());
    }

    for attr in cfg.global_tags() {
        set_tag(&mut dd_span, attr.key.as_str(), &attr.value);
    }
    for attr in &otel_span.attributes {
        set_tag(&mut dd_span, attr.key.as_str(), &attr.value);
    }

    dd_span
}
