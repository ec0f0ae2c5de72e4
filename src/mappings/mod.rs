// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Span conversion logic from Opentelemetry to Datadog

mod cached_config;
mod dd_span;
mod sdk_span;
mod transform;

pub use cached_config::CachedConfig;
pub use dd_span::DdSpan;
pub use sdk_span::{Attribute, AttributeValue, SdkSpan};
pub use transform::{
    otel_span_to_dd_span,
    status::{code_details, CodeDetails, StatusCode},
    tags,
};
