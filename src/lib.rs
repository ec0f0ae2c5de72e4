// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Conversion of OpenTelemetry spans to Datadog trace agent spans.
//!
//! # Usage
//! ```rust
//! use std::sync::Arc;
//!
//! use datadog_opentelemetry_exporter::{Config, DatadogSpanProcessor, InMemorySpanWriter};
//! use opentelemetry::trace::{Tracer, TracerProvider};
//! use opentelemetry_sdk::trace::SdkTracerProvider;
//!
//! let mut builder = Config::builder();
//! builder.set_service("my-app".to_string());
//!
//! // Any `SpanWriter` can be used, this one keeps the spans in memory
//! let writer = Arc::new(InMemorySpanWriter::new());
//! let provider = SdkTracerProvider::builder()
//!     .with_span_processor(DatadogSpanProcessor::new(&builder.build(), writer.clone()))
//!     .build();
//!
//! provider.tracer("example").in_span("/foo", |_cx| {});
//!
//! let spans = writer.take_spans().unwrap();
//! assert_eq!(spans[0].resource, "/foo");
//! assert_eq!(spans[0].service, "my-app");
//! ```

pub mod core;
pub mod mappings;
mod span_processor;

pub use crate::core::configuration::{Config, ConfigBuilder};
pub use crate::core::log;
pub use crate::core::{Error, Result};
pub use mappings::{
    otel_span_to_dd_span, Attribute, AttributeValue, CachedConfig, DdSpan, SdkSpan, StatusCode,
};
pub use span_processor::{DatadogSpanProcessor, InMemorySpanWriter, SpanWriter, SpanWriterError};
