// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, time::SystemTime};

use opentelemetry::{
    trace::{SpanKind, Status},
    Key, KeyValue, SpanId, TraceId, Value,
};
use opentelemetry_semantic_conventions::attribute::RPC_GRPC_STATUS_CODE;

use super::transform::status::StatusCode;

/// Value of a span attribute
///
/// This is a closed set of types: instrumentation can only attach the types listed here.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// No value was set for the attribute
    Invalid,
    Bool(bool),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(Cow<'static, str>),
    Array(opentelemetry::Array),
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(v: $ty) -> Self {
                    AttributeValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    opentelemetry::Array => Array,
);

impl From<&'static str> for AttributeValue {
    fn from(v: &'static str) -> Self {
        AttributeValue::String(Cow::Borrowed(v))
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(Cow::Owned(v))
    }
}

impl From<Cow<'static, str>> for AttributeValue {
    fn from(v: Cow<'static, str>) -> Self {
        AttributeValue::String(v)
    }
}

impl From<Value> for AttributeValue {
    fn from(v: Value) -> Self {
        #[allow(unreachable_patterns)]
        match v {
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::I64(i) => AttributeValue::I64(i),
            Value::F64(f) => AttributeValue::F64(f),
            Value::String(s) => AttributeValue::String(Cow::Owned(s.as_str().to_owned())),
            Value::Array(a) => AttributeValue::Array(a),
            _ => AttributeValue::Invalid,
        }
    }
}

/// A key/value annotation set on a span by instrumentation code
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub key: Key,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new<K: Into<Key>, V: Into<AttributeValue>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<KeyValue> for Attribute {
    fn from(kv: KeyValue) -> Self {
        Self {
            key: kv.key,
            value: kv.value.into(),
        }
    }
}

/// A finished span, as handed over by the OpenTelemetry SDK
///
/// We don't use the `opentelemetry_sdk::trace::SpanData` directly because its status model
/// has no RPC status code and its attribute values don't carry the full set of numeric types.
#[derive(Debug, Clone)]
pub struct SdkSpan {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    /// `SpanId::INVALID` for root spans
    pub parent_span_id: SpanId,
    pub span_kind: SpanKind,
    pub name: Cow<'static, str>,
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    pub status_code: StatusCode,
    /// Human readable status, empty if not set
    pub status_message: Cow<'static, str>,
    pub attributes: Vec<Attribute>,
}

impl SdkSpan {
    pub fn from_sdk_span_data(span: opentelemetry_sdk::trace::SpanData) -> Self {
        let grpc_code = span.attributes.iter().find_map(|kv| {
            if kv.key.as_str() != RPC_GRPC_STATUS_CODE {
                return None;
            }
            match kv.value {
                Value::I64(code) => u32::try_from(code).ok(),
                _ => None,
            }
        });
        let (status_code, status_message) = match span.status {
            Status::Error { description } => {
                (grpc_code.map_or(StatusCode::UNKNOWN, StatusCode), description)
            }
            Status::Ok | Status::Unset => (
                grpc_code.map_or(StatusCode::OK, StatusCode),
                Cow::Borrowed(""),
            ),
        };

        Self {
            trace_id: span.span_context.trace_id(),
            span_id: span.span_context.span_id(),
            parent_span_id: span.parent_span_id,
            span_kind: span.span_kind,
            name: span.name,
            start_time: span.start_time,
            end_time: span.end_time,
            status_code,
            status_message,
            attributes: span.attributes.into_iter().map(Attribute::from).collect(),
        }
    }

    pub fn has_parent(&self) -> bool {
        self.parent_span_id != SpanId::INVALID
    }
}
