// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Routing of span attributes to the tags, metrics and fields of a [`DdSpan`]

use crate::core::constants::{
    ANALYTICS_EVENT_KEY, ERROR_KEY, ERROR_MSG_TAG, RESOURCE_NAME_KEY,
    SAMPLING_PRIORITY_KEY, SAMPLING_PRIORITY_TAG_KEY, SAMPLING_RATE_EVENT_EXTRACTION_KEY,
    SERVICE_NAME_KEY, SPAN_NAME_KEY, SPAN_TYPE_KEY,
};
use crate::mappings::{AttributeValue, DdSpan};

/// Applies a single attribute to the span.
///
/// The `error` key always sets the error flag. Otherwise strings and booleans become tags,
/// numbers become metrics, and a few reserved keys override span fields instead.
pub fn set_tag(dd_span: &mut DdSpan, key: &str, value: &AttributeValue) {
    if key == ERROR_KEY {
        set_error(dd_span, value);
        return;
    }
    match value {
        AttributeValue::String(s) => set_string_tag(dd_span, key, s),
        AttributeValue::Bool(true) => set_string_tag(dd_span, key, "true"),
        AttributeValue::Bool(false) => set_string_tag(dd_span, key, "false"),
        AttributeValue::F32(v) => set_metric(dd_span, key, f64::from(*v)),
        AttributeValue::F64(v) => set_metric(dd_span, key, *v),
        AttributeValue::I32(v) => set_metric(dd_span, key, f64::from(*v)),
        AttributeValue::I64(v) => set_metric(dd_span, key, *v as f64),
        AttributeValue::U32(v) => set_metric(dd_span, key, f64::from(*v)),
        AttributeValue::U64(v) => set_metric(dd_span, key, *v as f64),
        AttributeValue::Array(a) => {
            // The SDK never hands out arrays for these attributes, render them anyway
            crate::dd_debug!("set_tag: rendering array attribute {key} as a string tag");
            set_string_tag(dd_span, key, &a.to_string())
        }
        AttributeValue::Invalid => {
            crate::dd_debug!("set_tag: ignoring attribute {key} without a value");
        }
    }
}

/// Sets the error flag from the value of the `error` attribute
pub fn set_error(dd_span: &mut DdSpan, value: &AttributeValue) {
    dd_span.error = match value {
        AttributeValue::String(msg) => {
            dd_span
                .meta
                .insert(ERROR_MSG_TAG.to_string(), msg.to_string());
            1
        }
        AttributeValue::Bool(b) => i32::from(*b),
        AttributeValue::I32(v) => i32::from(*v > 0),
        AttributeValue::I64(v) => i32::from(*v > 0),
        AttributeValue::U32(v) => i32::from(*v > 0),
        AttributeValue::U64(v) => i32::from(*v > 0),
        AttributeValue::Invalid => 0,
        AttributeValue::F32(_) | AttributeValue::F64(_) | AttributeValue::Array(_) => {
            crate::dd_debug!("set_error: unexpected error value {value:?}, flagging the span");
            1
        }
    };
}

/// Stores a string tag, unless the key is one of the reserved keys overriding span fields
///
/// A metric previously stored under the same key is removed.
pub fn set_string_tag(dd_span: &mut DdSpan, key: &str, value: &str) {
    match key {
        SERVICE_NAME_KEY => dd_span.service = value.to_string(),
        RESOURCE_NAME_KEY => dd_span.resource = value.to_string(),
        SPAN_TYPE_KEY => dd_span.r#type = value.to_string(),
        SPAN_NAME_KEY => dd_span.name = value.to_string(),
        ANALYTICS_EVENT_KEY => set_metric(
            dd_span,
            SAMPLING_RATE_EVENT_EXTRACTION_KEY,
            if value != "false" { 1.0 } else { 0.0 },
        ),
        _ => {
            dd_span.metrics.remove(key);
            dd_span.meta.insert(key.to_string(), value.to_string());
        }
    }
}

/// Stores a metric, `sampling.priority` goes under the agent's internal key
///
/// A tag previously stored under the same key is removed.
pub fn set_metric(dd_span: &mut DdSpan, key: &str, value: f64) {
    let key = match key {
        SAMPLING_PRIORITY_KEY => SAMPLING_PRIORITY_TAG_KEY,
        _ => key,
    };
    dd_span.meta.remove(key);
    dd_span.metrics.insert(key.to_string(), value);
}
