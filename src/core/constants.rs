// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Attribute and tag names shared with the trace agent and the tracing libraries

/// Operation name given to every converted span unless `span.name` overrides it
pub const OPERATION_NAME: &str = "opentelemetry";

pub const ERROR_KEY: &str = "error";
pub const ERROR_MSG_TAG: &str = "error.msg";
pub const ERROR_TYPE_TAG: &str = "error.type";

pub const SERVICE_NAME_KEY: &str = "service.name";
pub const RESOURCE_NAME_KEY: &str = "resource.name";
pub const SPAN_TYPE_KEY: &str = "span.type";
pub const SPAN_NAME_KEY: &str = "span.name";

pub const SAMPLING_PRIORITY_KEY: &str = "sampling.priority";
pub const SAMPLING_PRIORITY_TAG_KEY: &str = "_sampling_priority_v1";

pub const ANALYTICS_EVENT_KEY: &str = "analytics.event";
pub const SAMPLING_RATE_EVENT_EXTRACTION_KEY: &str = "_dd1.sr.eausr";

pub const STATUS_CODE_TAG: &str = "opentelemetry.status_code";
pub const STATUS_TAG: &str = "opentelemetry.status";
pub const STATUS_DESCRIPTION_TAG: &str = "opentelemetry.status_description";

pub(crate) const ENV_TAG: &str = "env";
pub(crate) const VERSION_TAG: &str = "version";
