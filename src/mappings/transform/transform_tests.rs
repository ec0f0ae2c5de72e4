// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::{
    borrow::Cow,
    collections::HashMap,
    time::{Duration, SystemTime},
};

use opentelemetry::{trace::SpanKind, SpanId, TraceId};
use pretty_assertions::assert_eq;

use crate::core::constants::{
    ERROR_KEY, ERROR_MSG_TAG, ERROR_TYPE_TAG, RESOURCE_NAME_KEY, SAMPLING_PRIORITY_KEY,
    SAMPLING_PRIORITY_TAG_KEY, SERVICE_NAME_KEY, SPAN_TYPE_KEY, STATUS_CODE_TAG,
    STATUS_DESCRIPTION_TAG, STATUS_TAG,
};
use crate::mappings::{
    otel_span_to_dd_span, Attribute, AttributeValue, CachedConfig, DdSpan, SdkSpan, StatusCode,
};

const TRACE_ID: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
const SPAN_ID: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

// Low 64 bits of TRACE_ID and SPAN_ID, big endian
const DD_TRACE_ID: u64 = 651345242494996240;
const DD_SPAN_ID: u64 = 72623859790382856;

fn start_time() -> SystemTime {
    // unix epoch + 31 years
    SystemTime::UNIX_EPOCH + Duration::from_secs(60 * 60 * 24 * 365 * 31)
}

fn end_time() -> SystemTime {
    start_time() + Duration::from_secs(10)
}

fn nanos(t: SystemTime) -> i64 {
    t.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_nanos() as i64
}

fn test_config() -> CachedConfig {
    CachedConfig::new("my-service", vec![])
}

fn input_span(span_kind: SpanKind) -> SdkSpan {
    SdkSpan {
        trace_id: TraceId::from_bytes(TRACE_ID),
        span_id: SpanId::from_bytes(SPAN_ID),
        parent_span_id: SpanId::INVALID,
        span_kind,
        name: Cow::Borrowed("/a/b"),
        start_time: start_time(),
        end_time: end_time(),
        status_code: StatusCode::OK,
        status_message: Cow::Borrowed(""),
        attributes: vec![],
    }
}

fn expected_span(r#type: &str, meta: &[(&str, &str)]) -> DdSpan {
    DdSpan {
        trace_id: DD_TRACE_ID,
        span_id: DD_SPAN_ID,
        parent_id: 0,
        r#type: r#type.to_string(),
        name: "opentelemetry".to_string(),
        resource: "/a/b".to_string(),
        service: "my-service".to_string(),
        start: nanos(start_time()),
        duration: 10_000_000_000,
        error: 0,
        meta: meta
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        metrics: HashMap::new(),
    }
}

struct Test {
    name: &'static str,
    input_span: SdkSpan,
    expected_out: DdSpan,
}

fn test_cases() -> Vec<Test> {
    vec![
        Test {
            name: "root",
            input_span: SdkSpan {
                attributes: vec![
                    Attribute::new("str", "abc"),
                    Attribute::new("bool", true),
                    Attribute::new("int64", 1_i64),
                ],
                status_message: Cow::Borrowed("status-msg"),
                ..input_span(SpanKind::Client)
            },
            expected_out: DdSpan {
                metrics: HashMap::from([("int64".to_string(), 1.0)]),
                ..expected_span(
                    "client",
                    &[
                        ("bool", "true"),
                        ("str", "abc"),
                        (STATUS_TAG, "OK"),
                        (STATUS_CODE_TAG, "0"),
                        (STATUS_DESCRIPTION_TAG, "status-msg"),
                    ],
                )
            },
        },
        Test {
            name: "child",
            input_span: SdkSpan {
                parent_span_id: SpanId::from_bytes([8, 7, 6, 5, 4, 3, 2, 1]),
                ..input_span(SpanKind::Client)
            },
            expected_out: DdSpan {
                parent_id: 578437695752307201,
                ..expected_span("client", &[(STATUS_TAG, "OK"), (STATUS_CODE_TAG, "0")])
            },
        },
        Test {
            name: "server_error_4xx",
            input_span: SdkSpan {
                status_code: StatusCode::CANCELLED,
                status_message: Cow::Borrowed("status-msg"),
                ..input_span(SpanKind::Server)
            },
            expected_out: expected_span(
                "server",
                &[
                    (STATUS_TAG, "CANCELLED"),
                    (STATUS_CODE_TAG, "1"),
                    (STATUS_DESCRIPTION_TAG, "status-msg"),
                ],
            ),
        },
        Test {
            name: "server_error_5xx",
            input_span: SdkSpan {
                status_code: StatusCode::INTERNAL,
                status_message: Cow::Borrowed("status-msg"),
                ..input_span(SpanKind::Server)
            },
            expected_out: DdSpan {
                error: 1,
                ..expected_span(
                    "server",
                    &[
                        (ERROR_MSG_TAG, "status-msg"),
                        (ERROR_TYPE_TAG, "INTERNAL"),
                        (STATUS_TAG, "INTERNAL"),
                        (STATUS_CODE_TAG, "13"),
                        (STATUS_DESCRIPTION_TAG, "status-msg"),
                    ],
                )
            },
        },
        Test {
            name: "client_error_4xx",
            input_span: SdkSpan {
                status_code: StatusCode::CANCELLED,
                status_message: Cow::Borrowed("status-msg"),
                ..input_span(SpanKind::Client)
            },
            expected_out: DdSpan {
                error: 1,
                ..expected_span(
                    "client",
                    &[
                        (ERROR_MSG_TAG, "status-msg"),
                        (ERROR_TYPE_TAG, "CANCELLED"),
                        (STATUS_TAG, "CANCELLED"),
                        (STATUS_CODE_TAG, "1"),
                        (STATUS_DESCRIPTION_TAG, "status-msg"),
                    ],
                )
            },
        },
        Test {
            name: "client_error_5xx",
            input_span: SdkSpan {
                status_code: StatusCode::INTERNAL,
                status_message: Cow::Borrowed("status-msg"),
                ..input_span(SpanKind::Client)
            },
            expected_out: expected_span(
                "client",
                &[
                    (STATUS_TAG, "INTERNAL"),
                    (STATUS_CODE_TAG, "13"),
                    (STATUS_DESCRIPTION_TAG, "status-msg"),
                ],
            ),
        },
        Test {
            name: "internal_error_without_description",
            input_span: SdkSpan {
                status_code: StatusCode::UNAVAILABLE,
                ..input_span(SpanKind::Internal)
            },
            expected_out: DdSpan {
                error: 1,
                ..expected_span(
                    "",
                    &[
                        (ERROR_TYPE_TAG, "UNAVAILABLE"),
                        (STATUS_TAG, "UNAVAILABLE"),
                        (STATUS_CODE_TAG, "14"),
                    ],
                )
            },
        },
        Test {
            name: "unknown_status_code",
            input_span: SdkSpan {
                status_code: StatusCode(99),
                ..input_span(SpanKind::Producer)
            },
            expected_out: DdSpan {
                error: 1,
                ..expected_span(
                    "",
                    &[
                        (ERROR_TYPE_TAG, "ERR_CODE_99"),
                        (STATUS_TAG, "ERR_CODE_99"),
                        (STATUS_CODE_TAG, "99"),
                    ],
                )
            },
        },
        Test {
            name: "tags",
            input_span: SdkSpan {
                attributes: vec![
                    Attribute::new(ERROR_KEY, true),
                    Attribute::new(SERVICE_NAME_KEY, "other-service"),
                    Attribute::new(RESOURCE_NAME_KEY, "other-resource"),
                    Attribute::new(SPAN_TYPE_KEY, "other-type"),
                    Attribute::new(SAMPLING_PRIORITY_KEY, -1_i64),
                ],
                ..input_span(SpanKind::Server)
            },
            expected_out: DdSpan {
                r#type: "other-type".to_string(),
                resource: "other-resource".to_string(),
                service: "other-service".to_string(),
                error: 1,
                metrics: HashMap::from([(SAMPLING_PRIORITY_TAG_KEY.to_string(), -1.0)]),
                ..expected_span("server", &[(STATUS_TAG, "OK"), (STATUS_CODE_TAG, "0")])
            },
        },
        Test {
            name: "slash",
            input_span: SdkSpan {
                name: Cow::Borrowed("/"),
                ..input_span(SpanKind::Client)
            },
            expected_out: DdSpan {
                resource: "/".to_string(),
                ..expected_span("client", &[(STATUS_TAG, "OK"), (STATUS_CODE_TAG, "0")])
            },
        },
        Test {
            name: "negative_duration",
            input_span: SdkSpan {
                start_time: end_time(),
                end_time: start_time(),
                ..input_span(SpanKind::Consumer)
            },
            expected_out: DdSpan {
                start: nanos(end_time()),
                duration: -10_000_000_000,
                ..expected_span("", &[(STATUS_TAG, "OK"), (STATUS_CODE_TAG, "0")])
            },
        },
    ]
}

#[test]
fn test_otel_span_to_dd_span() {
    let cfg = test_config();
    for test in test_cases() {
        let output = otel_span_to_dd_span(&test.input_span, &cfg);
        assert_eq!(output, test.expected_out, "test case {}", test.name);
    }
}

#[test]
fn test_global_tags() {
    let cfg = CachedConfig::new(
        "my-service",
        vec![
            Attribute::new("key1", "value1"),
            Attribute::new("shared", "global"),
            Attribute::new("weight", 2.5_f64),
            Attribute::new("replicas", 3_u32),
        ],
    );
    let span = SdkSpan {
        attributes: vec![
            Attribute::new("shared", "local"),
            Attribute::new("replicas", 5_i32),
        ],
        ..input_span(SpanKind::Server)
    };

    let output = otel_span_to_dd_span(&span, &cfg);

    assert_eq!(output.meta["key1"], "value1");
    assert_eq!(output.meta["shared"], "local");
    assert_eq!(output.metrics["weight"], 2.5);
    assert_eq!(output.metrics["replicas"], 5.0);
}

#[test]
fn test_local_attribute_replaces_global_tag_of_other_type() {
    let cfg = CachedConfig::new(
        "my-service",
        vec![
            Attribute::new("retries", "many"),
            Attribute::new("ratio", 0.5_f64),
        ],
    );
    let span = SdkSpan {
        attributes: vec![
            Attribute::new("retries", 3_i64),
            Attribute::new("ratio", "half"),
        ],
        ..input_span(SpanKind::Server)
    };

    let output = otel_span_to_dd_span(&span, &cfg);

    assert_eq!(output.metrics, HashMap::from([("retries".to_string(), 3.0)]));
    assert_eq!(output.meta["ratio"], "half");
    assert!(!output.meta.contains_key("retries"));
    assert!(!output.metrics.contains_key("ratio"));
}

#[test]
fn test_global_service_name_overridden_by_span() {
    let cfg = CachedConfig::new(
        "my-service",
        vec![Attribute::new(SERVICE_NAME_KEY, "global-service")],
    );

    let output = otel_span_to_dd_span(&input_span(SpanKind::Server), &cfg);
    assert_eq!(output.service, "global-service");

    let span = SdkSpan {
        attributes: vec![Attribute::new(SERVICE_NAME_KEY, "local-service")],
        ..input_span(SpanKind::Server)
    };
    let output = otel_span_to_dd_span(&span, &cfg);
    assert_eq!(output.service, "local-service");
    assert!(!output.meta.contains_key(SERVICE_NAME_KEY));
}

#[test]
fn test_error_attribute_overrides_status() {
    // 5xx status flags the span, a falsy error attribute clears it again
    let span = SdkSpan {
        status_code: StatusCode::INTERNAL,
        attributes: vec![Attribute::new(ERROR_KEY, 0_i64)],
        ..input_span(SpanKind::Server)
    };
    let output = otel_span_to_dd_span(&span, &test_config());

    assert_eq!(output.error, 0);
    assert_eq!(output.meta[ERROR_TYPE_TAG], "INTERNAL");
}

#[test]
fn test_error_attribute_message() {
    let span = SdkSpan {
        attributes: vec![Attribute::new(ERROR_KEY, "disk full")],
        ..input_span(SpanKind::Internal)
    };
    let output = otel_span_to_dd_span(&span, &test_config());

    assert_eq!(output.error, 1);
    assert_eq!(output.meta[ERROR_MSG_TAG], "disk full");
    assert!(!output.meta.contains_key(ERROR_KEY));
}

#[test]
fn test_span_name_and_ignored_attributes() {
    let span = SdkSpan {
        attributes: vec![
            Attribute::new("span.name", "http.request"),
            Attribute::new("empty", AttributeValue::Invalid),
            Attribute::new("analytics.event", true),
        ],
        ..input_span(SpanKind::Client)
    };
    let output = otel_span_to_dd_span(&span, &test_config());

    assert_eq!(output.name, "http.request");
    assert!(!output.meta.contains_key("empty"));
    assert!(!output.metrics.contains_key("empty"));
    assert_eq!(
        output.metrics,
        HashMap::from([("_dd1.sr.eausr".to_string(), 1.0)])
    );
}

#[test]
fn test_status_tags_only_error_tags_follow_error_flag() {
    for code in (0..=16).map(StatusCode) {
        for kind in [SpanKind::Client, SpanKind::Server, SpanKind::Internal] {
            let span = SdkSpan {
                status_code: code,
                status_message: Cow::Borrowed("details"),
                ..input_span(kind.clone())
            };
            let output = otel_span_to_dd_span(&span, &test_config());

            assert_eq!(output.meta[STATUS_CODE_TAG], code.to_string());
            assert_eq!(output.meta[STATUS_DESCRIPTION_TAG], "details");
            assert!(output.meta.contains_key(STATUS_TAG));
            assert_eq!(
                output.error == 1,
                output.meta.contains_key(ERROR_TYPE_TAG),
                "code {code} kind {kind:?}"
            );
            assert_eq!(
                output.error == 1,
                output.meta.contains_key(ERROR_MSG_TAG),
                "code {code} kind {kind:?}"
            );
        }
    }
}
