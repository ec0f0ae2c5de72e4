// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Mapping of RPC status codes to a display message and the HTTP status class they imply
//!
//! The code space is the one of https://github.com/googleapis/googleapis/blob/master/google/rpc/code.proto

use std::{borrow::Cow, fmt};

/// Outcome of a span, in the RPC status code space
///
/// The default is `OK`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const CANCELLED: StatusCode = StatusCode(1);
    pub const UNKNOWN: StatusCode = StatusCode(2);
    pub const INVALID_ARGUMENT: StatusCode = StatusCode(3);
    pub const DEADLINE_EXCEEDED: StatusCode = StatusCode(4);
    pub const NOT_FOUND: StatusCode = StatusCode(5);
    pub const ALREADY_EXISTS: StatusCode = StatusCode(6);
    pub const PERMISSION_DENIED: StatusCode = StatusCode(7);
    pub const RESOURCE_EXHAUSTED: StatusCode = StatusCode(8);
    pub const FAILED_PRECONDITION: StatusCode = StatusCode(9);
    pub const ABORTED: StatusCode = StatusCode(10);
    pub const OUT_OF_RANGE: StatusCode = StatusCode(11);
    pub const UNIMPLEMENTED: StatusCode = StatusCode(12);
    pub const INTERNAL: StatusCode = StatusCode(13);
    pub const UNAVAILABLE: StatusCode = StatusCode(14);
    pub const DATA_LOSS: StatusCode = StatusCode(15);
    pub const UNAUTHENTICATED: StatusCode = StatusCode(16);
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        StatusCode(code)
    }
}

/// Message and HTTP status equivalent of a status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDetails {
    pub message: Cow<'static, str>,
    /// Only used to bucket the code into 4xx/5xx, never sent as is
    pub http_status: u16,
}

impl CodeDetails {
    pub fn is_client_error(&self) -> bool {
        self.http_status / 100 == 4
    }

    pub fn is_server_error(&self) -> bool {
        self.http_status / 100 == 5
    }
}

const HTTP_INTERNAL_SERVER_ERROR: u16 = 500;

const STATUS_CODES: &[(StatusCode, &str, u16)] = &[
    (StatusCode::OK, "OK", 200),
    (StatusCode::CANCELLED, "CANCELLED", 499),
    (StatusCode::UNKNOWN, "UNKNOWN", HTTP_INTERNAL_SERVER_ERROR),
    (StatusCode::INVALID_ARGUMENT, "INVALID_ARGUMENT", 400),
    (StatusCode::DEADLINE_EXCEEDED, "DEADLINE_EXCEEDED", 504),
    (StatusCode::NOT_FOUND, "NOT_FOUND", 404),
    (StatusCode::ALREADY_EXISTS, "ALREADY_EXISTS", 409),
    (StatusCode::PERMISSION_DENIED, "PERMISSION_DENIED", 403),
    (StatusCode::RESOURCE_EXHAUSTED, "RESOURCE_EXHAUSTED", 429),
    (StatusCode::FAILED_PRECONDITION, "FAILED_PRECONDITION", 400),
    (StatusCode::ABORTED, "ABORTED", 409),
    (StatusCode::OUT_OF_RANGE, "OUT_OF_RANGE", 400),
    (StatusCode::UNIMPLEMENTED, "UNIMPLEMENTED", 501),
    (StatusCode::INTERNAL, "INTERNAL", HTTP_INTERNAL_SERVER_ERROR),
    (StatusCode::UNAVAILABLE, "UNAVAILABLE", 503),
    (StatusCode::DATA_LOSS, "DATA_LOSS", 501),
    (StatusCode::UNAUTHENTICATED, "UNAUTHENTICATED", 401),
];

/// Looks up the details of a status code.
///
/// Codes outside of the table are reported as `ERR_CODE_<code>` and treated as server errors.
pub fn code_details(code: StatusCode) -> CodeDetails {
    match STATUS_CODES.iter().find(|(c, _, _)| *c == code) {
        Some((_, message, http_status)) => CodeDetails {
            message: Cow::Borrowed(*message),
            http_status: *http_status,
        },
        None => {
            crate::dd_debug!(
                "code_details: unknown status code {code}, reporting it as a server error"
            );
            CodeDetails {
                message: Cow::Owned(format!("ERR_CODE_{code}")),
                http_status: HTTP_INTERNAL_SERVER_ERROR,
            }
        }
    }
}
