// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Configuration, logging and error plumbing shared by the exporter

pub mod configuration;
pub mod constants;

mod error;
pub use error::{Error, Result};

pub mod log;
