// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::Attribute;

/// The part of the configuration read for every span conversion
#[derive(Debug, Clone)]
pub struct CachedConfig {
    service: String,
    global_tags: Vec<Attribute>,
}

impl CachedConfig {
    pub fn new(service: impl Into<String>, global_tags: Vec<Attribute>) -> Self {
        Self {
            service: service.into(),
            global_tags,
        }
    }

    pub fn from_config(cfg: &crate::Config) -> Self {
        Self::new(cfg.service(), cfg.global_tags().collect())
    }

    /// Service name of spans that don't set `service.name`
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Tags applied to every span, in order
    pub fn global_tags(&self) -> &[Attribute] {
        &self.global_tags
    }
}
