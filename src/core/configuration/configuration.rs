// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use super::sources::{CompositeConfigSourceResult, CompositeSource};
use crate::core::{
    constants::{ENV_TAG, VERSION_TAG},
    log::LevelFilter,
};
use crate::mappings::{Attribute, AttributeValue};

const DEFAULT_SERVICE_NAME: &str = "unnamed-rust-service";

#[derive(Debug, Clone)]
#[non_exhaustive]
/// Configuration for the Datadog span exporter
///
/// # Usage
/// ```
/// use datadog_opentelemetry_exporter::{Attribute, Config};
///
/// // This pulls configuration from the environment
/// let mut builder = Config::builder();
///
/// // Manual overrides
/// builder
///     .set_service("checkout".to_string())
///     .add_global_tag(Attribute::new("team", "payments"));
///
/// let config = builder.build();
/// assert_eq!(config.service(), "checkout");
/// ```
pub struct Config {
    // # Service tagging
    service: String,
    env: Option<String>,
    version: Option<String>,

    /// Tags added to every converted span, before the span's own attributes
    /// DD_ENV and DD_VERSION are applied after them and win over `env`/`version` from DD_TAGS
    global_tags: Vec<Attribute>,

    /// The log level for the exporter
    log_level_filter: LevelFilter,
}

impl Config {
    fn from_sources(sources: &CompositeSource) -> (Self, Vec<String>) {
        let default = Config::default();
        let mut errors = Vec::new();

        /// Keeps the selected value and records why the rejected candidates failed to parse
        fn to_val<T>(res: CompositeConfigSourceResult<T>, errors: &mut Vec<String>) -> Option<T> {
            errors.extend(res.errors.iter().map(|e| format!("{}: {e}", res.name)));
            res.value.map(|c| c.value)
        }

        /// Wrapper to parse "," separated key:value tags, discarding tags without ":"
        struct DdKeyValueTags(Vec<(String, String)>);

        impl FromStr for DdKeyValueTags {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(DdKeyValueTags(
                    s.split(',')
                        .filter_map(|s| {
                            s.split_once(':')
                                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                        })
                        .filter(|(k, _)| !k.is_empty())
                        .collect(),
                ))
            }
        }

        let service = to_val(sources.get("DD_SERVICE"), &mut errors);
        let env = to_val(sources.get("DD_ENV"), &mut errors);
        let version = to_val(sources.get("DD_VERSION"), &mut errors);
        let global_tags = to_val(sources.get_parse::<DdKeyValueTags>("DD_TAGS"), &mut errors);
        let log_level_filter =
            to_val(sources.get_parse::<LevelFilter>("DD_LOG_LEVEL"), &mut errors);

        let config = Self {
            service: service.unwrap_or(default.service),
            env: env.or(default.env),
            version: version.or(default.version),
            global_tags: global_tags
                .map(|DdKeyValueTags(tags)| {
                    tags.into_iter()
                        .map(|(k, v)| Attribute::new(k, v))
                        .collect()
                })
                .unwrap_or(default.global_tags),
            log_level_filter: log_level_filter.unwrap_or(default.log_level_filter),
        };
        (config, errors)
    }

    fn builder_with_sources(sources: &CompositeSource) -> ConfigBuilder {
        let (config, parse_errors) = Config::from_sources(sources);
        ConfigBuilder {
            config,
            parse_errors,
        }
    }

    /// Creates a new builder to set overrides detected configuration
    pub fn builder() -> ConfigBuilder {
        Self::builder_with_sources(&CompositeSource::default_sources())
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn env(&self) -> Option<&str> {
        self.env.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Global tags in the order they are applied to spans
    ///
    /// `env` and `version` come last so they override any tag of the same key.
    pub fn global_tags(&self) -> impl Iterator<Item = Attribute> + '_ {
        let env = self
            .env
            .as_ref()
            .map(|env| Attribute::new(ENV_TAG, AttributeValue::from(env.clone())));
        let version = self
            .version
            .as_ref()
            .map(|version| Attribute::new(VERSION_TAG, AttributeValue::from(version.clone())));
        self.global_tags.iter().cloned().chain(env).chain(version)
    }

    pub fn log_level_filter(&self) -> &LevelFilter {
        &self.log_level_filter
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service: DEFAULT_SERVICE_NAME.to_string(),
            env: None,
            version: None,
            global_tags: Vec::new(),
            log_level_filter: LevelFilter::default(),
        }
    }
}

pub struct ConfigBuilder {
    config: Config,
    parse_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Finalizes the builder and returns the configuration
    pub fn build(&self) -> Config {
        crate::core::log::set_max_level(self.config.log_level_filter);
        for error in &self.parse_errors {
            crate::dd_warn!("Config: ignoring invalid configuration value {error}");
        }
        self.config.clone()
    }

    pub fn set_service(&mut self, service: String) -> &mut Self {
        self.config.service = service;
        self
    }

    pub fn set_env(&mut self, env: String) -> &mut Self {
        self.config.env = Some(env);
        self
    }

    pub fn set_version(&mut self, version: String) -> &mut Self {
        self.config.version = Some(version);
        self
    }

    pub fn set_global_tags(&mut self, tags: Vec<Attribute>) -> &mut Self {
        self.config.global_tags = tags;
        self
    }

    pub fn add_global_tag(&mut self, tag: Attribute) -> &mut Self {
        self.config.global_tags.push(tag);
        self
    }

    pub fn set_log_level_filter(&mut self, filter: LevelFilter) -> &mut Self {
        self.config.log_level_filter = filter;
        self
    }
}
