// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Glue between the OpenTelemetry SDK and a trace agent transport
//!
//! The processor converts spans as they end and hands them over to a [`SpanWriter`].
//! Batching, encoding and delivery are the writer's business.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use opentelemetry_sdk::{
    error::{OTelSdkError, OTelSdkResult},
    trace::SpanData,
};

use crate::{
    core::Result,
    mappings::{otel_span_to_dd_span, CachedConfig, DdSpan, SdkSpan},
    Config,
};

/// Destination of converted spans
pub trait SpanWriter: Send + Sync + fmt::Debug {
    fn write(&self, span: DdSpan) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.flush()
    }
}

impl<W: SpanWriter + ?Sized> SpanWriter for Arc<W> {
    fn write(&self, span: DdSpan) -> Result<()> {
        (**self).write(span)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn shutdown(&self) -> Result<()> {
        (**self).shutdown()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpanWriterError {
    #[error("span writer already shut down")]
    Shutdown,
    #[error("span writer lock poisoned")]
    Poisoned,
}

/// Span writer keeping every span in memory
#[derive(Debug, Default)]
pub struct InMemorySpanWriter {
    spans: Mutex<Vec<DdSpan>>,
    is_shutdown: AtomicBool,
}

impl InMemorySpanWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the spans written so far and clears the buffer
    pub fn take_spans(&self) -> Result<Vec<DdSpan>> {
        let mut spans = self.spans.lock().map_err(|_| SpanWriterError::Poisoned)?;
        Ok(std::mem::take(&mut *spans))
    }
}

impl SpanWriter for InMemorySpanWriter {
    fn write(&self, span: DdSpan) -> Result<()> {
        if self.is_shutdown.load(Ordering::Acquire) {
            return Err(SpanWriterError::Shutdown.into());
        }
        self.spans
            .lock()
            .map_err(|_| SpanWriterError::Poisoned)?
            .push(span);
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        self.is_shutdown.store(true, Ordering::Release);
        Ok(())
    }
}

/// Span processor converting every ended span and passing it to a [`SpanWriter`]
pub struct DatadogSpanProcessor<W> {
    config: CachedConfig,
    writer: W,
    is_shutdown: AtomicBool,
}

impl<W: SpanWriter> fmt::Debug for DatadogSpanProcessor<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatadogSpanProcessor")
            .field("config", &self.config)
            .field("writer", &self.writer)
            .finish()
    }
}

impl<W: SpanWriter> DatadogSpanProcessor<W> {
    pub fn new(config: &Config, writer: W) -> Self {
        Self::with_cached_config(CachedConfig::from_config(config), writer)
    }

    pub fn with_cached_config(config: CachedConfig, writer: W) -> Self {
        Self {
            config,
            writer,
            is_shutdown: AtomicBool::new(false),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: SpanWriter> opentelemetry_sdk::trace::SpanProcessor for DatadogSpanProcessor<W> {
    fn on_start(
        &self,
        _span: &mut opentelemetry_sdk::trace::Span,
        _parent_ctx: &opentelemetry::Context,
    ) {
    }

    fn on_end(&self, span: SpanData) {
        if self.is_shutdown.load(Ordering::Acquire) {
            crate::dd_debug!(
                "DatadogSpanProcessor.on_end message='Span ended after shutdown, dropping it'"
            );
            return;
        }
        let dd_span = otel_span_to_dd_span(&SdkSpan::from_sdk_span_data(span), &self.config);
        if let Err(e) = self.writer.write(dd_span) {
            crate::dd_error!(
                "DatadogSpanProcessor.on_end message='Failed to write span' error='{e}'"
            );
        }
    }

    fn force_flush(&self) -> OTelSdkResult {
        self.writer
            .flush()
            .map_err(|e| OTelSdkError::InternalFailure(e.to_string()))
    }

    fn shutdown(&self) -> OTelSdkResult {
        if self.is_shutdown.swap(true, Ordering::AcqRel) {
            return Err(OTelSdkError::AlreadyShutdown);
        }
        self.writer
            .shutdown()
            .map_err(|e| OTelSdkError::InternalFailure(e.to_string()))
    }
}
