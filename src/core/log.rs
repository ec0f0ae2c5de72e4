// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

static MAX_LOG_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Error as usize);

pub(crate) fn set_max_level(lvl: LevelFilter) {
    MAX_LOG_LEVEL.store(lvl as usize, Ordering::Relaxed)
}

pub fn max_level() -> LevelFilter {
    LevelFilter::from_usize(MAX_LOG_LEVEL.load(Ordering::Relaxed))
}

#[repr(usize)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd)]
#[non_exhaustive]
/// The level at which the exporter will log
pub enum LevelFilter {
    Off,
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl LevelFilter {
    fn from_usize(v: usize) -> Self {
        match v {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("debug") {
            Ok(LevelFilter::Debug)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(LevelFilter::Info)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(LevelFilter::Warn)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(LevelFilter::Error)
        } else if s.eq_ignore_ascii_case("off") {
            Ok(LevelFilter::Off)
        } else {
            Err("log level filter should be one of DEBUG, INFO, WARN, ERROR, OFF")
        }
    }
}

impl Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = match self {
            LevelFilter::Debug => "DEBUG",
            LevelFilter::Info => "INFO",
            LevelFilter::Warn => "WARN",
            LevelFilter::Error => "ERROR",
            LevelFilter::Off => "OFF",
        };

        write!(f, "{filter}")
    }
}

#[repr(usize)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Level {
    Error = 1, // must match LevelFilter::Error
    Warn,
    Info,
    Debug,
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };

        write!(f, "{level}")
    }
}

impl PartialEq<LevelFilter> for Level {
    #[inline]
    fn eq(&self, other: &LevelFilter) -> bool {
        (*self as usize) == (*other as usize)
    }
}

impl PartialOrd<LevelFilter> for Level {
    #[inline]
    fn partial_cmp(&self, other: &LevelFilter) -> Option<std::cmp::Ordering> {
        Some((*self as usize).cmp(&(*other as usize)))
    }
}

pub fn print_log(lvl: Level, log: fmt::Arguments, file: &str, line: u32) {
    if lvl == LevelFilter::Error {
        eprintln!("\x1b[91m{lvl}\x1b[0m {file}:{line} - {log}");
    } else {
        println!("\x1b[93m{lvl}\x1b[0m {file}:{line} - {log}");
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! dd_debug {
    ($($arg:tt)+) => {
        $crate::dd_log!($crate::core::log::Level::Debug, $($arg)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! dd_info {
    ($($arg:tt)+) => {
        $crate::dd_log!($crate::core::log::Level::Info, $($arg)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! dd_warn {
    ($($arg:tt)+) => {
        $crate::dd_log!($crate::core::log::Level::Warn, $($arg)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! dd_error {
    ($($arg:tt)+) => {
        $crate::dd_log!($crate::core::log::Level::Error, $($arg)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! dd_log {
    ($lvl:expr, $($arg:tt)+) => {{
        let lvl = $lvl;
        if lvl <= $crate::core::log::max_level() {
            let loc = std::panic::Location::caller();
            $crate::core::log::print_log(lvl, format_args!($($arg)+), loc.file(), loc.line());
        }
    }};
}
