//! Build information
//!
//! Package metadata plus the counter and timestamp that `build.rs` embeds.
//! Shown once at startup and attached to every calculation response.

use std::fmt;

use serde::Serialize;

/// Timestamp written by `build.rs`, if the build script ran
const EMBEDDED_TIMESTAMP: Option<&str> = option_env!("SIZECALC_BUILD_TIMESTAMP");
/// Local build counter written by `build.rs`
const EMBEDDED_BUILD_NUMBER: Option<&str> = option_env!("SIZECALC_BUILD_NUMBER");

/// Build metadata attached to responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    /// Metadata of the running binary
    pub fn current() -> Self {
        Self::from_embedded(EMBEDDED_BUILD_NUMBER, EMBEDDED_TIMESTAMP)
    }

    /// A missing or garbled counter reads as build 0
    fn from_embedded(build_number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            build_number: build_number
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or_default(),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} (build {}, {})",
            self.name, self.version, self.build_number, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let line = "-".repeat(48);
    eprintln!("{line}");
    eprintln!("  Size Calculator: {}", BuildInfo::current());
    eprintln!("{line}");
}
