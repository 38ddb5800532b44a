//! Terminal color detection.
//!
//! The encoding used for diffs is resolved in this order:
//!
//! 1. An explicit override set through [`GlobalConfiguration::set_terminal_encoding`]
//! 2. The `REQUISITE_TERMINAL_ENCODING` environment variable, read once
//! 3. Autodetection, computed once and cached for the life of the process
//!
//! Autodetection never fails. Terminals that cannot be identified fall back to
//! [`TerminalEncoding::None`] with a warning.

use std::sync::LazyLock;

use parking_lot::RwLock;

use crate::palette::TerminalEncoding;

/// Environment variable that overrides autodetection.
pub const ENCODING_ENV: &str = "REQUISITE_TERMINAL_ENCODING";

/// First Windows 10 build whose console understands 16-color escapes.
pub const WINDOWS_16COLOR_BUILD: u32 = 10_586;

/// First Windows 10 build whose console understands 24-bit escapes.
pub const WINDOWS_RGB_BUILD: u32 = 14_931;

static DETECTED: LazyLock<TerminalEncoding> = LazyLock::new(detect);

static ENV_OVERRIDE: LazyLock<Option<TerminalEncoding>> = LazyLock::new(read_env_override);

static OVERRIDE: LazyLock<RwLock<Option<TerminalEncoding>>> = LazyLock::new(|| RwLock::new(None));

/// Process-wide terminal settings.
#[derive(Debug, Clone, Copy)]
pub struct GlobalConfiguration;

impl GlobalConfiguration {
    /// The encoding diffs are rendered with.
    pub fn terminal_encoding() -> TerminalEncoding {
        if let Some(encoding) = *OVERRIDE.read() {
            return encoding;
        }
        if let Some(encoding) = *ENV_OVERRIDE {
            return encoding;
        }
        *DETECTED
    }

    /// Forces an encoding, or restores detection when `None`.
    pub fn set_terminal_encoding(encoding: Option<TerminalEncoding>) {
        *OVERRIDE.write() = encoding;
    }

    /// The encoding chosen by autodetection, ignoring overrides.
    pub fn detected_terminal_encoding() -> TerminalEncoding {
        *DETECTED
    }

    /// The encodings the current terminal supports, least capable first.
    pub fn supported_terminal_encodings() -> Vec<TerminalEncoding> {
        supported_up_to(*DETECTED)
    }
}

fn read_env_override() -> Option<TerminalEncoding> {
    let value = std::env::var(ENCODING_ENV).ok()?;
    match value.parse() {
        Ok(encoding) => Some(encoding),
        Err(error) => {
            tracing::warn!(%error, variable = ENCODING_ENV, "ignoring terminal encoding override");
            None
        }
    }
}

fn detect() -> TerminalEncoding {
    let encoding = if cfg!(windows) {
        encoding_for_windows_version(windows_version().as_deref())
    } else {
        let term = std::env::var("TERM").ok();
        let colorterm = std::env::var("COLORTERM").ok();
        encoding_for_term(term.as_deref(), colorterm.as_deref())
    };
    tracing::debug!(%encoding, "detected terminal encoding");
    encoding
}

#[cfg(feature = "sysinfo")]
fn windows_version() -> Option<String> {
    sysinfo::System::kernel_version()
}

#[cfg(not(feature = "sysinfo"))]
fn windows_version() -> Option<String> {
    None
}

/// Extracts the build number from a Windows version string such as
/// `10.0.19045` or `19045`.
pub fn parse_windows_build(version: &str) -> Option<u32> {
    version
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .next_back()?
        .parse()
        .ok()
}

/// Maps a Windows version string to the richest supported encoding.
///
/// Warns and disables colors if the build number cannot be read.
pub fn encoding_for_windows_version(version: Option<&str>) -> TerminalEncoding {
    let build = version.and_then(parse_windows_build);
    if build.is_none() {
        tracing::warn!(
            os_version = version.unwrap_or("unknown"),
            "could not determine the Windows build, disabling colors"
        );
    }
    encoding_for_windows_build(build)
}

/// Maps a Windows build number to the richest supported encoding.
pub fn encoding_for_windows_build(build: Option<u32>) -> TerminalEncoding {
    match build {
        Some(build) if build >= WINDOWS_RGB_BUILD => TerminalEncoding::Rgb888Color,
        Some(build) if build >= WINDOWS_16COLOR_BUILD => TerminalEncoding::Xterm16Color,
        _ => TerminalEncoding::None,
    }
}

/// Maps the `TERM` and `COLORTERM` environment variables to an encoding.
pub fn encoding_for_term(term: Option<&str>, colorterm: Option<&str>) -> TerminalEncoding {
    if matches!(colorterm, Some("truecolor" | "24bit")) {
        return TerminalEncoding::Rgb888Color;
    }
    let Some(term) = term else {
        return TerminalEncoding::None;
    };
    match term {
        "" | "dumb" => TerminalEncoding::None,
        "xterm" => TerminalEncoding::Xterm8Color,
        "xterm-16color" => TerminalEncoding::Xterm16Color,
        "xterm-256color" => TerminalEncoding::Xterm256Color,
        _ if term.contains("truecolor") || term.contains("24bit") => TerminalEncoding::Rgb888Color,
        _ => {
            tracing::warn!(term, "unrecognized terminal type, disabling colors");
            TerminalEncoding::None
        }
    }
}

/// Windows consoles jump from no color straight to 16 colors, then 24-bit.
fn supported_up_to(richest: TerminalEncoding) -> Vec<TerminalEncoding> {
    if cfg!(windows) {
        return [
            TerminalEncoding::None,
            TerminalEncoding::Xterm16Color,
            TerminalEncoding::Rgb888Color,
        ]
        .into_iter()
        .filter(|encoding| *encoding <= richest)
        .collect();
    }
    TerminalEncoding::ALL
        .into_iter()
        .filter(|encoding| *encoding <= richest)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_build_parsing() {
        assert_eq!(parse_windows_build("10.0.19045"), Some(19_045));
        assert_eq!(parse_windows_build("22631"), Some(22_631));
        assert_eq!(parse_windows_build("unknown"), None);
    }

    #[test]
    fn supported_encodings_start_with_none() {
        let supported = supported_up_to(TerminalEncoding::Xterm256Color);
        assert_eq!(supported.first(), Some(&TerminalEncoding::None));
        assert!(!supported.contains(&TerminalEncoding::Rgb888Color));
    }
}
