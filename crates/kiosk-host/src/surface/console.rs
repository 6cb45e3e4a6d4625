//! Parsing of the browser's stderr log

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, error, info, warn};

/// `[pid:tid:date/time:LEVEL:CONSOLE(12)] "text", source: https://host/app.js (12)`
///
/// Newer Chromium builds write `CONSOLE:12]` instead of `CONSOLE(12)]`.
static CONSOLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\[[^\]]*?:(?P<level>[A-Z]+\d*):CONSOLE[(:](?P<line>\d+)\)?\] "(?P<message>.*)", source: (?P<source>.*?) \(\d+\)\s*$"#,
    )
    .expect("Invalid CONSOLE_LINE regex")
});

static DEVTOOLS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DevTools listening on (?P<url>ws://\S+)").expect("Invalid DEVTOOLS_LINE regex")
});

/// Browser message categories too noisy to forward
const NOISE_MARKERS: &[&str] = &["Deprecation", "Violation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Verbose,
    Info,
    Warning,
    Error,
}

impl ConsoleLevel {
    fn from_chromium(level: &str) -> Self {
        match level {
            "ERROR" | "FATAL" => Self::Error,
            "WARNING" => Self::Warning,
            "INFO" => Self::Info,
            _ => Self::Verbose,
        }
    }
}

/// A console message written by the game page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub source: String,
    pub line: u32,
}

impl ConsoleMessage {
    /// Deprecation and Violation reports from the browser itself
    pub fn is_noise(&self) -> bool {
        NOISE_MARKERS.iter().any(|m| self.message.contains(m))
    }

    /// Write the message to the `game` log target
    pub fn forward(&self) {
        match self.level {
            ConsoleLevel::Error => error!(target: "game", "{} ({}:{})", self.message, self.source, self.line),
            ConsoleLevel::Warning => warn!(target: "game", "{} ({}:{})", self.message, self.source, self.line),
            ConsoleLevel::Info => info!(target: "game", "{}", self.message),
            ConsoleLevel::Verbose => debug!(target: "game", "{}", self.message),
        }
    }
}

/// Classified line of browser stderr
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserLine {
    Console(ConsoleMessage),
    /// Remote debugging endpoint announced at startup
    DevTools(String),
    Other,
}

pub fn parse_browser_line(line: &str) -> BrowserLine {
    if let Some(caps) = CONSOLE_LINE.captures(line) {
        return BrowserLine::Console(ConsoleMessage {
            level: ConsoleLevel::from_chromium(&caps["level"]),
            message: caps["message"].to_string(),
            source: caps["source"].to_string(),
            line: caps["line"].parse().unwrap_or(0),
        });
    }

    if let Some(caps) = DEVTOOLS_LINE.captures(line) {
        return BrowserLine::DevTools(caps["url"].to_string());
    }

    BrowserLine::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_console_line_parenthesized() {
        let line = r#"[12345:12345:1018/101500.123456:INFO:CONSOLE(42)] "spin result: 3x cherry", source: https://games.example/slot/app.js (42)"#;
        match parse_browser_line(line) {
            BrowserLine::Console(msg) => {
                assert_eq!(msg.level, ConsoleLevel::Info);
                assert_eq!(msg.message, "spin result: 3x cherry");
                assert_eq!(msg.source, "https://games.example/slot/app.js");
                assert_eq!(msg.line, 42);
                assert!(!msg.is_noise());
            }
            other => panic!("expected console line, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_console_line_colon_form() {
        let line = r#"[1:2:1018/101500.1:ERROR:CONSOLE:7] "Uncaught TypeError: x is undefined", source: https://g/main.js (7)"#;
        match parse_browser_line(line) {
            BrowserLine::Console(msg) => {
                assert_eq!(msg.level, ConsoleLevel::Error);
                assert_eq!(msg.line, 7);
            }
            other => panic!("expected console line, got {other:?}"),
        }
    }

    #[test]
    fn test_noise_is_detected() {
        let line = r#"[1:2:3/4.5:WARNING:CONSOLE(1)] "[Deprecation] Synchronous XMLHttpRequest on the main thread", source: https://g/a.js (1)"#;
        match parse_browser_line(line) {
            BrowserLine::Console(msg) => assert!(msg.is_noise()),
            other => panic!("expected console line, got {other:?}"),
        }

        let msg = ConsoleMessage {
            level: ConsoleLevel::Verbose,
            message: "[Violation] 'setTimeout' handler took 120ms".into(),
            source: String::new(),
            line: 0,
        };
        assert!(msg.is_noise());
    }

    #[test]
    fn test_parse_devtools_line() {
        let line = "DevTools listening on ws://127.0.0.1:41235/devtools/browser/5a1c-77";
        assert_eq!(
            parse_browser_line(line),
            BrowserLine::DevTools("ws://127.0.0.1:41235/devtools/browser/5a1c-77".into())
        );
    }

    #[test]
    fn test_unrelated_lines_are_other() {
        assert_eq!(
            parse_browser_line("[1:2:3/4.5:ERROR:gpu_init.cc(12)] GPU disabled"),
            BrowserLine::Other
        );
        assert_eq!(parse_browser_line(""), BrowserLine::Other);
    }
}
