//! Request and response envelope types for the lint service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StylefixError;

// ============================================================================
// Request Types
// ============================================================================

/// A lint request as posted to `/lint`.
///
/// `syntax` and `outputStyle` stay raw strings here: the validator owns the
/// membership checks so rejections carry deterministic, user-facing messages
/// instead of whatever the JSON decoder produces.
#[derive(Debug, Clone, Deserialize)]
pub struct LintRequest {
    /// Source text to lint
    pub code: String,

    /// Source syntax: "css" or "html"
    pub syntax: String,

    /// Caller-supplied lint configuration
    #[serde(default)]
    pub config: RequestConfig,
}

/// The caller-controlled part of the configuration.
///
/// A missing `config` or `rules` decodes to an empty mapping so the validator
/// reports the dedicated no-rules error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestConfig {
    /// Rule name to rule value mapping, passed through to the engine
    #[serde(default)]
    pub rules: serde_json::Map<String, Value>,

    /// Optional re-serialization style: "compact" or "nested"
    #[serde(rename = "outputStyle")]
    pub output_style: Option<String>,
}

/// Source language of the submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    Css,
    Html,
}

impl Syntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syntax::Css => "css",
            Syntax::Html => "html",
        }
    }

    /// Parser override handed to the engine; raw CSS needs none.
    pub fn custom_syntax(&self) -> Option<&'static str> {
        match self {
            Syntax::Css => None,
            Syntax::Html => Some("postcss-html"),
        }
    }
}

impl std::str::FromStr for Syntax {
    type Err = StylefixError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "css" => Ok(Syntax::Css),
            "html" => Ok(Syntax::Html),
            _ => Err(StylefixError::UnsupportedSyntax {
                syntax: s.to_string(),
            }),
        }
    }
}

/// Post-fix re-serialization style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Compact,
    Nested,
}

impl std::str::FromStr for OutputStyle {
    type Err = StylefixError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "compact" => Ok(OutputStyle::Compact),
            "nested" => Ok(OutputStyle::Nested),
            _ => Err(StylefixError::UnsupportedOutputStyle {
                style: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Severity of a single warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// Stylelint reports severities as strings; anything unrecognized is
    /// kept as a warning rather than dropped.
    pub fn from_engine(s: &str) -> Self {
        match s {
            "error" => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// A single diagnostic from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based)
    pub column: usize,

    /// Rule that produced the warning
    pub rule: String,

    /// Severity as reported by the engine
    pub severity: Severity,

    /// Human-readable message
    pub text: String,
}

/// Response envelope for one lint run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    /// Whether the run completed
    pub success: bool,

    /// Human-readable summary; callers branch on `success`, not on this
    pub message: String,

    /// Present on success, `null` on failure
    pub content: Option<ReportContent>,
}

impl LintReport {
    /// Failure envelope carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            content: None,
        }
    }
}

/// The payload of a successful lint run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportContent {
    /// Diagnostics in engine order
    pub warnings: Vec<Warning>,

    /// Auto-fixed source, re-serialized when an output style was requested
    pub output: String,

    /// Engine and configuration echo
    pub info: EngineInfo,
}

/// Engine version and the non-rule parts of the synthesized config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineInfo {
    pub version: String,
    pub config: ConfigSummary,
}

/// The fixed parts of the synthesized configuration, echoed to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    #[serde(rename = "extends")]
    pub extends_list: Vec<String>,

    pub plugins: Vec<String>,

    #[serde(rename = "customSyntax", skip_serializing_if = "Option::is_none")]
    pub custom_syntax: Option<String>,
}

/// Payload for `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decodes_with_nested_config() {
        let json = r#"{
            "code": "body { color: red; }",
            "syntax": "css",
            "config": {
                "rules": { "color-no-invalid-hex": true },
                "outputStyle": "compact"
            }
        }"#;
        let request: LintRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.syntax, "css");
        assert_eq!(request.config.rules.len(), 1);
        assert_eq!(request.config.output_style.as_deref(), Some("compact"));
    }

    #[test]
    fn test_request_defaults_missing_config() {
        let json = r#"{ "code": "body {}", "syntax": "css" }"#;
        let request: LintRequest = serde_json::from_str(json).unwrap();
        assert!(request.config.rules.is_empty());
        assert!(request.config.output_style.is_none());
    }

    #[test]
    fn test_syntax_parse() {
        assert_eq!("css".parse::<Syntax>().unwrap(), Syntax::Css);
        assert_eq!("html".parse::<Syntax>().unwrap(), Syntax::Html);
        assert!(matches!(
            "less".parse::<Syntax>(),
            Err(StylefixError::UnsupportedSyntax { .. })
        ));
    }

    #[test]
    fn test_output_style_parse() {
        assert_eq!("compact".parse::<OutputStyle>().unwrap(), OutputStyle::Compact);
        assert_eq!("nested".parse::<OutputStyle>().unwrap(), OutputStyle::Nested);
        assert!(matches!(
            "expanded".parse::<OutputStyle>(),
            Err(StylefixError::UnsupportedOutputStyle { .. })
        ));
    }

    #[test]
    fn test_severity_from_engine_defaults_to_warning() {
        assert_eq!(Severity::from_engine("error"), Severity::Error);
        assert_eq!(Severity::from_engine("warning"), Severity::Warning);
        assert_eq!(Severity::from_engine("fatal"), Severity::Warning);
    }

    #[test]
    fn test_failure_report_serializes_null_content() {
        let report = LintReport::failure("rules must contain at least one entry");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["content"].is_null());
    }
}
