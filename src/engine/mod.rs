//! Lint engine abstraction.
//!
//! The engine is an injected collaborator with a single async operation, so
//! the orchestrator never depends on the concrete stylelint process and
//! tests substitute a scripted double.

mod stylelint;

pub use stylelint::StylelintCli;

use std::future::Future;

use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::schema::{Severity, Warning};

/// Raw result of one engine invocation, before warning extraction.
#[derive(Debug, Clone)]
pub struct EngineOutcome {
    /// The source with auto-fixes applied.
    pub fixed_code: String,

    /// Whatever the engine printed as diagnostics. Possibly not the
    /// expected shape; `collect_warnings` normalizes it.
    pub diagnostics: Value,
}

/// An external lint/fix engine.
pub trait LintEngine: Send + Sync {
    /// Run the engine once over `code` with the synthesized `config`.
    fn lint(
        &self,
        code: &str,
        config: &EngineConfig,
    ) -> impl Future<Output = Result<EngineOutcome>> + Send;

    /// Engine version, probed once at construction.
    fn version(&self) -> &str;
}

/// Extract warnings from engine diagnostics.
///
/// Total over any JSON shape: stylelint emits an array of per-file results,
/// each carrying a `warnings` array, but a crashed run or a foreign
/// formatter can emit anything. Absent or malformed structure yields no
/// warnings.
pub fn collect_warnings(diagnostics: &Value) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let Some(results) = diagnostics.as_array() else {
        return warnings;
    };

    for result in results {
        let Some(entries) = result.get("warnings").and_then(|w| w.as_array()) else {
            continue;
        };
        for entry in entries {
            if let Some(warning) = parse_warning(entry) {
                warnings.push(warning);
            }
        }
    }

    warnings
}

fn parse_warning(entry: &Value) -> Option<Warning> {
    let text = entry.get("text")?.as_str()?.to_string();

    // Positions are 1-based; clamp anything the engine got wrong.
    let line = entry
        .get("line")
        .and_then(|v| v.as_u64())
        .map(|n| n.max(1))
        .unwrap_or(1) as usize;
    let column = entry
        .get("column")
        .and_then(|v| v.as_u64())
        .map(|n| n.max(1))
        .unwrap_or(1) as usize;

    let rule = entry
        .get("rule")
        .and_then(|r| r.as_str())
        .unwrap_or("unknown")
        .to_string();

    let severity = entry
        .get("severity")
        .and_then(|s| s.as_str())
        .map(Severity::from_engine)
        .unwrap_or(Severity::Warning);

    Some(Warning {
        line,
        column,
        rule,
        severity,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_warnings() {
        let diagnostics = json!([
            {
                "source": "<input css 1>",
                "warnings": [
                    {
                        "line": 10,
                        "column": 5,
                        "rule": "color-no-invalid-hex",
                        "severity": "error",
                        "text": "Unexpected invalid hex color \"#fff1az\""
                    },
                    {
                        "line": 15,
                        "column": 3,
                        "rule": "@stylistic/color-hex-case",
                        "severity": "warning",
                        "text": "Expected \"#FFF\" to be \"#fff\""
                    }
                ]
            }
        ]);

        let warnings = collect_warnings(&diagnostics);
        assert_eq!(warnings.len(), 2);

        assert_eq!(warnings[0].line, 10);
        assert_eq!(warnings[0].column, 5);
        assert_eq!(warnings[0].severity, Severity::Error);
        assert_eq!(warnings[0].rule, "color-no-invalid-hex");
        assert!(warnings[0].text.contains("invalid hex color"));

        assert_eq!(warnings[1].severity, Severity::Warning);
        assert_eq!(warnings[1].rule, "@stylistic/color-hex-case");
    }

    #[test]
    fn test_collect_warnings_empty() {
        assert!(collect_warnings(&json!([])).is_empty());
        assert!(collect_warnings(&json!([{ "source": "clean.css", "warnings": [] }])).is_empty());
    }

    #[test]
    fn test_collect_warnings_malformed_shapes() {
        assert!(collect_warnings(&Value::Null).is_empty());
        assert!(collect_warnings(&json!("not an array")).is_empty());
        assert!(collect_warnings(&json!({ "warnings": "nope" })).is_empty());
        assert!(collect_warnings(&json!([{ "warnings": "nope" }])).is_empty());
        assert!(collect_warnings(&json!([{ "warnings": [{ "line": 1 }] }])).is_empty());
    }

    #[test]
    fn test_collect_warnings_defaults() {
        let diagnostics = json!([
            {
                "warnings": [
                    { "text": "something looks off" },
                    { "text": "zero position", "line": 0, "column": 0, "severity": "fatal" }
                ]
            }
        ]);

        let warnings = collect_warnings(&diagnostics);
        assert_eq!(warnings.len(), 2);

        assert_eq!(warnings[0].line, 1);
        assert_eq!(warnings[0].column, 1);
        assert_eq!(warnings[0].rule, "unknown");
        assert_eq!(warnings[0].severity, Severity::Warning);

        assert_eq!(warnings[1].line, 1);
        assert_eq!(warnings[1].column, 1);
        assert_eq!(warnings[1].severity, Severity::Warning);
    }

    #[test]
    fn test_collect_warnings_multiple_files() {
        let diagnostics = json!([
            { "warnings": [{ "line": 1, "column": 1, "rule": "a", "severity": "error", "text": "A" }] },
            { "warnings": [{ "line": 2, "column": 2, "rule": "b", "severity": "warning", "text": "B" }] }
        ]);

        let warnings = collect_warnings(&diagnostics);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].rule, "a");
        assert_eq!(warnings[1].rule, "b");
    }
}
