//! Request validation.
//!
//! Checks run in a fixed order so a request failing several checks always
//! reports the same error. No side effects; the orchestrator stops at the
//! first failure.

use crate::error::{Result, StylefixError};
use crate::schema::{LintRequest, OutputStyle, Syntax};

/// Validate a lint request before any engine work happens.
pub fn validate(request: &LintRequest) -> Result<()> {
    if request.code.trim().is_empty() {
        return Err(StylefixError::EmptyCode);
    }

    request.syntax.parse::<Syntax>()?;

    if request.config.rules.is_empty() {
        return Err(StylefixError::NoRules);
    }

    if let Some(style) = &request.config.output_style {
        style.parse::<OutputStyle>()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RequestConfig;
    use serde_json::json;

    fn request(code: &str, syntax: &str) -> LintRequest {
        let mut rules = serde_json::Map::new();
        rules.insert("color-no-invalid-hex".to_string(), json!(true));
        LintRequest {
            code: code.to_string(),
            syntax: syntax.to_string(),
            config: RequestConfig {
                rules,
                output_style: None,
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request("body { color: red; }", "css")).is_ok());
        assert!(validate(&request("<style>a {}</style>", "html")).is_ok());
    }

    #[test]
    fn test_empty_code_rejected() {
        let result = validate(&request("", "css"));
        assert!(matches!(result, Err(StylefixError::EmptyCode)));
    }

    #[test]
    fn test_whitespace_only_code_rejected() {
        let result = validate(&request("   \n\t ", "css"));
        assert!(matches!(result, Err(StylefixError::EmptyCode)));
    }

    #[test]
    fn test_unsupported_syntax_rejected() {
        let result = validate(&request("a {}", "invalid"));
        assert!(matches!(
            result,
            Err(StylefixError::UnsupportedSyntax { syntax }) if syntax == "invalid"
        ));
    }

    #[test]
    fn test_empty_rules_rejected() {
        let mut req = request("a {}", "css");
        req.config.rules.clear();
        assert!(matches!(validate(&req), Err(StylefixError::NoRules)));
    }

    #[test]
    fn test_unsupported_output_style_rejected() {
        let mut req = request("a {}", "css");
        req.config.output_style = Some("invalid".to_string());
        assert!(matches!(
            validate(&req),
            Err(StylefixError::UnsupportedOutputStyle { style }) if style == "invalid"
        ));
    }

    #[test]
    fn test_valid_output_styles_accepted() {
        for style in ["compact", "nested"] {
            let mut req = request("a {}", "css");
            req.config.output_style = Some(style.to_string());
            assert!(validate(&req).is_ok());
        }
    }

    #[test]
    fn test_check_order_is_deterministic() {
        // Empty code wins over a bad syntax, which wins over empty rules.
        let mut req = request("", "invalid");
        req.config.rules.clear();
        assert!(matches!(validate(&req), Err(StylefixError::EmptyCode)));

        let mut req = request("a {}", "invalid");
        req.config.rules.clear();
        assert!(matches!(
            validate(&req),
            Err(StylefixError::UnsupportedSyntax { .. })
        ));

        let mut req = request("a {}", "css");
        req.config.rules.clear();
        req.config.output_style = Some("bogus".to_string());
        assert!(matches!(validate(&req), Err(StylefixError::NoRules)));
    }
}
