//! Engine configuration synthesis.
//!
//! Builds the full stylelint configuration for one request: the fixed
//! presets and plugins, a copy of the caller's rules with legacy names
//! remapped, and the parser override for embedded-CSS syntaxes.

use serde::Serialize;
use serde_json::Value;

use crate::schema::{ConfigSummary, Syntax};

/// Presets every synthesized config extends, in order.
pub const DEFAULT_EXTENDS: [&str; 3] = [
    "stylelint-config-standard",
    "stylelint-config-recommended",
    "stylelint-config-html",
];

/// Plugins every synthesized config loads, in order.
pub const DEFAULT_PLUGINS: [&str; 2] = ["@stylistic/stylelint-plugin", "stylelint-order"];

/// Legacy rule names and their current homes. Stylelint 16 moved the
/// stylistic rules into the `@stylistic` namespace; callers still send the
/// old names.
const RULE_RENAMES: [(&str, &str); 1] = [("color-hex-case", "@stylistic/color-hex-case")];

/// A complete engine configuration. Serializes to stylelint's config file
/// format; never mutated after synthesis.
#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    #[serde(rename = "extends")]
    pub extends_list: Vec<String>,

    pub plugins: Vec<String>,

    pub rules: serde_json::Map<String, Value>,

    #[serde(rename = "customSyntax", skip_serializing_if = "Option::is_none")]
    pub custom_syntax: Option<String>,
}

impl EngineConfig {
    /// The non-rule parts, echoed back in lint responses.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            extends_list: self.extends_list.clone(),
            plugins: self.plugins.clone(),
            custom_syntax: self.custom_syntax.clone(),
        }
    }
}

/// Build the engine configuration for one request.
///
/// The caller's rules are copied, never mutated. A renamed key keeps its
/// value and lands at the end of the mapping, matching insertion order.
pub fn synthesize(rules: &serde_json::Map<String, Value>, syntax: Syntax) -> EngineConfig {
    let mut rules = rules.clone();
    for (old, new) in RULE_RENAMES {
        // shift_remove keeps the remaining rules in caller order
        if let Some(value) = rules.shift_remove(old) {
            rules.insert(new.to_string(), value);
        }
    }

    EngineConfig {
        extends_list: DEFAULT_EXTENDS.iter().map(|s| s.to_string()).collect(),
        plugins: DEFAULT_PLUGINS.iter().map(|s| s.to_string()).collect(),
        rules,
        custom_syntax: syntax.custom_syntax().map(String::from),
    }
}
