//! Lint orchestration.
//!
//! Sequences validation, config synthesis, engine invocation, warning
//! extraction and output formatting into one report. Validation and
//! re-serialization errors propagate unchanged; anything unexpected out of
//! the engine is wrapped into a lint-execution error.

use crate::config::synthesize;
use crate::engine::{collect_warnings, LintEngine};
use crate::error::{Result, StylefixError};
use crate::format::format_output;
use crate::schema::{EngineInfo, LintReport, LintRequest, OutputStyle, ReportContent, Syntax};
use crate::validate::validate;

pub struct LintService<E> {
    engine: E,
}

impl<E: LintEngine> LintService<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Version of the underlying engine.
    pub fn version(&self) -> &str {
        self.engine.version()
    }

    /// Run one lint request end to end.
    pub async fn run(&self, request: &LintRequest) -> Result<LintReport> {
        validate(request)?;

        let syntax: Syntax = request.syntax.parse()?;
        let output_style = request
            .config
            .output_style
            .as_deref()
            .map(str::parse::<OutputStyle>)
            .transpose()?;

        let config = synthesize(&request.config.rules, syntax);
        tracing::debug!(
            syntax = syntax.as_str(),
            rules = config.rules.len(),
            "running lint"
        );

        let outcome = match self.engine.lint(&request.code, &config).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_request_error() => return Err(err),
            Err(err @ StylefixError::LintExecution { .. }) => return Err(err),
            Err(err) => {
                return Err(StylefixError::LintExecution {
                    message: err.to_string(),
                })
            }
        };

        let warnings = collect_warnings(&outcome.diagnostics);
        let output = format_output(&outcome.fixed_code, output_style, syntax)?;

        Ok(LintReport {
            success: true,
            message: "Linting completed successfully".to_string(),
            content: Some(ReportContent {
                warnings,
                output,
                info: EngineInfo {
                    version: self.engine.version().to_string(),
                    config: config.summary(),
                },
            }),
        })
    }
}
