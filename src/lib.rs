//! stylefix: CSS lint and auto-fix service
//!
//! Accepts CSS (or HTML with embedded CSS), runs it through stylelint with
//! a synthesized configuration, and returns the auto-fixed source plus
//! diagnostics, optionally re-serialized in a compact or nested style.
//!
//! The linting itself is delegated to the external stylelint process; this
//! crate is the orchestration around it: request validation, configuration
//! synthesis, warning extraction, output formatting, and the HTTP surface.
//!
//! # Example
//!
//! ```ignore
//! use stylefix::{LintRequest, LintService, StylelintCli};
//!
//! let engine = StylelintCli::discover()?;
//! let service = LintService::new(engine);
//!
//! let request: LintRequest = serde_json::from_str(r#"{
//!     "code": "body { color: #FFF; }",
//!     "syntax": "css",
//!     "config": {
//!         "rules": { "@stylistic/color-hex-case": "lower" },
//!         "outputStyle": "compact"
//!     }
//! }"#)?;
//!
//! let report = service.run(&request).await?;
//! println!("{}", report.content.unwrap().output);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod schema;
pub mod server;
pub mod service;
pub mod validate;

// Re-export commonly used types
pub use config::{synthesize, EngineConfig, DEFAULT_EXTENDS, DEFAULT_PLUGINS};
pub use engine::{collect_warnings, EngineOutcome, LintEngine, StylelintCli};
pub use error::{Result, StylefixError};
pub use format::format_output;
pub use schema::{
    LintReport, LintRequest, OutputStyle, RequestConfig, Severity, Syntax, Warning,
};
pub use service::LintService;
pub use validate::validate;
