//! stylefix CLI entry point

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use stylefix::cli::{Cli, Command};
use stylefix::engine::StylelintCli;
use stylefix::schema::{LintRequest, RequestConfig};
use stylefix::server::{serve, AppState};
use stylefix::service::LintService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stylefix=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host } => run_serve(&host, port).await,
        Command::Check {
            file,
            syntax,
            output_style,
            rules,
        } => run_check(file, syntax, output_style, rules).await,
    }
}

async fn run_serve(host: &str, port: u16) -> anyhow::Result<()> {
    let engine = StylelintCli::discover()?;
    let service = LintService::new(engine);
    let state = Arc::new(AppState::new(service));

    let listener = TcpListener::bind((host, port)).await?;
    serve(listener, state).await?;
    Ok(())
}

async fn run_check(
    file: Option<PathBuf>,
    syntax: String,
    output_style: Option<String>,
    rules: Option<PathBuf>,
) -> anyhow::Result<()> {
    let code = match &file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let rules = match &rules {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => default_rules(),
    };

    let request = LintRequest {
        code,
        syntax,
        config: RequestConfig {
            rules,
            output_style,
        },
    };

    let engine = StylelintCli::discover()?;
    let service = LintService::new(engine);

    let report = service.run(&request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Rules used by `check` when no rules file is given.
fn default_rules() -> serde_json::Map<String, serde_json::Value> {
    let mut rules = serde_json::Map::new();
    rules.insert(
        "color-no-invalid-hex".to_string(),
        serde_json::Value::Bool(true),
    );
    rules.insert("block-no-empty".to_string(), serde_json::Value::Bool(true));
    rules
}
