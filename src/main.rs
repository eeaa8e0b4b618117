//! Threadlink CLI entrypoint for linked context collection.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use thiserror::Error;
use threadlink::{
    AggregationError, ContextOutcome, FetchError, LinkedContextBuilder, OctocrabThreadGateway,
    RateGovernor, ThreadlinkConfig,
};
use tracing_subscriber::EnvFilter;

/// Failure that ends the CLI with a non-zero exit code.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout carries only the JSON context.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("THREADLINK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), RunError> {
    let config = load_config()?;
    config.validate()?;

    let issue = config.require_issue()?;
    let token = config.resolve_token()?;
    let locator = config.repository_locator()?;

    let gateway = OctocrabThreadGateway::for_token(&token, locator)?
        .with_request_timeout(config.request_timeout());
    let builder = LinkedContextBuilder::new(&gateway, RateGovernor::for_credential(&token))
        .with_extractor(config.reference_extractor()?)
        .with_options(config.aggregation_options());

    let outcome = builder.build(issue).await?;
    write_outcome(&outcome)?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`FetchError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ThreadlinkConfig, FetchError> {
    ThreadlinkConfig::load().map_err(|error| FetchError::Configuration {
        message: error.to_string(),
    })
}

fn write_outcome(outcome: &ContextOutcome) -> Result<(), FetchError> {
    let io_error = |error: io::Error| FetchError::Io {
        message: error.to_string(),
    };

    match outcome {
        ContextOutcome::Linked(context) => {
            let json = serde_json::to_string_pretty(context).map_err(|error| FetchError::Io {
                message: error.to_string(),
            })?;
            writeln!(io::stdout().lock(), "{json}").map_err(io_error)
        }
        ContextOutcome::RootNotFound { .. } | ContextOutcome::EmptyBody { .. } => {
            let message = outcome.diagnostic().unwrap_or_default();
            writeln!(io::stderr().lock(), "{message}").map_err(io_error)
        }
    }
}
