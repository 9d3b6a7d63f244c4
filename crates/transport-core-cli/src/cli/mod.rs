//! CLI for the transport-core decision engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use transport_core::config::{self, TcConfig};
use transport_core::{AuthDecision, HttpMethod, Outcome, RefreshResult};

use commands::{parse_outcome, run_config, run_decide, run_replay, DecideArgs};

/// Top-level CLI for transport-core.
#[derive(Debug, Parser)]
#[command(name = "tc")]
#[command(about = "transport-core: retry / refresh / fail decisions for HTTP attempts", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthArg {
    /// The auth subsystem allows a credential refresh.
    Refresh,
    /// The auth subsystem refuses.
    Fail,
}

impl From<AuthArg> for AuthDecision {
    fn from(arg: AuthArg) -> Self {
        match arg {
            AuthArg::Refresh => AuthDecision::RefreshAndRetry,
            AuthArg::Fail => AuthDecision::Fail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RefreshArg {
    Succeeded,
    Failed,
}

impl From<RefreshArg> for RefreshResult {
    fn from(arg: RefreshArg) -> Self {
        match arg {
            RefreshArg::Succeeded => RefreshResult::Succeeded,
            RefreshArg::Failed => RefreshResult::Failed,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Decide the next action for one attempt and print the decision detail.
    Decide {
        /// HTTP method of the request.
        #[arg(long, default_value = "GET")]
        method: HttpMethod,
        /// 1-based attempt whose outcome is being evaluated.
        #[arg(long, default_value_t = 1)]
        attempt: u8,
        /// Attempt budget (defaults to `default_max_attempts` from config).
        #[arg(long)]
        max_attempts: Option<u8>,
        /// Allow retrying methods that are not idempotent.
        #[arg(long)]
        allow_non_idempotent_retry: bool,
        /// Idempotency key attached to the request.
        #[arg(long)]
        idempotency_key: Option<String>,
        /// network | timeout | blocked | captcha | status:<code> | rate-limited[:<ms>]
        #[arg(long, value_parser = parse_outcome)]
        outcome: Outcome,
        /// Verdict from the auth subsystem (401 only).
        #[arg(long, value_enum)]
        auth: Option<AuthArg>,
        /// Result of a refresh performed after REFRESH_AND_RETRY.
        #[arg(long, value_enum)]
        refresh: Option<RefreshArg>,
    },

    /// Replay JSON decision vector files; fails if any case mismatches.
    Replay {
        /// Vector files to replay.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Show the config path and effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Decide {
                method,
                attempt,
                max_attempts,
                allow_non_idempotent_retry,
                idempotency_key,
                outcome,
                auth,
                refresh,
            } => run_decide(
                &cfg,
                DecideArgs {
                    method,
                    attempt,
                    max_attempts,
                    allow_non_idempotent_retry,
                    idempotency_key,
                    outcome,
                    auth: auth.map(Into::into),
                    refresh: refresh.map(Into::into),
                },
            )?,
            CliCommand::Replay { paths } => run_replay(&cfg, &paths)?,
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<TcConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
