//! CLI for the fcm multicast push client.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use fcm_core::config::{self, FcmConfig, API_KEY_ENV};
use fcm_core::TokenDb;
use std::path::PathBuf;

use commands::{run_add, run_completions, run_list, run_message, run_notify, run_remove};

/// Top-level CLI for the fcm push client.
#[derive(Debug, Parser)]
#[command(name = "fcm")]
#[command(about = "fcm: multicast push sender with token bookkeeping", long_about = None)]
pub struct Cli {
    /// Server key; overrides the config file and FCM_API_KEY.
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log debug output for every crate.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Register a device token.
    Add {
        /// Registration token.
        token: String,
    },

    /// List registered tokens.
    List,

    /// Unregister a device token.
    Remove {
        /// Registration token.
        token: String,
    },

    /// Send a notification to every registered token.
    Notify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        /// Extra data payload entry; may be repeated.
        #[arg(long = "data", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        data: Vec<(String, String)>,
    },

    /// Send a message read from a JSON file. Empty `registration_ids` means every registered token.
    Message {
        /// Path to the JSON message.
        path: PathBuf,
    },

    /// Print shell completions to stdout.
    Completions {
        shell: Shell,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Config file, then FCM_API_KEY, then `--api-key`.
    fn load_config(&self) -> Result<FcmConfig> {
        let mut cfg = config::load_or_init()?;
        cfg.apply_env();
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            cfg.api_key = Some(key.trim().to_string());
        }
        tracing::debug!(endpoint = %cfg.endpoint, "loaded config");
        Ok(cfg)
    }

    pub async fn run(self) -> Result<()> {
        if let CliCommand::Completions { shell } = &self.command {
            run_completions(*shell);
            return Ok(());
        }

        let cfg = self.load_config()?;
        let db = TokenDb::open_default().await?;

        match self.command {
            CliCommand::Add { token } => run_add(&db, &token).await?,
            CliCommand::List => run_list(&db).await?,
            CliCommand::Remove { token } => run_remove(&db, &token).await?,
            CliCommand::Notify { title, body, data } => {
                run_notify(&db, &cfg, &title, &body, data).await?
            }
            CliCommand::Message { path } => run_message(&db, &cfg, &path).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
