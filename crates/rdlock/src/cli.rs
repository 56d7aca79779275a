//! Command line interface
//!
//! Each invocation loads configuration, builds a [`LockManager`] for the
//! configured store and performs one command. Command output goes to stdout;
//! logs go to stderr.

use clap::{Parser, Subcommand};
use rdlock_application::{LockManager, list_lock_store_providers};
use rdlock_domain::error::Result;
use rdlock_domain::{Clock, LockToken, SystemClock};
use rdlock_infrastructure::logging::init_logging;
use rdlock_infrastructure::{AppConfig, ConfigLoader, build_lock_manager};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::time::Instant;

/// Exit code when the lock was not acquired or not released
pub const EXIT_REFUSED: u8 = 1;

/// Exit code for errors
pub const EXIT_ERROR: u8 = 2;

/// Default delay between acquisition attempts while waiting
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 200;

/// Command line interface for rdlock
#[derive(Parser, Debug)]
#[command(name = "rdlock")]
#[command(about = "rdlock - Lease-based distributed locks over Redis")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print command output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// rdlock commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Acquire a lock and print its token
    Lock {
        /// Lock name
        name: String,

        /// Keep trying for up to this many seconds
        #[arg(long, default_value_t = 0)]
        wait: u64,

        /// Delay between attempts while waiting
        #[arg(
            long,
            default_value_t = DEFAULT_RETRY_INTERVAL_MS,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        retry_interval_ms: u64,
    },

    /// Release a lock held under a token printed by `lock`
    Release {
        /// Lock name
        name: String,

        /// Token returned when the lock was acquired
        #[arg(long)]
        token: String,
    },

    /// Show who holds a lock and for how long
    Status {
        /// Lock name
        name: String,
    },

    /// List registered lock store providers
    Providers,
}

/// How a successfully executed command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked
    Success,
    /// The lock was held by someone else
    Refused,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Refused => ExitCode::from(EXIT_REFUSED),
        }
    }

    fn from_flag(done: bool) -> Self {
        if done { Self::Success } else { Self::Refused }
    }
}

/// Run one CLI command
pub async fn run(cli: Cli) -> Result<Outcome> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    execute(&config, cli.command, cli.json).await
}

/// Execute `command` against the store described by `config`
pub async fn execute(config: &AppConfig, command: Command, json: bool) -> Result<Outcome> {
    match command {
        Command::Providers => {
            print_providers(json);
            Ok(Outcome::Success)
        }
        Command::Lock {
            name,
            wait,
            retry_interval_ms,
        } => {
            let manager = build_lock_manager(config)?;
            let token = acquire_with_wait(
                &manager,
                &name,
                Duration::from_secs(wait),
                Duration::from_millis(retry_interval_ms),
            )
            .await?;
            print_lock(&name, token.as_ref(), json);
            Ok(Outcome::from_flag(token.is_some()))
        }
        Command::Release { name, token } => {
            let manager = build_lock_manager(config)?;
            let released = manager
                .release_token(&name, &LockToken::from_raw(token))
                .await?;
            print_release(&name, released, json);
            Ok(Outcome::from_flag(released))
        }
        Command::Status { name } => {
            let manager = build_lock_manager(config)?;
            let current = manager.inspect(&name).await?;
            print_status(&name, current.as_ref(), SystemClock.now_millis(), json);
            Ok(Outcome::Success)
        }
    }
}

/// Try to acquire `name` until it succeeds or `wait` has elapsed
///
/// Always makes at least one attempt. Store errors end the wait immediately.
pub async fn acquire_with_wait(
    manager: &LockManager,
    name: &str,
    wait: Duration,
    retry_interval: Duration,
) -> Result<Option<LockToken>> {
    let deadline = Instant::now() + wait;
    loop {
        if let Some(token) = manager.try_lock(name).await? {
            return Ok(Some(token));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        tokio::time::sleep(retry_interval.min(deadline - now)).await;
    }
}

fn print_providers(json: bool) {
    let providers = list_lock_store_providers();
    if json {
        let entries: Vec<_> = providers
            .iter()
            .map(|(name, description)| json!({ "name": name, "description": description }))
            .collect();
        println!("{}", json!({ "providers": entries }));
    } else {
        for (name, description) in providers {
            println!("{name:<10} {description}");
        }
    }
}

fn print_lock(name: &str, token: Option<&LockToken>, json: bool) {
    if json {
        println!(
            "{}",
            json!({ "lock": name, "acquired": token.is_some(), "token": token })
        );
    } else if let Some(token) = token {
        println!("{token}");
    } else {
        eprintln!("Lock '{name}' is held by another owner");
    }
}

fn print_release(name: &str, released: bool, json: bool) {
    if json {
        println!("{}", json!({ "lock": name, "released": released }));
    } else if released {
        println!("released");
    } else {
        eprintln!("Lock '{name}' is not held by this token");
    }
}

fn print_status(name: &str, current: Option<&LockToken>, now_ms: i64, json: bool) {
    let Some(token) = current else {
        if json {
            println!("{}", json!({ "lock": name, "held": false }));
        } else {
            println!("free");
        }
        return;
    };

    let expires_at_ms = token.expires_at_ms().ok();
    let remaining_ms = token
        .remaining_at(now_ms)
        .ok()
        .map(|remaining| u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX));

    if json {
        println!(
            "{}",
            json!({
                "lock": name,
                "held": true,
                "token": token,
                "expires_at_ms": expires_at_ms,
                "remaining_ms": remaining_ms,
            })
        );
        return;
    }

    println!("token:     {token}");
    match (expires_at_ms, remaining_ms) {
        (Some(expires_at_ms), Some(remaining_ms)) => {
            println!("expires:   {expires_at_ms}");
            if remaining_ms == 0 {
                println!("remaining: expired");
            } else {
                println!("remaining: {remaining_ms}ms");
            }
        }
        _ => println!("expires:   unreadable"),
    }
}
