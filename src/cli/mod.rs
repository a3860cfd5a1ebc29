//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, applies per-run overrides on
//! top of the config file and dispatches to the chat console or one of the
//! config subcommands.

pub mod agent_list;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::cli::agent_list::list_agents;
use crate::core::app::{App, SessionOverrides};
use crate::core::config::{Config, ConfigKey};
use crate::core::registry::{self, AgentDescriptor};
use crate::core::simulation::SimulatedAgent;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "agentdeck")]
#[command(version)]
#[command(about = "A terminal console for a chat-style AI agent")]
#[command(
    long_about = "AgentDeck is a full-screen terminal console for a chat-style AI agent. \
The conversation and a live log of the agent's actions are shown side by side, \
and the divider between them can be dragged with the mouse.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Tab               Cycle focus (input, chat, actions)\n\
  Up/Down           Select a message in the chat pane\n\
  Enter/Space       Expand or collapse the selected message\n\
  PgUp/PgDn/Mouse   Scroll the focused pane\n\
  F5 / F6           Full chat / full action view\n\
  Ctrl+P            Pick an agent\n\
  Ctrl+T            Toggle light and dark themes\n\
  Ctrl+G            Open the dashboard\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Agent to start with (see `agentdeck agents`)
    #[arg(short = 'a', long, global = true, value_name = "AGENT")]
    pub agent: Option<String>,

    /// Start in light mode
    #[arg(long, global = true)]
    pub light: bool,

    /// Delay before the simulated agent answers, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Write diagnostics to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat console (default)
    Chat,
    /// List available agents
    Agents {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        value: String,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    let runtime = tokio::runtime::Runtime::new()?;
    if let Err(e) = runtime.block_on(async_main(args)) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn resolve_agent(id: Option<&str>) -> Result<Option<&'static AgentDescriptor>, Box<dyn Error>> {
    match id {
        None => Ok(None),
        Some(id) => registry::find(id)
            .map(Some)
            .ok_or_else(|| format!("Unknown agent: {id}. Run 'agentdeck agents' to list them.").into()),
    }
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let overrides = SessionOverrides {
                agent: resolve_agent(args.agent.as_deref())?,
                light_mode: args.light,
            };
            let delay = args
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.response_delay());
            info!(delay_ms = delay.as_millis() as u64, "configuration resolved");

            let app = App::new(config, overrides);
            run_chat(app, Arc::new(SimulatedAgent::new(delay))).await
        }
        Commands::Agents { json } => {
            let current = match resolve_agent(args.agent.as_deref())? {
                Some(agent) => agent,
                None => Config::load()?.default_agent(),
            };
            list_agents(current, json)
        }
        Commands::Set { key, value } => {
            let key = ConfigKey::parse(&key)?;
            let mut config = Config::load()?;
            config.set_value(key, &value)?;
            config.save()?;
            println!("✅ Set {} to: {}", key.name(), value.trim());
            Ok(())
        }
        Commands::Unset { key } => {
            let key = ConfigKey::parse(&key)?;
            let mut config = Config::load()?;
            config.unset_value(key);
            config.save()?;
            println!("✅ Unset {}", key.name());
            Ok(())
        }
        Commands::Config => {
            Config::load()?.print_all();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_and_after_subcommand() {
        let args = Args::try_parse_from(["agentdeck", "--light", "chat", "-a", "deepseek-r1"])
            .expect("parse");
        assert!(args.light);
        assert_eq!(args.agent.as_deref(), Some("deepseek-r1"));
        assert!(matches!(args.command, Some(Commands::Chat)));

        let args = Args::try_parse_from(["agentdeck", "--delay-ms", "250"]).expect("parse");
        assert_eq!(args.delay_ms, Some(250));
        assert!(args.command.is_none());
    }

    #[test]
    fn set_requires_key_and_value() {
        assert!(Args::try_parse_from(["agentdeck", "set", "theme"]).is_err());
        let args = Args::try_parse_from(["agentdeck", "set", "theme", "light"]).expect("parse");
        assert!(matches!(
            args.command,
            Some(Commands::Set { ref key, ref value }) if key == "theme" && value == "light"
        ));
    }

    #[test]
    fn unknown_agent_is_rejected() {
        assert!(resolve_agent(None).expect("none").is_none());
        assert_eq!(
            resolve_agent(Some("claude-3-opus-20240229"))
                .expect("known")
                .map(|agent| agent.name),
            Some("Claude 3 Opus")
        );
        let err = resolve_agent(Some("gpt-7")).expect_err("unknown");
        assert!(err.to_string().contains("gpt-7"));
    }
}
