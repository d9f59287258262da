// Startup configuration
// Command-line flags with environment fallbacks, checked once before anything
// touches the dataset

use clap::Parser as ClapParser;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_ENV: &str = "JLCPCB_DB_PATH";

/// JLCPCB parts catalog exposed as MCP tools
#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the jlcparts SQLite database
    #[arg(long, env = DB_PATH_ENV)]
    pub db_path: Option<PathBuf>,

    /// Log filter, e.g. `info` or `jlcparts_query=debug` (RUST_LOG wins when set)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Run a single tool and exit
    #[arg(short, long, value_name = "TOOL", conflicts_with = "shell")]
    pub execute: Option<String>,

    /// JSON arguments for --execute
    #[arg(short, long, value_name = "JSON", requires = "execute")]
    pub args: Option<String>,

    /// Start an interactive shell instead of the MCP server
    #[arg(long)]
    pub shell: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please set JLCPCB_DB_PATH environment value!")]
    MissingDatabasePath,

    #[error("--args is not valid JSON: {0}")]
    InvalidToolArguments(String),
}

/// How the process should serve the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum RunMode {
    /// JSON-RPC over stdin/stdout
    Mcp,
    /// One tool call, result printed to stdout
    Execute { tool: String, arguments: Value },
    /// Read-eval-print loop on the terminal
    Shell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
    pub mode: RunMode,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let db_path = args
            .db_path
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingDatabasePath)?;

        let mode = match (args.execute, args.shell) {
            (Some(tool), _) => {
                let arguments = match args.args {
                    Some(raw) => serde_json::from_str(&raw)
                        .map_err(|e| ConfigError::InvalidToolArguments(e.to_string()))?,
                    None => Value::Null,
                };
                RunMode::Execute { tool, arguments }
            }
            (None, true) => RunMode::Shell,
            (None, false) => RunMode::Mcp,
        };

        Ok(Self {
            db_path,
            log_level: args.log_level,
            mode,
        })
    }
}
