// Main entry point for the jlcparts MCP server
// Serves the parts catalog over stdio by default, or runs one tool, or an
// interactive shell for poking at the catalog by hand

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use jlcparts_query::config::Args;
use jlcparts_query::mcp::StdioTransport;
use jlcparts_query::{tools, Catalog, Config, McpServer, QueryService, RunMode};
use serde_json::Value;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let catalog = Catalog::open(&config.db_path)
        .context("cannot start without the parts database")?;
    info!(path = %config.db_path.display(), "parts database opened");
    let service = QueryService::new(catalog);

    match config.mode {
        RunMode::Mcp => {
            let server = McpServer::new(service);
            let mut transport = StdioTransport::stdio();
            server.run(&mut transport)?;
        }
        RunMode::Execute { tool, arguments } => {
            let output = tools::call_tool(&service, &tool, arguments)?;
            println!("{}", display(output));
        }
        RunMode::Shell => run_shell(&service)?,
    }

    info!("shutting down");
    Ok(())
}

/// Logs go to stderr; stdout belongs to the protocol
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Lookups that found nothing print as `null`
fn display(output: Option<String>) -> String {
    output.unwrap_or_else(|| "null".to_string())
}

/// REPL (Read-Eval-Print Loop)
///
/// Each line is a tool name optionally followed by its JSON arguments:
/// `get_category {"category_id": 3}`
fn run_shell(service: &QueryService) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("jlcparts interactive shell");
    println!("Type '.tools' to list tools, '.help' for help, '.exit' to quit");
    println!();

    loop {
        print!("jlcparts> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input.starts_with('.') {
            match input {
                ".exit" | ".quit" => break,
                ".help" => print_help(),
                ".tools" => {
                    for def in tools::definitions() {
                        println!("  {:<22} {}", def.name, def.description);
                    }
                }
                _ => {
                    println!("Unknown command: {}", input);
                    println!("Type '.help' for help");
                }
            }
            continue;
        }

        let (name, raw_args) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        let arguments = if raw_args.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(raw_args) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error: arguments are not valid JSON: {}", e);
                    continue;
                }
            }
        };

        match tools::call_tool(service, name, arguments) {
            Ok(output) => println!("{}", display(output)),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Special Commands:");
    println!("  .tools             List the available tools");
    println!("  .help              Show this help message");
    println!("  .exit, .quit       Exit the shell");
    println!();
    println!("Calling a tool:");
    println!("  list_categories");
    println!("  get_category {{\"category_id\": 3}}");
    println!("  search_manufacturer {{\"name\": \"YAGEO\"}}");
    println!("  search_parts {{\"search_query\": {{\"category_id\": 1, \"package\": \"0402\"}}}}");
    println!();
}
