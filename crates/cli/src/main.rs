mod config;
mod error;
mod repl;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use mcp::ServerConfig;
use runtime::{McpToolHost, Session};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use error::Result;

const USAGE: &str = "Usage: toolbridge <path_to_server_script>";

#[derive(Parser)]
#[command(name = "toolbridge")]
#[command(about = "Chat with a model that can call tools on an MCP server", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the MCP server script (.py or .js)
    script: Option<PathBuf>,

    /// Configuration file (defaults to ./toolbridge.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so answers on stdout stay clean. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let Some(script) = cli.script else {
        println!("{USAGE}");
        return Ok(());
    };

    // Everything that can be rejected up front is checked before spawning.
    let config = Config::resolve(cli.config.as_deref())?;
    let backend = config.backend()?;
    let server = ServerConfig::for_script(&script, &config.server.interpreters())?
        .with_env(config.server.env.clone());

    info!(%backend, "using model backend");

    let host = McpToolHost::spawn(server).await?;
    let session =
        Session::new(backend, host).with_max_tool_rounds(config.session.max_tool_rounds);

    let names: Vec<_> = session.tool_specs().iter().map(|s| s.name.as_str()).collect();
    println!("toolbridge v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "Connected to server {} with tools: [{}]",
        session.host().server_name(),
        names.join(", ")
    );

    let outcome = repl::run(&session, io::stdin().lock(), &mut io::stdout()).await;

    if let Err(e) = session.into_host().shutdown().await {
        warn!(error = %e, "failed to shut down MCP server");
    }

    outcome?;
    println!("\nSession ended.");
    Ok(())
}
