use crate::demo::{registry, DemoController};
use crate::dispatcher::{Dispatcher, ALLOWED_METHOD};
use crate::logging::{init_logging, LogConfig};
use crate::runtime_config::RuntimeConfig;
use crate::server::GetJson;
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::info;

/// Command-line interface for the getjson demo server
#[derive(Parser, Debug)]
#[command(name = "getjson")]
#[command(about = "Serve controller endpoints as canonical JSON over GET", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the demo controller
    Serve {
        /// Interface to bind
        #[arg(long, env = "GETJSON_ADDR", default_value = "0.0.0.0")]
        addr: String,

        /// Port to bind
        #[arg(short, long, env = "GETJSON_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Print the demo controller's route table
    Routes,
}

/// Parse the process arguments and run the selected command.
///
/// # Errors
///
/// Startup failures: logging, route table construction, binding.
pub fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse())
}

/// Run an already parsed command line.
///
/// # Errors
///
/// Startup failures: logging, route table construction, binding.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { addr, port } => {
            init_logging(&LogConfig::from_env())?;
            RuntimeConfig::from_env().apply();

            let app = GetJson::new(DemoController::default(), registry())
                .context("failed to build route table")?;
            for line in route_lines(app.dispatcher()) {
                info!(route = %line, "Route registered");
            }

            let handle = app
                .start((addr.as_str(), port))
                .with_context(|| format!("failed to bind {addr}:{port}"))?;
            handle
                .join()
                .map_err(|e| anyhow!("server coroutine panicked: {e:?}"))
        }
        Commands::Routes => {
            let dispatcher = Dispatcher::new(DemoController::default(), registry())?;
            for line in route_lines(&dispatcher) {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// One line per route: method, full path, handler and its parameters.
#[must_use]
pub fn route_lines<C>(dispatcher: &Dispatcher<C>) -> Vec<String> {
    dispatcher
        .router()
        .routes()
        .iter()
        .zip(dispatcher.handlers())
        .map(|(route, handler)| {
            let params: Vec<String> = handler.params.iter().map(ToString::to_string).collect();
            format!(
                "{ALLOWED_METHOD} {} -> {} ({})",
                route.full_path(),
                route.handler_name(),
                params.join(", ")
            )
        })
        .collect()
}
