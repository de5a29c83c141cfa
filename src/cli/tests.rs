//! Unit tests for CLI commands

use crate::cli::{route_lines, Cli, Commands};
use crate::demo::{registry, DemoController};
use crate::dispatcher::Dispatcher;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["getjson", "serve"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Serve {
            addr: "0.0.0.0".to_string(),
            port: 8080
        }
    );
}

#[test]
fn test_serve_with_flags() {
    let cli =
        Cli::try_parse_from(["getjson", "serve", "--addr", "127.0.0.1", "--port", "3000"]).unwrap();
    match cli.command {
        Commands::Serve { addr, port } => {
            assert_eq!(addr, "127.0.0.1");
            assert_eq!(port, 3000);
        }
        other => panic!("Expected Serve command, got {other:?}"),
    }
}

#[test]
fn test_invalid_port_rejected() {
    assert!(Cli::try_parse_from(["getjson", "serve", "--port", "http"]).is_err());
}

#[test]
fn test_routes_command() {
    let cli = Cli::try_parse_from(["getjson", "routes"]).unwrap();
    assert_eq!(cli.command, Commands::Routes);
}

#[test]
fn test_route_lines() {
    let dispatcher = Dispatcher::new(DemoController::default(), registry()).unwrap();
    let lines = route_lines(&dispatcher);
    assert_eq!(lines[0], "GET /api/ints -> ints ()");
    assert!(lines.contains(&"GET /api/path/{pathvar} -> path (pathvar: String (path))".to_string()));
    assert!(lines.contains(&"GET /api/args -> args (n: Int (query), text: String (query))".to_string()));
}
