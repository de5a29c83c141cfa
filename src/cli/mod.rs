//! # CLI Module
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Serve the demo controller:
//!
//! ```bash
//! getjson serve --addr 127.0.0.1 --port 8080
//! ```
//!
//! Options:
//! - `--addr <ADDR>` - interface to bind (default `0.0.0.0`, env `GETJSON_ADDR`)
//! - `--port <PORT>` - port to bind (default `8080`, env `GETJSON_PORT`)
//!
//! Logging and the coroutine runtime are configured from the environment,
//! see [`crate::logging`] and [`crate::runtime_config`].
//!
//! ### `routes`
//!
//! Print the compiled route table:
//!
//! ```bash
//! $ getjson routes
//! GET /api/ints -> ints ()
//! GET /api/path/{pathvar} -> path (pathvar: String (path))
//! ...
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{route_lines, run, run_cli, Cli, Commands};
