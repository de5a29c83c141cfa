//! # Server Module
//!
//! HTTP transport for the dispatcher, built on `may_minihttp`.
//!
//! - [`HttpExchange`] - the request/response abstraction the dispatcher
//!   works against
//! - [`AppService`] - adapts `may_minihttp` requests into exchanges
//! - [`GetJson`] - controller + route table facade with [`GetJson::start`]
//! - [`ServerHandle`] - readiness polling, stop and join

mod exchange;
mod http_server;
mod request;
mod response;
mod service;

pub use exchange::HttpExchange;
pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use response::{write_response, JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
pub use service::{AppService, GetJson};
