//! Model Context Protocol (MCP) server handling and JSON-RPC implementations
//!
//! Provides envelope parsing, notification/request classification, response
//! formatting and method routing.

pub mod message;
pub mod rpc;
pub mod server;
