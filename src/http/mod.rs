//! HTTP Transport layer for the Model Context Protocol
//!
//! Provides the external API routing, including the `/mcp` listener and its discovery probe.

pub mod handlers;
