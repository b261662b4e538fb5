//! Bandcamp search domain
//!
//! Filter validation, canonical URL construction, result assembly and the
//! tool registry exposed over the MCP protocol. Nothing here performs I/O.

pub mod filter;
pub mod search;
pub mod tools;
pub mod url_builder;
