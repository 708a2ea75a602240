// MCP (Model Context Protocol) server for the Higgsfield platform.
// Exposes generation jobs as tools and preset catalogs as resources.

pub mod config;
pub mod envelope;
pub mod framing;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use server::McpServer;
