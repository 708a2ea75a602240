// MCP resources: read-only catalogs addressed by URI

pub mod catalog;
mod registry;

pub use catalog::{CharactersResource, MotionsResource, StylesResource};
pub use registry::{Resource, ResourceRegistry};

use higgsfield_sdk::HiggsfieldClient;
use std::sync::Arc;

/// URI scheme shared by every resource.
pub const SCHEME: &str = "higgsfield";

/// Registry holding every Higgsfield resource, sharing one client.
pub fn higgsfield_resources(client: Arc<HiggsfieldClient>) -> ResourceRegistry {
    let mut registry = ResourceRegistry::new();
    registry.register(Arc::new(StylesResource::new(client.clone())));
    registry.register(Arc::new(MotionsResource::new(client.clone())));
    registry.register(Arc::new(CharactersResource::new(client)));
    registry
}
