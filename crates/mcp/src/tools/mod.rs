pub mod characters;
pub mod generation;
pub mod status;
mod registry;

pub use characters::{CreateCharacterTool, ListCharactersTool};
pub use generation::{GenerateImageTool, GenerateTalkingHeadTool, GenerateVideoTool, VideoQuality};
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_enum, json_schema_integer,
    json_schema_object, json_schema_string, parse_arguments, Tool, ToolRegistry,
};
pub use status::{status_message, GenerationStatusTool};

use higgsfield_sdk::HiggsfieldClient;
use std::sync::Arc;

/// Registry holding every Higgsfield tool, sharing one client.
pub fn higgsfield_tools(client: Arc<HiggsfieldClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(GenerateImageTool::new(client.clone())));
    registry.register(Arc::new(GenerateVideoTool::new(client.clone())));
    registry.register(Arc::new(GenerateTalkingHeadTool::new(client.clone())));
    registry.register(Arc::new(CreateCharacterTool::new(client.clone())));
    registry.register(Arc::new(GenerationStatusTool::new(client.clone())));
    registry.register(Arc::new(ListCharactersTool::new(client)));
    registry
}
