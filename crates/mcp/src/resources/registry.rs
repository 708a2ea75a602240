use crate::protocol::ResourceSchema;
use std::collections::HashMap;
use std::sync::Arc;

/// Resource reader trait
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Get the resource descriptor for MCP
    fn schema(&self) -> ResourceSchema;

    /// Read the current contents as JSON text. Never fails: upstream errors
    /// are rendered into the returned document.
    async fn read(&self) -> String;
}

/// Resource registry keyed by URI
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    pub fn register(&mut self, resource: Arc<dyn Resource>) {
        let schema = resource.schema();
        self.resources.insert(schema.uri.clone(), resource);
    }

    pub fn get(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.resources.get(uri).cloned()
    }

    /// List all resource descriptors, sorted by URI
    pub fn list_schemas(&self) -> Vec<ResourceSchema> {
        let mut schemas: Vec<ResourceSchema> =
            self.resources.values().map(|r| r.schema()).collect();
        schemas.sort_by(|a, b| a.uri.cmp(&b.uri));
        schemas
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
