//! Style and motion preset catalogs.

use crate::client::HiggsfieldClient;
use crate::error::HiggsfieldResult;
use higgsfield_core::types::{MotionPreset, StylePreset};

/// Catalog API for read-only presets. Results are fetched on every call.
pub struct CatalogApi<'a> {
    client: &'a HiggsfieldClient,
}

impl<'a> CatalogApi<'a> {
    pub(crate) fn new(client: &'a HiggsfieldClient) -> Self {
        Self { client }
    }

    /// Soul image style presets, in upstream order.
    pub async fn styles(&self) -> HiggsfieldResult<Vec<StylePreset>> {
        self.client
            .http
            .get(&["v1", "text2image", "soul-styles"])
            .await
    }

    /// Image-to-video motion presets, in upstream order.
    pub async fn motions(&self) -> HiggsfieldResult<Vec<MotionPreset>> {
        self.client.http.get(&["v1", "motions"]).await
    }
}
