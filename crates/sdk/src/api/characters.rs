//! Character reference API endpoints.

use crate::client::HiggsfieldClient;
use crate::error::HiggsfieldResult;
use higgsfield_core::types::{CharacterId, CharacterPage, CharacterReference, InputImage};
use serde::Serialize;

/// Characters API for managing reusable identity references.
pub struct CharactersApi<'a> {
    client: &'a HiggsfieldClient,
}

impl<'a> CharactersApi<'a> {
    pub(crate) fn new(client: &'a HiggsfieldClient) -> Self {
        Self { client }
    }

    /// Create a character reference from face images, kept in input order.
    pub async fn create(
        &self,
        name: &str,
        image_urls: &[String],
    ) -> HiggsfieldResult<CharacterReference> {
        let request = CreateCharacterRequest {
            name,
            input_images: image_urls.iter().map(|url| InputImage::url(url.as_str())).collect(),
        };
        self.client
            .http
            .post(&["v1", "custom-references"], &request)
            .await
    }

    /// List character references, one page at a time.
    pub async fn list(&self, page: u32, page_size: u32) -> HiggsfieldResult<CharacterPage> {
        self.client
            .http
            .get_with_query(
                &["v1", "custom-references", "list"],
                &[("page", page), ("page_size", page_size)],
            )
            .await
    }

    /// First page at the platform's default page size.
    pub async fn first_page(&self) -> HiggsfieldResult<CharacterPage> {
        self.list(1, DEFAULT_PAGE_SIZE).await
    }

    /// Get one character reference.
    pub async fn get(&self, character_id: &CharacterId) -> HiggsfieldResult<CharacterReference> {
        self.client
            .http
            .get(&["v1", "custom-references", character_id.0.as_str()])
            .await
    }

    /// Delete a character reference.
    pub async fn delete(&self, character_id: &CharacterId) -> HiggsfieldResult<()> {
        self.client
            .http
            .delete_no_response(&["v1", "custom-references", character_id.0.as_str()])
            .await
    }
}

/// Default page size used by the platform.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Serialize)]
struct CreateCharacterRequest<'a> {
    name: &'a str,
    input_images: Vec<InputImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use higgsfield_core::types::CharacterStatus;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn character_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Jane",
            "status": "queued",
            "thumbnail_url": "https://cdn/thumb.jpg",
            "created_at": "2024-01-01T00:00:00Z"
        })
    }

    async fn client_for(server: &MockServer) -> HiggsfieldClient {
        HiggsfieldClient::builder()
            .base_url(server.uri())
            .api_key("key")
            .secret("secret")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_character_preserves_image_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/custom-references"))
            .respond_with(ResponseTemplate::new(200).set_body_json(character_json("c1")))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let urls = vec![
            "https://img/front.jpg".to_string(),
            "https://img/left.jpg".to_string(),
            "https://img/right.jpg".to_string(),
        ];
        let character = client.characters().create("Jane", &urls).await.unwrap();
        assert_eq!(character.status, CharacterStatus::Queued);

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Jane",
                "input_images": [
                    {"type": "image_url", "image_url": "https://img/front.jpg"},
                    {"type": "image_url", "image_url": "https://img/left.jpg"},
                    {"type": "image_url", "image_url": "https://img/right.jpg"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_list_characters_pagination() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/custom-references/list"))
            .and(query_param("page", "1"))
            .and(query_param("page_size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [character_json("c1"), character_json("c2")],
                "total": 7,
                "page": 1,
                "page_size": 20
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let page = client.characters().first_page().await.unwrap();

        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id.0, "c2");
    }

    #[tokio::test]
    async fn test_get_and_delete_character() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/custom-references/c9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "c9",
                "name": "Jane",
                "status": "completed",
                "thumbnail_url": null,
                "created_at": "2024-01-01T00:00:00Z",
                "input_images": [{"type": "image_url", "image_url": "https://img/front.jpg"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1/custom-references/c9"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let id = CharacterId::new("c9");

        let character = client.characters().get(&id).await.unwrap();
        assert_eq!(character.status, CharacterStatus::Completed);
        assert_eq!(character.input_images.len(), 1);

        client.characters().delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_unknown_character_fails() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .characters()
            .delete(&CharacterId::new("gone"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
