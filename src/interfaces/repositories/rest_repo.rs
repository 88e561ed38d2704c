use std::time::Duration;

use async_trait::async_trait;
use derive_more::Display;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    entities::comment::{Comment, RATING_MIN, clamp_rating},
    entities::record::EntityRecord,
    errors::AppError,
    identity::UserId,
    repositories::store::RecordStore,
    settings::AppConfig,
};

#[derive(Debug, Display)]
pub enum RestError {
    #[display("request failed: {_0}")]
    Transport(String),

    #[display("unexpected status: {_0}")]
    Status(u16),

    #[display("invalid response body: {_0}")]
    Decode(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RestError::Decode(err.to_string())
        } else {
            RestError::Transport(err.to_string())
        }
    }
}

impl From<RestError> for AppError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Status(404) => AppError::NotFound("Comment not found".into()),
            other => AppError::Network(other.to_string()),
        }
    }
}

/// Comment payload as the REST collection exchanges it. The rating travels
/// as the string form of the clamped integer.
#[derive(Debug, Serialize, Deserialize)]
struct CommentWire {
    #[serde(default)]
    id: String,
    titulo: String,
    comentario: String,
    avaliacao: String,
    #[serde(default, rename = "tutorialId")]
    tutorial_id: String,
    #[serde(rename = "imagemUrl")]
    imagem_url: String,
}

impl From<&Comment> for CommentWire {
    fn from(record: &Comment) -> Self {
        CommentWire {
            id: record.id.clone(),
            titulo: record.title.clone(),
            comentario: record.body.clone(),
            avaliacao: clamp_rating(record.rating).to_string(),
            tutorial_id: record.tutorial_id.clone(),
            imagem_url: record.image_url.clone(),
        }
    }
}

impl From<CommentWire> for Comment {
    fn from(wire: CommentWire) -> Self {
        Comment {
            id: wire.id,
            title: wire.titulo,
            body: wire.comentario,
            rating: wire
                .avaliacao
                .trim()
                .parse()
                .map(clamp_rating)
                .unwrap_or(RATING_MIN),
            tutorial_id: wire.tutorial_id,
            image_url: wire.imagem_url,
        }
    }
}

/// Pull-based adapter for the comments collection: plain GET/POST/PUT/DELETE
/// against a fixed base URL, no subscription support.
pub struct RestCommentStore {
    client: Client,
    base_url: String,
}

impl RestCommentStore {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_base_url(&config.comments_api_base, config.request_timeout_secs)
    }

    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client setup failed: {e}")))?;
        Ok(RestCommentStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn expect_success(response: Response) -> Result<Response, RestError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(RestError::Status(404)),
            status => Err(RestError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl RecordStore<Comment> for RestCommentStore {
    async fn create(&self, _owner: &UserId, record: Comment) -> Result<Comment, AppError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&CommentWire::from(&record))
            .send()
            .await
            .map_err(RestError::from)?;
        let response = Self::expect_success(response)?;
        let wire: CommentWire = response.json().await.map_err(RestError::from)?;
        tracing::debug!(collection = Comment::COLLECTION, id = %wire.id, "comment created");
        Ok(Comment::from(wire))
    }

    async fn update(&self, _owner: &UserId, id: &str, record: Comment) -> Result<Comment, AppError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(&CommentWire::from(&record))
            .send()
            .await
            .map_err(RestError::from)?;
        let response = Self::expect_success(response)?;
        let wire: CommentWire = response.json().await.map_err(RestError::from)?;
        Ok(Comment::from(wire))
    }

    async fn remove(&self, _owner: &UserId, id: &str) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(RestError::from)?;
        Self::expect_success(response)?;
        Ok(())
    }

    async fn list(&self, _owner: &UserId) -> Result<Vec<Comment>, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(RestError::from)?;
        let response = Self::expect_success(response)?;
        let wires: Vec<CommentWire> = response.json().await.map_err(RestError::from)?;
        Ok(wires.into_iter().map(Comment::from).collect())
    }
}
