use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::comment::model::{Comment, RenderedComment};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub content: String,
    pub code_language: Option<String>,
    pub code_snippet: Option<String>,
    pub image: Option<Vec<u8>>,
    pub author_email: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Bumped on every save; a save only lands if the stored version still
    /// matches the one that was loaded.
    #[serde(default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub code_language: Option<String>,
    pub code_snippet: Option<String>,
    /// Base64-encoded image bytes.
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub code_language: Option<String>,
    pub code_snippet: Option<String>,
    pub image: Option<String>,
}

/// A post as readers see it: author identities are replaced by names.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub code_language: Option<String>,
    pub code_snippet: Option<String>,
    pub image: Option<String>,
    pub author_name: String,
    pub comments: Vec<RenderedComment>,
    pub comment_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List entry without the comment thread.
#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub code_language: Option<String>,
    pub code_snippet: Option<String>,
    pub image: Option<String>,
    pub author_name: String,
    pub comment_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
