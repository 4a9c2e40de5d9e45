use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Document, doc, oid::ObjectId},
};

use crate::post::post_model::Post;
use crate::utils::error::CustomError;

/// Load/save access to whole post documents. The comment thread is part of
/// the document, so every comment mutation is a full-post save.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn load_post(&self, id: &str) -> Result<Option<Post>, CustomError>;

    /// Persist a previously loaded post. Fails with `ConflictError` when the
    /// stored copy changed since it was loaded.
    async fn save_post(&self, post: Post) -> Result<Post, CustomError>;

    async fn insert_post(&self, post: Post) -> Result<Post, CustomError>;

    async fn delete_post(&self, id: &str) -> Result<bool, CustomError>;

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError>;

    async fn posts_by_author(&self, email: &str) -> Result<Vec<Post>, CustomError>;
}

pub struct MongoPostStore {
    collection: Collection<Post>,
}

impl MongoPostStore {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection::<Post>("blogposts");
        MongoPostStore { collection }
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Post>, CustomError> {
        let cursor = self.collection.find(filter).await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to fetch posts: {}", e))
        })?;

        cursor.try_collect().await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to collect posts: {}", e))
        })
    }
}

/// An id that cannot be an ObjectId names no stored post.
fn parse_post_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn load_post(&self, id: &str) -> Result<Option<Post>, CustomError> {
        let Some(object_id) = parse_post_id(id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to fetch post: {}", e)))
    }

    async fn save_post(&self, mut post: Post) -> Result<Post, CustomError> {
        let expected = post.version;
        // Documents written before versioning have no field at all.
        let filter = if expected == 0 {
            doc! {
                "_id": post.id,
                "$or": [ { "version": 0_i64 }, { "version": { "$exists": false } } ],
            }
        } else {
            doc! { "_id": post.id, "version": expected }
        };

        post.version = expected + 1;
        post.updated_at = Utc::now();

        let result = self
            .collection
            .replace_one(filter, &post)
            .await
            .map_err(|e| CustomError::InternalServerError(format!("Failed to save post: {}", e)))?;

        if result.matched_count == 0 {
            return Err(CustomError::ConflictError(
                "Post was modified by another request, reload and retry".to_string(),
            ));
        }

        Ok(post)
    }

    async fn insert_post(&self, post: Post) -> Result<Post, CustomError> {
        self.collection
            .insert_one(&post)
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to create post".into()))?;

        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, CustomError> {
        let Some(object_id) = parse_post_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|_| CustomError::InternalServerError("Failed to delete post".into()))?;

        Ok(result.deleted_count > 0)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        self.find_many(doc! {}).await
    }

    async fn posts_by_author(&self, email: &str) -> Result<Vec<Post>, CustomError> {
        self.find_many(doc! { "author_email": email }).await
    }
}
