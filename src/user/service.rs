use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::debug;
use mongodb::bson::doc;
use mongodb::{Client, Collection};

use crate::user::model::User;
use crate::utils::error::CustomError;

/// Batch lookup of display names by author identity. Identities without a
/// known user are simply absent from the returned map.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_names(
        &self,
        emails: &HashSet<String>,
    ) -> Result<HashMap<String, String>, CustomError>;
}

pub struct UserService {
    collection: Collection<User>,
}

impl UserService {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection::<User>("users");
        UserService { collection }
    }
}

#[async_trait]
impl NameResolver for UserService {
    async fn resolve_names(
        &self,
        emails: &HashSet<String>,
    ) -> Result<HashMap<String, String>, CustomError> {
        if emails.is_empty() {
            return Ok(HashMap::new());
        }

        let wanted: Vec<String> = emails.iter().cloned().collect();
        let cursor = self
            .collection
            .find(doc! { "email": { "$in": wanted } })
            .await
            .map_err(|e| {
                CustomError::InternalServerError(format!("Failed to fetch users: {}", e))
            })?;

        let users: Vec<User> = cursor.try_collect().await.map_err(|e| {
            CustomError::InternalServerError(format!("Failed to collect users: {}", e))
        })?;

        debug!("Resolved {} of {} author names", users.len(), emails.len());

        Ok(users.into_iter().map(|user| (user.email, user.name)).collect())
    }
}
