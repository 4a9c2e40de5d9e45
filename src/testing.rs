//! In-process collaborators for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::post::post_model::Post;
use crate::post::post_store::PostStore;
use crate::user::service::NameResolver;
use crate::utils::error::CustomError;

/// Resolver over a fixed name table that records every batch it is asked for.
pub struct CountingResolver {
    names: HashMap<String, String>,
    requests: Mutex<Vec<HashSet<String>>>,
}

impl CountingResolver {
    pub fn with_names(names: &[(&str, &str)]) -> Self {
        CountingResolver {
            names: names
                .iter()
                .map(|(email, name)| (email.to_string(), name.to_string()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requested(&self) -> Vec<HashSet<String>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameResolver for CountingResolver {
    async fn resolve_names(
        &self,
        emails: &HashSet<String>,
    ) -> Result<HashMap<String, String>, CustomError> {
        self.requests.lock().unwrap().push(emails.clone());
        Ok(emails
            .iter()
            .filter_map(|email| {
                self.names
                    .get(email)
                    .map(|name| (email.clone(), name.clone()))
            })
            .collect())
    }
}

/// Post store backed by a map, with the same version check as the MongoDB
/// store.
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: Mutex<HashMap<String, Post>>,
    saves: Mutex<usize>,
}

impl InMemoryPostStore {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        InMemoryPostStore {
            posts: Mutex::new(
                posts
                    .into_iter()
                    .map(|post| (post.id.to_hex(), post))
                    .collect(),
            ),
            saves: Mutex::new(0),
        }
    }

    pub fn get(&self, id: &str) -> Option<Post> {
        self.posts.lock().unwrap().get(id).cloned()
    }

    pub fn saves(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn load_post(&self, id: &str) -> Result<Option<Post>, CustomError> {
        Ok(self.get(id))
    }

    async fn save_post(&self, mut post: Post) -> Result<Post, CustomError> {
        let mut posts = self.posts.lock().unwrap();
        let key = post.id.to_hex();
        match posts.get(&key) {
            Some(stored) if stored.version == post.version => {}
            _ => return Err(CustomError::ConflictError("stale post".to_string())),
        }
        post.version += 1;
        posts.insert(key, post.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(post)
    }

    async fn insert_post(&self, post: Post) -> Result<Post, CustomError> {
        self.posts
            .lock()
            .unwrap()
            .insert(post.id.to_hex(), post.clone());
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, CustomError> {
        Ok(self.posts.lock().unwrap().remove(id).is_some())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, CustomError> {
        Ok(self.posts.lock().unwrap().values().cloned().collect())
    }

    async fn posts_by_author(&self, email: &str) -> Result<Vec<Post>, CustomError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .values()
            .filter(|post| post.author_email == email)
            .cloned()
            .collect())
    }
}
