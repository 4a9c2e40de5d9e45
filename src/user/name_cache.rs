use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use moka::future::Cache;

use crate::user::service::NameResolver;
use crate::utils::error::CustomError;

/// Process-wide display-name cache in front of another resolver.
///
/// Entries expire after a fixed time-to-live and are never invalidated
/// explicitly; a renamed user shows the old name until the entry ages out.
/// Identities the inner resolver does not know are not cached.
pub struct CachedNameResolver<R> {
    inner: R,
    cache: Cache<String, String>,
}

impl<R: NameResolver> CachedNameResolver<R> {
    pub fn new(inner: R, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        CachedNameResolver { inner, cache }
    }
}

#[async_trait]
impl<R: NameResolver> NameResolver for CachedNameResolver<R> {
    async fn resolve_names(
        &self,
        emails: &HashSet<String>,
    ) -> Result<HashMap<String, String>, CustomError> {
        let mut names = HashMap::with_capacity(emails.len());
        let mut misses = HashSet::new();

        for email in emails {
            match self.cache.get(email).await {
                Some(name) => {
                    names.insert(email.clone(), name);
                }
                None => {
                    misses.insert(email.clone());
                }
            }
        }

        debug!(
            "Name cache: {} hit(s), {} miss(es)",
            names.len(),
            misses.len()
        );

        if misses.is_empty() {
            return Ok(names);
        }

        let fetched = self.inner.resolve_names(&misses).await?;
        for (email, name) in fetched {
            self.cache.insert(email.clone(), name.clone()).await;
            names.insert(email, name);
        }

        Ok(names)
    }
}
