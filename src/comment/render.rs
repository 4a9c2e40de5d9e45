use std::collections::{HashMap, HashSet};

use crate::comment::model::{Comment, RenderedComment};
use crate::comment::tree::{map_tree, preorder};
use crate::user::service::NameResolver;
use crate::utils::error::CustomError;

/// Shown in place of an author whose identity no longer resolves.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Every distinct author identity appearing anywhere in the thread.
pub fn collect_author_emails(comments: &[Comment]) -> HashSet<String> {
    preorder(comments)
        .map(|node| node.author_email.clone())
        .collect()
}

pub fn display_name(names: &HashMap<String, String>, email: &str) -> String {
    names
        .get(email)
        .cloned()
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

/// Build the redacted view of a thread from already-resolved names. The
/// stored thread is left untouched.
pub fn render_comments(
    comments: &[Comment],
    names: &HashMap<String, String>,
) -> Vec<RenderedComment> {
    map_tree(comments, |node, replies| RenderedComment {
        id: node.id.clone(),
        content: node.content.clone(),
        author_name: display_name(names, &node.author_email),
        created_at: node.created_at,
        replies,
    })
}

/// Resolve every author of the thread, plus any `also_resolve` identities,
/// with one batch lookup, then render. The resolved names are handed back
/// so callers can label other parts of the page without a second lookup.
pub async fn resolve_and_redact(
    comments: &[Comment],
    also_resolve: &[&str],
    resolver: &dyn NameResolver,
) -> Result<(Vec<RenderedComment>, HashMap<String, String>), CustomError> {
    let mut emails = collect_author_emails(comments);
    emails.extend(also_resolve.iter().map(|email| email.to_string()));
    let names = resolver.resolve_names(&emails).await?;
    Ok((render_comments(comments, &names), names))
}
