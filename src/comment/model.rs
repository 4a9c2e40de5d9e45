use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::comment::tree::map_tree;

/// A node of a post's comment thread. Top-level comments and replies share
/// this shape; a reply is simply a `Comment` stored in another comment's
/// `replies`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author_email: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Build a fresh leaf comment with a random identifier.
    pub fn new(author_email: &str, content: &str) -> Self {
        Comment {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            author_email: author_email.to_string(),
            created_at: Utc::now(),
            replies: Vec::new(),
        }
    }
}

impl Clone for Comment {
    fn clone(&self) -> Self {
        Comment {
            id: self.id.clone(),
            content: self.content.clone(),
            author_email: self.author_email.clone(),
            created_at: self.created_at,
            replies: map_tree(&self.replies, |node, replies| Comment {
                id: node.id.clone(),
                content: node.content.clone(),
                author_email: node.author_email.clone(),
                created_at: node.created_at,
                replies,
            }),
        }
    }
}

// Threads have no depth limit, so the default recursive drop glue could
// exhaust the stack on a long reply chain.
impl Drop for Comment {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// Read-only view of a comment with the author identity replaced by a
/// display name.
#[derive(Debug, Serialize)]
pub struct RenderedComment {
    pub id: String,
    pub content: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<RenderedComment>,
}

impl Drop for RenderedComment {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_comment_is_an_empty_leaf() {
        let comment = Comment::new("a@x.com", "hello");
        assert_eq!(comment.author_email, "a@x.com");
        assert_eq!(comment.content, "hello");
        assert!(comment.replies.is_empty());
        assert!(Uuid::parse_str(&comment.id).is_ok());
    }

    #[test]
    fn generated_ids_differ() {
        let first = Comment::new("a@x.com", "one");
        let second = Comment::new("a@x.com", "two");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn missing_replies_deserialize_as_empty() {
        let json = r#"{
            "id": "c1",
            "content": "hi",
            "author_email": "a@x.com",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert!(comment.replies.is_empty());
    }

    #[test]
    fn clone_copies_the_whole_subtree() {
        let mut root = Comment::new("a@x.com", "root");
        let mut child = Comment::new("b@x.com", "child");
        child.replies.push(Comment::new("c@x.com", "grandchild"));
        root.replies.push(child);

        let copy = root.clone();
        assert_eq!(copy.id, root.id);
        assert_eq!(copy.replies.len(), 1);
        assert_eq!(copy.replies[0].id, root.replies[0].id);
        assert_eq!(copy.replies[0].replies[0].content, "grandchild");
    }

    #[test]
    fn deep_chain_clones_and_drops() {
        let mut node = Comment::new("a@x.com", "leaf");
        for _ in 0..10_000 {
            let mut parent = Comment::new("a@x.com", "link");
            parent.replies.push(node);
            node = parent;
        }
        let copy = node.clone();
        drop(node);
        drop(copy);
    }
}
