//! Navigation and mutation of a post's comment thread.
//!
//! Every walk keeps its pending work on a heap-allocated frame stack instead
//! of the call stack, so a reply chain thousands of levels deep is handled
//! the same as a flat thread.

use std::iter::Enumerate;
use std::slice::Iter;

use thiserror::Error;

use crate::comment::model::Comment;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("Comment {0} not found")]
    NotFound(String),
}

/// Depth-first, parent-before-children walk over a comment thread.
pub struct Preorder<'a> {
    frames: Vec<Enumerate<Iter<'a, Comment>>>,
    path: Vec<usize>,
}

impl Preorder<'_> {
    /// Sibling indices leading from the top level to the last yielded node.
    pub fn path(&self) -> &[usize] {
        &self.path
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.frames.len().checked_sub(1)?;
            let top = self.frames.last_mut()?;
            match top.next() {
                Some((index, node)) => {
                    self.path.truncate(depth);
                    self.path.push(index);
                    self.frames.push(node.replies.iter().enumerate());
                    return Some(node);
                }
                None => {
                    self.frames.pop();
                }
            }
        }
    }
}

pub fn preorder(comments: &[Comment]) -> Preorder<'_> {
    Preorder {
        frames: vec![comments.iter().enumerate()],
        path: Vec::new(),
    }
}

pub fn find<'a>(comments: &'a [Comment], id: &str) -> Option<&'a Comment> {
    preorder(comments).find(|node| node.id == id)
}

pub fn find_mut<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    let path = locate(comments, id)?;
    node_at_mut(comments, &path)
}

/// Total number of nodes at every depth.
pub fn count(comments: &[Comment]) -> usize {
    preorder(comments).count()
}

pub fn insert_top_level(comments: &mut Vec<Comment>, comment: Comment) {
    comments.push(comment);
}

/// Append `reply` as the last child of the node with `parent_id`.
pub fn insert_reply(
    comments: &mut [Comment],
    parent_id: &str,
    reply: Comment,
) -> Result<(), TreeError> {
    let parent = find_mut(comments, parent_id)
        .ok_or_else(|| TreeError::NotFound(parent_id.to_string()))?;
    parent.replies.push(reply);
    Ok(())
}

/// Detach the node with `id` from wherever it sits, returning it with its
/// whole subtree.
pub fn remove(comments: &mut Vec<Comment>, id: &str) -> Result<Comment, TreeError> {
    let not_found = || TreeError::NotFound(id.to_string());
    let path = locate(comments, id).ok_or_else(not_found)?;
    let (&index, parent_path) = path.split_last().ok_or_else(not_found)?;

    let siblings = if parent_path.is_empty() {
        comments
    } else {
        &mut node_at_mut(comments, parent_path)
            .ok_or_else(not_found)?
            .replies
    };

    if index >= siblings.len() {
        return Err(not_found());
    }
    Ok(siblings.remove(index))
}

/// Rebuild a thread bottom-up: `f` receives each node together with the
/// already-mapped values of its children, in stored order.
pub fn map_tree<T, F>(comments: &[Comment], mut f: F) -> Vec<T>
where
    F: FnMut(&Comment, Vec<T>) -> T,
{
    struct Frame<'a, T> {
        node: Option<&'a Comment>,
        children: Iter<'a, Comment>,
        mapped: Vec<T>,
    }

    let mut frames = vec![Frame {
        node: None,
        children: comments.iter(),
        mapped: Vec::with_capacity(comments.len()),
    }];

    while let Some(frame) = frames.last_mut() {
        if let Some(child) = frame.children.next() {
            frames.push(Frame {
                node: Some(child),
                children: child.replies.iter(),
                mapped: Vec::with_capacity(child.replies.len()),
            });
            continue;
        }

        let Some(Frame { node, mapped, .. }) = frames.pop() else {
            break;
        };
        match (node, frames.last_mut()) {
            (Some(node), Some(parent)) => parent.mapped.push(f(node, mapped)),
            _ => return mapped,
        }
    }

    Vec::new()
}

fn locate(comments: &[Comment], id: &str) -> Option<Vec<usize>> {
    let mut walk = preorder(comments);
    while let Some(node) = walk.next() {
        if node.id == id {
            return Some(walk.path().to_vec());
        }
    }
    None
}

fn node_at_mut<'a>(comments: &'a mut [Comment], path: &[usize]) -> Option<&'a mut Comment> {
    let (first, rest) = path.split_first()?;
    let mut node = comments.get_mut(*first)?;
    for &index in rest {
        node = node.replies.get_mut(index)?;
    }
    Some(node)
}
