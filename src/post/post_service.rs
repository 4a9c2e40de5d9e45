use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use log::info;
use mongodb::bson::oid::ObjectId;

use crate::comment::model::Comment;
use crate::comment::render::{display_name, resolve_and_redact};
use crate::comment::tree;
use crate::middleware::auth::authorize;
use crate::post::post_model::{CreatePostRequest, Post, PostSummary, PostView, UpdatePostRequest};
use crate::post::post_store::PostStore;
use crate::user::service::NameResolver;
use crate::utils::error::CustomError;
use crate::utils::helpers::{decode_image, encode_image};

/// Public blog post API. Every comment operation is load post, mutate the
/// thread in memory, save post.
pub struct BlogPostService {
    store: Arc<dyn PostStore>,
    names: Arc<dyn NameResolver>,
}

impl BlogPostService {
    pub fn new(store: Arc<dyn PostStore>, names: Arc<dyn NameResolver>) -> Self {
        BlogPostService { store, names }
    }

    async fn load(&self, blog_id: &str) -> Result<Post, CustomError> {
        self.store
            .load_post(blog_id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError("Blog not found".into()))
    }

    pub async fn create_post(
        &self,
        caller: Option<&str>,
        request: CreatePostRequest,
    ) -> Result<Post, CustomError> {
        let author_email = caller
            .ok_or_else(|| CustomError::UnauthenticatedError("Not authenticated".into()))?;
        validate_post_fields(&request.title, &request.content)?;

        let now = Utc::now();
        let post = Post {
            id: ObjectId::new(),
            title: request.title,
            content: request.content,
            code_language: request.code_language,
            code_snippet: request.code_snippet,
            image: decode_image(request.image.as_deref())?,
            author_email: author_email.to_string(),
            comments: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let post = self.store.insert_post(post).await?;
        info!("Post {} created by {}", post.id, post.author_email);
        Ok(post)
    }

    /// Replace the editable fields of a post. The image is only replaced
    /// when a new one is supplied and the comment thread is kept as is.
    pub async fn update_post(
        &self,
        caller: Option<&str>,
        blog_id: &str,
        request: UpdatePostRequest,
    ) -> Result<Post, CustomError> {
        let mut post = self.load(blog_id).await?;
        authorize(caller, &post.author_email)?;
        validate_post_fields(&request.title, &request.content)?;

        post.title = request.title;
        post.content = request.content;
        post.code_language = request.code_language;
        post.code_snippet = request.code_snippet;
        if let Some(image) = decode_image(request.image.as_deref())? {
            post.image = Some(image);
        }

        let post = self.store.save_post(post).await?;
        info!("Post {} updated", post.id);
        Ok(post)
    }

    pub async fn delete_post(&self, caller: Option<&str>, blog_id: &str) -> Result<(), CustomError> {
        let post = self.load(blog_id).await?;
        authorize(caller, &post.author_email)?;

        if !self.store.delete_post(blog_id).await? {
            return Err(CustomError::NotFoundError("Blog not found".into()));
        }
        info!("Post {} deleted", blog_id);
        Ok(())
    }

    pub async fn get_blog_by_id(&self, blog_id: &str) -> Result<PostView, CustomError> {
        let post = self.load(blog_id).await?;
        self.render_post(&post).await
    }

    /// Redacted view of a post, resolving the post author and every comment
    /// author in one lookup.
    pub async fn render_post(&self, post: &Post) -> Result<PostView, CustomError> {
        let (comments, names) =
            resolve_and_redact(&post.comments, &[post.author_email.as_str()], self.names.as_ref())
                .await?;

        Ok(PostView {
            id: post.id.to_hex(),
            title: post.title.clone(),
            content: post.content.clone(),
            code_language: post.code_language.clone(),
            code_snippet: post.code_snippet.clone(),
            image: encode_image(post.image.as_deref()),
            author_name: display_name(&names, &post.author_email),
            comments,
            comment_count: tree::count(&post.comments),
            created_at: post.created_at,
            updated_at: post.updated_at,
        })
    }

    pub async fn list_posts(&self) -> Result<Vec<PostSummary>, CustomError> {
        let posts = self.store.list_posts().await?;
        self.summarize(&posts).await
    }

    pub async fn posts_by_author(&self, email: &str) -> Result<Vec<PostSummary>, CustomError> {
        let posts = self.store.posts_by_author(email).await?;
        self.summarize(&posts).await
    }

    async fn summarize(&self, posts: &[Post]) -> Result<Vec<PostSummary>, CustomError> {
        let emails: HashSet<String> = posts.iter().map(|p| p.author_email.clone()).collect();
        let names = self.names.resolve_names(&emails).await?;

        Ok(posts
            .iter()
            .map(|post| PostSummary {
                id: post.id.to_hex(),
                title: post.title.clone(),
                content: post.content.clone(),
                code_language: post.code_language.clone(),
                code_snippet: post.code_snippet.clone(),
                image: encode_image(post.image.as_deref()),
                author_name: display_name(&names, &post.author_email),
                comment_count: tree::count(&post.comments),
                created_at: post.created_at,
                updated_at: post.updated_at,
            })
            .collect())
    }

    pub async fn add_comment(
        &self,
        caller: Option<&str>,
        blog_id: &str,
        author_email: &str,
        content: &str,
    ) -> Result<Post, CustomError> {
        authorize(caller, author_email)?;
        let mut post = self.load(blog_id).await?;

        let comment = Comment::new(author_email, content);
        let comment_id = comment.id.clone();
        tree::insert_top_level(&mut post.comments, comment);

        let post = self.store.save_post(post).await?;
        info!("Comment {} added to post {}", comment_id, blog_id);
        Ok(post)
    }

    pub async fn add_reply(
        &self,
        caller: Option<&str>,
        blog_id: &str,
        parent_comment_id: &str,
        author_email: &str,
        content: &str,
    ) -> Result<Post, CustomError> {
        authorize(caller, author_email)?;
        let mut post = self.load(blog_id).await?;

        let reply = Comment::new(author_email, content);
        let reply_id = reply.id.clone();
        tree::insert_reply(&mut post.comments, parent_comment_id, reply)
            .map_err(|_| CustomError::NotFoundError("Parent comment not found".into()))?;

        let post = self.store.save_post(post).await?;
        info!(
            "Reply {} added under {} on post {}",
            reply_id, parent_comment_id, blog_id
        );
        Ok(post)
    }

    /// Remove a comment, wherever it sits in the thread, with all of its
    /// replies. Only the comment's own author may do this.
    pub async fn delete_comment(
        &self,
        caller: Option<&str>,
        blog_id: &str,
        comment_id: &str,
        author_email: &str,
    ) -> Result<Post, CustomError> {
        authorize(caller, author_email)?;
        let mut post = self.load(blog_id).await?;

        let target = tree::find(&post.comments, comment_id)
            .ok_or_else(|| CustomError::NotFoundError("Comment not found".into()))?;
        if target.author_email != author_email {
            return Err(CustomError::ForbiddenError(
                "You are not authorized to delete this comment".into(),
            ));
        }

        let removed = tree::remove(&mut post.comments, comment_id)?;
        let post = self.store.save_post(post).await?;
        info!(
            "Comment {} and {} nested repl(ies) removed from post {}",
            comment_id,
            tree::count(&removed.replies),
            blog_id
        );
        Ok(post)
    }

    /// Remove a reply that lives anywhere below `comment_id`.
    pub async fn delete_reply(
        &self,
        caller: Option<&str>,
        blog_id: &str,
        comment_id: &str,
        reply_id: &str,
        author_email: &str,
    ) -> Result<Post, CustomError> {
        authorize(caller, author_email)?;
        let mut post = self.load(blog_id).await?;

        let parent = tree::find_mut(&mut post.comments, comment_id)
            .ok_or_else(|| CustomError::NotFoundError("Parent comment not found".into()))?;
        let reply = tree::find(&parent.replies, reply_id)
            .ok_or_else(|| CustomError::NotFoundError("Reply not found".into()))?;
        if reply.author_email != author_email {
            return Err(CustomError::ForbiddenError(
                "You are not authorized to delete this reply".into(),
            ));
        }
        tree::remove(&mut parent.replies, reply_id)?;

        let post = self.store.save_post(post).await?;
        info!(
            "Reply {} removed from comment {} on post {}",
            reply_id, comment_id, blog_id
        );
        Ok(post)
    }
}

fn validate_post_fields(title: &str, content: &str) -> Result<(), CustomError> {
    if title.trim().is_empty() {
        return Err(CustomError::ValidationError("Title cannot be empty".into()));
    }
    if content.trim().is_empty() {
        return Err(CustomError::ValidationError("Content cannot be empty".into()));
    }
    Ok(())
}
