use crate::comment::model::CreateCommentRequest;
use crate::middleware::auth::get_user_email_from_request;
use crate::post::post_service::BlogPostService;
use crate::utils::error::CustomError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

fn caller_email(req: &HttpRequest) -> Result<String, CustomError> {
    get_user_email_from_request(req)
        .ok_or_else(|| CustomError::UnauthenticatedError("Not authenticated".to_string()))
}

fn require_content(body: &CreateCommentRequest) -> Result<&str, CustomError> {
    let content = body.content.trim();
    if content.is_empty() {
        return Err(CustomError::BadRequestError(
            "Comment content cannot be empty".to_string(),
        ));
    }
    Ok(content)
}

/// Add a top-level comment to a post
/// POST /api/blogs/{blog_id}/comments
pub async fn add_comment(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, CustomError> {
    let author_email = caller_email(&req)?;
    let content = require_content(&body)?;
    let blog_id = path.into_inner();

    let post = post_service
        .add_comment(Some(&author_email), &blog_id, &author_email, content)
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Comment created successfully",
        "httpStatusCode": 201,
        "data": view
    })))
}

/// Reply to a comment or to another reply
/// POST /api/blogs/{blog_id}/comments/{comment_id}/replies
pub async fn add_reply(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<(String, String)>,
    body: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, CustomError> {
    let author_email = caller_email(&req)?;
    let content = require_content(&body)?;
    let (blog_id, parent_id) = path.into_inner();

    let post = post_service
        .add_reply(
            Some(&author_email),
            &blog_id,
            &parent_id,
            &author_email,
            content,
        )
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Reply created successfully",
        "httpStatusCode": 201,
        "data": view
    })))
}

/// DELETE /api/blogs/{blog_id}/comments/{comment_id}
pub async fn delete_comment(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, CustomError> {
    let author_email = caller_email(&req)?;
    let (blog_id, comment_id) = path.into_inner();

    let post = post_service
        .delete_comment(Some(&author_email), &blog_id, &comment_id, &author_email)
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Comment deleted successfully",
        "httpStatusCode": 200,
        "data": view
    })))
}

/// DELETE /api/blogs/{blog_id}/comments/{comment_id}/replies/{reply_id}
pub async fn delete_reply(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, CustomError> {
    let author_email = caller_email(&req)?;
    let (blog_id, comment_id, reply_id) = path.into_inner();

    let post = post_service
        .delete_reply(
            Some(&author_email),
            &blog_id,
            &comment_id,
            &reply_id,
            &author_email,
        )
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Reply deleted successfully",
        "httpStatusCode": 200,
        "data": view
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::Claims;
    use crate::middleware::not_found::not_found;
    use actix_web::middleware::ErrorHandlers;
    use crate::post::post_model::Post;
    use crate::testing::{CountingResolver, InMemoryPostStore};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpMessage, test};
    use chrono::Utc;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Arc;

    fn post() -> Post {
        Post {
            id: ObjectId::new(),
            title: "Trees".to_string(),
            content: "Body".to_string(),
            code_language: None,
            code_snippet: None,
            image: None,
            author_email: "a@x.com".to_string(),
            comments: Vec::new(),
            version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service_for(post: Post) -> web::Data<BlogPostService> {
        let store = Arc::new(InMemoryPostStore::with_posts(vec![post]));
        let names = Arc::new(CountingResolver::with_names(&[
            ("a@x.com", "Alice"),
            ("b@x.com", "Bob"),
        ]));
        web::Data::new(BlogPostService::new(store, names))
    }

    fn claims(email: &str) -> Claims {
        Claims {
            email: email.to_string(),
            exp: usize::MAX,
        }
    }

    #[actix_web::test]
    async fn comment_then_reply_returns_redacted_view() {
        let post = post();
        let blog_id = post.id.to_hex();
        let app = test::init_service(
            App::new()
                .app_data(service_for(post))
                .route("/blogs/{blog_id}/comments", web::post().to(add_comment))
                .route(
                    "/blogs/{blog_id}/comments/{comment_id}/replies",
                    web::post().to(add_reply),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{blog_id}/comments"))
            .set_json(json!({ "content": "first" }))
            .to_request();
        req.extensions_mut().insert(claims("a@x.com"));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let comment_id = body["data"]["comments"][0]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["comments"][0]["author_name"], "Alice");

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{blog_id}/comments/{comment_id}/replies"))
            .set_json(json!({ "content": "hi" }))
            .to_request();
        req.extensions_mut().insert(claims("b@x.com"));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let reply = &body["data"]["comments"][0]["replies"][0];
        assert_eq!(reply["content"], "hi");
        assert_eq!(reply["author_name"], "Bob");
        assert!(!body.to_string().contains("b@x.com"));
    }

    #[actix_web::test]
    async fn missing_identity_is_unauthorized() {
        let post = post();
        let blog_id = post.id.to_hex();
        let app = test::init_service(
            App::new()
                .app_data(service_for(post))
                .route("/blogs/{blog_id}/comments", web::post().to(add_comment)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{blog_id}/comments"))
            .set_json(json!({ "content": "first" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn blank_content_is_rejected() {
        let post = post();
        let blog_id = post.id.to_hex();
        let app = test::init_service(
            App::new()
                .app_data(service_for(post))
                .route("/blogs/{blog_id}/comments", web::post().to(add_comment)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/blogs/{blog_id}/comments"))
            .set_json(json!({ "content": "   " }))
            .to_request();
        req.extensions_mut().insert(claims("a@x.com"));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn reply_to_missing_parent_reports_the_parent() {
        let post = post();
        let blog_id = post.id.to_hex();
        let app = test::init_service(
            App::new()
                .wrap(ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found))
                .app_data(service_for(post))
                .route(
                    "/api/blogs/{blog_id}/comments/{comment_id}/replies",
                    web::post().to(add_reply),
                ),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/blogs/{blog_id}/comments/ghost/replies"))
            .set_json(json!({ "content": "hello?" }))
            .to_request();
        req.extensions_mut().insert(claims("b@x.com"));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NOT_FOUND_ERROR");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .contains("Parent comment not found")
        );
    }

    #[actix_web::test]
    async fn deleting_someone_elses_comment_is_forbidden() {
        let mut post = post();
        let mut comment = crate::comment::model::Comment::new("a@x.com", "mine");
        comment.id = "c1".to_string();
        post.comments.push(comment);
        let blog_id = post.id.to_hex();
        let app = test::init_service(
            App::new().app_data(service_for(post)).route(
                "/blogs/{blog_id}/comments/{comment_id}",
                web::delete().to(delete_comment),
            ),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/blogs/{blog_id}/comments/c1"))
            .to_request();
        req.extensions_mut().insert(claims("b@x.com"));
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
