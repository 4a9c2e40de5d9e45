use crate::middleware::auth::get_user_email_from_request;
use crate::post::post_model::{CreatePostRequest, UpdatePostRequest};
use crate::post::post_service::BlogPostService;
use crate::utils::error::CustomError;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

/// Create a new blog post for the caller
/// POST /api/blogs
pub async fn create_post(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    body: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let caller = get_user_email_from_request(&req);
    let post = post_service
        .create_post(caller.as_deref(), body.into_inner())
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Post created successfully",
        "httpStatusCode": 201,
        "data": view
    })))
}

/// GET /api/blogs
pub async fn get_posts(
    post_service: web::Data<BlogPostService>,
) -> Result<HttpResponse, CustomError> {
    let posts = post_service.list_posts().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Posts retrieved successfully",
        "httpStatusCode": 200,
        "count": posts.len(),
        "data": posts
    })))
}

/// GET /api/blogs/author/{email}
pub async fn get_posts_by_author(
    post_service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let posts = post_service.posts_by_author(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Posts retrieved successfully",
        "httpStatusCode": 200,
        "count": posts.len(),
        "data": posts
    })))
}

/// GET /api/blogs/{blog_id}
pub async fn get_post(
    post_service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let view = post_service.get_blog_by_id(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post fetched successfully",
        "httpStatusCode": 200,
        "data": view
    })))
}

/// PUT /api/blogs/{blog_id}
pub async fn update_post(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, CustomError> {
    let caller = get_user_email_from_request(&req);
    let post = post_service
        .update_post(caller.as_deref(), &path.into_inner(), body.into_inner())
        .await?;
    let view = post_service.render_post(&post).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post updated successfully",
        "httpStatusCode": 200,
        "data": view
    })))
}

/// DELETE /api/blogs/{blog_id}
pub async fn delete_post(
    req: HttpRequest,
    post_service: web::Data<BlogPostService>,
    path: web::Path<String>,
) -> Result<HttpResponse, CustomError> {
    let caller = get_user_email_from_request(&req);
    post_service
        .delete_post(caller.as_deref(), &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post deleted successfully",
        "httpStatusCode": 200
    })))
}
