use super::post_controller::{
    create_post, delete_post, get_post, get_posts, get_posts_by_author, update_post,
};
use crate::comment::controller::{add_comment, add_reply, delete_comment, delete_reply};
use crate::middleware::auth::verify_token;
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/blogs")
            .wrap(HttpAuthentication::bearer(verify_token))
            .route("", web::post().to(create_post))
            .route("", web::get().to(get_posts))
            .route("/author/{email}", web::get().to(get_posts_by_author))
            .route("/{blog_id}", web::get().to(get_post))
            .route("/{blog_id}", web::put().to(update_post))
            .route("/{blog_id}", web::delete().to(delete_post))
            .route("/{blog_id}/comments", web::post().to(add_comment))
            .route(
                "/{blog_id}/comments/{comment_id}",
                web::delete().to(delete_comment),
            )
            .route(
                "/{blog_id}/comments/{comment_id}/replies",
                web::post().to(add_reply),
            )
            .route(
                "/{blog_id}/comments/{comment_id}/replies/{reply_id}",
                web::delete().to(delete_reply),
            ),
    );
}
