use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;

mod comment;
mod database;
mod middleware;
mod post;
mod router;
#[cfg(test)]
mod testing;
mod user;
mod utils;

use database::RedisService;
use middleware::not_found::not_found;
use post::post_service::BlogPostService;
use post::post_store::MongoPostStore;
use router::index::routes;
use user::name_cache::CachedNameResolver;
use user::service::UserService;
use utils::config::AppConfig;

#[get("/")]
async fn default(config: web::Data<AppConfig>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Blog comment service is running",
        "httpStatusCode": StatusCode::OK.as_u16(),
        "service": config.service_name,
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mongo_client = database::connect_to_mongo(&config.mongodb_uri)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let redis_service = match &config.redis_url {
        Some(url) => match RedisService::connect(url).await {
            Ok(service) => Some(web::Data::new(service)),
            Err(e) => {
                warn!("{}; sessions will be checked by JWT only", e);
                None
            }
        },
        None => None,
    };

    let names = CachedNameResolver::new(
        UserService::new(&mongo_client, &config.database_name),
        config.name_cache_ttl,
        config.name_cache_capacity,
    );
    let post_service = web::Data::new(BlogPostService::new(
        Arc::new(MongoPostStore::new(&mongo_client, &config.database_name)),
        Arc::new(names),
    ));
    let config_data = web::Data::new(config.clone());

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(Logger::default())
            .app_data(config_data.clone())
            .app_data(post_service.clone());
        if let Some(redis) = &redis_service {
            app = app.app_data(redis.clone());
        }
        app.configure(routes)
            .wrap(ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found))
            .service(default)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
