use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, Result, dev::ServiceResponse, web};
use serde_json::json;

use crate::utils::config::{AppConfig, service_name};

/// Render unmatched routes with the same envelope as `CustomError`. A 404
/// raised by a matched handler already carries its own message and is passed
/// through untouched.
pub fn not_found<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    if res.request().match_pattern().is_some() {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let (req, _) = res.into_parts();
    let service = req
        .app_data::<web::Data<AppConfig>>()
        .map(|config| config.service_name.clone())
        .unwrap_or_else(service_name);
    let new_response = HttpResponse::build(StatusCode::NOT_FOUND).json(json!({
        "success": false,
        "message": format!("Route {} {} does not exist", req.method(), req.path()),
        "httpStatusCode": StatusCode::NOT_FOUND.as_u16(),
        "error": "NOT_FOUND_ERROR",
        "service": service,
    }));

    Ok(ErrorHandlerResponse::Response(ServiceResponse::new(
        req,
        new_response.map_into_right_body(),
    )))
}
