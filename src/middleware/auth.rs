use crate::database::RedisService;
use crate::utils::config::AppConfig;
use crate::utils::error::CustomError;
use actix_web::{Error, HttpMessage, dev::ServiceRequest, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Token claims issued by the account service. `email` is the caller
/// identity used for every authorization decision.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub exp: usize,
}

/// Verify JWT token and validate session in Redis
pub async fn verify_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let token = credentials.token();

    let secret = match req.app_data::<web::Data<AppConfig>>() {
        Some(config) => config.jwt_secret.clone(),
        None => {
            return Err((
                actix_web::error::ErrorInternalServerError("JWT secret not configured"),
                req,
            ));
        }
    };

    let token_data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => data,
        Err(_) => return Err((actix_web::error::ErrorUnauthorized("Invalid token"), req)),
    };

    let redis_service = match req.app_data::<web::Data<RedisService>>() {
        Some(service) => service,
        None => {
            // Without Redis the signature and expiry are all we can check
            req.extensions_mut().insert(token_data.claims);
            return Ok(req);
        }
    };

    match redis_service.validate_session(token).await {
        Ok(Some(stored_email)) => {
            if stored_email == token_data.claims.email {
                req.extensions_mut().insert(token_data.claims);
                Ok(req)
            } else {
                Err((actix_web::error::ErrorUnauthorized("Session mismatch"), req))
            }
        }
        Ok(None) => Err((
            actix_web::error::ErrorUnauthorized("Session expired or invalid"),
            req,
        )),
        Err(e) => {
            log::warn!("Session lookup failed, falling back to JWT only: {}", e);
            req.extensions_mut().insert(token_data.claims);
            Ok(req)
        }
    }
}

/// Get the caller identity from request extensions (use after auth middleware)
pub fn get_user_email_from_request(req: &actix_web::HttpRequest) -> Option<String> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.email.clone())
}

/// Check that the acting identity is the one the operation requires.
pub fn authorize(caller: Option<&str>, required: &str) -> Result<(), CustomError> {
    match caller {
        None => Err(CustomError::UnauthenticatedError(
            "Not authenticated".to_string(),
        )),
        Some(caller) if caller == required => Ok(()),
        Some(_) => Err(CustomError::ForbiddenError(
            "You are not allowed to act as this user".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn authorize_accepts_matching_identity() {
        assert!(authorize(Some("a@x.com"), "a@x.com").is_ok());
    }

    #[test]
    fn authorize_rejects_missing_caller_as_unauthenticated() {
        assert!(matches!(
            authorize(None, "a@x.com"),
            Err(CustomError::UnauthenticatedError(_))
        ));
    }

    #[test]
    fn authorize_rejects_other_identity_as_forbidden() {
        assert!(matches!(
            authorize(Some("b@x.com"), "a@x.com"),
            Err(CustomError::ForbiddenError(_))
        ));
    }

    #[test]
    fn caller_identity_comes_from_claims() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_user_email_from_request(&req), None);

        req.extensions_mut().insert(Claims {
            email: "a@x.com".to_string(),
            exp: 0,
        });
        assert_eq!(get_user_email_from_request(&req).as_deref(), Some("a@x.com"));
    }
}
