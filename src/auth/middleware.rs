use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenCodec;
use crate::auth::ACCESS_TOKEN_COOKIE;
use crate::error::AppError;

/// Per-request authentication gate.
///
/// Wrapped around the scopes that require identity (the auth and user routes
/// stay outside it). Extracts the access token from the `accessToken` cookie,
/// verifies it with the codec it was constructed with, and inserts the decoded
/// `Claims` into request extensions for the `CurrentUser` extractor.
/// Verification results are never cached across requests.
pub struct AuthMiddleware {
    codec: TokenCodec,
}

impl AuthMiddleware {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            codec: self.codec.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    codec: TokenCodec,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req.cookie(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_owned());

        match token {
            Some(token) => match self.codec.verify(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(_) => {
                    // Signature and expiry failures fold into one visible kind.
                    let app_err = AppError::Auth("invalid token".into());
                    Box::pin(async move { Err(app_err.into()) })
                }
            },
            None => {
                let app_err = AppError::Auth("missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{TokenPayload, ACCESS_TOKEN_TTL_SECS};
    use actix_web::http::StatusCode;
    use actix_web::{cookie::Cookie, test, web, App, HttpResponse};

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn codec() -> TokenCodec {
        TokenCodec::new("middleware_test_secret")
    }

    #[actix_rt::test]
    async fn test_request_without_cookie_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec()))
                .route("/", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("request without a token should fail");
        assert_eq!(
            err.as_response_error().error_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_rt::test]
    async fn test_request_with_bad_token_is_rejected() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec()))
                .route("/", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "garbage"))
            .to_request();
        let resp = test::try_call_service(&app, req).await;
        let err = resp.expect_err("request with a bad token should fail");
        assert_eq!(
            err.as_response_error().error_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_rt::test]
    async fn test_request_with_valid_token_passes() {
        let codec = codec();
        let payload = TokenPayload {
            user_id: 7,
            email: Some("a@x.com".to_string()),
            phone_number: None,
        };
        let token = codec.issue(&payload, ACCESS_TOKEN_TTL_SECS).unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(codec))
                .route("/", web::get().to(protected)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
