use crate::{
    auth::{
        LoginRequest, RefreshRequest, SignupRequest, ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_TTL_SECS,
        REFRESH_TOKEN_COOKIE, REFRESH_TOKEN_TTL_SECS,
    },
    error::AppError,
    services::IdentityService,
};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;

fn token_cookie(name: &'static str, value: &str, ttl_secs: i64) -> Cookie<'static> {
    Cookie::build(name, value.to_owned())
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(ttl_secs))
        .finish()
}

/// Register a new user.
///
/// Validation and uniqueness run here, before `signup`, in that order; the
/// identity service documents this as the caller's responsibility.
#[post("/signup")]
pub async fn signup(
    identity: web::Data<IdentityService>,
    data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let data = data.into_inner();

    identity.validate_input(
        &data.nickname,
        data.email.as_deref(),
        data.phone_number.as_deref(),
    )?;
    identity
        .check_uniqueness(
            data.email.as_deref(),
            data.phone_number.as_deref(),
            Some(&data.nickname),
        )
        .await?;

    let user = identity.signup(data).await?;

    Ok(HttpResponse::Created().json(json!({
        "status": "ok",
        "data": user,
    })))
}

/// Authenticate and start a session.
///
/// The token pair is returned in the body and also set as http-only cookies so
/// the request authenticator can pick the access token up on later calls.
#[post("/login")]
pub async fn login(
    identity: web::Data<IdentityService>,
    data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let data = data.into_inner();

    let tokens = identity
        .login(&data.password, data.email.as_deref(), data.phone_number.as_deref())
        .await?;

    let mut response = HttpResponse::Ok();
    response.cookie(token_cookie(
        ACCESS_TOKEN_COOKIE,
        &tokens.access_token,
        ACCESS_TOKEN_TTL_SECS,
    ));
    if let Some(refresh_token) = &tokens.refresh_token {
        response.cookie(token_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            REFRESH_TOKEN_TTL_SECS,
        ));
    }

    Ok(response.json(json!({
        "status": "ok",
        "tokens": tokens,
    })))
}

/// Exchange a refresh token for a new access token.
///
/// The refresh token itself is not rotated; only the access token (and its
/// cookie) is renewed.
#[post("/refresh")]
pub async fn refresh(
    identity: web::Data<IdentityService>,
    data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let tokens = identity.refresh_access_token(&data.refresh_token).await?;

    let mut response = HttpResponse::Ok();
    response.cookie(token_cookie(
        ACCESS_TOKEN_COOKIE,
        &tokens.access_token,
        ACCESS_TOKEN_TTL_SECS,
    ));

    Ok(response.json(json!({
        "status": "ok",
        "tokens": tokens,
    })))
}
