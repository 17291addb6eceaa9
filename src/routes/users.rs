use crate::{error::AppError, services::IdentityService};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

/// Lists every registered user.
///
/// Deliberately unauthenticated: this read sits outside the authorization
/// model (see DESIGN.md). Credential and session fields are stripped by the
/// `User` serializer.
#[get("")]
pub async fn get_all_users(
    identity: web::Data<IdentityService>,
) -> Result<impl Responder, AppError> {
    let users = identity.get_all_users().await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "users": users,
    })))
}
