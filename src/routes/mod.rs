pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::auth::TokenCodec;

/// Mounts the API routes. Only the task scope sits behind the request
/// authenticator; signup, login, refresh, and the user listing are reachable
/// without a token.
pub fn config(codec: TokenCodec) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::login)
                .service(auth::refresh),
        )
        .service(web::scope("/users").service(users::get_all_users))
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(codec.clone()))
                .service(tasks::get_tasks)
                .service(tasks::get_task_count)
                .service(tasks::create_task)
                .service(tasks::update_task)
                .service(tasks::delete_task)
                .service(tasks::complete_task)
                .service(tasks::uncomplete_task),
        );
    }
}
