use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskdeck::auth::TokenCodec;
use taskdeck::config::Config;
use taskdeck::db::{TaskStore, UserDirectory};
use taskdeck::routes;
use taskdeck::services::{IdentityService, TaskService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Missing configuration (signing secret, database URL) is fatal: the
    // server never starts serving without it.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Build the object graph once; request-handling code receives everything
    // it needs explicitly and never reads ambient global state.
    let codec = TokenCodec::new(&config.jwt_secret);
    let identity = IdentityService::new(UserDirectory::new(pool.clone()), codec.clone());
    let tasks = TaskService::new(TaskStore::new(pool.clone()));

    log::info!("Starting taskdeck server at {}", config.server_url());
    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(identity.clone()))
            .app_data(web::Data::new(tasks.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config(codec.clone())))
    })
    .bind(bind_addr)?
    .run()
    .await
}
