#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::client::HttpQueryClient;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;

pub mod client;
pub mod controller;
pub mod domain;
pub mod dto;
#[cfg(feature = "server")]
pub mod models;
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Minimum length of the session signing secret.
#[cfg(feature = "server")]
pub const MIN_SECRET_LEN: usize = 64;

/// Registers every handler and shared resource on `cfg`.
#[cfg(feature = "server")]
pub fn configure(
    cfg: &mut web::ServiceConfig,
    tera: Tera,
    client: HttpQueryClient,
    server_config: ServerConfig,
) {
    use crate::routes::collections::{show_detail, show_first_page, show_list};
    use crate::routes::main::{show_error, show_index};

    cfg.app_data(web::Data::new(tera))
        .app_data(web::Data::new(client))
        .app_data(web::Data::new(server_config))
        .service(show_index)
        .service(show_error)
        .service(show_list)
        .service(show_first_page)
        .service(show_detail);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    if server_config.secret.len() < MIN_SECRET_LEN {
        return Err(std::io::Error::other(format!(
            "Session secret must be at least {MIN_SECRET_LEN} bytes"
        )));
    }
    let secret_key = Key::from(server_config.secret.as_bytes());

    let client = HttpQueryClient::new(&server_config.api_base_url, server_config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to create API client: {e}")))?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving {} on {}:{}",
        client.base_url(),
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(|cfg| configure(cfg, tera.clone(), client.clone(), server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
