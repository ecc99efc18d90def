use actix_session::Session;
use actix_web::{Responder, get, web};
use serde::Deserialize;
use tera::Tera;

use crate::client::HttpQueryClient;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, navigate_to_error, render_template};
use crate::services::collections as collections_service;

#[derive(Deserialize)]
pub struct ListParams {
    q: Option<String>,
}

#[get("/{collection}/page/{page}")]
pub async fn show_list(
    path: web::Path<(String, String)>,
    params: web::Query<ListParams>,
    client: web::Data<HttpQueryClient>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    session: Session,
) -> impl Responder {
    let (collection, page) = path.into_inner();
    list_response(
        &collection,
        Some(&page),
        params.q.as_deref(),
        &client,
        &server_config,
        &tera,
        &session,
    )
    .await
}

#[get("/{collection}")]
pub async fn show_first_page(
    collection: web::Path<String>,
    params: web::Query<ListParams>,
    client: web::Data<HttpQueryClient>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    session: Session,
) -> impl Responder {
    list_response(
        &collection,
        None,
        params.q.as_deref(),
        &client,
        &server_config,
        &tera,
        &session,
    )
    .await
}

async fn list_response(
    collection: &str,
    page: Option<&str>,
    search: Option<&str>,
    client: &HttpQueryClient,
    server_config: &ServerConfig,
    tera: &Tera,
    session: &Session,
) -> actix_web::HttpResponse {
    match collections_service::load_list_page(
        client,
        collection,
        page,
        search,
        server_config.request_timeout(),
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(collection);
            context.insert("page", &data);
            render_template(tera, "collections/list.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load {collection} list: {err}");
            navigate_to_error(session, &err.error_info())
        }
    }
}

#[get("/{collection}/{id}")]
pub async fn show_detail(
    path: web::Path<(String, String)>,
    client: web::Data<HttpQueryClient>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    session: Session,
) -> impl Responder {
    let (collection, id) = path.into_inner();
    match collections_service::load_detail_page(
        client.get_ref(),
        &collection,
        &id,
        server_config.request_timeout(),
    )
    .await
    {
        Ok(data) => {
            let mut context = base_context(&collection);
            context.insert("record", &data);
            render_template(&tera, "collections/detail.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load {collection} {id}: {err}");
            navigate_to_error(&session, &err.error_info())
        }
    }
}
