use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{Responder, get, web};
use tera::Tera;

use crate::domain::collection::Collection;
use crate::domain::state::ErrorInfo;
use crate::routes::{
    ERROR_SESSION_KEY, base_context, redirect, render_template, render_template_with_status,
};

#[get("/")]
pub async fn show_index(tera: web::Data<Tera>) -> impl Responder {
    let mut context = base_context("index");
    let collections: Vec<_> = Collection::ALL
        .into_iter()
        .map(|collection| (collection.title(), format!("/{collection}/page/0")))
        .collect();
    context.insert("collections", &collections);
    render_template(&tera, "main/index.html", &context)
}

/// Shows the error carried in the session once. Without one there is nothing
/// to show and the visitor is sent home.
#[get("/error")]
pub async fn show_error(session: Session, tera: web::Data<Tera>) -> impl Responder {
    let info = match session.remove_as::<ErrorInfo>(ERROR_SESSION_KEY) {
        Some(Ok(info)) => info,
        Some(Err(raw)) => {
            log::warn!("Discarding unreadable error state: {raw}");
            return redirect("/");
        }
        None => return redirect("/"),
    };

    let status = StatusCode::from_u16(info.code)
        .ok()
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut context = base_context("error");
    context.insert("error", &info);
    render_template_with_status(&tera, "main/error.html", &context, status)
}
