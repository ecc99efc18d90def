//! HTTP handlers and the helpers they share.

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use serde::Serialize;
use tera::{Context, Tera};

use crate::controller::router::ERROR_ROUTE;
use crate::domain::collection::Collection;
use crate::domain::state::ErrorInfo;

pub mod collections;
pub mod main;

/// Session key carrying the error shown by the error route.
pub const ERROR_SESSION_KEY: &str = "error";

#[derive(Serialize)]
struct NavLink {
    href: String,
    title: &'static str,
    active: bool,
}

/// Context shared by every page: navigation and the active section.
pub fn base_context(current_page: &str) -> Context {
    let navigation: Vec<NavLink> = Collection::ALL
        .into_iter()
        .map(|collection| NavLink {
            href: format!("/{collection}/page/0"),
            title: collection.title(),
            active: collection.as_str() == current_page,
        })
        .collect();

    let mut context = Context::new();
    context.insert("navigation", &navigation);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_template_with_status(tera, template, context, StatusCode::OK)
}

pub fn render_template_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Hands `info` to the error route through the session and redirects there.
pub fn navigate_to_error(session: &Session, info: &ErrorInfo) -> HttpResponse {
    if let Err(err) = session.insert(ERROR_SESSION_KEY, info) {
        log::error!("Failed to store error {info} in session: {err}");
        return HttpResponse::InternalServerError().finish();
    }
    redirect(ERROR_ROUTE)
}
