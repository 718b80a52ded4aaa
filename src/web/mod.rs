// ============================================================================
// Web Layer - routes, handlers, views
// ============================================================================
//
// Handlers turn form input into catalog/order/store calls and hand view data
// to `views`. Component errors stop here and become failure pages.
//
// ============================================================================

mod error;
mod form;
mod handlers;
pub mod views;

pub use error::AppError;

use actix_web::web;
use std::sync::Arc;

use crate::catalog::MenuCatalog;
use crate::metrics::{metrics_handler, Metrics};
use crate::store::OrderStore;

/// Shared, read-only application state handed to every worker.
pub struct AppState {
    pub catalog: Arc<MenuCatalog>,
    pub store: Arc<dyn OrderStore>,
    pub metrics: Arc<Metrics>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/menu", web::get().to(handlers::menu))
        .service(
            web::resource("/order")
                .route(web::get().to(handlers::order_form))
                .route(web::post().to(handlers::place_order)),
        )
        .service(
            web::resource("/reviewOrder")
                .route(web::get().to(handlers::review_form))
                .route(web::post().to(handlers::review_order)),
        )
        .service(
            web::resource("/adminTotalQuery")
                .route(web::get().to(handlers::total_query_form))
                .route(web::post().to(handlers::total_query)),
        )
        .service(
            web::resource("/adminRemove")
                .route(web::get().to(handlers::remove_form))
                .route(web::post().to(handlers::remove_all)),
        )
        .route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(handlers::health));
}
