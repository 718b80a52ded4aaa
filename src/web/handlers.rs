use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::future::Future;
use std::str::FromStr;
use std::time::Instant;

use super::form::FormFields;
use super::views::{self, OrderView};
use super::{AppError, AppState};
use crate::catalog::MenuCatalog;
use crate::domain::order::{DeliveryMethod, Order, TableNumber, ValidationError};
use crate::metrics::Metrics;
use crate::store::{OrderFilter, PersistenceError};

type FormPairs = web::Form<Vec<(String, String)>>;

const ITEM_KEYS: [&str; 2] = ["itemsSelected", "itemsSelected[]"];

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

/// Run one store operation, recording its latency and outcome.
async fn timed<T, F>(metrics: &Metrics, operation: &str, fut: F) -> Result<T, PersistenceError>
where
    F: Future<Output = Result<T, PersistenceError>>,
{
    let started = Instant::now();
    let result = fut.await;
    metrics.record_store_operation(operation, started.elapsed().as_secs_f64(), result.is_ok());

    if let Err(e) = &result {
        tracing::error!(operation = operation, error = %e, "Order store operation failed");
    }
    result
}

fn build_order(form: &FormFields, catalog: &MenuCatalog) -> Result<Order, ValidationError> {
    let name = form.first("name").ok_or(ValidationError::MissingField("name"))?;
    let table = form
        .first("tableNum")
        .ok_or(ValidationError::MissingField("tableNum"))?;
    let delivery = form
        .first("delivery")
        .ok_or(ValidationError::MissingField("delivery"))?;
    let items = form.all(&ITEM_KEYS);
    let note = form.first("orderInformation").map(str::to_string);

    Order::create(
        name,
        TableNumber::new(table),
        DeliveryMethod::parse(delivery),
        &items,
        note,
        catalog,
    )
}

pub async fn index() -> HttpResponse {
    html(views::index())
}

pub async fn menu(state: web::Data<AppState>) -> HttpResponse {
    html(views::menu(&state.catalog.render_table()))
}

pub async fn order_form(state: web::Data<AppState>) -> HttpResponse {
    html(views::order_form(&state.catalog.render_options()))
}

pub async fn place_order(
    state: web::Data<AppState>,
    form: FormPairs,
) -> Result<HttpResponse, AppError> {
    let form = FormFields::new(form.into_inner());

    let order = build_order(&form, &state.catalog).map_err(|e| {
        state.metrics.record_order_rejected(e.reason());
        tracing::info!(error = %e, "Order rejected");
        e
    })?;

    let stored = order.to_stored();
    let order_id = timed(&state.metrics, "insert", state.store.insert(&stored)).await?;

    state
        .metrics
        .record_order_placed(order.total().to_f64().unwrap_or_default());
    tracing::info!(
        order_id = %order_id,
        name = %order.customer_name(),
        table = %order.table_number(),
        delivery = %order.delivery(),
        item_count = order.line_items().len(),
        total = %order.total(),
        note = ?order.note(),
        "Order placed"
    );

    Ok(html(views::confirmation(&OrderView::from(stored))))
}

pub async fn review_form() -> HttpResponse {
    html(views::review_form())
}

pub async fn review_order(
    state: web::Data<AppState>,
    form: FormPairs,
) -> Result<HttpResponse, AppError> {
    let form = FormFields::new(form.into_inner());
    let filter = OrderFilter::from_inputs(form.first("name"), form.first("tableNum"));

    if filter.is_empty() {
        tracing::warn!("Order lookup with no name or table number; returning the first stored order");
    }

    let found = timed(&state.metrics, "find_one", state.store.find_one(&filter))
        .await?
        .map(OrderView::from);

    Ok(html(views::review_result(found.as_ref())))
}

pub async fn total_query_form() -> HttpResponse {
    html(views::total_query_form())
}

pub async fn total_query(
    state: web::Data<AppState>,
    form: FormPairs,
) -> Result<HttpResponse, AppError> {
    let form = FormFields::new(form.into_inner());
    let raw = form.first("total").unwrap_or_default();
    let threshold = Decimal::from_str(raw)
        .map_err(|_| ValidationError::InvalidThreshold(raw.to_string()))?;

    let orders = timed(
        &state.metrics,
        "find_by_minimum_total",
        state.store.find_by_minimum_total(threshold),
    )
    .await?;

    tracing::debug!(threshold = %threshold, matched = orders.len(), "Orders queried by total");

    let order_views: Vec<OrderView> = orders.into_iter().map(OrderView::from).collect();
    let build_orders_display = views::build_orders_display(&order_views);
    Ok(html(views::total_query_result(raw, &build_orders_display)))
}

pub async fn remove_form() -> HttpResponse {
    html(views::remove_form())
}

pub async fn remove_all(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let removed = timed(&state.metrics, "remove_all", state.store.remove_all()).await?;
    state.metrics.record_orders_removed(removed);
    tracing::warn!(removed = removed, "All orders removed");

    Ok(html(views::removed(removed)))
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let store_health = state.store.check_health().await;
    let healthy = store_health.status.is_healthy();

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "restaurant-orders",
        "store_backend": state.store.backend_name(),
        "components": [store_health],
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

// ============================================================================
// Handler Tests
// ============================================================================
