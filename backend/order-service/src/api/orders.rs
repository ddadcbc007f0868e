//! Order REST API handlers
//!
//! Every handler except `health` re-verifies the caller's token. Member
//! names come from member-service through the circuit breaker; when it is
//! unavailable the placeholder name is used and the request still succeeds.

use crate::{
    AppState, CreateOrderRequest, OrderResponse, OrderSummary, PeriodQuery, UpdateOrderRequest,
};

use ms_core::{Order, OrderStatus};
use ms_web::{ApiError, ApiResult, Authenticated, Page, PageQuery};

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNameQuery {
    pub product_name: String,
}

/// The caller's token, forwarded unchanged on member lookups.
fn forwarded_authorization(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok())
}

async fn summarize(
    state: &AppState,
    orders: Vec<Order>,
    authorization: Option<&str>,
) -> Vec<OrderSummary> {
    let member_ids: Vec<i64> = orders.iter().map(|order| order.member_id).collect();
    let names = state
        .members
        .member_names(member_ids, authorization)
        .await;

    orders
        .into_iter()
        .map(|order| {
            let name = names.get(&order.member_id).cloned().unwrap_or_default();
            OrderSummary::new(order, name)
        })
        .collect()
}

async fn find_order(state: &AppState, id: i64) -> ApiResult<Order> {
    state
        .orders
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order not found: ID {}", id)))
}

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    headers: HeaderMap,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let Json(req) = payload?;
    let new_order = req.into_new_order()?;
    log::info!(
        "Creating order for member {} requested by {}",
        new_order.member_id,
        user.username
    );

    let member = state
        .members
        .member(new_order.member_id, forwarded_authorization(&headers))
        .await;
    if member.is_placeholder() {
        log::warn!(
            "Member {} could not be confirmed, accepting order with placeholder data",
            new_order.member_id
        );
    }

    let order = state.orders.create(&new_order).await?;
    log::info!("Order created with ID: {}", order.id);

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::new(order, member.full_name)),
    ))
}

/// GET /orders?page=&size=
pub async fn list_orders(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Page<OrderSummary>>> {
    let Query(page) = query?;
    page.validate()?;

    let orders = state.orders.find_page(page.page, page.size).await?;
    let total = state.orders.count().await?;
    let content = summarize(&state, orders, forwarded_authorization(&headers)).await;

    Ok(Json(Page::new(content, page, total)))
}

/// GET /orders/all
pub async fn list_all_orders(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let orders = state.orders.find_all().await?;
    Ok(Json(
        summarize(&state, orders, forwarded_authorization(&headers)).await,
    ))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> ApiResult<Json<OrderResponse>> {
    let order = find_order(&state, id).await?;
    let member_name = state
        .members
        .member_name(order.member_id, forwarded_authorization(&headers))
        .await;

    Ok(Json(OrderResponse::new(order, member_name)))
}

/// GET /orders/member/{member_id}
pub async fn list_member_orders(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    Path(member_id): Path<i64>,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let member = state
        .members
        .member(member_id, forwarded_authorization(&headers))
        .await;

    let orders = state.orders.find_by_member(member_id).await?;
    Ok(Json(
        orders
            .into_iter()
            .map(|order| OrderSummary::new(order, member.full_name.clone()))
            .collect(),
    ))
}

/// GET /orders/status/{status}
pub async fn list_orders_by_status(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    Path(status): Path<String>,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let status: OrderStatus = status.parse()?;

    let orders = state.orders.find_by_status(status).await?;
    Ok(Json(
        summarize(&state, orders, forwarded_authorization(&headers)).await,
    ))
}

/// GET /orders/search?productName=
pub async fn search_orders(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    query: Result<Query<ProductNameQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let Query(ProductNameQuery { product_name }) = query?;

    let orders = state.orders.search_by_product_name(&product_name).await?;
    Ok(Json(
        summarize(&state, orders, forwarded_authorization(&headers)).await,
    ))
}

/// GET /orders/period?startDate=&endDate=
pub async fn list_orders_in_period(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let Query(period) = query?;
    let (start, end) = period.range()?;

    let orders = state.orders.find_created_between(start, end).await?;
    Ok(Json(
        summarize(&state, orders, forwarded_authorization(&headers)).await,
    ))
}

/// GET /orders/recent
pub async fn list_recent_orders(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<OrderSummary>>> {
    let orders = state.orders.find_recent().await?;
    Ok(Json(
        summarize(&state, orders, forwarded_authorization(&headers)).await,
    ))
}

/// PUT /orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    headers: HeaderMap,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> ApiResult<Json<OrderResponse>> {
    let Json(req) = payload?;
    let mut order = find_order(&state, id).await?;
    req.apply_to(&mut order)?;

    if !state.orders.update(&order).await? {
        return Err(ApiError::not_found(format!("Order not found: ID {}", id)));
    }
    log::info!("Updated order {} by {}", id, user.username);

    let order = find_order(&state, id).await?;
    let member_name = state
        .members
        .member_name(order.member_id, forwarded_authorization(&headers))
        .await;

    Ok(Json(OrderResponse::new(order, member_name)))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    if !state.orders.delete(id).await? {
        return Err(ApiError::not_found(format!("Order not found: ID {}", id)));
    }

    log::info!("Deleted order {} by {}", id, user.username);
    Ok(Json(json!({
        "message": "Order deleted successfully",
        "orderId": id.to_string(),
    })))
}

/// GET /orders/stats/total-amount/{member_id}
pub async fn member_total_amount(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    Path(member_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let total = state.orders.total_amount_by_member(member_id).await?;
    Ok(Json(json!({
        "memberId": member_id,
        "totalAmount": total,
    })))
}

/// GET /orders/stats/count/{status}
pub async fn order_count_by_status(
    State(state): State<AppState>,
    Authenticated(_): Authenticated,
    Path(status): Path<String>,
) -> ApiResult<Json<Value>> {
    let status: OrderStatus = status.parse()?;

    let count = state.orders.count_by_status(status).await?;
    Ok(Json(json!({
        "status": status,
        "count": count,
    })))
}

/// GET /orders/health
pub async fn health() -> Json<Value> {
    Json(ms_web::health_body("order-service"))
}
