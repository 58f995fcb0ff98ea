// handler/orders.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::{
        orderdtos::{CreateOrderDto, OrderResponseDto, UpdateOrderDto},
        userdtos::{ApiResponse, RequestQueryDto},
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn orders_handler() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route(
            "/:order_id",
            get(get_order).patch(update_order).delete(cancel_order),
        )
        .route(
            "/:order_id/verify",
            patch(verify_funding).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
}

pub async fn create_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateOrderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let order = app_state
        .order_service
        .create_order(auth.user.id, body)
        .await?;

    let response: OrderResponseDto = order.into();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order created successfully", response)),
    ))
}

pub async fn list_orders(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(query): Query<RequestQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    query
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query.page.unwrap_or(1) as u32;
    let limit = query.limit.unwrap_or(20);

    let orders = app_state
        .order_service
        .list_orders(&auth.user, page, limit)
        .await?;

    let orders: Vec<OrderResponseDto> = orders.into_iter().map(Into::into).collect();
    Ok(Json(serde_json::json!({
        "status": "success",
        "results": orders.len(),
        "orders": orders,
    })))
}

pub async fn get_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let order = app_state
        .order_service
        .get_order_for(order_id, &auth.user)
        .await?;

    let response: OrderResponseDto = order.into();
    Ok(Json(ApiResponse::success(
        "Order retrieved successfully",
        response,
    )))
}

pub async fn update_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(order_id): Path<Uuid>,
    Json(body): Json<UpdateOrderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let order = app_state
        .order_service
        .update_order(order_id, auth.user.id, body)
        .await?;

    let response: OrderResponseDto = order.into();
    Ok(Json(ApiResponse::success(
        "Order updated successfully",
        response,
    )))
}

pub async fn verify_funding(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let order = app_state
        .order_service
        .verify_funding(order_id, auth.user.id)
        .await?;

    let response: OrderResponseDto = order.into();
    Ok(Json(ApiResponse::success(
        "Order funding verified successfully",
        response,
    )))
}

pub async fn cancel_order(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let order = app_state
        .order_service
        .cancel_order(order_id, &auth.user)
        .await?;

    let response: OrderResponseDto = order.into();
    Ok(Json(ApiResponse::success(
        "Order canceled successfully",
        response,
    )))
}
