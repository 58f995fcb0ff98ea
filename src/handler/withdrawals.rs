// handler/withdrawals.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::withdrawaldb::WithdrawalExt,
    dtos::{
        userdtos::ApiResponse,
        withdrawaldtos::{
            CreateWithdrawalDto, CreatedWithdrawalDto, ProcessWithdrawalDto, SecureDetailsDto,
            WithdrawalHistoryDto,
        },
    },
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::error::ServiceError,
    utils::currency::from_cents,
    AppState,
};

pub fn withdrawals_handler() -> Router {
    let admin_routes = Router::new()
        .route("/pending", get(get_pending_withdrawals))
        .route("/:withdrawal_id/process", put(process_withdrawal))
        .route("/:withdrawal_id/details", get(get_secure_details))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
        }));

    Router::new()
        .route("/", post(create_withdrawal))
        .route("/my-withdrawals", get(get_my_withdrawals))
        .merge(admin_routes)
}

pub async fn create_withdrawal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateWithdrawalDto>,
) -> Result<Response, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .withdrawal_service
        .create_withdrawal(auth.user.id, body)
        .await;

    match result {
        Ok((withdrawal, _quote)) => {
            let response = CreatedWithdrawalDto::from(&withdrawal);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    "Withdrawal request created successfully",
                    response,
                )),
            )
                .into_response())
        }
        // Insufficiency surfaces the computed breakdown so the client can
        // explain the shortfall.
        Err(ServiceError::InsufficientFunds {
            available,
            fee,
            net,
            minimum,
        }) => Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "status": "error",
                "code": "INSUFFICIENT_FUNDS",
                "message": format!(
                    "Insufficient funds for withdrawal. Net amount: {:.2}",
                    from_cents(net)
                ),
                "withdrawalCalculation": {
                    "availableBalance": from_cents(available),
                    "feeAmount": from_cents(fee),
                    "netAmount": from_cents(net),
                    "minimumRequired": from_cents(minimum),
                },
            })),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

pub async fn get_my_withdrawals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let withdrawals = app_state
        .db_client
        .get_user_withdrawals(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let withdrawals: Vec<WithdrawalHistoryDto> = withdrawals
        .iter()
        .map(|withdrawal| WithdrawalHistoryDto {
            id: withdrawal.id,
            amount: from_cents(withdrawal.amount),
            fee: from_cents(withdrawal.fee),
            method: withdrawal.method,
            status: withdrawal.status,
            account_number: app_state
                .withdrawal_service
                .masked_account_number(withdrawal),
            verification_note: withdrawal.verification_note.clone(),
            verified_at: withdrawal.verified_at,
            created_at: withdrawal.created_at,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": withdrawals.len(),
        "withdrawals": withdrawals,
    })))
}

pub async fn get_pending_withdrawals(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let withdrawals = app_state
        .db_client
        .get_pending_withdrawals()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let withdrawals: Vec<WithdrawalHistoryDto> = withdrawals
        .iter()
        .map(|withdrawal| WithdrawalHistoryDto {
            id: withdrawal.id,
            amount: from_cents(withdrawal.amount),
            fee: from_cents(withdrawal.fee),
            method: withdrawal.method,
            status: withdrawal.status,
            account_number: app_state
                .withdrawal_service
                .masked_account_number(withdrawal),
            verification_note: withdrawal.verification_note.clone(),
            verified_at: withdrawal.verified_at,
            created_at: withdrawal.created_at,
        })
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": withdrawals.len(),
        "withdrawals": withdrawals,
    })))
}

pub async fn process_withdrawal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(withdrawal_id): Path<Uuid>,
    Json(body): Json<ProcessWithdrawalDto>,
) -> Result<impl IntoResponse, HttpError> {
    let withdrawal = app_state
        .withdrawal_service
        .process_withdrawal(withdrawal_id, auth.user.id, body.status, body.note)
        .await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Withdrawal processed successfully",
        "withdrawal": {
            "id": withdrawal.id,
            "status": withdrawal.status,
        },
    })))
}

pub async fn get_secure_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(withdrawal_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let details = app_state
        .withdrawal_service
        .secure_details(withdrawal_id)
        .await?;

    let response = SecureDetailsDto {
        account_number: details.account_number,
        account_holder_name: details.account_holder_name,
        bank_name: details.bank_name,
    };

    Ok(Json(ApiResponse::success(
        "Withdrawal details retrieved successfully",
        response,
    )))
}
