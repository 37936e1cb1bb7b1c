// src/handlers/ledger.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{common::error::AppError, config::AppState, models::ledger::LedgerEntry};

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn default_limit() -> i64 {
    50
}

// ---
// Consulta do capital de giro (saldo + histórico)
// ---
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCapitalQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingCapitalResponse {
    pub balance: Decimal,
    pub entries: Vec<LedgerEntry>,
}

pub async fn get_working_capital(
    State(app_state): State<AppState>,
    Query(query): Query<WorkingCapitalQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (balance, entries) = app_state
        .ledger_service
        .working_capital_snapshot(query.limit)
        .await?;

    Ok((StatusCode::OK, Json(WorkingCapitalResponse { balance, entries })))
}

// ---
// Payload: movimentação manual de capital (aporte/retirada)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CapitalMovementPayload {
    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

pub async fn credit_capital(
    State(app_state): State<AppState>,
    Json(payload): Json<CapitalMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .credit(
            &app_state.db_pool,
            payload.amount,
            &payload.description,
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Retirada manual de capital. Saldo insuficiente -> 422, saldo intacto.
pub async fn debit_capital(
    State(app_state): State<AppState>,
    Json(payload): Json<CapitalMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .debit(
            &app_state.db_pool,
            payload.amount,
            &payload.description,
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// ---
// Payload: ajuste manual (define o saldo diretamente)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdjustCapitalPayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub new_balance: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

pub async fn adjust_capital(
    State(app_state): State<AppState>,
    Json(payload): Json<AdjustCapitalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .ledger_service
        .adjust(
            &app_state.db_pool,
            payload.new_balance,
            &payload.description,
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn working_capital_query_defaults_to_fifty_entries() {
        let query: WorkingCapitalQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.limit, 50);

        let query: WorkingCapitalQuery = serde_json::from_value(json!({ "limit": 10 })).unwrap();
        assert_eq!(query.limit, 10);
    }
}
