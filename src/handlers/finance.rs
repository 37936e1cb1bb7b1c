// src/handlers/finance.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::finance::{ExpenseCategory, RevenueCategory},
};

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: RegisterRevenue
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRevenuePayload {
    #[validate(length(min = 1, max = 200, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    pub entry_date: NaiveDate,

    pub category: Option<RevenueCategory>, // padrão: VENDA

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

/// Registra a receita e credita o capital de giro na mesma transação.
pub async fn register_revenue(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterRevenuePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let revenue = app_state
        .operation_service
        .register_revenue(
            &app_state.db_pool,
            &payload.description,
            payload.amount,
            payload.entry_date,
            payload.category.unwrap_or(RevenueCategory::Sale),
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(revenue)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRevenuesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<RevenueCategory>,
}

pub async fn list_revenues(
    State(app_state): State<AppState>,
    Query(query): Query<ListRevenuesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let revenues = app_state
        .finance_service
        .list_revenues(query.start_date, query.end_date, query.category)
        .await?;

    Ok((StatusCode::OK, Json(revenues)))
}

// ---
// Payload: RegisterExpense
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterExpensePayload {
    #[validate(length(min = 1, max = 200, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    pub entry_date: NaiveDate,

    pub category: Option<ExpenseCategory>, // padrão: OUTROS

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

/// Registra a despesa e debita o capital de giro na mesma transação.
/// Capital insuficiente -> 422 e nada é persistido.
pub async fn register_expense(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let expense = app_state
        .operation_service
        .register_expense(
            &app_state.db_pool,
            &payload.description,
            payload.amount,
            payload.entry_date,
            payload.category.unwrap_or(ExpenseCategory::Other),
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListExpensesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
}

pub async fn list_expenses(
    State(app_state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state
        .finance_service
        .list_expenses(query.start_date, query.end_date, query.category)
        .await?;

    Ok((StatusCode::OK, Json(expenses)))
}
