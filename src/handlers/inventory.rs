// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError, config::AppState, models::inventory::MovementDirection,
};

// ---
// Validação customizada
// ---
fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

fn default_min_quantity() -> i32 {
    10
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub cost_price: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub sale_price: Decimal,

    // Saldo de abertura: vira movimentação IN no histórico, sem efeito no caixa
    #[serde(default)]
    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    pub initial_stock: i32,

    // Se o JSON não tiver esse campo, assume 10 (alerta de reposição padrão)
    #[serde(default = "default_min_quantity")]
    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    pub min_quantity: i32,

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .create_product(
            &app_state.db_pool,
            &payload.name,
            payload.description.as_deref(),
            payload.cost_price,
            payload.sale_price,
            payload.initial_stock,
            payload.min_quantity,
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// ---
// Listagem com filtros (busca por nome/descrição, inativos)
// ---
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn get_all_products(
    State(app_state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state
        .inventory_service
        .get_all_products(query.search.as_deref(), query.include_inactive)
        .await?;

    Ok((StatusCode::OK, Json(products)))
}

pub async fn get_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let details = app_state
        .inventory_service
        .get_product_details(product_id)
        .await?;

    Ok((StatusCode::OK, Json(details)))
}

// ---
// Payload: UpdateProduct
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub cost_price: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub sale_price: Decimal,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    pub min_quantity: i32,

    pub is_active: bool,
}

pub async fn update_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .update_product(
            &app_state.db_pool,
            product_id,
            &payload.name,
            payload.description.as_deref(),
            payload.cost_price,
            payload.sale_price,
            payload.min_quantity,
            payload.is_active,
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .inventory_service
        .delete_product(&app_state.db_pool, product_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: RegisterMovement (entrada/saída de estoque)
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMovementPayload {
    pub product_id: Uuid,

    pub direction: MovementDirection, // "IN" ou "OUT"

    #[validate(range(min = 1, message = "A quantidade deve ser de pelo menos 1."))]
    pub quantity: i32,

    #[validate(custom(function = "validate_positive"))]
    pub unit_value: Decimal,

    pub notes: Option<String>,

    #[validate(length(min = 1, message = "O responsável é obrigatório."))]
    pub actor: String,
}

/// Registra a movimentação e o efeito financeiro pareado numa transação só.
pub async fn register_movement(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .operation_service
        .register_stock_movement(
            &app_state.db_pool,
            payload.product_id,
            payload.direction,
            payload.quantity,
            payload.unit_value,
            payload.notes.as_deref(),
            &payload.actor,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn create_product_payload_defaults() {
        // Sem estoque inicial nem mínimo: assume 0 e 10.
        let payload: CreateProductPayload = serde_json::from_value(json!({
            "name": "Caneta Azul",
            "costPrice": 2.0,
            "salePrice": 5.0,
            "actor": "maria",
        }))
        .unwrap();

        assert_eq!(payload.initial_stock, 0);
        assert_eq!(payload.min_quantity, 10);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_product_payload_accepts_initial_stock() {
        let payload: CreateProductPayload = serde_json::from_value(json!({
            "name": "Caneta Azul",
            "costPrice": 2.0,
            "salePrice": 5.0,
            "initialStock": 25,
            "actor": "maria",
        }))
        .unwrap();

        assert_eq!(payload.initial_stock, 25);
        assert_eq!(payload.cost_price, dec!(2.00));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_product_payload_rejects_negative_initial_stock() {
        let payload: CreateProductPayload = serde_json::from_value(json!({
            "name": "Caneta Azul",
            "costPrice": 2.0,
            "salePrice": 5.0,
            "initialStock": -1,
            "actor": "maria",
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("initial_stock"));
    }
}
