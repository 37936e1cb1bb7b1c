use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Valor inválido: {0}")]
    InvalidAmount(String),

    #[error("Estoque insuficiente! Disponível: {available}, Solicitado: {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Capital insuficiente! Disponível: R$ {available}, Solicitado: R$ {requested}")]
    InsufficientFunds {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Produto inativo não pode ser movimentado")]
    ProductInactive,

    #[error("Produto possui movimentações e não pode ser excluído")]
    ProductHasMovements,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidAmount(ref msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            // Regras de negócio: a transação foi abortada, nada foi persistido.
            e @ AppError::InsufficientStock { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            e @ AppError::InsufficientFunds { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            e @ AppError::ProductInactive => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),

            e @ AppError::ProductNotFound => (StatusCode::NOT_FOUND, e.to_string()),
            e @ AppError::ProductHasMovements => (StatusCode::CONFLICT, e.to_string()),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
