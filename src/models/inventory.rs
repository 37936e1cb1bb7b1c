// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Direção da movimentação ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_direction", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    In,  // Compra, devolução de cliente
    Out, // Venda, perda
}

// --- PRODUTO ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub quantity: i32,
    pub min_quantity: i32,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Estoque abaixo do mínimo configurado?
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_quantity
    }

    /// Lucro por unidade vendida.
    pub fn unit_profit(&self) -> Decimal {
        self.sale_price - self.cost_price
    }

    /// Margem de lucro em percentual (0.00 se o custo for zero).
    pub fn profit_margin(&self) -> Decimal {
        if self.cost_price > Decimal::ZERO {
            ((self.sale_price - self.cost_price) / self.cost_price * Decimal::ONE_HUNDRED)
                .round_dp(2)
        } else {
            Decimal::ZERO
        }
    }

    /// Valor imobilizado em estoque (a preço de custo).
    pub fn stock_value(&self) -> Decimal {
        self.cost_price * Decimal::from(self.quantity)
    }
}

/// Calcula a nova quantidade de um produto após uma movimentação.
///
/// Núcleo puro do controle de estoque: valida a quantidade movimentada e
/// garante que o saldo nunca fica negativo, antes de qualquer UPDATE.
pub fn next_quantity(
    current: i32,
    direction: MovementDirection,
    quantity: i32,
) -> Result<i32, AppError> {
    if quantity < 1 {
        return Err(AppError::InvalidAmount(
            "A quantidade movimentada deve ser de pelo menos 1.".into(),
        ));
    }
    match direction {
        MovementDirection::In => current.checked_add(quantity).ok_or_else(|| {
            AppError::InvalidAmount("A quantidade movimentada excede o limite do estoque.".into())
        }),
        MovementDirection::Out => {
            if current < quantity {
                return Err(AppError::InsufficientStock {
                    available: current,
                    requested: quantity,
                });
            }
            Ok(current - quantity)
        }
    }
}

// --- MOVIMENTAÇÃO DE ESTOQUE (Histórico) ---
// Imutável após a criação; o efeito no produto acontece na mesma transação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub direction: MovementDirection,
    pub quantity: i32,
    pub unit_value: Decimal,
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    /// Valor total da movimentação: quantidade × valor unitário.
    pub fn total_value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(quantity: i32, min_quantity: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Caneta Azul".into(),
            description: None,
            cost_price: dec!(2.00),
            sale_price: dec!(5.00),
            quantity,
            min_quantity,
            is_active: true,
            created_by: "maria".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn entry_increases_and_exit_decreases_quantity() {
        // Cenário: 5 -> entrada de 10 -> 15 -> saída de 2 -> 13.
        let mut qty = 5;
        qty = next_quantity(qty, MovementDirection::In, 10).unwrap();
        assert_eq!(qty, 15);
        qty = next_quantity(qty, MovementDirection::Out, 2).unwrap();
        assert_eq!(qty, 13);
    }

    #[test]
    fn exit_beyond_stock_fails_and_keeps_quantity() {
        let qty = 3;
        let err = next_quantity(qty, MovementDirection::Out, 4).unwrap_err();
        match err {
            AppError::InsufficientStock { available, requested } => {
                assert_eq!(available, 3);
                assert_eq!(requested, 4);
            }
            other => panic!("erro inesperado: {other:?}"),
        }
        // `qty` não foi tocado; a função só devolve o novo valor no sucesso.
        assert_eq!(qty, 3);
    }

    #[test]
    fn entry_overflowing_the_counter_is_rejected() {
        assert!(matches!(
            next_quantity(i32::MAX, MovementDirection::In, 1),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(matches!(
            next_quantity(1, MovementDirection::In, i32::MAX),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn exit_of_entire_stock_is_allowed() {
        assert_eq!(next_quantity(7, MovementDirection::Out, 7).unwrap(), 0);
    }

    #[test]
    fn zero_or_negative_quantities_are_rejected() {
        for qty in [0, -1] {
            assert!(matches!(
                next_quantity(10, MovementDirection::In, qty),
                Err(AppError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn low_stock_is_strictly_below_minimum() {
        assert!(product(9, 10).is_low_stock());
        assert!(!product(10, 10).is_low_stock());
        assert!(!product(11, 10).is_low_stock());
    }

    #[test]
    fn profit_and_stock_value_calculations() {
        let p = product(4, 10);
        assert_eq!(p.unit_profit(), dec!(3.00));
        assert_eq!(p.profit_margin(), dec!(150.00));
        assert_eq!(p.stock_value(), dec!(8.00));
    }

    #[test]
    fn movement_total_value() {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            direction: MovementDirection::Out,
            quantity: 3,
            unit_value: dec!(19.90),
            notes: None,
            created_by: "joao".into(),
            created_at: Utc::now(),
        };
        assert_eq!(movement.total_value(), dec!(59.70));
    }
}
