// src/models/ledger.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::common::error::AppError;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ledger_direction", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerDirection {
    In,     // Entrada de capital
    Out,    // Saída de capital
    Adjust, // Ajuste manual
}

// --- LEDGER ENTRY (Histórico do Capital de Giro) ---
// Cada linha é imutável: o saldo atual é sempre o new_balance da
// linha mais recente (espelhado na tabela working_capital).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub previous_balance: Decimal,
    pub new_balance: Decimal,
    pub direction: LedgerDirection,
    pub description: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// --- BALANCE CHANGE (Núcleo puro do livro-razão) ---
// Calcula a transição de saldo ANTES de qualquer escrita no banco.
// Toda mutação do capital de giro passa por aqui.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    pub previous: Decimal,
    pub new: Decimal,
    pub direction: LedgerDirection,
}

impl BalanceChange {
    /// Entrada de capital: saldo + valor. Exige valor > 0.
    pub fn credit(current: Decimal, amount: Decimal) -> Result<Self, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O valor do crédito deve ser maior que zero.".into(),
            ));
        }
        Ok(Self {
            previous: current,
            new: current + amount,
            direction: LedgerDirection::In,
        })
    }

    /// Saída de capital: saldo - valor. Falha se não há capital suficiente.
    pub fn debit(current: Decimal, amount: Decimal) -> Result<Self, AppError> {
        if amount <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O valor do débito deve ser maior que zero.".into(),
            ));
        }
        if current < amount {
            return Err(AppError::InsufficientFunds {
                available: current,
                requested: amount,
            });
        }
        Ok(Self {
            previous: current,
            new: current - amount,
            direction: LedgerDirection::Out,
        })
    }

    /// Ajuste manual: define o saldo diretamente (correção de caixa).
    pub fn adjust(current: Decimal, target: Decimal) -> Result<Self, AppError> {
        if target < Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O saldo ajustado não pode ser negativo.".into(),
            ));
        }
        Ok(Self {
            previous: current,
            new: target,
            direction: LedgerDirection::Adjust,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn credit_adds_to_balance() {
        let change = BalanceChange::credit(dec!(100.00), dec!(50.50)).unwrap();
        assert_eq!(change.previous, dec!(100.00));
        assert_eq!(change.new, dec!(150.50));
        assert_eq!(change.direction, LedgerDirection::In);
    }

    #[test]
    fn debit_subtracts_from_balance() {
        let change = BalanceChange::debit(dec!(100.00), dec!(40.00)).unwrap();
        assert_eq!(change.new, dec!(60.00));
        assert_eq!(change.direction, LedgerDirection::Out);
    }

    #[test]
    fn debit_exact_balance_is_allowed() {
        let change = BalanceChange::debit(dec!(75.00), dec!(75.00)).unwrap();
        assert_eq!(change.new, Decimal::ZERO);
    }

    #[test]
    fn debit_beyond_balance_fails_and_reports_amounts() {
        // Cenário: saldo 10000, débito de 30000 falha.
        let err = BalanceChange::debit(dec!(10000.00), dec!(30000.00)).unwrap_err();
        match err {
            AppError::InsufficientFunds { available, requested } => {
                assert_eq!(available, dec!(10000.00));
                assert_eq!(requested, dec!(30000.00));
            }
            other => panic!("erro inesperado: {other:?}"),
        }
    }

    #[test]
    fn zero_or_negative_amounts_are_rejected() {
        assert!(matches!(
            BalanceChange::credit(dec!(10.00), Decimal::ZERO),
            Err(AppError::InvalidAmount(_))
        ));
        assert!(matches!(
            BalanceChange::debit(dec!(10.00), dec!(-5.00)),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn adjust_sets_balance_to_target() {
        let change = BalanceChange::adjust(dec!(321.99), dec!(500.00)).unwrap();
        assert_eq!(change.previous, dec!(321.99));
        assert_eq!(change.new, dec!(500.00));
        assert_eq!(change.direction, LedgerDirection::Adjust);

        assert!(matches!(
            BalanceChange::adjust(dec!(10.00), dec!(-1.00)),
            Err(AppError::InvalidAmount(_))
        ));
    }

    #[test]
    fn replaying_a_sequence_reproduces_the_final_balance() {
        // Propriedade: o saldo final equivale a somar créditos e subtrair
        // débitos a partir de zero, e a cadeia previous -> new é contínua.
        let operations = [
            (LedgerDirection::In, dec!(10000.00)),
            (LedgerDirection::Out, dec!(2500.00)),
            (LedgerDirection::In, dec!(0.01)),
            (LedgerDirection::Out, dec!(7000.00)),
            (LedgerDirection::In, dec!(1234.56)),
        ];

        let mut balance = Decimal::ZERO;
        let mut expected = Decimal::ZERO;
        for (direction, amount) in operations {
            let change = match direction {
                LedgerDirection::In => BalanceChange::credit(balance, amount).unwrap(),
                LedgerDirection::Out => BalanceChange::debit(balance, amount).unwrap(),
                LedgerDirection::Adjust => unreachable!(),
            };
            assert_eq!(change.previous, balance, "cadeia quebrada");
            balance = change.new;
            expected += match direction {
                LedgerDirection::In => amount,
                _ => -amount,
            };
        }
        assert_eq!(balance, expected);
        assert_eq!(balance, dec!(1734.57));
    }

    #[test]
    fn failed_debit_leaves_the_chain_usable() {
        // balance=0 -> credit(10000) -> debit(30000) falha -> saldo continua 10000.
        let mut balance = Decimal::ZERO;
        balance = BalanceChange::credit(balance, dec!(10000.00)).unwrap().new;
        assert!(BalanceChange::debit(balance, dec!(30000.00)).is_err());
        assert_eq!(balance, dec!(10000.00));

        // A falha não corrompe nada: um débito válido segue funcionando.
        balance = BalanceChange::debit(balance, dec!(3000.00)).unwrap().new;
        assert_eq!(balance, dec!(7000.00));
    }
}
