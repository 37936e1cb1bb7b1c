// src/db/inventory_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{MovementDirection, Product, StockMovement},
};

const PRODUCT_COLUMNS: &str = "id, name, description, cost_price, sale_price, quantity, \
                               min_quantity, is_active, created_by, created_at, updated_at";

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn get_all_products(
        &self,
        search: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
              AND ($2 OR is_active)
            ORDER BY name ASC
            "#,
        ))
        .bind(search)
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1",
        ))
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        product.ok_or(AppError::ProductNotFound)
    }

    /// Histórico de movimentações de um produto, mais recentes primeiro.
    pub async fn get_product_movements(
        &self,
        product_id: Uuid,
        limit: i64,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, product_id, direction, quantity, unit_value, notes, created_by, created_at
            FROM stock_movements
            WHERE product_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    /// Total de unidades movimentadas numa direção (entradas ou saídas).
    pub async fn sum_movements(
        &self,
        product_id: Uuid,
        direction: MovementDirection,
    ) -> Result<i64, AppError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(quantity), 0) FROM stock_movements WHERE product_id = $1 AND direction = $2",
        )
        .bind(product_id)
        .bind(direction)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---
    // Estas usam o padrão genérico 'Executor' para rodar dentro de uma transação.

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        cost_price: Decimal,
        sale_price: Decimal,
        quantity: i32,
        min_quantity: i32,
        actor: &str,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, description, cost_price, sale_price, quantity, min_quantity, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(name)
        .bind(description)
        .bind(cost_price)
        .bind(sale_price)
        .bind(quantity)
        .bind(min_quantity)
        .bind(actor)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    /// Busca o produto travando a linha (FOR UPDATE).
    /// Obrigatório antes de qualquer mutação de quantidade.
    pub async fn get_product_for_update<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE",
        ))
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
        product.ok_or(AppError::ProductNotFound)
    }

    pub async fn update_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        new_quantity: i32,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET quantity = $2, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(product_id)
        .bind(new_quantity)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        name: &str,
        description: Option<&str>,
        cost_price: Decimal,
        sale_price: Decimal,
        min_quantity: i32,
        is_active: bool,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $2, description = $3, cost_price = $4, sale_price = $5,
                min_quantity = $6, is_active = $7, updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(product_id)
        .bind(name)
        .bind(description)
        .bind(cost_price)
        .bind(sale_price)
        .bind(min_quantity)
        .bind(is_active)
        .fetch_optional(executor)
        .await?;

        product.ok_or(AppError::ProductNotFound)
    }

    pub async fn count_movements<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM stock_movements WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(executor)
                .await?;
        Ok(row.0)
    }

    pub async fn delete_product<'e, E>(&self, executor: E, product_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    /// Registra uma movimentação no histórico (auditoria).
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        direction: MovementDirection,
        quantity: i32,
        unit_value: Decimal,
        notes: Option<&str>,
        actor: &str,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, direction, quantity, unit_value, notes, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, direction, quantity, unit_value, notes, created_by, created_at
            "#,
        )
        .bind(product_id)
        .bind(direction)
        .bind(quantity)
        .bind(unit_value)
        .bind(notes)
        .bind(actor)
        .fetch_one(executor)
        .await?;

        Ok(movement)
    }
}
