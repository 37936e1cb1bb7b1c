// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{MovementDirection, Product, StockMovement, next_quantity},
};

/// Detalhe de um produto com histórico e totais de movimentação.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub product: Product,
    pub movements: Vec<StockMovement>,
    pub total_in: i64,
    pub total_out: i64,
    pub unit_profit: Decimal,
    pub profit_margin: Decimal,
    pub is_low_stock: bool,
}

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    fn validate_prices(cost_price: Decimal, sale_price: Decimal) -> Result<(), AppError> {
        if cost_price <= Decimal::ZERO || sale_price <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "Preço de custo e preço de venda devem ser maiores que zero.".into(),
            ));
        }
        Ok(())
    }

    // --- CATÁLOGO ---

    /// Cadastra um produto, com estoque inicial opcional.
    ///
    /// O estoque inicial é um saldo de abertura: entra como movimentação IN
    /// no histórico (auditoria), mas sem efeito no capital de giro — não é
    /// uma compra.
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
        cost_price: Decimal,
        sale_price: Decimal,
        initial_stock: i32,
        min_quantity: i32,
        actor: &str,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        Self::validate_prices(cost_price, sale_price)?;
        if min_quantity < 0 {
            return Err(AppError::InvalidAmount(
                "O estoque mínimo não pode ser negativo.".into(),
            ));
        }
        if initial_stock < 0 {
            return Err(AppError::InvalidAmount(
                "O estoque inicial não pode ser negativo.".into(),
            ));
        }

        let mut tx = executor.begin().await?;

        let product = self
            .repo
            .create_product(
                &mut *tx,
                name,
                description,
                cost_price,
                sale_price,
                initial_stock,
                min_quantity,
                actor,
            )
            .await?;

        if initial_stock > 0 {
            self.repo
                .record_movement(
                    &mut *tx,
                    product.id,
                    MovementDirection::In,
                    initial_stock,
                    cost_price,
                    Some("Estoque inicial"),
                    actor,
                )
                .await?;
        }

        tx.commit().await?;
        Ok(product)
    }

    pub async fn get_all_products(
        &self,
        search: Option<&str>,
        include_inactive: bool,
    ) -> Result<Vec<Product>, AppError> {
        self.repo.get_all_products(search, include_inactive).await
    }

    pub async fn get_product_details(&self, product_id: Uuid) -> Result<ProductDetails, AppError> {
        let product = self.repo.get_product(product_id).await?;
        let movements = self.repo.get_product_movements(product_id, 20).await?;
        let total_in = self
            .repo
            .sum_movements(product_id, MovementDirection::In)
            .await?;
        let total_out = self
            .repo
            .sum_movements(product_id, MovementDirection::Out)
            .await?;

        Ok(ProductDetails {
            unit_profit: product.unit_profit(),
            profit_margin: product.profit_margin(),
            is_low_stock: product.is_low_stock(),
            product,
            movements,
            total_in,
            total_out,
        })
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
        Self::validate_prices(cost_price, sale_price)?;
        if min_quantity < 0 {
            return Err(AppError::InvalidAmount(
                "O estoque mínimo não pode ser negativo.".into(),
            ));
        }

        self.repo
            .update_product(
                executor,
                product_id,
                name,
                description,
                cost_price,
                sale_price,
                min_quantity,
                is_active,
            )
            .await
    }

    /// Exclui um produto. Produto com movimentações nunca é excluído
    /// (o histórico é imutável); use a desativação nesses casos.
    pub async fn delete_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if self.repo.count_movements(&mut *tx, product_id).await? > 0 {
            return Err(AppError::ProductHasMovements);
        }
        self.repo.delete_product(&mut *tx, product_id).await?;

        tx.commit().await?;
        Ok(())
    }

    // --- MOVIMENTAÇÃO DE ESTOQUE ---

    /// Aplica uma movimentação ao estoque do produto.
    ///
    /// Trava a linha do produto, valida com `next_quantity` e grava a nova
    /// quantidade junto com o registro de movimentação, na mesma transação.
    /// O efeito no capital de giro é responsabilidade do coordenador
    /// (`OperationService`), dentro da transação externa.
    pub async fn apply_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        direction: MovementDirection,
        quantity: i32,
        unit_value: Decimal,
        notes: Option<&str>,
        actor: &str,
    ) -> Result<(StockMovement, Product), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if unit_value <= Decimal::ZERO {
            return Err(AppError::InvalidAmount(
                "O valor unitário deve ser maior que zero.".into(),
            ));
        }

        let mut tx = executor.begin().await?;

        // 1. Trava o produto (FOR UPDATE) e valida
        let product = self.repo.get_product_for_update(&mut *tx, product_id).await?;
        if !product.is_active {
            return Err(AppError::ProductInactive);
        }

        // 2. Núcleo puro: calcula a nova quantidade (ou falha sem efeito)
        let new_quantity = next_quantity(product.quantity, direction, quantity)?;

        // 3. Persiste quantidade + histórico juntos
        let updated = self
            .repo
            .update_quantity(&mut *tx, product_id, new_quantity)
            .await?;
        let movement = self
            .repo
            .record_movement(
                &mut *tx, product_id, direction, quantity, unit_value, notes, actor,
            )
            .await?;

        tx.commit().await?;

        if updated.is_low_stock() {
            tracing::warn!(
                "Produto '{}' abaixo do estoque mínimo ({} < {})",
                updated.name,
                updated.quantity,
                updated.min_quantity
            );
        }

        Ok((movement, updated))
    }
}
