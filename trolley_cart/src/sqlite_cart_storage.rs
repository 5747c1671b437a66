use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::{debug, error};

use trolley_core::{
    model::GenericError,
    storage::{CartRow, CartStorage},
};

pub struct SqliteCartStorage {
    pub pool: sqlx::SqlitePool,
}

impl SqliteCartStorage {
    pub async fn new(database_url: &str) -> Result<Self, GenericError> {
        let pool = sqlx::SqlitePool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub async fn initialize_schema(&self) -> Result<(), GenericError> {
        let init_sql = include_str!("../resources/init.sql");
        sqlx::query(init_sql).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CartStorage for SqliteCartStorage {
    async fn fetch(&self, token: &str) -> Result<Option<CartRow>, GenericError> {
        debug!("Fetching cart row for token: {}", token);

        let row = sqlx::query(
            r#"
            SELECT token, payload, rule_ids, price, line_item_count,
                   sales_channel_id, customer_id, created_at, updated_at
            FROM cart
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(CartRow {
                token: row.try_get("token")?,
                payload: row.try_get("payload")?,
                rule_ids: row.try_get("rule_ids")?,
                price: row.try_get("price")?,
                line_item_count: row.try_get("line_item_count")?,
                sales_channel_id: row.try_get("sales_channel_id")?,
                customer_id: row.try_get("customer_id")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })),
            None => Ok(None),
        }
    }

    async fn upsert(&self, row: &CartRow) -> Result<(), GenericError> {
        debug!("Storing cart row for token: {}", row.token);

        match sqlx::query(
            r#"
            INSERT INTO cart (
                token, payload, rule_ids, price, line_item_count,
                sales_channel_id, customer_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL)
            ON CONFLICT(token) DO UPDATE SET
                payload = excluded.payload,
                rule_ids = excluded.rule_ids,
                price = excluded.price,
                line_item_count = excluded.line_item_count,
                sales_channel_id = excluded.sales_channel_id,
                customer_id = excluded.customer_id,
                updated_at = excluded.created_at
            "#,
        )
        .bind(&row.token)
        .bind(&row.payload)
        .bind(&row.rule_ids)
        .bind(row.price)
        .bind(row.line_item_count)
        .bind(&row.sales_channel_id)
        .bind(&row.customer_id)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        {
            Ok(_) => {
                debug!("Successfully stored cart row");
                Ok(())
            }
            Err(e) => {
                error!("Failed to store cart row: {}", e);
                Err(e.into())
            }
        }
    }

    async fn delete(&self, token: &str) -> Result<(), GenericError> {
        debug!("Deleting cart row for token: {}", token);

        sqlx::query("DELETE FROM cart WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn replace_token(
        &self,
        old_token: &str,
        new_token: &str,
    ) -> Result<(), GenericError> {
        let result = sqlx::query("UPDATE cart SET token = ? WHERE token = ?")
            .bind(new_token)
            .bind(old_token)
            .execute(&self.pool)
            .await?;

        debug!(
            "Re-keyed {} cart rows from {} to {}",
            result.rows_affected(),
            old_token,
            new_token
        );

        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, GenericError> {
        let result = sqlx::query("DELETE FROM cart WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
