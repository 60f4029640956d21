//! Business connection persistence
//!
//! The scoring core neither reads nor writes the database; this store loads
//! active connections for a wallet and records normalized platform payloads
//! on its behalf. At most one active row exists per
//! (wallet, platform, platform_user_id) triple.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{BusinessConnection, BusinessConnectionRow, Platform, RevenueData};

/// Store for business connection rows
#[derive(Clone)]
pub struct ConnectionStore {
    db_pool: PgPool,
}

impl ConnectionStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Load the active connections for a wallet. Scoring only considers
    /// connections flagged active.
    pub async fn list_active(
        &self,
        wallet_address: &str,
    ) -> Result<Vec<BusinessConnection>, ApiError> {
        let rows = sqlx::query_as::<_, BusinessConnectionRow>(
            r#"
            SELECT id, wallet_address, platform, platform_user_id, revenue_data,
                   is_active, connected_at, last_synced_at
            FROM business_connections
            WHERE wallet_address = $1 AND is_active = true
            ORDER BY connected_at ASC
            "#,
        )
        .bind(wallet_address)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows.into_iter().map(BusinessConnection::from).collect())
    }

    /// Record a normalized connection, replacing any existing row for the
    /// same (wallet, platform, platform_user_id) and refreshing its sync
    /// timestamp. Returns the stored connection so callers echo exactly the
    /// row that was written, not a lookalike sharing the platform.
    pub async fn upsert(
        &self,
        wallet_address: &str,
        platform: &Platform,
        platform_user_id: &str,
        revenue_data: &RevenueData,
    ) -> Result<BusinessConnection, ApiError> {
        let revenue_json = serde_json::to_value(revenue_data)?;

        let row = sqlx::query_as::<_, BusinessConnectionRow>(
            r#"
            INSERT INTO business_connections
                (id, wallet_address, platform, platform_user_id, revenue_data,
                 is_active, connected_at, last_synced_at)
            VALUES ($1, $2, $3, $4, $5, true, NOW(), NOW())
            ON CONFLICT (wallet_address, platform, platform_user_id)
            DO UPDATE SET
                revenue_data = EXCLUDED.revenue_data,
                is_active = true,
                last_synced_at = NOW()
            RETURNING id, wallet_address, platform, platform_user_id,
                      revenue_data, is_active, connected_at, last_synced_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(wallet_address)
        .bind(platform.as_str())
        .bind(platform_user_id)
        .bind(revenue_json)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(
            wallet = %wallet_address,
            platform = %platform.as_str(),
            "Business connection recorded"
        );

        Ok(row.into())
    }

    /// Deactivate a connection so scoring no longer considers it
    pub async fn deactivate(
        &self,
        wallet_address: &str,
        platform: &Platform,
        platform_user_id: &str,
    ) -> Result<(), ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE business_connections
            SET is_active = false
            WHERE wallet_address = $1 AND platform = $2 AND platform_user_id = $3
            "#,
        )
        .bind(wallet_address)
        .bind(platform.as_str())
        .bind(platform_user_id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!(
                "No {} connection for wallet {}",
                platform.as_str(),
                wallet_address
            )));
        }

        Ok(())
    }
}
