//! Asset repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::asset::{Asset, AssetFilter, AssetStatus, CreateAsset, UpdateAsset};

use super::write_error;

/// Repository for hardware assets.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    /// Create a new asset repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an asset by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Asset>> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find asset", e))
    }

    /// Search assets with optional filters.
    pub async fn search(
        &self,
        filter: &AssetFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Asset>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(code ILIKE ${param_idx} OR name ILIKE ${param_idx} OR serial_number ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM assets {where_clause}");
        let select_sql = format!(
            "SELECT * FROM assets {where_clause} ORDER BY code ASC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Asset>(&select_sql);

        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }
        if let Some(category) = &filter.category {
            count_query = count_query.bind(category.clone());
            select_query = select_query.bind(category.clone());
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{search}%");
            count_query = count_query.bind(pattern.clone());
            select_query = select_query.bind(pattern);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count assets", e))?;

        let assets = select_query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search assets", e))?;

        Ok(PageResponse::new(assets, page, total as u64))
    }

    /// Insert a new asset. A duplicate code is a conflict.
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>(
            "INSERT INTO assets (code, name, category, brand, model, serial_number, location, purchase_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.code)
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                "Failed to create asset",
                &format!("Asset code '{}' already exists", data.code),
            )
        })
    }

    /// Update an asset. `None` fields are left unchanged.
    pub async fn update(&self, id: Uuid, data: &UpdateAsset) -> AppResult<Option<Asset>> {
        sqlx::query_as::<_, Asset>(
            "UPDATE assets SET \
                name = COALESCE($2, name), \
                category = COALESCE($3, category), \
                brand = COALESCE($4, brand), \
                model = COALESCE($5, model), \
                serial_number = COALESCE($6, serial_number), \
                status = COALESCE($7, status), \
                location = COALESCE($8, location), \
                notes = COALESCE($9, notes), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(data.status)
        .bind(&data.location)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update asset", e))
    }

    /// Delete an asset. Returns whether a row was removed.
    ///
    /// Assets referenced by past assignments cannot be removed; that is
    /// reported as a conflict.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let referenced = e
                    .as_database_error()
                    .map(|db| db.is_foreign_key_violation())
                    .unwrap_or(false);
                if referenced {
                    AppError::with_source(
                        ErrorKind::Conflict,
                        "Asset has assignment history and cannot be deleted",
                        e,
                    )
                } else {
                    AppError::with_source(ErrorKind::Database, "Failed to delete asset", e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Asset counts grouped by status.
    pub async fn count_by_status(&self) -> AppResult<Vec<(AssetStatus, i64)>> {
        sqlx::query_as::<_, (AssetStatus, i64)>(
            "SELECT status, COUNT(*) FROM assets GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count assets", e))
    }
}
