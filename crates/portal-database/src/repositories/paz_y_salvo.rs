//! Clearance repository implementation.
//!
//! Every update is a compare-and-swap on `row_version`.

use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::paz_y_salvo::{CreatePazYSalvo, PazYSalvo, PazYSalvoStatus};

use super::VersionedUpdate;

/// Listing filter for clearances.
#[derive(Debug, Clone, Default)]
pub struct PazYSalvoFilter {
    /// Restrict to one employee.
    pub employee_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<PazYSalvoStatus>,
}

/// Repository for clearance requests.
#[derive(Debug, Clone)]
pub struct PazYSalvoRepository {
    pool: PgPool,
}

impl PazYSalvoRepository {
    /// Create a new clearance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a clearance by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PazYSalvo>> {
        sqlx::query_as::<_, PazYSalvo>("SELECT * FROM paz_y_salvo WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find paz y salvo", e)
            })
    }

    /// List clearances, newest first.
    pub async fn list(
        &self,
        filter: &PazYSalvoFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<PazYSalvo>> {
        let where_clause = "WHERE ($1::UUID IS NULL OR employee_id = $1) \
                            AND ($2::clearance_status IS NULL OR status = $2)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM paz_y_salvo {where_clause}"))
                .bind(filter.employee_id)
                .bind(filter.status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count paz y salvo", e)
                })?;

        let items = sqlx::query_as::<_, PazYSalvo>(&format!(
            "SELECT * FROM paz_y_salvo {where_clause} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(filter.employee_id)
        .bind(filter.status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list paz y salvo", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Insert a new draft at version 1.
    pub async fn create(&self, data: &CreatePazYSalvo) -> AppResult<PazYSalvo> {
        sqlx::query_as::<_, PazYSalvo>(
            "INSERT INTO paz_y_salvo \
                (id, employee_id, requested_by, status, motive, observations, \
                 signatures_json, history_json, attachments_json, exceptions_json, \
                 asset_snapshot_json, row_version) \
             VALUES ($1, $2, $3, 'Borrador', $4, $5, $6, $7, '[]', '[]', $8, 1) RETURNING *",
        )
        .bind(data.id)
        .bind(data.employee_id)
        .bind(data.requested_by)
        .bind(&data.motive)
        .bind(&data.observations)
        .bind(&data.signatures_json)
        .bind(&data.history_json)
        .bind(&data.asset_snapshot_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create paz y salvo", e))
    }

    /// Write `doc` if the stored version still equals `expected_version`.
    ///
    /// The stored version is bumped by one on success. Zero affected rows on
    /// an existing record yields [`VersionedUpdate::Conflict`].
    pub async fn update(
        &self,
        doc: &PazYSalvo,
        expected_version: i32,
    ) -> AppResult<VersionedUpdate<PazYSalvo>> {
        let updated = sqlx::query_as::<_, PazYSalvo>(
            "UPDATE paz_y_salvo SET \
                status = $3, motive = $4, observations = $5, \
                signatures_json = $6, history_json = $7, attachments_json = $8, \
                exceptions_json = $9, asset_snapshot_json = $10, \
                final_hash = $11, pdf_path = $12, \
                sent_at = $13, approved_at = $14, closed_at = $15, \
                updated_at = NOW(), row_version = row_version + 1 \
             WHERE id = $1 AND row_version = $2 RETURNING *",
        )
        .bind(doc.id)
        .bind(expected_version)
        .bind(doc.status)
        .bind(&doc.motive)
        .bind(&doc.observations)
        .bind(&doc.signatures_json)
        .bind(&doc.history_json)
        .bind(&doc.attachments_json)
        .bind(&doc.exceptions_json)
        .bind(&doc.asset_snapshot_json)
        .bind(&doc.final_hash)
        .bind(&doc.pdf_path)
        .bind(doc.sent_at)
        .bind(doc.approved_at)
        .bind(doc.closed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update paz y salvo", e))?;

        if let Some(row) = updated {
            debug!(id = %row.id, row_version = row.row_version, "Paz y salvo updated");
            return Ok(VersionedUpdate::Updated(row));
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM paz_y_salvo WHERE id = $1)")
                .bind(doc.id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to find paz y salvo", e)
                })?;

        if exists {
            warn!(id = %doc.id, expected_version, "Paz y salvo version conflict");
            Ok(VersionedUpdate::Conflict)
        } else {
            Err(AppError::not_found("Paz y salvo not found"))
        }
    }

    /// Clearance counts grouped by status.
    pub async fn count_by_status(&self) -> AppResult<Vec<(PazYSalvoStatus, i64)>> {
        sqlx::query_as::<_, (PazYSalvoStatus, i64)>(
            "SELECT status, COUNT(*) FROM paz_y_salvo GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count paz y salvo", e)
        })
    }
}
