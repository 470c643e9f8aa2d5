//! Acta repository implementation.
//!
//! Acta writes are unguarded: the last write wins.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::acta::{Acta, ActaStatus, ActaView};

const VIEW_SELECT: &str = "SELECT c.id, c.assignment_id, s.employee_id, s.asset_id, \
     a.code AS asset_code, a.name AS asset_name, c.status, c.signing_method, c.file_name, \
     c.created_at, c.signed_at, c.approved_at \
     FROM actas c \
     JOIN assignments s ON s.id = c.assignment_id \
     JOIN assets a ON a.id = s.asset_id";

/// Listing filter for actas.
#[derive(Debug, Clone, Default)]
pub struct ActaFilter {
    /// Restrict to one employee.
    pub employee_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<ActaStatus>,
}

/// Repository for actas.
#[derive(Debug, Clone)]
pub struct ActaRepository {
    pool: PgPool,
}

impl ActaRepository {
    /// Create a new acta repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an acta by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Acta>> {
        sqlx::query_as::<_, Acta>("SELECT * FROM actas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find acta", e))
    }

    /// Find an acta joined with its assignment and asset.
    pub async fn find_view_by_id(&self, id: Uuid) -> AppResult<Option<ActaView>> {
        let sql = format!("{VIEW_SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, ActaView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find acta", e))
    }

    /// List actas, newest first.
    pub async fn list(
        &self,
        filter: &ActaFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ActaView>> {
        let where_clause = "WHERE ($1::UUID IS NULL OR s.employee_id = $1) \
                            AND ($2::acta_status IS NULL OR c.status = $2)";

        let count_sql = format!(
            "SELECT COUNT(*) FROM actas c JOIN assignments s ON s.id = c.assignment_id {where_clause}"
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.employee_id)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count actas", e))?;

        let select_sql =
            format!("{VIEW_SELECT} {where_clause} ORDER BY c.created_at DESC LIMIT $3 OFFSET $4");
        let items = sqlx::query_as::<_, ActaView>(&select_sql)
            .bind(filter.employee_id)
            .bind(filter.status)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list actas", e))?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Persist every mutable column of an acta.
    pub async fn save(&self, acta: &Acta) -> AppResult<Acta> {
        sqlx::query_as::<_, Acta>(
            "UPDATE actas SET \
                status = $2, signing_method = $3, file_name = $4, file_path = $5, \
                observations = $6, approval_comment = $7, approved_by = $8, \
                uploaded_at = $9, signed_at = $10, approved_at = $11 \
             WHERE id = $1 RETURNING *",
        )
        .bind(acta.id)
        .bind(acta.status)
        .bind(acta.signing_method)
        .bind(&acta.file_name)
        .bind(&acta.file_path)
        .bind(&acta.observations)
        .bind(&acta.approval_comment)
        .bind(acta.approved_by)
        .bind(acta.uploaded_at)
        .bind(acta.signed_at)
        .bind(acta.approved_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update acta", e))?
        .ok_or_else(|| AppError::not_found("Acta not found"))
    }

    /// Hard-delete an acta. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM actas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete acta", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Acta counts grouped by status.
    pub async fn count_by_status(&self) -> AppResult<Vec<(ActaStatus, i64)>> {
        sqlx::query_as::<_, (ActaStatus, i64)>(
            "SELECT status, COUNT(*) FROM actas GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count actas", e))
    }
}
