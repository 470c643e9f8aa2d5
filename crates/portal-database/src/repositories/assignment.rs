//! Assignment repository implementation.
//!
//! Assignment changes always move the asset status with them, so every
//! write here runs in a single transaction.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::acta::Acta;
use portal_entity::asset::AssetStatus;
use portal_entity::assignment::{Assignment, AssignmentState, AssignmentView, CreateAssignment};

const VIEW_SELECT: &str = "SELECT s.id, s.asset_id, a.code AS asset_code, a.name AS asset_name, \
     s.employee_id, s.state, s.assigned_at, s.returned_at \
     FROM assignments s JOIN assets a ON a.id = s.asset_id";

/// Repository for asset assignments.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an assignment by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Assignment>> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find assignment", e)
            })
    }

    /// List assignments, optionally for one employee, newest first.
    pub async fn list(
        &self,
        employee_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AssignmentView>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM assignments WHERE ($1::UUID IS NULL OR employee_id = $1)",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count assignments", e))?;

        let sql = format!(
            "{VIEW_SELECT} WHERE ($1::UUID IS NULL OR s.employee_id = $1) \
             ORDER BY s.assigned_at DESC LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, AssignmentView>(&sql)
            .bind(employee_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list assignments", e)
            })?;

        Ok(PageResponse::new(items, page, total as u64))
    }

    /// Every assignment an employee ever had, oldest first.
    pub async fn find_all_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<AssignmentView>> {
        let sql = format!("{VIEW_SELECT} WHERE s.employee_id = $1 ORDER BY s.assigned_at ASC");
        sqlx::query_as::<_, AssignmentView>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load employee assignments", e)
            })
    }

    /// Hand an asset to an employee.
    ///
    /// Locks the asset row, checks it is available, inserts the active
    /// assignment, marks the asset assigned and opens a pending acta.
    pub async fn create_with_acta(&self, data: &CreateAssignment) -> AppResult<(Assignment, Acta)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let status: Option<AssetStatus> =
            sqlx::query_scalar("SELECT status FROM assets WHERE id = $1 FOR UPDATE")
                .bind(data.asset_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock asset", e))?;

        match status {
            None => return Err(AppError::not_found("Asset not found")),
            Some(s) if !s.is_assignable() => {
                return Err(AppError::validation(format!(
                    "Asset is not available for assignment (status: {s})"
                )));
            }
            Some(_) => {}
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            "INSERT INTO assignments (asset_id, employee_id, assigned_by, state, notes) \
             VALUES ($1, $2, $3, 'Activa', $4) RETURNING *",
        )
        .bind(data.asset_id)
        .bind(data.employee_id)
        .bind(data.assigned_by)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create assignment", e))?;

        sqlx::query("UPDATE assets SET status = 'Asignado', updated_at = NOW() WHERE id = $1")
            .bind(data.asset_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update asset status", e)
            })?;

        let acta = sqlx::query_as::<_, Acta>(
            "INSERT INTO actas (assignment_id, status) VALUES ($1, 'Pendiente') RETURNING *",
        )
        .bind(assignment.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create acta", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit assignment", e)
        })?;

        info!(
            assignment_id = %assignment.id,
            asset_id = %assignment.asset_id,
            acta_id = %acta.id,
            "Assignment created"
        );
        Ok((assignment, acta))
    }

    /// End an active assignment and move the asset to `asset_status`.
    pub async fn close(
        &self,
        id: Uuid,
        state: AssignmentState,
        asset_status: AssetStatus,
    ) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let closed = sqlx::query_as::<_, Assignment>(
            "UPDATE assignments SET state = $2, returned_at = NOW() \
             WHERE id = $1 AND state = 'Activa' RETURNING *",
        )
        .bind(id)
        .bind(state)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to close assignment", e))?;

        let Some(assignment) = closed else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM assignments WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to find assignment", e)
                    })?;
            return Err(if exists {
                AppError::validation("Assignment is no longer active")
            } else {
                AppError::not_found("Assignment not found")
            });
        };

        sqlx::query("UPDATE assets SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(assignment.asset_id)
            .bind(asset_status)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update asset status", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit assignment", e)
        })?;

        info!(
            assignment_id = %assignment.id,
            state = assignment.state.as_str(),
            asset_status = asset_status.as_str(),
            "Assignment closed"
        );
        Ok(assignment)
    }
}
