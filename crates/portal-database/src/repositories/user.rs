//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::write_error;

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// List all users with pagination.
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY full_name ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    /// IDs of active users holding any of the given roles.
    pub async fn find_active_ids_by_roles(&self, roles: &[UserRole]) -> AppResult<Vec<Uuid>> {
        let names: Vec<&str> = roles.iter().map(UserRole::as_str).collect();
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM users WHERE is_active = TRUE AND role::TEXT = ANY($1)",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users by role", e)
        })
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, full_name, email, department, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.department)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            write_error(
                e,
                "Failed to create user",
                &format!("Username '{}' already exists", data.username),
            )
        })
    }

    /// Apply an administrative update. `None` fields are left unchanged.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                role = COALESCE($2, role), \
                is_active = COALESCE($3, is_active), \
                department = COALESCE($4, department), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.role)
        .bind(data.is_active)
        .bind(&data.department)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))
    }
}
