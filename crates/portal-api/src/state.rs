//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use portal_auth::jwt::JwtDecoder;
use portal_auth::rbac::RbacEnforcer;
use portal_core::config::AppConfig;
use portal_core::traits::FileStore;
use portal_database::DatabasePool;
use portal_database::repositories::{
    ActaRepository, AssetRepository, AssignmentRepository, AuditLogRepository,
    NotificationRepository, PazYSalvoRepository, TicketRepository, UserRepository,
};
use portal_service::{
    ActaService, AssetService, AssignmentService, AuditService, DashboardService,
    NotificationService, PazYSalvoService, TicketService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// File store for actas and attachments
    pub storage: Arc<dyn FileStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    pub user_service: Arc<UserService>,
    pub asset_service: Arc<AssetService>,
    pub assignment_service: Arc<AssignmentService>,
    pub acta_service: Arc<ActaService>,
    pub paz_y_salvo_service: Arc<PazYSalvoService>,
    pub ticket_service: Arc<TicketService>,
    pub notification_service: Arc<NotificationService>,
    pub audit_service: Arc<AuditService>,
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Wire repositories and services on top of the pool and file store.
    pub fn new(config: AppConfig, db: DatabasePool, storage: Arc<dyn FileStore>) -> Self {
        let pool = db.pool().clone();

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let asset_repo = Arc::new(AssetRepository::new(pool.clone()));
        let assignment_repo = Arc::new(AssignmentRepository::new(pool.clone()));
        let acta_repo = Arc::new(ActaRepository::new(pool.clone()));
        let clearance_repo = Arc::new(PazYSalvoRepository::new(pool.clone()));
        let ticket_repo = Arc::new(TicketRepository::new(pool.clone()));
        let notif_repo = Arc::new(NotificationRepository::new(pool.clone()));
        let audit_repo = Arc::new(AuditLogRepository::new(pool));

        let rbac = Arc::new(RbacEnforcer::new());
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let audit_service = Arc::new(AuditService::new(audit_repo, Arc::clone(&rbac)));
        let notification_service = Arc::new(NotificationService::new(
            notif_repo,
            Arc::clone(&user_repo),
        ));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let asset_service = Arc::new(AssetService::new(
            Arc::clone(&asset_repo),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let assignment_service = Arc::new(AssignmentService::new(
            Arc::clone(&assignment_repo),
            Arc::clone(&user_repo),
            Arc::clone(&notification_service),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let acta_service = Arc::new(ActaService::new(
            Arc::clone(&acta_repo),
            Arc::clone(&storage),
            config.storage.clone(),
            Arc::clone(&notification_service),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let paz_y_salvo_service = Arc::new(PazYSalvoService::new(
            Arc::clone(&clearance_repo),
            assignment_repo,
            Arc::clone(&user_repo),
            Arc::clone(&storage),
            config.storage.clone(),
            Arc::clone(&notification_service),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let ticket_service = Arc::new(TicketService::new(
            Arc::clone(&ticket_repo),
            Arc::clone(&asset_repo),
            user_repo,
            Arc::clone(&notification_service),
            Arc::clone(&audit_service),
            Arc::clone(&rbac),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            asset_repo,
            acta_repo,
            ticket_repo,
            clearance_repo,
            rbac,
        ));

        Self {
            config: Arc::new(config),
            db,
            storage,
            jwt_decoder,
            user_service,
            asset_service,
            assignment_service,
            acta_service,
            paz_y_salvo_service,
            ticket_service,
            notification_service,
            audit_service,
            dashboard_service,
        }
    }
}
