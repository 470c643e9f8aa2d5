//! Aggregated counts for the IT dashboard.

use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_database::repositories::{
    ActaRepository, AssetRepository, PazYSalvoRepository, TicketRepository,
};
use portal_entity::acta::ActaStatus;
use portal_entity::asset::AssetStatus;
use portal_entity::paz_y_salvo::PazYSalvoStatus;
use portal_entity::ticket::TicketStatus;

use crate::context::RequestContext;

/// Count for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status name.
    pub status: String,
    /// Number of records.
    pub count: i64,
}

/// Dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub assets: Vec<StatusCount>,
    pub actas: Vec<StatusCount>,
    pub tickets: Vec<StatusCount>,
    pub open_tickets: i64,
    pub clearances: Vec<StatusCount>,
}

/// Builds the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardService {
    asset_repo: Arc<AssetRepository>,
    acta_repo: Arc<ActaRepository>,
    ticket_repo: Arc<TicketRepository>,
    clearance_repo: Arc<PazYSalvoRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl DashboardService {
    /// Creates a new dashboard service.
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        acta_repo: Arc<ActaRepository>,
        ticket_repo: Arc<TicketRepository>,
        clearance_repo: Arc<PazYSalvoRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            asset_repo,
            acta_repo,
            ticket_repo,
            clearance_repo,
            rbac,
        }
    }

    /// Counts by status for assets, actas, tickets and clearances.
    pub async fn summary(&self, ctx: &RequestContext) -> Result<DashboardSummary, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::DashboardView)?;

        let assets = self.asset_repo.count_by_status().await?;
        let actas = self.acta_repo.count_by_status().await?;
        let tickets = self.ticket_repo.count_by_status().await?;
        let open_tickets = self.ticket_repo.count_open().await?;
        let clearances = self.clearance_repo.count_by_status().await?;

        Ok(DashboardSummary {
            assets: fill_counts(&AssetStatus::ALL, &assets),
            actas: fill_counts(&ActaStatus::ALL, &actas),
            tickets: fill_counts(&TicketStatus::ALL, &tickets),
            open_tickets,
            clearances: fill_counts(&PazYSalvoStatus::ALL, &clearances),
        })
    }
}

/// One entry per known status, zero when the database returned none.
fn fill_counts<S: Copy + PartialEq + Display>(all: &[S], rows: &[(S, i64)]) -> Vec<StatusCount> {
    all.iter()
        .map(|status| StatusCount {
            status: status.to_string(),
            count: rows
                .iter()
                .find(|(s, _)| s == status)
                .map(|(_, n)| *n)
                .unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_counts_zero_fills() {
        let counts = fill_counts(
            &ActaStatus::ALL,
            &[(ActaStatus::Firmada, 3), (ActaStatus::Anulada, 1)],
        );
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[0], StatusCount { status: "Pendiente".into(), count: 0 });
        assert_eq!(counts[1].count, 3);
        assert_eq!(counts[4].count, 1);
    }

    #[test]
    fn test_fill_counts_keeps_order() {
        let counts = fill_counts(&TicketStatus::ALL, &[]);
        let names: Vec<_> = counts.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(names, ["Abierto", "EnProceso", "Resuelto", "Cerrado", "Cancelado"]);
    }
}
