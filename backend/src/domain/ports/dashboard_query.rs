//! Driving port for the dashboard overview.
//!
//! HTTP handlers read dashboard data through this port so the page can move
//! to real CRM storage without touching the inbound adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;

use crate::domain::{
    ConversionRate, ConvertedLeads, DashboardOverview, DashboardStats, Error, InvoicesAwaiting,
    Notification, ProjectsProgress,
};

/// Domain use-case port for the dashboard overview.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Return the statistics and notifications shown on the dashboard.
    async fn overview(&self) -> Result<DashboardOverview, Error>;
}

/// Dashboard query serving hard-coded CRM figures.
///
/// Notification timestamps are offsets from the injected clock, so the feed
/// always looks recent.
#[derive(Clone)]
pub struct MockDashboardQuery {
    clock: Arc<dyn Clock>,
}

impl MockDashboardQuery {
    /// Create a query that stamps notifications relative to `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn stats() -> DashboardStats {
        DashboardStats {
            invoices_awaiting: InvoicesAwaiting {
                current: 45,
                total: 76,
                amount: 5569,
                percentage: 56,
            },
            converted_leads: ConvertedLeads {
                current: 48,
                total: 86,
                completed: 52,
                percentage: 63,
            },
            projects_progress: ProjectsProgress {
                current: 16,
                total: 20,
                percentage: 78,
            },
            conversion_rate: ConversionRate {
                rate: 46.59,
                amount: 2254,
                percentage: 46,
            },
        }
    }
}

#[async_trait]
impl DashboardQuery for MockDashboardQuery {
    async fn overview(&self) -> Result<DashboardOverview, Error> {
        const FEED: [(u32, &str, &str, &str, i64); 3] = [
            (
                1,
                "Malanie Hanvey",
                "2.png",
                "We should talk about that at lunch!",
                2,
            ),
            (
                2,
                "Valentine Maton",
                "3.png",
                "You can download the latest invoices now.",
                36,
            ),
            (
                3,
                "Archie Cantones",
                "4.png",
                "Don't forget to pickup Jeremy after school!",
                53,
            ),
        ];

        let now = self.clock.utc();
        let notifications = FEED
            .iter()
            .map(|&(id, user, avatar, message, minutes_ago)| {
                Notification::new(
                    id,
                    user,
                    avatar,
                    message,
                    now - Duration::minutes(minutes_ago),
                    now,
                )
            })
            .collect();

        Ok(DashboardOverview {
            stats: Self::stats(),
            notifications,
        })
    }
}
