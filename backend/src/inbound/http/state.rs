//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and the template renderer, and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::DashboardQuery;

use super::templates::TemplateRenderer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub dashboard: Arc<dyn DashboardQuery>,
    pub templates: Arc<TemplateRenderer>,
}

impl HttpState {
    /// Construct state from the dashboard port and a renderer.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use crm_backend::domain::ports::MockDashboardQuery;
    /// use crm_backend::inbound::http::state::HttpState;
    /// use crm_backend::inbound::http::templates::TemplateRenderer;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(MockDashboardQuery::new(Arc::new(DefaultClock))),
    ///     Arc::new(TemplateRenderer::new().expect("templates parse")),
    /// );
    /// let _dashboard = state.dashboard.clone();
    /// ```
    pub fn new(dashboard: Arc<dyn DashboardQuery>, templates: Arc<TemplateRenderer>) -> Self {
        Self {
            dashboard,
            templates,
        }
    }
}
