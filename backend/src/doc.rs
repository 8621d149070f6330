//! OpenAPI documentation for the HTTP surface.
//!
//! Served by Swagger UI at `/docs` in debug builds, with the raw document at
//! `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::{
    ConversionRate, ConvertedLeads, DashboardOverview, DashboardStats, Error, ErrorCode,
    InvoicesAwaiting, Notification, ProjectsProgress,
};

/// OpenAPI document for the CRM backend.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CRM backend API",
        description = "Dashboard pages, dashboard data and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::dashboard::home,
        crate::inbound::http::dashboard::dashboard_crm,
        crate::inbound::http::dashboard::dashboard_analytics,
        crate::inbound::http::dashboard::dashboard_overview,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DashboardOverview,
        DashboardStats,
        InvoicesAwaiting,
        ConvertedLeads,
        ProjectsProgress,
        ConversionRate,
        Notification,
        Error,
        ErrorCode
    )),
    tags(
        (name = "dashboard", description = "CRM dashboard pages and data"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
