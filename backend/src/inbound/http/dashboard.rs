//! Dashboard handlers.
//!
//! ```text
//! GET /                       -> 302 /dashboard
//! GET /dashboard              -> HTML overview
//! GET /dashboard/analytics    -> HTML analytics page
//! GET /api/v1/dashboard       -> JSON overview
//! ```

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get, web};
use minijinja::context;

use crate::domain::{DashboardOverview, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Path the home route redirects to.
pub const DASHBOARD_PATH: &str = "/dashboard";

const ANALYTICS_TITLE: &str = "Analytics Dashboard";

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Send visitors of the site root to the dashboard.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 302, description = "Redirect to the dashboard")),
    tags = ["dashboard"],
    operation_id = "appHome"
)]
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, DASHBOARD_PATH))
        .finish()
}

/// Render the CRM dashboard.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard page", content_type = "text/html"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardCrm"
)]
#[get("/dashboard")]
pub async fn dashboard_crm(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let DashboardOverview {
        stats,
        notifications,
    } = state.dashboard.overview().await?;
    let body = state.templates.render(
        "dashboard.html",
        context! { stats => stats, notifications => notifications },
    )?;
    Ok(html(body))
}

/// Render the analytics page.
#[utoipa::path(
    get,
    path = "/dashboard/analytics",
    responses(
        (status = 200, description = "Analytics page", content_type = "text/html"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardAnalytics"
)]
#[get("/dashboard/analytics")]
pub async fn dashboard_analytics(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let body = state.templates.render(
        "dashboard/analytics.html",
        context! { pageTitle => ANALYTICS_TITLE },
    )?;
    Ok(html(body))
}

/// Dashboard statistics and notifications as JSON.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use crm_backend::inbound::http::dashboard::dashboard_overview;
///
/// let app = App::new().service(web::scope("/api/v1").service(dashboard_overview));
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard overview", body = DashboardOverview),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardOverview"
)]
#[get("/dashboard")]
pub async fn dashboard_overview(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardOverview>> {
    let overview = state.dashboard.overview().await?;
    Ok(web::Json(overview))
}
