//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crm_backend::ApiDoc;
use crm_backend::Trace;
use crm_backend::domain::ports::MockDashboardQuery;
use crm_backend::inbound::http::dashboard::{
    dashboard_analytics, dashboard_crm, dashboard_overview, home,
};
use crm_backend::inbound::http::health::{HealthState, live, ready};
use crm_backend::inbound::http::state::HttpState;
use crm_backend::inbound::http::templates::TemplateRenderer;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").service(dashboard_overview);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(home)
        .service(dashboard_crm)
        .service(dashboard_analytics)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Marks `health_state` ready once the listener is bound.
///
/// # Errors
/// Fails when the templates do not parse or the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let templates = TemplateRenderer::new()
        .map_err(|err| std::io::Error::other(format!("failed to load templates: {err}")))?;
    let http_state = web::Data::new(HttpState::new(
        Arc::new(MockDashboardQuery::new(Arc::new(DefaultClock))),
        Arc::new(templates),
    ));

    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
