pub mod api;

use salvo::Router;
use salvo::Service;
use salvo::cors::Cors;
use salvo::http::Method;

use crate::config::ConfigHandler;
use crate::db_handler::DbProviderHandler;
use outreach_core::config::Settings;
use outreach_db::db::connection::DbPool;

/// ## Summary
/// Builds the full HTTP service: depot injection for the pool and
/// settings, the CORS layer for the configured origins, and all API
/// routes. Shared by `main` and the integration tests.
#[must_use]
pub fn service(pool: DbPool, settings: Settings) -> Service {
    let cors = Cors::new()
        .allow_origin(settings.server.allowed_origins())
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(vec!["content-type", "authorization"])
        .into_handler();

    let router = Router::new()
        .hoop(DbProviderHandler { provider: pool })
        .hoop(ConfigHandler { settings })
        .push(api::routes());

    Service::new(router).hoop(cors)
}
