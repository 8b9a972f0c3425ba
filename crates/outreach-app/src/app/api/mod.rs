mod admin;
mod resources;

use salvo::writing::Json;
use salvo::{Router, handler};

use resources::MessageResponse;

#[handler]
async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Sales Outreach API".to_string(),
    })
}

#[handler]
async fn healthcheck() -> &'static str {
    "OK"
}

/// ## Summary
/// Constructs the main API router: one resource router per entity plus
/// the admin surface.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(welcome)
        .push(Router::with_path("healthcheck").get(healthcheck))
        .push(resources::users::routes())
        .push(resources::companies::routes())
        .push(resources::contacts::routes())
        .push(resources::campaigns::routes())
        .push(resources::emails::routes())
        .push(admin::routes())
}
