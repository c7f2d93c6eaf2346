//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use petpal_core::{ErrorResponse, Post, PostOrigin};
use utoipa::OpenApi;

/// OpenAPI documentation for the PetPal API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PetPal API",
        version = "1.0.0",
        description = "Pet community forum backend",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::forum_controller::get_reddit_posts,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness,
    ),
    components(
        schemas(Post, PostOrigin, ErrorResponse, HealthResponse)
    ),
    tags(
        (name = "forum", description = "Forum posts aggregated from Reddit"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
