pub mod presentation_handlers;

use actix_web::web;

/// Configure the presentation API routes. Shared by `main` and the
/// integration tests so both mount the identical route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/presentations")
            // Literal route BEFORE /{id} to avoid routing conflict
            .route(
                "/generate-outline",
                web::post().to(presentation_handlers::generate_outline),
            )
            .route(
                "/{id}/slides/{index}/reprompt",
                web::post().to(presentation_handlers::reprompt_slide),
            )
            .route("/{id}/images", web::post().to(presentation_handlers::upload_image))
            .route("/{id}/export", web::post().to(presentation_handlers::export))
            .route("/{id}", web::patch().to(presentation_handlers::update))
            .route("/{id}", web::get().to(presentation_handlers::get)),
    );
}
