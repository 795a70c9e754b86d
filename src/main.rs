use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};

use slideforge::generate::{HttpGenerator, OutlineGenerator};
use slideforge::handlers;
use slideforge::store::MemStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Process-lifetime state; a restart loses everything by design.
    let store = web::Data::new(MemStore::new());

    // Credentials are checked at generation time, not here, so the server
    // starts fine without a key and reports a configuration error per call.
    let generator: Arc<dyn OutlineGenerator> =
        Arc::new(HttpGenerator::new(Duration::from_secs(60)));
    let generator = web::Data::from(generator);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(generator.clone())
            .service(web::scope("/api").configure(handlers::configure))
    })
    .bind(bind_addr)?
    .run()
    .await
}
