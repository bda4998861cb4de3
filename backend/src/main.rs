mod analysis;
mod classifier;
mod config;
mod error;
mod imaging;
mod routes;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use classifier::{ClassifierHandle, EmotionClassifier, HuggingFaceClassifier};
use config::AppConfig;
use routes::configure_routes;
use std::env;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let config = AppConfig::load().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    // Built on the first analysis request, then reused for the process lifetime.
    let classifier_config = config.classifier.clone();
    let classifier = web::Data::new(ClassifierHandle::lazy(move || {
        HuggingFaceClassifier::new(&classifier_config)
            .map(|c| Arc::new(c) as Arc<dyn EmotionClassifier>)
    }));

    log::info!(
        "Classifier model {} at {}",
        config.classifier.model,
        config.classifier.endpoint
    );

    let frontend_dir = config.server.frontend_dir.clone();
    let bind_address = config.bind_address();
    let app_config = web::Data::new(config);

    log::info!("Serving frontend from {}", frontend_dir);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(classifier.clone())
            .app_data(app_config.clone())
            .configure(|cfg| configure_routes(cfg, frontend_dir.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
