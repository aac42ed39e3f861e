mod analysis;
mod auth;
mod config;
mod routes;
mod storage;
mod validation;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use analysis::analysis_service::AnalysisService;
use auth::middleware::ApiKeyMiddleware;
use config::Config;
use routes::configure_routes;
use storage::fs_service::FsStorageService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let config = Config::from_env();
    if config.api_key == config::DEFAULT_API_KEY {
        log::warn!("API_KEY is not set. Using the development default; override it in any real deployment.");
    }

    std::fs::create_dir_all(&config.upload_dir)?;
    log::info!("Storing uploads in {}", config.upload_dir);

    let storage_service = FsStorageService::new(&config.upload_dir);
    let analysis_service = AnalysisService::new();
    let api_key_middleware = ApiKeyMiddleware::new(config.api_key.clone());

    let bind_address = format!("0.0.0.0:{}", config.port);
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
                    .allowed_header("x-api-key")
                    .max_age(3600),
            )
            .wrap(api_key_middleware.clone())
            .app_data(web::Data::new(storage_service.clone()))
            .app_data(web::Data::new(analysis_service.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
