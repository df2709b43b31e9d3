mod config;
mod db;
mod error;
mod services;
mod storage;
#[cfg(test)]
mod testutil;

use crate::config::Config;
use actix_files::Files;
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::load();
    config.ensure_dirs()?;

    // apply the schema once at startup so the first request never pays for it
    db::open(&config.db_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    info!("Server running at http://{}:{}", config.host, config.port);

    let bind_addr = (config.host.clone(), config.port);
    let data = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(
                web::JsonConfig::default()
                    .limit(10 * 1024 * 1024) // 10 MB
                    .error_handler(|err, _| {
                        let body = serde_json::json!({
                            "success": false,
                            "message": err.to_string(),
                        });
                        InternalError::from_response(err, HttpResponse::BadRequest().json(body))
                            .into()
                    }),
            )
            .app_data(data.clone())
            .service(services::members::configure_routes())
            .service(services::loans::configure_routes())
            .service(services::notices::configure_routes())
            .service(Files::new("/uploads", data.uploads_dir.clone()))
    })
    .bind(bind_addr)?
    .run()
    .await
}
