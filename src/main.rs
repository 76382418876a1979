use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write;
use std::sync::Arc;

use memoryschool_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::{SupabaseClient, WhatsAppService},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Load configuration
    let config = Config::from_toml().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e.to_string())
    })?;

    // Database connection and schema
    let pool = create_pool(&config.database).await.map_err(|e| {
        log::error!("Failed to connect to the database: {e}");
        std::io::Error::other(e.to_string())
    })?;

    run_migrations(&pool).await.map_err(|e| {
        log::error!("Failed to run database migrations: {e}");
        std::io::Error::other(e.to_string())
    })?;

    // JWT service
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expires_in);

    // External clients
    let supabase = Arc::new(SupabaseClient::new(config.supabase.clone()));
    let whatsapp = Arc::new(WhatsAppService::new(config.whatsapp.clone()));

    // Services
    let contract_service = ContractService::new(pool.clone(), config.app.clone());
    let auth_service = AuthService::new(
        pool.clone(),
        jwt_service.clone(),
        whatsapp,
        config.app.clone(),
    );
    let event_service = EventService::new(pool.clone());
    let photo_service = PhotoService::new(pool.clone(), supabase.clone());
    let sync_service = SyncService::new(pool.clone(), supabase);

    // Start the HTTP server
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(handlers::json_config())
            .app_data(web::Data::new(contract_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(event_service.clone()))
            .app_data(web::Data::new(photo_service.clone()))
            .app_data(web::Data::new(sync_service.clone()))
            .configure(swagger_config)
            .configure(handlers::contract_config)
            .configure(handlers::auth_config)
            .configure(handlers::event_config)
            .configure(handlers::photo_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
