use actix_web::{middleware, web, App, HttpServer};
use log::{error, info};
use std::io;

use random_opponent_chess::config::AppConfig;
use random_opponent_chess::models::AppState;
use random_opponent_chess::routes::configure_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(io::Error::new(io::ErrorKind::InvalidInput, e));
        }
    };

    info!("Starting chess server at http://{}", config.bind_addr);
    info!(
        "Opponent reply delay {:?}, scoring {:?}, static files from {}",
        config.reply_delay,
        config.scoring,
        config.static_dir.display()
    );

    let bind_addr = config.bind_addr.clone();
    let app_state = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        let static_dir = app_state.config.static_dir.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .configure(move |cfg| configure_routes(cfg, &static_dir))
    })
    .bind(bind_addr)?
    .run()
    .await
}
