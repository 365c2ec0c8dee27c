use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use foodcart_service::infrastructure::geocoder::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use foodcart_service::{build_server, create_pool, run_migrations, HttpGeocoder};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let geocoder_url = env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let geocoder_api_key = env::var("GEOCODER_API_KEY").expect("GEOCODER_API_KEY must be set");
    let geocoder_timeout: u64 = env::var("GEOCODER_TIMEOUT_SECS")
        .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
        .parse()
        .expect("GEOCODER_TIMEOUT_SECS must be a valid number");

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let geocoder = HttpGeocoder::new(
        geocoder_url,
        geocoder_api_key,
        Duration::from_secs(geocoder_timeout),
    );

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(pool, geocoder, &host, port)?.await
}
