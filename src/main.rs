use city_explorer::config::Config;
use city_explorer::db;
use city_explorer::engine::Engine;
use city_explorer::error::Error;
use city_explorer::server::serve;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::debug!(database = %config.database_url, "using database");

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    let engine = Engine::new(pool).await?;

    serve(engine, config).await
}
