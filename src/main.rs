use axum::Router;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumina_weather::{
    cache::{CacheStore, MemoryCacheStore, RedisCacheStore},
    config::Config,
    dashboard::{self, GatewayClient, WeatherView},
    forecast::visualcrossing::VisualCrossingClient,
    routes::{cors_layer, create_router, AppState},
};

/// Lumina Weather
#[derive(Parser)]
#[command(name = "lumina-weather")]
#[command(version, about = "Weather gateway and terminal dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the weather gateway (default)
    Serve,

    /// Fetch a location through the gateway and print the dashboard
    Show {
        /// Free-text location, e.g. "São Paulo"
        location: String,

        /// Gateway URL
        #[arg(short, long, env = "LUMINA_GATEWAY_URL", default_value = "http://localhost:3000")]
        url: String,

        /// Forecast day to display, 0 is today
        #[arg(short, long, default_value_t = 0)]
        day: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumina_weather=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Show { location, url, day } => show(&location, &url, day).await,
    }
}

async fn connect_cache(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
    match config.redis_url() {
        Some(url) => {
            tracing::info!(
                "Using Redis cache at {}:{}",
                config.redis_host.as_deref().unwrap_or_default(),
                config.redis_port
            );
            Ok(Arc::new(RedisCacheStore::connect(&url).await?))
        }
        None => {
            tracing::warn!("REDIS_HOST not set, using in-memory cache");
            Ok(Arc::new(MemoryCacheStore::new(config.cache_max_entries)))
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    let cache = connect_cache(&config).await?;
    let weather_client = Arc::new(VisualCrossingClient::new(config.clone())?);
    let cors = cors_layer(&config.cors_origin)?;
    let bind_addr = config.bind_addr();

    let state = AppState {
        config: Arc::new(config),
        cache,
        weather_client,
    };

    let app: Router = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server starting on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn show(location: &str, url: &str, day: usize) -> anyhow::Result<()> {
    let client = GatewayClient::new(url)?;
    let mut view = WeatherView::new(location);

    view.search(&client, location).await;
    if day > 0 && !view.select_day(day) {
        tracing::warn!("Forecast day {} is not available, showing today", day);
    }

    print!("{}", dashboard::render(&view, chrono::Local::now().date_naive()));

    if view.error.is_some() {
        anyhow::bail!("could not load weather for {}", location);
    }
    Ok(())
}
