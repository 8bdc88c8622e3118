use anyhow::Context;
use clap::Parser;
use dinewise_api::RestApi;
use dinewise_engine::{EngineConfig, Recommender};
use dinewise_storage::{load_restaurants, load_visits};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Content-based restaurant recommendation server
#[derive(Parser, Debug)]
#[command(name = "dinewise")]
#[command(about = "Content-based restaurant recommendations", long_about = None)]
struct Args {
    /// Restaurant catalog (.csv or .json)
    #[arg(short, long, default_value = "./data/restaurants.csv")]
    restaurants: PathBuf,

    /// User visits with ratings (.csv or .json)
    #[arg(short, long, default_value = "./data/ratings.csv")]
    visits: PathBuf,

    /// Engine configuration (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8088)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting DineWise v{}", env!("CARGO_PKG_VERSION"));
    info!("Restaurants: {:?}", args.restaurants);
    info!("Visits: {:?}", args.visits);
    info!("HTTP API port: {}", args.http_port);

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading engine config {:?}", path))?,
        None => EngineConfig::default(),
    };

    let restaurants = load_restaurants(&args.restaurants)
        .with_context(|| format!("loading restaurants from {:?}", args.restaurants))?;
    let visits = load_visits(&args.visits)
        .with_context(|| format!("loading visits from {:?}", args.visits))?;

    let recommender = Arc::new(
        Recommender::build(restaurants, visits, config).context("building recommendation model")?,
    );
    let stats = recommender.stats();
    info!(
        "Model ready: {} restaurants, {} users, {} clusters, {} features",
        stats.restaurants, stats.users, stats.clusters, stats.feature_dim
    );

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(recommender, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("DineWise started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
