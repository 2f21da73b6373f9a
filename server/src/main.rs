use anyhow::Result;
use axum::Router;
use cinematch_core::{BuildOptions, DEFAULT_K, DEFAULT_MAX_FEATURES};
use clap::Parser;
use server::{build_app, AppConfig, MAX_K};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// CSV dataset with Title, Overview and Poster_Url columns
    #[arg(long, env = "DATASET", default_value = "dataset.csv")]
    dataset: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
    /// Vocabulary cap for the TF-IDF vectorizer
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,
    /// Recommendations returned when the request does not say
    #[arg(long, default_value_t = DEFAULT_K)]
    k: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    anyhow::ensure!((1..=MAX_K).contains(&args.k), "--k must be between 1 and {MAX_K}");

    let mut config = AppConfig::new(args.dataset);
    config.build_options = BuildOptions { max_features: args.max_features, ..BuildOptions::default() };
    config.default_k = args.k;
    let app: Router = tokio::task::spawn_blocking(move || build_app(config)).await??;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
