mod analyzer;
mod cli;
mod config;
mod fetcher;
mod input;
mod model;
mod normalizer;
mod parser;
mod report;
mod storage;
mod utils;

use analyzer::{AnalyzerImpl, TimeSeriesAnalyzer};
use chrono::{NaiveDate, Utc};
use clap::Parser as _;
use cli::Cli;
use config::{load_config, AppConfig};
use fetcher::{PriceSource, SeriesLoader, YahooSource};
use futures::future::join_all;
use input::CommandContext;
use model::{AnalysisError, FetchRequest};
use normalizer::normalize_symbols;
use parser::{Parser, YahooChartParser};
use report::chart::{build_chart, write_chart_json};
use report::render_report;
use std::path::Path;
use std::sync::Arc;
use storage::PriceCache;
use tokio::sync::{Mutex, Notify};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = Cli::parse().config;

    // Load configuration from file
    let mut config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    // The cache belongs to this loop; the loader and the command handler share it.
    let cache = Arc::new(Mutex::new(PriceCache::with_ttl_seconds(config.cache_ttl_seconds)));

    let source = match YahooSource::new(&config.source) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize data source: {}", e);
            return;
        }
    };
    let mut loader = SeriesLoader::new(source, YahooChartParser::new(), cache.clone());

    let refresh_notify = Arc::new(Notify::new());
    let shutdown_notify = Arc::new(Notify::new());
    input::spawn_listener(CommandContext {
        refresh_notify: refresh_notify.clone(),
        shutdown_notify: shutdown_notify.clone(),
        cache: cache.clone(),
    });

    // Main processing loop
    loop {
        info!("Entering main loop...");
        run_cycle(&config, &loader).await;

        info!(
            "Waiting for timer ({}s) or manual refresh...",
            config.check_interval_seconds
        );
        tokio::select! {
            _ = sleep(Duration::from_secs(config.check_interval_seconds)) => {
                info!("Timer triggered.");
            }
            _ = refresh_notify.notified() => {
                info!("Manual refresh triggered.");
            }
            _ = shutdown_notify.notified() => {
                info!("Shutting down.");
                break;
            }
        }

        // Inputs may have changed between cycles.
        match load_config(&config_path) {
            Ok(new_config) => {
                if new_config.source != config.source {
                    match YahooSource::new(&new_config.source) {
                        Ok(s) => {
                            info!("Data source settings changed, rebuilding client.");
                            loader = SeriesLoader::new(s, YahooChartParser::new(), cache.clone());
                        }
                        Err(e) => warn!("Keeping previous data source: {}", e),
                    }
                }
                let mut guard = cache.lock().await;
                guard.set_ttl_seconds(new_config.cache_ttl_seconds);
                let purged = guard.purge_expired(Utc::now());
                if purged > 0 {
                    info!("Purged {} expired series from cache", purged);
                }
                drop(guard);
                config = Arc::new(new_config);
            }
            Err(e) => warn!("Config reload failed, keeping previous settings: {}", e),
        }
        info!("Restarting main loop...");
    }
}

/// Runs one full pass over every configured symbol.
async fn run_cycle<S: PriceSource, P: Parser>(config: &AppConfig, loader: &SeriesLoader<S, P>) {
    let today = Utc::now().date_naive();
    let end = config.end_date_or(today);
    let symbols = normalize_symbols(&config.symbols);
    if symbols.is_empty() {
        warn!("No symbols configured.");
        return;
    }
    info!("Symbols to process: {}", symbols.len());

    let analyzer = AnalyzerImpl::new(config.investment_amount, today);

    // Symbols are independent; run them concurrently
    let tasks: Vec<_> = symbols
        .iter()
        .map(|symbol| process_symbol(symbol, config.start_date, end, config, loader, &analyzer))
        .collect();
    join_all(tasks).await;
}

/// Loads, analyzes and renders a single symbol. Failures stay local to the symbol.
async fn process_symbol<S: PriceSource, P: Parser>(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    config: &AppConfig,
    loader: &SeriesLoader<S, P>,
    analyzer: &AnalyzerImpl,
) {
    info!("Processing symbol: {}", symbol);
    let request = FetchRequest {
        symbol: symbol.to_string(),
        start,
        end,
    };

    let series = match loader.load(&request).await {
        Ok(series) => series,
        Err(e) => {
            warn!("{}: load failed: {}", symbol, e);
            return;
        }
    };

    let analysis = match analyzer.analyze(&series, &config.windows, config.ma_period, end) {
        Ok(a) => a,
        Err(AnalysisError::EmptySeries) => {
            error!(
                "No data retrieved for {}. Please check the symbol and date range.",
                symbol
            );
            return;
        }
        Err(e) => {
            warn!("{}: analysis failed: {}", symbol, e);
            return;
        }
    };

    println!("{}", render_report(&series, &analysis, config.table_rows));

    if let Some(dir) = &config.output_dir {
        let chart = build_chart(&series, &analysis);
        match write_chart_json(Path::new(dir), symbol, &chart) {
            Ok(path) => info!("Saved chart data: {}", path.display()),
            Err(e) => warn!("{}: failed to write chart data: {}", symbol, e),
        }
    }

    info!("Finished processing symbol: {}", symbol);
}
