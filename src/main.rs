use std::path::{Path, PathBuf};
use std::time::Duration;

use data::config::theme::Theme;
use data::{ChartKind, Config};
use feed::refresh::RefreshHandle;
use feed::synthetic::SyntheticFeed;
use feed::{Candle, Quote, Timeframe, remote};

use tickerscape::chart::Chart;
use tickerscape::logger;
use tickerscape::surface::{Surface, svg::SvgSurface};

const CHART_WIDTH: f32 = 960.0;
const CHART_HEIGHT: f32 = 540.0;

const USAGE: &str = "\
usage: tickerscape [SYMBOL] [options]

options:
  -t, --timeframe <TF>   5m 15m 30m 1h 4h 1W 1M 3M 6M 1Y 2Y 5Y
      --line             polyline chart
      --area             filled area chart (default)
      --candles          candlestick chart
      --expert           overlay volume bars
      --remote           fetch real data instead of the synthetic feed
      --seed <N>         fix the synthetic feed's RNG seed
      --once             render once, skip the refresh loop
  -o, --out <PATH>       output SVG path (default: <symbol>.svg)
  -v, --verbose          debug logging
  -h, --help             this text";

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Feed error: {0}")]
    Feed(#[from] feed::FeedError),
    #[error("Logger error: {0}")]
    Logger(#[from] fern::InitError),
}

struct Options {
    config: Config,
    remote: bool,
    once: bool,
    out: Option<PathBuf>,
    verbose: bool,
}

fn parse_args(config: Config) -> Result<Options, String> {
    let mut options = Options {
        config,
        remote: false,
        once: false,
        out: None,
        verbose: false,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-t" | "--timeframe" => {
                let raw = args.next().ok_or("--timeframe needs a value")?;
                options.config.timeframe =
                    raw.parse::<Timeframe>().map_err(|err| err.to_string())?;
            }
            "--line" => options.config.chart_kind = ChartKind::Line,
            "--area" => options.config.chart_kind = ChartKind::Area,
            "--candles" => options.config.chart_kind = ChartKind::Candlestick,
            "--expert" => options.config.expert_mode = true,
            "--remote" => options.remote = true,
            "--seed" => {
                let raw = args.next().ok_or("--seed needs a value")?;
                let seed = raw.parse().map_err(|_| format!("bad seed: {raw}"))?;
                options.config.seed = Some(seed);
            }
            "--once" => options.once = true,
            "-o" | "--out" => {
                options.out = Some(PathBuf::from(args.next().ok_or("--out needs a value")?));
            }
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other if !other.starts_with('-') => {
                options.config.symbol = other.to_uppercase();
            }
            other => return Err(format!("unknown option: {other}\n\n{USAGE}")),
        }
    }

    Ok(options)
}

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

fn report_quote(quote: &Quote) {
    log::info!(
        "{} ({}) {:.2} {:+.2}% [{}]",
        quote.symbol,
        quote.name,
        quote.price,
        quote.change_pct,
        quote.trend,
    );
}

fn render_to_file(
    candles: &[Candle],
    config: &Config,
    theme: &Theme,
    path: &Path,
) -> std::io::Result<()> {
    let chart = Chart::new(candles, theme)
        .with_kind(config.chart_kind)
        .with_expert_mode(config.expert_mode);

    match chart.stats() {
        Some(stats) => log::info!(
            "{} {}: {} points, range {:.2}..{:.2}, return {:+.2}%, volatility {:.2}%",
            config.symbol,
            config.timeframe,
            candles.len(),
            stats.min_price,
            stats.max_price,
            stats.total_return_pct,
            stats.volatility_pct,
        ),
        None => log::warn!("{}: no data, drawing empty chart", config.symbol),
    }

    let frame = chart.render(CHART_WIDTH, CHART_HEIGHT);
    std::fs::write(path, SvgSurface::new().present(&frame))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

async fn wait_for_refresh(handle: RefreshHandle) -> std::io::Result<()> {
    log::info!(
        "refreshing every {}s; ctrl-c to stop",
        handle.interval().as_secs()
    );
    tokio::signal::ctrl_c().await?;
    handle.stop();
    Ok(())
}

async fn run() -> Result<(), AppError> {
    let options = match parse_args(Config::load_or_default()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            return Ok(());
        }
    };
    logger::setup(options.verbose)?;

    let config = options.config.clone();
    let theme = config.theme.palette();
    let out_path = options
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.svg", config.symbol.to_lowercase())));

    if options.remote {
        let (quote, candles) = remote::fetch_history(&config.symbol, config.timeframe).await?;
        report_quote(&quote);
        render_to_file(&candles, &config, &theme, &out_path)?;

        if let (Some(secs), false) = (config.refresh_secs, options.once) {
            let tick_config = config.clone();
            let tick_path = out_path.clone();
            let handle = RefreshHandle::spawn(Duration::from_secs(secs), move || {
                let config = tick_config.clone();
                let path = tick_path.clone();
                async move {
                    let theme = config.theme.palette();
                    match remote::fetch_history(&config.symbol, config.timeframe).await {
                        Ok((quote, candles)) => {
                            report_quote(&quote);
                            if let Err(err) = render_to_file(&candles, &config, &theme, &path) {
                                log::error!("refresh render failed: {err}");
                            }
                        }
                        Err(err) => log::warn!("refresh fetch failed: {err}"),
                    }
                }
            });
            wait_for_refresh(handle).await?;
        }
    } else {
        let mut feed = match config.seed {
            Some(seed) => SyntheticFeed::from_seed(seed),
            None => SyntheticFeed::from_os_entropy(),
        }
        .with_latency(Duration::from_millis(400));

        let quote = feed.fetch_quote(&config.symbol).await;
        report_quote(&quote);
        let candles = feed.history(&config.symbol, config.timeframe, now_ms());
        render_to_file(&candles, &config, &theme, &out_path)?;

        if let (Some(secs), false) = (config.refresh_secs, options.once) {
            let tick_config = config.clone();
            let tick_path = out_path.clone();
            let handle = RefreshHandle::spawn(Duration::from_secs(secs), move || {
                let theme = tick_config.theme.palette();
                let candles =
                    feed.history(&tick_config.symbol, tick_config.timeframe, now_ms());
                if let Err(err) = render_to_file(&candles, &tick_config, &theme, &tick_path) {
                    log::error!("refresh render failed: {err}");
                }
                std::future::ready(())
            });
            wait_for_refresh(handle).await?;
        }
    }

    if let Err(err) = options.config.save() {
        log::warn!("could not save config: {err}");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("tickerscape: {err}");
        std::process::exit(1);
    }
}
