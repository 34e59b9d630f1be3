#![forbid(unsafe_code)]

//! train-radar CLI
//!
//! The running trains with their delays, and the position of a single train.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use train_radar::{
    config::DEFAULT_REQUEST_TIMEOUT,
    detail::MAP_ZOOM,
    filter_trains, osm_url,
    train::TrainRow,
    types::parse_dms,
    Config, DetailView, FeedClient, Refresher, RemoteConverter, DEFAULT_MODE,
};

/// Live list of the running Czech trains
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Address of the train feed
    #[arg(long, env = "TRAIN_RADAR_FEED_URL", global = true)]
    feed_url: Option<String>,

    /// Address of the S-JTSK conversion form
    #[arg(long, env = "TRAIN_RADAR_CONVERTER_URL", global = true)]
    converter_url: Option<String>,

    /// Timeout of a single request, in seconds
    #[arg(
        long,
        env = "TRAIN_RADAR_TIMEOUT",
        global = true,
        default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the running trains
    List {
        /// Show only the trains whose stations, name or number contain the text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single train with its position
    Show {
        /// Train identifier as listed in the feed
        id: String,

        /// Keep refreshing until interrupted
        #[arg(short, long)]
        watch: bool,

        /// Seconds between the refreshes
        #[arg(
            long,
            env = "TRAIN_RADAR_INTERVAL",
            default_value_t = 30,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval: u64,
    },

    /// Convert an S-JTSK position into latitude and longitude
    Convert {
        /// The Y value
        #[arg(allow_negative_numbers = true)]
        easting: f64,

        /// The X value
        #[arg(allow_negative_numbers = true)]
        northing: f64,

        /// The `zbpv` value passed to the service
        #[arg(long, default_value_t = DEFAULT_MODE)]
        mode: u8,
    },

    /// Print the decimal value of a D°M'S"H angle
    Dms {
        /// e.g. 50°5'10.5"N
        value: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::default().with_request_timeout(Duration::from_secs(args.timeout));

    if let Some(url) = &args.feed_url {
        config = config.with_feed_url(url)?;
    }

    if let Some(url) = &args.converter_url {
        config = config.with_converter_url(url)?;
    }

    if let Command::Show { interval, .. } = &args.command {
        config = config.with_refresh_interval(Duration::from_secs(*interval));
    }

    Ok(config)
}

async fn list(config: &Config, search: Option<&str>) -> Result<()> {
    let feed = FeedClient::from_config(config)?;
    let trains = feed
        .fetch_trains()
        .await
        .context("Failed to load the train list, try again later")?;

    let found = filter_trains(&trains, search.unwrap_or_default());
    if found.is_empty() {
        println!("No trains found.");
        return Ok(());
    }

    for train in found {
        println!("{}", TrainRow(train));
    }

    Ok(())
}

async fn show(config: &Config, id: String, watch: bool) -> Result<()> {
    let feed = FeedClient::from_config(config)?;
    let converter = RemoteConverter::from_config(config)?;
    let mut view = DetailView::new(id);

    if !watch {
        let _ = view
            .refresh(&feed, &converter)
            .await
            .context("Failed to load the train detail, try again later")?;
        println!("{view}");
        return Ok(());
    }

    let feed = Arc::new(feed);
    let converter = Arc::new(converter);
    let view = Arc::new(Mutex::new(view));

    let refresher = Refresher::spawn(config.refresh_interval, move || {
        let feed = Arc::clone(&feed);
        let converter = Arc::clone(&converter);
        let view = Arc::clone(&view);
        async move {
            let mut view = view.lock().await;
            match view.refresh(feed.as_ref(), converter.as_ref()).await {
                Ok(_) => println!("{view}\n"),
                Err(err) => eprintln!("Failed to load the train detail: {err}"),
            }
        }
    });

    tokio::signal::ctrl_c()
        .await
        .context("Cannot listen for Ctrl-C")?;
    refresher.stop();

    Ok(())
}

async fn convert(config: &Config, easting: f64, northing: f64, mode: u8) -> Result<()> {
    let converter = RemoteConverter::from_config(config)?;
    let position = converter
        .convert_coordinates(easting, northing, mode)
        .await
        .context("Failed to convert the coordinates")?;

    println!("{position:#}");
    println!("{}", osm_url(position, MAP_ZOOM));
    Ok(())
}

fn dms(value: &str) -> Result<()> {
    let degrees =
        parse_dms(value).with_context(|| format!("{value:?} is not a D°M'S\"H angle"))?;
    println!("{}", degrees.value());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = build_config(&args)?;
    config.log();

    match args.command {
        Command::List { search } => list(&config, search.as_deref()).await,
        Command::Show { id, watch, .. } => show(&config, id, watch).await,
        Command::Convert {
            easting,
            northing,
            mode,
        } => convert(&config, easting, northing, mode).await,
        Command::Dms { value } => dms(&value),
    }
}
