use std::{error::Error, process, sync::Arc};

use async_trait::async_trait;
use clap::{command, Parser, ValueHint};
use log::{debug, error, info, LevelFilter};

use deezer_resolver::{
    config::Config,
    plugin::{Deezer, Plugin, Registry},
    resolver::{Query, Resolver},
    result::LoadResult,
};

/// Profile to display when not built in release mode.
#[cfg(debug_assertions)]
const BUILD_PROFILE: &str = "debug";
/// Profile to display when not built release mode.
#[cfg(not(debug_assertions))]
const BUILD_PROFILE: &str = "release";

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deezer link, share link, `dzisrc:` code or search text
    #[arg(value_hint = ValueHint::Url)]
    query: String,

    /// Platform to look the query up on
    ///
    /// Use `deezer` to search Deezer for free text.
    #[arg(short, long)]
    source: Option<String>,

    /// Platform that unrecognized queries are handed to
    #[arg(long, default_value_t = String::from("ytsearch"))]
    default_platform: String,

    /// Identity attached to the resolved tracks
    #[arg(short, long)]
    requester: Option<String>,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
///
/// # Panics
///
/// Panics when a logger facade is already initialized.
fn init_logger(config: &Args) {
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if config.quiet || config.verbose > 0 {
        let level = match config.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates.
        logger.filter_module(module_path!(), level);
    }

    logger.init();
}

/// Stands in for the default resolver of a real host, which would look the
/// query up on its default platform.
struct Unresolved;

#[async_trait]
impl Resolver for Unresolved {
    async fn resolve(&self, query: Query) -> deezer_resolver::error::Result<LoadResult> {
        let source = query.source.as_deref().unwrap_or("none");
        info!("not a deezer query; would look up \"{}\" on {source}", query.text);
        Ok(LoadResult::no_matches(format!("no resolver for source {source}")))
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut registry =
        Registry::new(Some(args.default_platform)).with_resolver(Arc::new(Unresolved));
    Deezer::new(Config::default())?.load(&mut registry);

    let mut query = Query::new(args.query);
    query.source = args.source;
    query.requester = args.requester.as_deref().map(Into::into);

    let result = registry.resolve(query).await?;
    info!(
        "{}: {} track(s)",
        result.load_type,
        result.tracks.len()
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

#[tokio::main]
async fn main() {
    // `clap` handles our command line arguments and help text.
    let args = Args::parse();
    init_logger(&args);

    // Dump command line arguments before we do anything more.
    // This aids in debugging of whatever comes next.
    debug!("Command {:#?}", args);

    let cmd = command!();
    let name = cmd.get_name().to_string();
    let version = cmd.get_version().unwrap_or("UNKNOWN").to_string();

    info!("starting {name}/{version}; {BUILD_PROFILE}");

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}
