mod telemetry;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jellyfin_notifier::{HttpClient, Indexer, JellyfinConfig, JellyfinNotifier, Show};
use tracing::info;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(
    name = "jellyfin-notify",
    about = "Notify a Jellyfin server of library changes",
    long_about = "Notify a Jellyfin server of library changes.\n\n\
                  Settings are read from JELLYFIN_ENABLED, JELLYFIN_HOST, \
                  JELLYFIN_APIKEY and JELLYFIN_LOGO_URL."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a test notification to the Jellyfin admin dashboard.
    Test {
        /// Overrides JELLYFIN_HOST.
        #[arg(long)]
        host: Option<String>,
        /// Overrides JELLYFIN_APIKEY.
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Refresh the whole library, or a single series when --indexer-id is given.
    Update(UpdateArgs),
}

#[derive(Args)]
struct UpdateArgs {
    /// Series name, only used in log messages.
    #[arg(long, requires = "indexer_id")]
    series: Option<String>,
    /// Indexer the series id belongs to.
    #[arg(long, default_value = "tvdb")]
    indexer: Indexer,
    #[arg(long)]
    indexer_id: Option<u64>,
    /// TVDB id of the series when --indexer is not tvdb.
    #[arg(long, requires = "indexer_id")]
    tvdb_id: Option<u64>,
}

impl UpdateArgs {
    fn show(&self) -> Option<Show> {
        let id = self.indexer_id?;
        let name = self
            .series
            .clone()
            .unwrap_or_else(|| format!("{}:{id}", self.indexer));

        let mut show = Show::new(name, self.indexer, id);
        if let Some(tvdb_id) = self.tvdb_id {
            show = show.with_external(Indexer::Tvdb, tvdb_id);
        }
        Some(show)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    telemetry::init();

    let cli = Cli::parse();
    let config = JellyfinConfig::from_env();
    let session = HttpClient::new(Some(REQUEST_TIMEOUT)).context("building HTTP client")?;
    let notifier = JellyfinNotifier::new(session, config);

    let ok = match cli.command {
        Commands::Test { host, api_key } => {
            notifier
                .test_notify(host.as_deref(), api_key.as_deref())
                .await
        }
        Commands::Update(args) => {
            let show = args.show();
            if !notifier.config().enabled {
                info!("Jellyfin library updates are disabled (JELLYFIN_ENABLED)");
            }
            notifier.update_library(show.as_ref()).await
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
