use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postino_core::{
    build_mailers, load_config, validate_config, BatchConfig, BatchRunner, Channel,
    MailerRotation, MessageComposer, NoneNotifier, Notifier, RecipientStore, SanitizedConfig,
    SqliteRecipientStore, TelegramNotifier,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "postino")]
#[command(version, about = "Batch email outreach with rotating SMTP providers")]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env = "POSTINO_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Override the recipient table from the configuration
    #[arg(short, long)]
    table: Option<String>,

    /// Only contact recipients in this municipality
    #[arg(short, long)]
    municipality: Option<String>,

    /// Only contact recipients in this region
    #[arg(short, long)]
    region: Option<String>,

    /// Override the initial wait, in seconds
    #[arg(long)]
    initial_wait_secs: Option<f64>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("postino v{}", VERSION);
    info!("Loading configuration from {:?}", args.config);
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    let mut batch_config = BatchConfig::from(&config.campaign);
    if let Some(table) = args.table {
        batch_config.table = table;
    }
    if let Some(municipality) = args.municipality {
        batch_config.municipality = Some(municipality);
    }
    if let Some(region) = args.region {
        batch_config.region = Some(region);
    }
    if let Some(initial_wait_secs) = args.initial_wait_secs {
        batch_config.initial_wait_secs = initial_wait_secs;
    }

    // Create the recipient store
    let sqlite_store = SqliteRecipientStore::new(&config.database.path)
        .context("Failed to open recipient database")?;
    sqlite_store
        .ensure_table(&batch_config.table)
        .context("Failed to prepare recipient table")?;
    let store: Arc<dyn RecipientStore> = Arc::new(sqlite_store);
    info!("Recipient store initialized: {:?}", config.database.path);

    // Create the mail transports, in configuration order
    let mailers = build_mailers(&config.smtp).context("Failed to create mail transports")?;
    info!(
        "Providers: {}",
        mailers
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let rotation = MailerRotation::new(mailers).context("Failed to create provider rotation")?;

    // Create the operator notifier
    let notifier: Arc<dyn Notifier> = match &config.telegram {
        Some(telegram) => {
            info!("Telegram notifications enabled");
            Arc::new(TelegramNotifier::new(telegram.clone()))
        }
        None => {
            info!("Telegram notifications disabled");
            Arc::new(NoneNotifier)
        }
    };

    let composer = MessageComposer::new(&config.campaign.subject, &config.campaign.body);
    let runner = BatchRunner::new(
        batch_config,
        store,
        rotation,
        composer,
        Arc::clone(&notifier),
    );

    let completed = runner.run().await;

    // Final operator notification, regardless of per-recipient outcomes
    if completed {
        notifier
            .notify("All done, the batch run finished", Channel::Warning)
            .await;
        Ok(())
    } else {
        notifier
            .notify("The batch run did not complete, check the logs", Channel::Warning)
            .await;
        anyhow::bail!("batch run did not complete")
    }
}
