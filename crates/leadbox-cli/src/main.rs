//! Leadbox server binary.
//!
//! Credentials and addresses come from flags or their environment
//! fallbacks; everything downstream of here receives them as plain
//! values. The handler never reads the environment itself.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadbox_api::{AppState, Server, router};
use leadbox_core::{CrmClient, Mailer, SubmissionHandler, SubmissionStore, SubmitConfig};
use leadbox_crm::HubSpotClient;
use leadbox_mail::SendGridMailer;
use leadbox_store::Store;

/// Leadbox — embedded contact-form lead capture with CRM fallback
#[derive(Parser, Debug)]
#[command(name = "leadbox")]
#[command(about = "Serve the Leadbox contact-form endpoint", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "LEADBOX_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://leadbox.db")]
    database_url: String,

    /// HubSpot private-app token; omit to disable the CRM path
    #[arg(long, env = "HUBSPOT_ACCESS_TOKEN")]
    hubspot_token: Option<String>,

    /// SendGrid API key for fallback notifications
    #[arg(long, env = "SENDGRID_API_KEY")]
    sendgrid_key: String,
}

impl Args {
    fn submit_config(&self) -> SubmitConfig {
        SubmitConfig {
            crm_api_key: self.hubspot_token.clone(),
            mail_api_key: Some(self.sendgrid_key.clone()),
        }
    }
}

/// Wires the fallback chain from configuration.
fn build_handler(config: &SubmitConfig, store: Arc<dyn SubmissionStore>) -> SubmissionHandler {
    let crm: Option<Arc<dyn CrmClient>> = match &config.crm_api_key {
        Some(token) => Some(Arc::new(HubSpotClient::new(token.clone()))),
        None => {
            tracing::info!("no CRM credential configured; submissions go straight to the fallback");
            None
        }
    };
    let mailer: Arc<dyn Mailer> = Arc::new(SendGridMailer::new(
        config.mail_api_key.clone().unwrap_or_default(),
    ));
    SubmissionHandler::new(crm, store, mailer)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let store = Store::connect(&args.database_url)
        .await
        .with_context(|| format!("opening database {}", args.database_url))?;

    let handler = Arc::new(build_handler(&args.submit_config(), Arc::new(store)));
    let app = router(AppState { handler });

    Server::new(args.bind, app).run().await?;
    Ok(())
}
