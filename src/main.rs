// src/main.rs

//! # Fabcar Wallet - Main Entry Point
//!
//! Bootstraps identities for a Fabric network into a local wallet.
//!
//! ## Commands
//! - `enroll-admin`: enroll the bootstrap admin with the CA and store its credential
//! - `register-user`: register and enroll the application user on the admin's authority
//! - `list`: print the labels stored in the wallet
//! - `remove <label>`: delete one identity from the wallet
//!
//! ## Exit Status
//! `0` on success, including the "identity already present" no-op; `1` on any failure.
//!
//! ## Configuration
//! See [`settings`] for the layered config file / `FABCAR_*` environment variables.
//! A `.env` file in the working directory is loaded first.

use crate::models::connection_profile::ConnectionProfile;
use crate::services::admin_bootstrap::AdminBootstrap;
use crate::services::ca_client::{CaClient, CaTrust};
use crate::services::user_registration::UserRegistration;
use crate::services::Outcome;
use crate::settings::Settings;
use crate::wallet::{FileSystemWalletStore, Wallet};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

// Module declarations (organized by functional domain)
mod models; // Data structures
mod services; // CA client and workflows
mod settings; // Layered configuration
mod utils; // Helper functions
mod wallet; // Identity storage and signing identities

#[derive(Parser)]
#[command(name = "fabcar-wallet")]
#[command(about = "Enroll and register Fabric identities into a local wallet")]
struct Cli {
    /// Configuration file (defaults to ./fabcar.toml when present)
    #[arg(short, long, env = "FABCAR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enroll the admin identity with the CA
    EnrollAdmin,
    /// Register and enroll the application user using the admin identity
    RegisterUser,
    /// List identities stored in the wallet
    List,
    /// Remove an identity from the wallet
    Remove { label: String },
}

fn ca_client(settings: &Settings, pin_trust_anchors: bool) -> Result<CaClient> {
    let profile = ConnectionProfile::load(&settings.topology_path)?;
    let bundle = profile.trust_anchor_bundle(&settings.ca_id)?;

    let trust = if pin_trust_anchors {
        CaTrust::Pinned(bundle.tls_ca_certs)
    } else {
        warn!("trust anchor pinning is disabled for this run (user.pin_trust_anchors = false)");
        CaTrust::SystemDefault
    };
    CaClient::new(&bundle.url, trust, bundle.ca_name)
        .with_context(|| format!("Failed to create CA client for {}", bundle.url))
}

fn open_wallet(settings: &Settings) -> Result<Wallet<FileSystemWalletStore>> {
    let store = FileSystemWalletStore::open(&settings.wallet_path)?;
    info!("Wallet path: {}", store.directory().display());
    Ok(Wallet::new(store))
}

/// Enrolls the admin unless the wallet already holds it.
///
/// The CA client (connection profile, trust anchors) is only built when an
/// enrollment is actually needed.
async fn enroll_admin(settings: &Settings) -> Result<Outcome> {
    let wallet = open_wallet(settings)?;
    if wallet.exists(&settings.admin.id)? {
        info!(
            "An identity for the admin user \"{}\" already exists in the wallet",
            settings.admin.id
        );
        return Ok(Outcome::AlreadyPresent);
    }
    let ca = ca_client(settings, true)?;
    Ok(AdminBootstrap::new(settings, ca, wallet).run().await?)
}

/// Registers the application user unless the wallet already holds it.
async fn register_user(settings: &Settings) -> Result<Outcome> {
    let wallet = open_wallet(settings)?;
    if wallet.exists(&settings.user.id)? {
        info!(
            "An identity for the user \"{}\" already exists in the wallet",
            settings.user.id
        );
        return Ok(Outcome::AlreadyPresent);
    }
    let ca = ca_client(settings, settings.user.pin_trust_anchors)?;
    Ok(UserRegistration::new(settings, ca, wallet).run().await?)
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::EnrollAdmin => {
            enroll_admin(&settings)
                .await
                .with_context(|| format!("Failed to enroll admin user \"{}\"", settings.admin.id))?;
        }
        Commands::RegisterUser => {
            register_user(&settings)
                .await
                .with_context(|| format!("Failed to register user \"{}\"", settings.user.id))?;
        }
        Commands::List => {
            let wallet = open_wallet(&settings)?;
            for label in wallet.list()? {
                println!("{}", label);
            }
        }
        Commands::Remove { label } => {
            let wallet = open_wallet(&settings)?;
            if wallet.remove(&label)? {
                info!("Removed identity \"{}\" from the wallet", label);
            } else {
                warn!("No identity \"{}\" in the wallet", label);
            }
        }
    }
    Ok(())
}

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load `.env` and initialize logging (`RUST_LOG`, default `info`)
/// 2. Parse the command line
/// 3. Run the selected command and map its result to an exit status
#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
