// src/settings.rs
//! Runtime configuration.
//!
//! Values are layered, later sources overriding earlier ones:
//! 1. Built-in defaults (the Fabric test-network conventions)
//! 2. `fabcar.toml` in the working directory, or the file given with `--config`
//! 3. `FABCAR_*` environment variables, nested keys separated by `__`
//!    (e.g. `FABCAR_ADMIN__SECRET`, `FABCAR_USER__PIN_TRUST_ANCHORS=false`)

use crate::models::enrollment::Attribute;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_NAME: &str = "fabcar";
const ENV_PREFIX: &str = "FABCAR";

/// Bootstrap identity enrolled directly with the CA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSettings {
    pub id: String,
    pub secret: String,
}

/// Identity registered by the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub id: String,
    pub affiliation: String,
    pub role: String,
    #[serde(default)]
    pub max_enrollments: Option<i32>,
    #[serde(default)]
    pub attrs: Vec<Attribute>,
    /// Pin the CA's TLS trust anchors for registration as well as for admin
    /// enrollment. Turning this off is a reduced-security mode.
    pub pin_trust_anchors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding one identity document per label
    pub wallet_path: PathBuf,
    /// JSON connection profile describing the CA
    pub topology_path: PathBuf,
    /// Key of the CA entry under `certificateAuthorities`
    pub ca_id: String,
    /// MSP stamped into every stored credential
    pub msp_id: String,
    pub admin: AdminSettings,
    pub user: UserSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wallet_path: PathBuf::from("wallet"),
            topology_path: PathBuf::from(
                "../../test-network/organizations/peerOrganizations/org1.example.com/connection-org1.json",
            ),
            ca_id: "ca.org1.example.com".to_string(),
            msp_id: "Org1MSP".to_string(),
            admin: AdminSettings {
                id: "admin".to_string(),
                secret: "adminpw".to_string(),
            },
            user: UserSettings {
                id: "appUser".to_string(),
                affiliation: "org1.department1".to_string(),
                role: "client".to_string(),
                max_enrollments: None,
                attrs: Vec::new(),
                pin_trust_anchors: true,
            },
        }
    }
}

impl Settings {
    /// Loads settings from defaults, an optional file and the environment.
    ///
    /// # Arguments
    /// * `path` - Explicit config file; it must exist. When `None`,
    ///   `fabcar.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
