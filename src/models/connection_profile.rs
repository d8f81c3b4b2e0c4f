// src/models/connection_profile.rs
//! Network connection profile (topology descriptor).
//!
//! Only the certificate authority section is read:
//! `certificateAuthorities[<ca-id>].url`, `.caName` and `.tlsCACerts`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a connection profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read connection profile {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse connection profile {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("certificate authority \"{0}\" is not defined in the connection profile")]
    UnknownCa(String),
}

/// Either a single PEM string or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PemList {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TlsCaCerts {
    #[serde(default)]
    pem: Option<PemList>,
    /// PEM file, relative to the profile's directory.
    #[serde(default)]
    path: Option<PathBuf>,
}

/// A single CA entry of the profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaInfo {
    pub url: String,
    #[serde(default)]
    pub ca_name: Option<String>,
    #[serde(default, rename = "tlsCACerts")]
    tls_ca_certs: Option<TlsCaCerts>,
}

/// Everything needed to open a connection to one CA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustAnchorBundle {
    pub url: String,
    pub ca_name: Option<String>,
    /// PEM-encoded root/intermediate certificates for the CA's TLS endpoint
    pub tls_ca_certs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionProfile {
    #[serde(default)]
    certificate_authorities: HashMap<String, CaInfo>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl ConnectionProfile {
    /// Reads and parses a JSON connection profile from disk.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let contents = fs::read(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut profile: ConnectionProfile =
            serde_json::from_slice(&contents).map_err(|source| ProfileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        profile.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(profile)
    }

    /// Looks up a CA entry by its profile key (e.g. `ca.org1.example.com`).
    pub fn certificate_authority(&self, ca_id: &str) -> Result<&CaInfo, ProfileError> {
        self.certificate_authorities
            .get(ca_id)
            .ok_or_else(|| ProfileError::UnknownCa(ca_id.to_string()))
    }

    /// Collects the URL, CA name and TLS trust anchors for `ca_id`.
    ///
    /// Inline `pem` entries come first, followed by the contents of `path`
    /// when one is given.
    pub fn trust_anchor_bundle(&self, ca_id: &str) -> Result<TrustAnchorBundle, ProfileError> {
        let info = self.certificate_authority(ca_id)?;
        let mut tls_ca_certs = Vec::new();

        if let Some(tls) = &info.tls_ca_certs {
            match &tls.pem {
                Some(PemList::One(pem)) => tls_ca_certs.push(pem.clone()),
                Some(PemList::Many(pems)) => tls_ca_certs.extend(pems.iter().cloned()),
                None => {}
            }
            if let Some(pem_path) = &tls.path {
                let resolved = self.base_dir.join(pem_path);
                let pem = fs::read_to_string(&resolved).map_err(|source| ProfileError::Read {
                    path: resolved.clone(),
                    source,
                })?;
                tls_ca_certs.push(pem);
            }
        }

        Ok(TrustAnchorBundle {
            url: info.url.clone(),
            ca_name: info.ca_name.clone(),
            tls_ca_certs,
        })
    }
}
