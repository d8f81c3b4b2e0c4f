// src/services/admin_bootstrap.rs
//! Admin bootstrap workflow.
//!
//! Enrolls the well-known admin principal directly with the CA using its
//! pre-shared secret and stores the resulting credential:
//!
//! ```text
//! Idle ──admin in wallet──▶ Done (no-op)
//!   │
//!   ▼
//! Enrolling ──ok──▶ Done
//!   └──error──▶ Failed
//! ```

use crate::models::credential::Credential;
use crate::models::enrollment::EnrollmentRequest;
use crate::services::ca_client::CertificateAuthority;
use crate::services::{Outcome, WorkflowError};
use crate::settings::Settings;
use crate::wallet::{Wallet, WalletStore};
use log::{debug, info};

pub struct AdminBootstrap<C, S> {
    ca: C,
    wallet: Wallet<S>,
    admin_id: String,
    admin_secret: String,
    msp_id: String,
}

impl<C: CertificateAuthority, S: WalletStore> AdminBootstrap<C, S> {
    pub fn new(settings: &Settings, ca: C, wallet: Wallet<S>) -> Self {
        AdminBootstrap {
            ca,
            wallet,
            admin_id: settings.admin.id.clone(),
            admin_secret: settings.admin.secret.clone(),
            msp_id: settings.msp_id.clone(),
        }
    }

    /// Runs the workflow once. No retries.
    pub async fn run(&self) -> Result<Outcome, WorkflowError> {
        let label = self.admin_id.as_str();

        if self.wallet.exists(label).map_err(WorkflowError::storage(label))? {
            info!(
                "An identity for the admin user \"{}\" already exists in the wallet",
                label
            );
            return Ok(Outcome::AlreadyPresent);
        }

        debug!("enrolling admin user \"{}\"", label);
        let enrollment = self
            .ca
            .enroll(&EnrollmentRequest::new(label, self.admin_secret.as_str()))
            .await
            .map_err(WorkflowError::ca(label))?;

        let credential = Credential::x509(
            label,
            enrollment.certificate,
            enrollment.private_key,
            self.msp_id.as_str(),
        );
        self.wallet
            .put(label, &credential)
            .map_err(WorkflowError::storage(label))?;

        info!(
            "Successfully enrolled admin user \"{}\" and imported it into the wallet",
            label
        );
        Ok(Outcome::Enrolled)
    }
}
