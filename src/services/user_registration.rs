// src/services/user_registration.rs
//! User registration workflow.
//!
//! Uses the stored admin identity as registrar to register the application
//! user, enrolls it with the returned one-time secret and stores the result.
//!
//! ```text
//! Idle ──user in wallet──▶ Done (no-op)
//!   │
//!   ▼
//! Authorizing ──admin missing──▶ Failed (precondition)
//!   │
//!   ▼
//! Enrolling (register, then enroll) ──ok──▶ Done
//!   └──error──▶ Failed
//! ```
//!
//! The wallet check is not a lock: two concurrent runs can both find the user
//! absent. The CA rejects the second registration as a conflict, so at most
//! one of them stores a credential.

use crate::models::credential::Credential;
use crate::models::enrollment::{EnrollmentRequest, RegistrationRequest};
use crate::services::ca_client::CertificateAuthority;
use crate::services::{Outcome, WorkflowError};
use crate::settings::Settings;
use crate::wallet::{Wallet, WalletStore};
use log::{debug, info};

pub struct UserRegistration<C, S> {
    ca: C,
    wallet: Wallet<S>,
    admin_id: String,
    msp_id: String,
    request: RegistrationRequest,
}

impl<C: CertificateAuthority, S: WalletStore> UserRegistration<C, S> {
    pub fn new(settings: &Settings, ca: C, wallet: Wallet<S>) -> Self {
        let user = &settings.user;
        let mut request =
            RegistrationRequest::new(user.affiliation.as_str(), user.id.as_str(), user.role.as_str());
        request.max_enrollments = user.max_enrollments;
        request.attrs = user.attrs.clone();

        UserRegistration {
            ca,
            wallet,
            admin_id: settings.admin.id.clone(),
            msp_id: settings.msp_id.clone(),
            request,
        }
    }

    /// Runs the workflow once. Nothing is written unless every step succeeds.
    pub async fn run(&self) -> Result<Outcome, WorkflowError> {
        let label = self.request.enrollment_id.as_str();
        let admin_label = self.admin_id.as_str();

        if self.wallet.exists(label).map_err(WorkflowError::storage(label))? {
            info!(
                "An identity for the user \"{}\" already exists in the wallet",
                label
            );
            return Ok(Outcome::AlreadyPresent);
        }

        let admin = self
            .wallet
            .get(admin_label)
            .map_err(WorkflowError::storage(admin_label))?
            .ok_or_else(|| WorkflowError::Precondition {
                admin: admin_label.to_string(),
            })?;
        let registrar = self
            .wallet
            .resolve_provider(admin.kind)
            .user_context(&admin, admin_label)
            .map_err(WorkflowError::storage(admin_label))?;
        debug!(
            "registering \"{}\" as {} in {} with registrar \"{}\" ({})",
            label,
            self.request.role,
            self.request.affiliation,
            registrar.label(),
            registrar.msp_id()
        );

        let secret = self
            .ca
            .register(&self.request, &registrar)
            .await
            .map_err(WorkflowError::ca(label))?;
        let enrollment = self
            .ca
            .enroll(&EnrollmentRequest::new(label, secret))
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
            "Successfully registered and enrolled user \"{}\" and imported it into the wallet",
            label
        );
        Ok(Outcome::Registered)
    }
}
