// src/services/fake_ca.rs
//! In-process certificate authority for workflow tests.

use crate::models::enrollment::{Enrollment, EnrollmentRequest, RegistrationRequest};
use crate::services::ca_client::{CaError, CertificateAuthority};
use crate::wallet::SigningIdentity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct Principal {
    secret: String,
    certificate: String,
    private_key: String,
    registered: bool,
    consumed: bool,
}

#[derive(Debug, Default)]
struct Ledger {
    principals: HashMap<String, Principal>,
    enroll_calls: Vec<String>,
    register_calls: Vec<String>,
    enroll_unavailable: bool,
}

/// Clones share one ledger, like two clients talking to the same CA.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeCa {
    ledger: Arc<Mutex<Ledger>>,
}

impl FakeCa {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A principal the CA was bootstrapped with (e.g. `admin`/`adminpw`).
    pub(crate) fn with_bootstrap(self, id: &str, secret: &str, certificate: &str, private_key: &str) -> Self {
        self.insert(id, secret, certificate, private_key, true);
        self
    }

    /// What `register` will hand out for `id`, and what `enroll` then issues.
    pub(crate) fn with_pending(self, id: &str, secret: &str, certificate: &str, private_key: &str) -> Self {
        self.insert(id, secret, certificate, private_key, false);
        self
    }

    /// Makes every `enroll` call fail as if the secret were rejected.
    pub(crate) fn failing_enroll(self) -> Self {
        self.ledger.lock().unwrap().enroll_unavailable = true;
        self
    }

    fn insert(&self, id: &str, secret: &str, certificate: &str, private_key: &str, registered: bool) {
        self.ledger.lock().unwrap().principals.insert(
            id.to_string(),
            Principal {
                secret: secret.to_string(),
                certificate: certificate.to_string(),
                private_key: private_key.to_string(),
                registered,
                consumed: false,
            },
        );
    }

    pub(crate) fn enroll_calls(&self) -> Vec<String> {
        self.ledger.lock().unwrap().enroll_calls.clone()
    }

    pub(crate) fn register_calls(&self) -> Vec<String> {
        self.ledger.lock().unwrap().register_calls.clone()
    }
}

impl CertificateAuthority for FakeCa {
    async fn enroll(&self, request: &EnrollmentRequest) -> Result<Enrollment, CaError> {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.enroll_calls.push(request.enrollment_id.clone());
        if ledger.enroll_unavailable {
            return Err(CaError::Auth("enrollment secret rejected".to_string()));
        }

        let principal = ledger
            .principals
            .get_mut(&request.enrollment_id)
            .filter(|p| p.registered && !p.consumed && p.secret == request.enrollment_secret)
            .ok_or_else(|| CaError::Auth("Authentication failure".to_string()))?;
        principal.consumed = true;

        Ok(Enrollment {
            certificate: principal.certificate.clone(),
            private_key: principal.private_key.clone(),
            ca_chain: None,
        })
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
        registrar: &SigningIdentity,
    ) -> Result<String, CaError> {
        self.ledger
            .lock()
            .unwrap()
            .register_calls
            .push(request.enrollment_id.clone());
        // Suspend once so a concurrent run can reach `register` too.
        tokio::task::yield_now().await;

        let mut ledger = self.ledger.lock().unwrap();
        if registrar.label() != "admin" {
            return Err(CaError::Authz(format!("{} may not register identities", registrar.label())));
        }
        let principal = ledger
            .principals
            .get_mut(&request.enrollment_id)
            .ok_or_else(|| CaError::Protocol(format!("no secret planned for {}", request.enrollment_id)))?;
        if principal.registered {
            return Err(CaError::Conflict(format!(
                "Identity '{}' is already registered",
                request.enrollment_id
            )));
        }
        principal.registered = true;
        Ok(principal.secret.clone())
    }
}
