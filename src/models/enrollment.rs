// src/models/enrollment.rs
//! Transient request/response types for the CA protocol.
//!
//! None of these are persisted; an [`Enrollment`] is turned into a
//! [`Credential`](crate::models::credential::Credential) before it reaches the wallet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One-time secret exchange for a certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    pub enrollment_id: String,
    pub enrollment_secret: String,
}

impl EnrollmentRequest {
    pub fn new(enrollment_id: impl Into<String>, enrollment_secret: impl Into<String>) -> Self {
        EnrollmentRequest {
            enrollment_id: enrollment_id.into(),
            enrollment_secret: enrollment_secret.into(),
        }
    }
}

// The secret is deliberately left out of debug output.
impl fmt::Debug for EnrollmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrollmentRequest")
            .field("enrollment_id", &self.enrollment_id)
            .finish_non_exhaustive()
    }
}

/// Result of a successful enrollment.
///
/// # Fields
/// - `certificate`: PEM certificate signed by the CA
/// - `private_key`: PEM PKCS#8 key generated locally for the CSR
/// - `ca_chain`: PEM chain of the issuing CA, when the CA returns one
#[derive(Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub certificate: String,
    pub private_key: String,
    pub ca_chain: Option<String>,
}

impl fmt::Debug for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enrollment")
            .field("certificate", &self.certificate)
            .field("ca_chain", &self.ca_chain)
            .finish_non_exhaustive()
    }
}

/// Attribute attached to a registered identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    /// Whether the attribute is placed in enrollment certificates by default
    #[serde(rename = "ecert", default)]
    pub include_in_cert: bool,
}

/// Request to mint an enrollment secret for a new principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub affiliation: String,
    pub enrollment_id: String,
    pub role: String,
    /// `None` leaves the CA's configured default in place
    pub max_enrollments: Option<i32>,
    pub attrs: Vec<Attribute>,
}

impl RegistrationRequest {
    pub fn new(
        affiliation: impl Into<String>,
        enrollment_id: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        RegistrationRequest {
            affiliation: affiliation.into(),
            enrollment_id: enrollment_id.into(),
            role: role.into(),
            max_enrollments: None,
            attrs: Vec::new(),
        }
    }
}
