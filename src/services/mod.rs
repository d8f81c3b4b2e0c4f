// src/services/mod.rs
//! CA client and the two enrollment workflows.
//!
//! Both workflows run once per invocation and return a
//! `Result<Outcome, WorkflowError>`; mapping that to a process exit status is
//! left to the caller.

pub mod admin_bootstrap;
pub mod ca_client;
pub mod user_registration;

#[cfg(test)]
pub(crate) mod fake_ca;

use crate::services::ca_client::CaError;
use crate::wallet::WalletError;
use thiserror::Error;

/// How a workflow run finished successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Admin identity enrolled and stored
    Enrolled,
    /// User identity registered, enrolled and stored
    Registered,
    /// Identity was already in the wallet; nothing was done
    AlreadyPresent,
}

/// Terminal failure of a workflow run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("CA request for \"{label}\" failed")]
    Ca {
        label: String,
        #[source]
        source: CaError,
    },

    #[error("wallet access for \"{label}\" failed")]
    Storage {
        label: String,
        #[source]
        source: WalletError,
    },

    #[error("an identity for the admin user \"{admin}\" does not exist in the wallet; run enroll-admin before retrying")]
    Precondition { admin: String },
}

impl WorkflowError {
    pub(crate) fn ca(label: &str) -> impl FnOnce(CaError) -> WorkflowError + '_ {
        move |source| WorkflowError::Ca {
            label: label.to_string(),
            source,
        }
    }

    pub(crate) fn storage(label: &str) -> impl FnOnce(WalletError) -> WorkflowError + '_ {
        move |source| WorkflowError::Storage {
            label: label.to_string(),
            source,
        }
    }
}
