// src/wallet/key_management.rs
//! Signing identities rebuilt from stored credentials.
//!
//! A credential sitting in the wallet is inert data. To act as a registrar it
//! has to be turned into a [`SigningIdentity`]: the certificate plus a live
//! ECDSA P-256 signing key. Which provider does that depends on the
//! credential's [`CredentialKind`]; the mapping is a plain `match`.
//!
//! Uses the following cryptographic primitives:
//! - ECDSA over NIST P-256 with SHA-256 (via the `p256` crate)
//! - PKCS#8 PEM private key decoding

use super::WalletError;
use crate::models::credential::{Credential, CredentialKind};
use crate::utils::serialization::encode_b64;
use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature, SigningKey};
use p256::pkcs8::DecodePrivateKey;
use std::fmt;

/// Rebuilds signing identities for one credential kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    X509(X509Provider),
}

impl IdentityProvider {
    pub fn for_kind(kind: CredentialKind) -> Self {
        match kind {
            CredentialKind::X509 => IdentityProvider::X509(X509Provider),
        }
    }

    pub fn kind(&self) -> CredentialKind {
        match self {
            IdentityProvider::X509(_) => CredentialKind::X509,
        }
    }

    /// Builds a signing identity for `credential`, enrolled as `label`.
    ///
    /// # Errors
    /// [`WalletError::Provider`] if the credential is of another kind or its
    /// key material cannot be loaded.
    pub fn user_context(
        &self,
        credential: &Credential,
        label: &str,
    ) -> Result<SigningIdentity, WalletError> {
        if credential.kind != self.kind() {
            return Err(WalletError::Provider {
                label: label.to_string(),
                reason: format!(
                    "credential kind {} does not match provider {}",
                    credential.kind,
                    self.kind()
                ),
            });
        }
        match self {
            IdentityProvider::X509(provider) => provider.user_context(credential, label),
        }
    }
}

/// Provider for PEM certificate + PKCS#8 key pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X509Provider;

impl X509Provider {
    fn user_context(
        &self,
        credential: &Credential,
        label: &str,
    ) -> Result<SigningIdentity, WalletError> {
        if !credential.certificate.contains("-----BEGIN CERTIFICATE-----") {
            return Err(WalletError::Provider {
                label: label.to_string(),
                reason: "certificate is not PEM encoded".to_string(),
            });
        }
        let signing_key = SigningKey::from_pkcs8_pem(&credential.private_key).map_err(|e| {
            WalletError::Provider {
                label: label.to_string(),
                reason: format!("private key is not a PKCS#8 P-256 key: {}", e),
            }
        })?;

        Ok(SigningIdentity {
            label: label.to_string(),
            msp_id: credential.msp_id.clone(),
            certificate: credential.certificate.clone(),
            signing_key,
        })
    }
}

/// An enrolled identity able to sign CA requests.
///
/// # Security Notes
/// - The signing key is never exposed and is omitted from `Debug` output
/// - Signatures are normalized to low-S form, which Fabric CAs require
#[derive(Clone)]
pub struct SigningIdentity {
    label: String,
    msp_id: String,
    certificate: String,
    signing_key: SigningKey,
}

impl SigningIdentity {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// Signs a message using ECDSA P-256 with SHA-256.
    ///
    /// # Returns
    /// DER-encoded signature with `s` in the lower half of the curve order.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let signature: Signature = self.signing_key.sign(message);
        let signature = signature.normalize_s().unwrap_or(signature);
        signature.to_der().as_bytes().to_vec()
    }

    /// Builds the `Authorization` token for an authenticated CA request.
    ///
    /// The token is `b64(cert) "." b64(sig)`, where `sig` covers
    /// `method "." b64(path) "." b64(body) "." b64(cert)`.
    pub fn auth_token(&self, method: &str, path: &str, body: &[u8]) -> String {
        let cert = encode_b64(&self.certificate);
        let payload = format!(
            "{}.{}.{}.{}",
            method,
            encode_b64(path),
            encode_b64(body),
            cert
        );
        format!("{}.{}", cert, encode_b64(self.sign(payload.as_bytes())))
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("label", &self.label)
            .field("msp_id", &self.msp_id)
            .finish_non_exhaustive()
    }
}
