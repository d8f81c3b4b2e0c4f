// src/utils/crypto.rs
//! Key generation and PEM helpers for enrollment.
//!
//! Enrollment keys are ECDSA P-256, the curve Fabric CAs issue for.

use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

const PEM_CERT_END: &str = "-----END CERTIFICATE-----";

/// Generates a fresh key pair and a PEM CSR whose subject CN is `common_name`.
///
/// # Returns
/// `(csr_pem, private_key_pem)`; the key is PKCS#8 and never leaves the caller.
pub fn generate_csr(common_name: &str) -> Result<(String, String), rcgen::Error> {
    let key_pair = KeyPair::generate()?;

    let mut params = CertificateParams::new(Vec::<String>::new())?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name);

    let csr = params.serialize_request(&key_pair)?;
    Ok((csr.pem()?, key_pair.serialize_pem()))
}

/// Splits a PEM bundle into individual certificate blocks.
///
/// Text outside of certificate blocks is dropped.
pub fn split_pem_bundle(bundle: &str) -> Vec<String> {
    bundle
        .split_inclusive(PEM_CERT_END)
        .filter_map(|chunk| {
            let start = chunk.find("-----BEGIN CERTIFICATE-----")?;
            let block = &chunk[start..];
            block
                .ends_with(PEM_CERT_END)
                .then(|| format!("{}\n", block))
        })
        .collect()
}
