//! Issue proof use case
//!
//! Signer side of a pairing cycle: digest the local document, sign the
//! digest through the custodian and encode both QR payloads.

use tracing::info;

use crate::error::QuickSignResult;
use crate::logic::{engine, transport};
use crate::model::Alias;
use crate::ports::{DocumentSource, KeyFacility, QrRenderer};
use crate::use_cases::KeyCustodian;

/// The two QR payloads a signer shows, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofPayloads {
    /// Shown first: the signer's certificate
    pub certificate: String,
    /// Shown second: the signature over the document digest
    pub signature: String,
}

impl ProofPayloads {
    /// Payloads in the order a verifier has to scan them
    pub fn in_order(&self) -> [&str; 2] {
        [self.certificate.as_str(), self.signature.as_str()]
    }

    /// Render both payloads with an external QR renderer
    pub fn render<R: QrRenderer>(&self, renderer: &R) -> QuickSignResult<[R::Image; 2]> {
        Ok([
            renderer.render(&self.certificate)?,
            renderer.render(&self.signature)?,
        ])
    }
}

/// Produce the certificate and signature payloads for `document`
///
/// # Arguments
///
/// * `custodian` - Custodian holding (or creating) the signing key
/// * `alias` - Key to sign with
/// * `document` - Local source of the bytes being signed
///
/// # Errors
///
/// Returns errors if:
/// - The document cannot be read
/// - The key is unavailable (`QuickSignError::KeyUnavailable`)
pub fn issue_proof<F, D>(
    custodian: &mut KeyCustodian<F>,
    alias: &Alias,
    document: &D,
) -> QuickSignResult<ProofPayloads>
where
    F: KeyFacility,
    D: DocumentSource,
{
    let bytes = document.read_bytes()?;
    let digest = engine::digest(&bytes);

    let certificate = custodian.certificate(alias)?;
    let signature = custodian.sign(alias, &digest)?;

    info!(
        "Issued proof for {} ({} bytes, digest {:?}) with {}",
        document.describe(),
        bytes.len(),
        digest,
        alias
    );

    Ok(ProofPayloads {
        certificate: transport::encode_certificate(&certificate),
        signature: transport::encode_signature(&signature),
    })
}
