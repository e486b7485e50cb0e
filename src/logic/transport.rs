//! Transport codec between binary artifacts and QR payload text
//!
//! Every payload is standard base64 with padding and without line wraps.
//! Both devices run the same codec, so identical text always maps to
//! identical bytes regardless of which device produced it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::error::MalformedError;
use crate::model::{Certificate, Signature};

/// Encode bytes as canonical padded base64
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode canonical padded base64
///
/// Surrounding whitespace left by QR decoders is ignored.
pub fn decode(text: &str) -> Result<Vec<u8>, MalformedError> {
    BASE64
        .decode(text.trim())
        .map_err(|e| MalformedError::Encoding {
            reason: e.to_string(),
        })
}

pub fn encode_certificate(certificate: &Certificate) -> String {
    encode(certificate.as_der())
}

pub fn decode_certificate(text: &str) -> Result<Certificate, MalformedError> {
    let bytes = decode(text)?;
    Certificate::from_der(&bytes)
}

pub fn encode_signature(signature: &Signature) -> String {
    encode(signature.as_bytes())
}

/// Decode a signature payload, checking it parses as a DER ECDSA signature
pub fn decode_signature(text: &str) -> Result<Signature, MalformedError> {
    let signature = Signature::from_bytes(decode(text)?);
    signature.to_ecdsa()?;
    Ok(signature)
}
