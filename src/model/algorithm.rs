//! Signing algorithm supported by quicksign key facilities

/// Signing algorithm bound to a key pair
///
/// Keys are NIST P-256 ECDSA keys; signatures are computed over a SHA-256
/// digest supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// ECDSA over secp256r1 with a SHA-256 digest, DER signatures
    #[default]
    EcdsaP256Sha256,
}

impl Algorithm {
    /// Length of the digest this algorithm signs
    pub const fn digest_len(self) -> usize {
        match self {
            Algorithm::EcdsaP256Sha256 => 32,
        }
    }

    /// Human readable algorithm name
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::EcdsaP256Sha256 => "ecdsa-p256-sha256",
        }
    }
}
