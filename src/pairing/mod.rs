//! Scanning-side pairing protocol
//!
//! A [`PairingSession`] consumes decoded QR payloads one at a time. It learns
//! a certificate, verifies exactly one signature against it and forgets it
//! again. Every call returns a [`Transition`] describing the new state and
//! what happened, so presentation layers never have to inspect the session.

use std::fmt;

use crate::model::VerificationResult;

pub mod feed;
mod session;
mod trust_slot;

pub use feed::{run_pairing, FeedReceiver, FeedSender, ScanFeed};
pub use session::PairingSession;
pub use trust_slot::TrustSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairingState {
    /// No certificate learned
    #[default]
    Idle,
    /// A certificate is in the trust slot, waiting for its signature
    AwaitingSignature,
}

impl fmt::Display for PairingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingState::Idle => write!(f, "idle"),
            PairingState::AwaitingSignature => write!(f, "awaiting-signature"),
        }
    }
}

/// What processing one payload amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingOutcome {
    /// A certificate was stored in the empty trust slot
    CertificateLearned { fingerprint: String },
    /// A certificate overwrote the one waiting for a signature
    CertificateReplaced { fingerprint: String },
    /// A signature was checked against the trusted certificate
    Verified(VerificationResult),
    /// Certificate-shaped payload that does not parse
    MalformedCertificate,
    /// Signature-shaped payload that does not parse
    MalformedSignature,
    /// Signature scanned while no certificate is trusted
    NoCertificateLearnedYet,
    /// Payload is neither a certificate nor a signature
    Unrecognized,
    /// Same payload as the previous one, with nothing changed since
    DuplicateIgnored,
    /// The local reference document could not be read for verification
    ReferenceUnavailable { reason: String },
}

impl PairingOutcome {
    /// The verification verdict, if this outcome carries one
    pub fn verdict(&self) -> Option<VerificationResult> {
        match self {
            PairingOutcome::Verified(result) => Some(*result),
            _ => None,
        }
    }
}

impl fmt::Display for PairingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingOutcome::CertificateLearned { fingerprint } => {
                write!(f, "certificate learned {fingerprint}")
            }
            PairingOutcome::CertificateReplaced { fingerprint } => {
                write!(f, "certificate replaced {fingerprint}")
            }
            PairingOutcome::Verified(result) => write!(f, "{result}"),
            PairingOutcome::MalformedCertificate => write!(f, "unreadable certificate"),
            PairingOutcome::MalformedSignature => write!(f, "unreadable signature"),
            PairingOutcome::NoCertificateLearnedYet => {
                write!(f, "scan the certificate first")
            }
            PairingOutcome::Unrecognized => write!(f, "unrecognized code"),
            PairingOutcome::DuplicateIgnored => write!(f, "duplicate ignored"),
            PairingOutcome::ReferenceUnavailable { reason } => {
                write!(f, "reference document unavailable: {reason}")
            }
        }
    }
}

/// Result of feeding one payload to a [`PairingSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the payload was processed
    pub state: PairingState,
    pub outcome: PairingOutcome,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.state, self.outcome)
    }
}
