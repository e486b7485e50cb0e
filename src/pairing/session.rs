use tracing::{debug, info, warn};

use crate::logic::{classify, engine, transport};
use crate::model::ScanKind;
use crate::pairing::{PairingOutcome, PairingState, Transition, TrustSlot};
use crate::ports::DocumentSource;

/// Verifier-side pairing state machine
///
/// Owns the state, the [`TrustSlot`] and the local reference document.
/// Every method that touches the slot takes `&mut self`, so payloads are
/// processed strictly one at a time against a given slot.
///
/// The reference document is read only when a signature is verified and
/// never comes from the scanned payloads.
#[derive(Debug)]
pub struct PairingSession<D: DocumentSource> {
    state: PairingState,
    slot: TrustSlot,
    /// Previous payload and the state it left the session in
    last: Option<(String, PairingState)>,
    reference: D,
}

impl<D: DocumentSource> PairingSession<D> {
    pub fn new(reference: D) -> Self {
        Self {
            state: PairingState::Idle,
            slot: TrustSlot::new(),
            last: None,
            reference,
        }
    }

    pub fn state(&self) -> PairingState {
        self.state
    }

    pub fn trust_slot(&self) -> &TrustSlot {
        &self.slot
    }

    /// Swap the reference document, returning the previous one
    ///
    /// Takes effect for the next verification, including one whose
    /// certificate is already trusted.
    pub fn replace_reference(&mut self, reference: D) -> D {
        std::mem::replace(&mut self.reference, reference)
    }

    /// Drop any trusted certificate and return to `Idle`
    pub fn reset(&mut self) {
        if !self.slot.is_empty() {
            debug!("Pairing reset, discarding trusted certificate");
        }
        self.slot.clear();
        self.last = None;
        self.state = PairingState::Idle;
    }

    /// Process one decoded payload
    ///
    /// A payload identical to the previous one is ignored while the session
    /// is still in the state that payload left it in, so a QR code held in
    /// front of the camera is acted on once.
    pub fn process(&mut self, payload: &str) -> Transition {
        if let Some((previous, left_in)) = &self.last {
            if previous == payload && *left_in == self.state {
                return self.transition(PairingOutcome::DuplicateIgnored);
            }
        }

        let event = classify(payload);
        let outcome = match event.kind() {
            ScanKind::Certificate => self.on_certificate(event.payload()),
            ScanKind::Signature => self.on_signature(event.payload()),
            ScanKind::Unrecognized => {
                debug!("Ignoring unrecognized payload ({} chars)", payload.len());
                PairingOutcome::Unrecognized
            }
        };

        self.last = Some((payload.to_string(), self.state));
        self.transition(outcome)
    }

    /// Lazily process every payload of `payloads`, in order
    pub fn process_all<'a, I>(&'a mut self, payloads: I) -> impl Iterator<Item = Transition> + 'a
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: AsRef<str>,
    {
        payloads
            .into_iter()
            .map(move |payload| self.process(payload.as_ref()))
    }

    fn transition(&self, outcome: PairingOutcome) -> Transition {
        Transition {
            state: self.state,
            outcome,
        }
    }

    fn on_certificate(&mut self, payload: &str) -> PairingOutcome {
        let certificate = match transport::decode_certificate(payload) {
            Ok(certificate) => certificate,
            Err(e) => {
                warn!("Discarding certificate payload: {}", e);
                return PairingOutcome::MalformedCertificate;
            }
        };

        let fingerprint = certificate.fingerprint();
        let displaced = self.slot.store(certificate);
        self.state = PairingState::AwaitingSignature;

        match displaced {
            None => {
                info!("Learned certificate {}", fingerprint);
                PairingOutcome::CertificateLearned { fingerprint }
            }
            Some(_) => {
                info!("Replaced trusted certificate with {}", fingerprint);
                PairingOutcome::CertificateReplaced { fingerprint }
            }
        }
    }

    fn on_signature(&mut self, payload: &str) -> PairingOutcome {
        if self.state == PairingState::Idle {
            debug!("Signature scanned before any certificate");
            return PairingOutcome::NoCertificateLearnedYet;
        }

        let signature = match transport::decode_signature(payload) {
            Ok(signature) => signature,
            Err(e) => {
                warn!("Discarding signature payload: {}", e);
                return PairingOutcome::MalformedSignature;
            }
        };

        // Single use: the certificate is gone whatever happens next
        let certificate = self.slot.take();
        self.state = PairingState::Idle;
        let Some(certificate) = certificate else {
            return PairingOutcome::NoCertificateLearnedYet;
        };

        let bytes = match self.reference.read_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Reference document unavailable: {}", e);
                return PairingOutcome::ReferenceUnavailable {
                    reason: e.to_string(),
                };
            }
        };

        let result = engine::verify(&engine::digest(&bytes), &signature, &certificate);
        info!(
            "Verified {} against {}: {}",
            self.reference.describe(),
            certificate.fingerprint(),
            result
        );
        PairingOutcome::Verified(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FileDocument, InMemoryDocument, MemoryKeyStore};
    use crate::logic::transport::{encode, encode_certificate, encode_signature};
    use crate::model::{Alias, VerificationResult};
    use crate::use_cases::KeyCustodian;

    struct Signer {
        custodian: KeyCustodian<MemoryKeyStore>,
        alias: Alias,
    }

    impl Signer {
        fn new(name: &str) -> Self {
            Self {
                custodian: KeyCustodian::new(MemoryKeyStore::new()),
                alias: Alias::new(name).unwrap(),
            }
        }

        fn certificate(&mut self) -> String {
            encode_certificate(&self.custodian.certificate(&self.alias).unwrap())
        }

        fn signature(&mut self, document: &[u8]) -> String {
            let signature = self
                .custodian
                .sign(&self.alias, &engine::digest(document))
                .unwrap();
            encode_signature(&signature)
        }
    }

    fn session(reference: &[u8]) -> PairingSession<InMemoryDocument> {
        PairingSession::new(InMemoryDocument::new(reference.to_vec()))
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = session(b"hello");
        assert_eq!(session.state(), PairingState::Idle);
        assert!(session.trust_slot().is_empty());
    }

    #[test]
    fn test_full_cycle_is_valid() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        let t = session.process(&signer.certificate());
        assert_eq!(t.state, PairingState::AwaitingSignature);
        assert!(matches!(t.outcome, PairingOutcome::CertificateLearned { .. }));

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.state, PairingState::Idle);
        assert_eq!(t.outcome, PairingOutcome::Verified(VerificationResult::Valid));
        assert!(session.trust_slot().is_empty());
    }

    #[test]
    fn test_changed_reference_is_invalid() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        session.process(&signer.certificate());
        session.replace_reference(InMemoryDocument::new(b"hellp".to_vec()));
        let t = session.process(&signer.signature(b"hello"));

        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Invalid));
        assert_eq!(t.state, PairingState::Idle);
        assert!(session.trust_slot().is_empty());
    }

    #[test]
    fn test_reference_is_read_at_verification_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut signer = Signer::new("A");
        let mut session = PairingSession::new(FileDocument::new(&path));
        session.process(&signer.certificate());
        std::fs::write(&path, b"hellp").unwrap();

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Invalid));
    }

    #[test]
    fn test_signature_while_idle() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.state, PairingState::Idle);
        assert_eq!(t.outcome, PairingOutcome::NoCertificateLearnedYet);
        assert!(session.trust_slot().is_empty());
    }

    #[test]
    fn test_certificate_is_single_use() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        session.process(&signer.certificate());
        session.process(&signer.signature(b"hello"));
        assert_eq!(session.state(), PairingState::Idle);
        assert!(session.trust_slot().is_empty());

        let t = session.process(&signer.signature(b"another document"));
        assert_eq!(t.outcome, PairingOutcome::NoCertificateLearnedYet);
    }

    #[test]
    fn test_invalid_outcome_also_consumes_certificate() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        session.process(&signer.certificate());
        let t = session.process(&signer.signature(b"something else"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Invalid));

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.outcome, PairingOutcome::NoCertificateLearnedYet);
    }

    #[test]
    fn test_duplicate_certificate_transitions_once() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let certificate = signer.certificate();

        let transitions: Vec<_> = session.process_all([&certificate, &certificate]).collect();
        assert!(matches!(
            transitions[0].outcome,
            PairingOutcome::CertificateLearned { .. }
        ));
        assert_eq!(transitions[1].outcome, PairingOutcome::DuplicateIgnored);
        assert_eq!(transitions[1].state, PairingState::AwaitingSignature);
    }

    #[test]
    fn test_duplicate_signature_does_not_verify_twice() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let signature = signer.signature(b"hello");

        session.process(&signer.certificate());
        let first = session.process(&signature);
        let second = session.process(&signature);

        assert_eq!(first.outcome.verdict(), Some(VerificationResult::Valid));
        assert_eq!(second.outcome, PairingOutcome::DuplicateIgnored);
        assert_eq!(second.state, PairingState::Idle);
    }

    #[test]
    fn test_same_certificate_after_cycle_starts_new_cycle() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let certificate = signer.certificate();

        session.process(&certificate);
        session.process(&signer.signature(b"hello"));
        let t = session.process(&certificate);

        assert!(matches!(t.outcome, PairingOutcome::CertificateLearned { .. }));
        assert_eq!(t.state, PairingState::AwaitingSignature);
    }

    #[test]
    fn test_rescan_of_other_certificate_replaces_slot() {
        let mut a = Signer::new("A");
        let mut b = Signer::new("B");
        let mut session = session(b"hello");

        session.process(&a.certificate());
        let t = session.process(&b.certificate());
        assert!(matches!(t.outcome, PairingOutcome::CertificateReplaced { .. }));
        assert_eq!(t.state, PairingState::AwaitingSignature);

        let t = session.process(&a.signature(b"hello"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Invalid));

        session.process(&b.certificate());
        let t = session.process(&b.signature(b"hello"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Valid));
    }

    #[test]
    fn test_interleaved_duplicate_is_processed() {
        let mut a = Signer::new("A");
        let mut b = Signer::new("B");
        let mut session = session(b"hello");
        let certificate_a = a.certificate();

        session.process(&certificate_a);
        session.process(&b.certificate());
        let t = session.process(&certificate_a);

        assert!(matches!(t.outcome, PairingOutcome::CertificateReplaced { .. }));
        let fingerprint = session.trust_slot().peek().unwrap().fingerprint();
        assert_eq!(
            t.outcome,
            PairingOutcome::CertificateReplaced { fingerprint }
        );
    }

    #[test]
    fn test_malformed_certificate_keeps_state() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let certificate = signer.certificate();
        let der = transport::decode(&certificate).unwrap();
        let truncated = encode(&der[..der.len() / 2]);

        let t = session.process(&truncated);
        assert_eq!(t.outcome, PairingOutcome::MalformedCertificate);
        assert_eq!(t.state, PairingState::Idle);

        session.process(&certificate);
        let t = session.process(&truncated);
        assert_eq!(t.outcome, PairingOutcome::MalformedCertificate);
        assert_eq!(t.state, PairingState::AwaitingSignature);
        assert!(!session.trust_slot().is_empty());
    }

    #[test]
    fn test_malformed_signature_keeps_slot() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        session.process(&signer.certificate());
        // SEQUENCE { INTEGER 0 } classifies as a signature but is not one
        let t = session.process(&encode(&[0x30, 0x03, 0x02, 0x01, 0x00]));
        assert_eq!(t.outcome, PairingOutcome::MalformedSignature);
        assert_eq!(t.state, PairingState::AwaitingSignature);

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Valid));
    }

    #[test]
    fn test_unrecognized_payload_changes_nothing() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");

        session.process(&signer.certificate());
        let t = session.process("WIFI:S:cafe;T:WPA;P:secret;;");
        assert_eq!(t.outcome, PairingOutcome::Unrecognized);
        assert_eq!(t.state, PairingState::AwaitingSignature);

        let t = session.process(&signer.signature(b"hello"));
        assert_eq!(t.outcome.verdict(), Some(VerificationResult::Valid));
    }

    #[test]
    fn test_unreadable_reference_still_clears_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut signer = Signer::new("A");
        let mut session = PairingSession::new(FileDocument::new(dir.path().join("missing")));

        session.process(&signer.certificate());
        let t = session.process(&signer.signature(b"hello"));

        assert!(matches!(
            t.outcome,
            PairingOutcome::ReferenceUnavailable { .. }
        ));
        assert_eq!(t.state, PairingState::Idle);
        assert!(session.trust_slot().is_empty());
    }

    #[test]
    fn test_reset_discards_certificate() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let certificate = signer.certificate();

        session.process(&certificate);
        session.reset();
        assert_eq!(session.state(), PairingState::Idle);
        assert!(session.trust_slot().is_empty());

        // The same code shown again after a reset is a fresh scan
        let t = session.process(&certificate);
        assert!(matches!(t.outcome, PairingOutcome::CertificateLearned { .. }));
    }

    #[test]
    fn test_process_all_is_lazy() {
        let mut signer = Signer::new("A");
        let mut session = session(b"hello");
        let payloads = vec![signer.certificate(), signer.signature(b"hello")];

        let mut transitions = session.process_all(payloads);
        let first = transitions.next().unwrap();
        assert_eq!(first.state, PairingState::AwaitingSignature);
        let second = transitions.next().unwrap();
        assert_eq!(second.outcome.verdict(), Some(VerificationResult::Valid));
        assert!(transitions.next().is_none());
    }
}
