//! Structural classification of decoded QR payloads
//!
//! Classification looks only at the payload itself, never at scan order.
//! Both artifacts are DER SEQUENCEs; they differ in their first element:
//! an X.509 certificate opens with the `tbsCertificate` SEQUENCE, an ECDSA
//! signature opens with the `r` INTEGER.

use x509_cert::der::{Decode, Header, Reader, SliceReader, Tag};

use crate::logic::transport;
use crate::model::{ScanEvent, ScanKind};

pub fn classify(payload: &str) -> ScanEvent {
    let kind = match transport::decode(payload) {
        Ok(bytes) => classify_bytes(&bytes),
        Err(_) => ScanKind::Unrecognized,
    };
    ScanEvent::new(payload, kind)
}

fn classify_bytes(bytes: &[u8]) -> ScanKind {
    let Ok(mut reader) = SliceReader::new(bytes) else {
        return ScanKind::Unrecognized;
    };
    match Header::decode(&mut reader) {
        Ok(header) if header.tag == Tag::Sequence => {}
        _ => return ScanKind::Unrecognized,
    }
    match reader.peek_tag() {
        Ok(Tag::Sequence) => ScanKind::Certificate,
        Ok(Tag::Integer) => ScanKind::Signature,
        _ => ScanKind::Unrecognized,
    }
}
