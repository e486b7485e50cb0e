use crate::error::QuickSignResult;

/// Local source of document bytes chosen by the user
///
/// Used identically on both sides: the signer digests what it signs, the
/// verifier digests its own reference copy. Document bytes never come from
/// the QR stream.
pub trait DocumentSource {
    fn read_bytes(&self) -> QuickSignResult<Vec<u8>>;

    /// Human readable location, used in logs and errors
    fn describe(&self) -> String;
}
