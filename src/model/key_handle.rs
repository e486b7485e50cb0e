use std::fmt;

use crate::model::{Alias, Algorithm};

/// Operations a generated key pair is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPurposes {
    pub sign: bool,
    pub verify: bool,
}

impl KeyPurposes {
    pub const SIGN_VERIFY: Self = Self {
        sign: true,
        verify: true,
    };
}

impl Default for KeyPurposes {
    fn default() -> Self {
        Self::SIGN_VERIFY
    }
}

/// Opaque reference to a private signing key held by a key facility
///
/// A handle names the key; it never carries key material. It is neither
/// `Clone` nor serializable, so it cannot outlive or escape the flow that
/// obtained it from the facility.
pub struct KeyHandle {
    alias: Alias,
    algorithm: Algorithm,
}

impl KeyHandle {
    pub fn new(alias: Alias, algorithm: Algorithm) -> Self {
        Self { alias, algorithm }
    }

    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyHandle({}, {})", self.alias, self.algorithm.name())
    }
}
