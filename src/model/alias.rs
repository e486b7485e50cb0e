use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Stable name of one logical key pair inside a key facility
///
/// Aliases double as file stems in on-disk keystores and as the certificate
/// subject common name, so the accepted character set is deliberately small.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alias(String);

impl Alias {
    pub const MAX_LENGTH: usize = 128;

    pub const DEFAULT_SIGNER: &'static str = "quicksign_signer";

    pub fn new(alias: impl Into<String>) -> Result<Self, AliasError> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(AliasError::Empty);
        }
        if alias.len() > Self::MAX_LENGTH {
            return Err(AliasError::TooLong {
                actual: alias.len(),
            });
        }
        if let Some(invalid) = alias
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(AliasError::InvalidCharacter { invalid });
        }
        if alias.starts_with('.') {
            return Err(AliasError::InvalidCharacter { invalid: '.' });
        }
        Ok(Self(alias))
    }

    pub fn default_signer() -> Self {
        Self(Self::DEFAULT_SIGNER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Alias {
    fn default() -> Self {
        Self::default_signer()
    }
}

impl FromStr for Alias {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Alias {
    type Error = AliasError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alias({})", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("Alias must not be empty")]
    Empty,

    #[error("Alias must be at most {max} characters, got {actual}", max = Alias::MAX_LENGTH)]
    TooLong { actual: usize },

    #[error("Alias contains invalid character {invalid:?}")]
    InvalidCharacter { invalid: char },
}
