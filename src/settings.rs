use crate::error::{DerivationError, Result};
use std::fmt;
use zeroize::Zeroizing;

pub const DEFAULT_PASSWORD_LENGTH: usize = 12;
pub const DEFAULT_INCLUDE_SPECIAL_CHARACTERS: bool = true;

/// Inputs of a single derivation. Text fields are wiped on drop.
#[derive(Clone)]
pub struct DerivationSettings {
    pub master_phrase: Zeroizing<String>,
    pub domain: Zeroizing<String>,
    pub additional_info: Zeroizing<String>,
    pub password_length: usize,
    pub include_special_characters: bool,
}

impl Default for DerivationSettings {
    fn default() -> Self {
        Self {
            master_phrase: Zeroizing::new(String::new()),
            domain: Zeroizing::new(String::new()),
            additional_info: Zeroizing::new(String::new()),
            password_length: DEFAULT_PASSWORD_LENGTH,
            include_special_characters: DEFAULT_INCLUDE_SPECIAL_CHARACTERS,
        }
    }
}

impl DerivationSettings {
    pub fn new(master_phrase: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            master_phrase: Zeroizing::new(master_phrase.into()),
            domain: Zeroizing::new(domain.into()),
            ..Self::default()
        }
    }

    pub fn with_additional_info(mut self, additional_info: impl Into<String>) -> Self {
        self.additional_info = Zeroizing::new(additional_info.into());
        self
    }

    pub fn with_password_length(mut self, password_length: usize) -> Self {
        self.password_length = password_length;
        self
    }

    pub fn with_special_characters(mut self, include: bool) -> Self {
        self.include_special_characters = include;
        self
    }

    /// Checks the mandatory fields, master phrase first.
    pub fn validate(&self) -> Result<()> {
        if self.master_phrase.is_empty() {
            return Err(DerivationError::EmptyMasterPhrase);
        }
        if self.domain.is_empty() {
            return Err(DerivationError::EmptyDomain);
        }

        Ok(())
    }
}

impl fmt::Debug for DerivationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationSettings")
            .field("master_phrase", &"<redacted>")
            .field("domain_len", &self.domain.len())
            .field("additional_info_len", &self.additional_info.len())
            .field("password_length", &self.password_length)
            .field(
                "include_special_characters",
                &self.include_special_characters,
            )
            .finish()
    }
}

pub fn default_settings() -> DerivationSettings {
    DerivationSettings::default()
}
