pub mod error;
pub mod generator;
pub mod settings;

pub use error::{DerivationError, Result};
pub use generator::{derive_password, MAX_PASSWORD_LENGTH, SPECIAL_CHARACTER_GROUPS};
pub use settings::{
    default_settings, DerivationSettings, DEFAULT_INCLUDE_SPECIAL_CHARACTERS,
    DEFAULT_PASSWORD_LENGTH,
};
