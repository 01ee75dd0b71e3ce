use crate::error::{DerivationError, Result};
use crate::settings::DerivationSettings;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Suffixes injected at the end of a password. Order and content are part of
/// the derivation: any change alters every previously derived password.
pub const SPECIAL_CHARACTER_GROUPS: [&str; 6] = ["`~]'", "!&^#", ")(*$", "[ -=", "@%.;", "<,}+"];

/// Length of a padded standard base64 encoding of a SHA-256 digest.
pub const MAX_PASSWORD_LENGTH: usize = 44;

const SEPARATOR: char = ':';
const VOWELS: &[u8] = b"aeiouy";

pub fn canonical_plaintext(settings: &DerivationSettings) -> Zeroizing<String> {
    let mut plaintext = Zeroizing::new(String::with_capacity(
        settings.master_phrase.len() + settings.domain.len() + settings.additional_info.len() + 2,
    ));

    plaintext.push_str(&settings.master_phrase);
    plaintext.push(SEPARATOR);
    plaintext.push_str(&settings.domain);
    plaintext.push(SEPARATOR);
    plaintext.push_str(&settings.additional_info);

    plaintext
}

pub fn encoded_digest(plaintext: &str) -> Zeroizing<String> {
    let digest: Zeroizing<[u8; 32]> = Zeroizing::new(Sha256::digest(plaintext.as_bytes()).into());
    Zeroizing::new(STANDARD.encode(&digest[..]))
}

/// Case-insensitive count of `aeiouy` over the whole encoded digest.
pub fn vowel_count(encoded: &str) -> usize {
    encoded
        .bytes()
        .filter(|b| VOWELS.contains(&b.to_ascii_lowercase()))
        .count()
}

pub fn special_characters(encoded: &str) -> &'static str {
    SPECIAL_CHARACTER_GROUPS[vowel_count(encoded) % SPECIAL_CHARACTER_GROUPS.len()]
}

pub fn derive_password(settings: &DerivationSettings) -> Result<Zeroizing<String>> {
    settings.validate()?;

    let plaintext = canonical_plaintext(settings);
    let encoded = encoded_digest(&plaintext);

    let length = settings.password_length;
    if length > encoded.len() {
        return Err(DerivationError::PasswordTooLong {
            max: encoded.len(),
        });
    }

    let mut password = Zeroizing::new(String::with_capacity(length));

    if settings.include_special_characters {
        let group = special_characters(&encoded);
        if length < group.len() {
            return Err(DerivationError::TooShortForSpecialCharacters { min: group.len() });
        }

        password.push_str(&encoded[..length - group.len()]);
        password.push_str(group);
    } else {
        password.push_str(&encoded[..length]);
    }

    Ok(password)
}
