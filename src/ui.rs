use anyhow::{Context, Result};
use console::{Style, Term};
use rpassword::read_password;
use std::io::{self, Write};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const MAX_INPUT_BYTES: usize = 1024 * 1024;

pub struct InputInfo {
    pub master_byte_length: usize,
    pub master_char_count: usize,
    pub domain: String,
    pub has_additional_info: bool,
}

pub struct OutputConfig {
    pub password_length: usize,
    pub include_special_characters: bool,
}

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn control_character_positions(s: &str) -> Vec<usize> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect()
}

fn confirm_control_characters(s: &str, input_name: &str) -> Result<()> {
    let positions = control_character_positions(s);
    if positions.is_empty() {
        return Ok(());
    }

    let term = Term::stderr();

    let warning_msg = format!(
        "WARNING: {} contains {} control character(s) at position(s): {}",
        input_name,
        positions.len(),
        positions
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    term.write_line(&warning_msg)?;
    term.write_str("Continue anyway? [y/N]: ")?;
    term.flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    term.clear_last_lines(2)?;

    if response != "y" && response != "yes" {
        anyhow::bail!("Aborted");
    }

    Ok(())
}

/// Trims and NFC-normalizes an input so that visually identical text
/// derives the same password.
pub fn normalize(s: &str) -> Zeroizing<String> {
    Zeroizing::new(s.trim().nfc().collect())
}

fn normalize_and_validate(s: &str, input_name: &str) -> Result<Zeroizing<String>> {
    let normalized = normalize(s);

    if normalized.len() > MAX_INPUT_BYTES {
        anyhow::bail!(
            "{} too long ({} bytes, maximum is {})",
            input_name,
            normalized.len(),
            MAX_INPUT_BYTES
        );
    }

    confirm_control_characters(&normalized, input_name)?;
    Ok(normalized)
}

pub fn prompt_master_phrase() -> Result<Zeroizing<String>> {
    print!("In [0]: ");
    io::stdout().flush()?;

    let phrase = Zeroizing::new(read_password().context("Failed to fetch master phrase")?);

    normalize_and_validate(&phrase, "Master phrase")
}

pub fn prompt_line(index: usize, input_name: &str) -> Result<Zeroizing<String>> {
    print!("In [{}]: ", index);
    io::stdout().flush()?;

    let mut input = Zeroizing::new(String::new());
    io::stdin()
        .read_line(&mut input)
        .with_context(|| format!("Failed to read {}", input_name.to_lowercase()))?;

    normalize_and_validate(&input, input_name)
}

pub fn display_output(
    output: &Zeroizing<String>,
    input_info: &InputInfo,
    config: &OutputConfig,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**output);
        return;
    }

    println!();
    println!("Out[0]:\n{}\n", &**output);

    display_settings(input_info, config, options);
}

fn display_settings(input_info: &InputInfo, config: &OutputConfig, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);

    let special_style = if options.color_support {
        if config.include_special_characters {
            Style::new().green()
        } else {
            Style::new().yellow()
        }
    } else {
        Style::new()
    };

    let special_status = if config.include_special_characters {
        check_ok
    } else {
        check_warn
    };

    println!("Settings:");
    println!("  {} Hash       SHA-256 (256-bit)", branch);
    println!("  {} Encoding   Base64 (standard, padded)", branch);

    println!(
        "  {} Master     {} {} ({} {})",
        branch,
        input_info.master_byte_length,
        if input_info.master_byte_length == 1 {
            "byte"
        } else {
            "bytes"
        },
        input_info.master_char_count,
        if input_info.master_char_count == 1 {
            "char"
        } else {
            "chars"
        }
    );

    println!("  {} Domain     {}", branch, input_info.domain);
    println!(
        "  {} Info       {}",
        branch,
        if input_info.has_additional_info {
            "supplied"
        } else {
            "none"
        }
    );

    println!(
        "  {} Specials   {} {}",
        branch,
        special_style.apply_to(format!("[{}]", special_status)),
        special_style.apply_to(if config.include_special_characters {
            "included"
        } else {
            "omitted"
        })
    );

    println!(
        "  {} Output     {} {}",
        last,
        config.password_length,
        if config.password_length == 1 {
            "char"
        } else {
            "chars"
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_tree_branches_ascii() {
        let (branch, last) = tree_branches(false);
        assert!(branch.is_ascii());
        assert!(last.is_ascii());
    }

    #[test]
    fn test_normalize_nfc() {
        let nfc = "café";
        let nfd = "cafe\u{0301}";

        assert_ne!(nfc.as_bytes(), nfd.as_bytes());

        let normalized_nfc = normalize(nfc);
        let normalized_nfd = normalize(nfd);

        assert_eq!(*normalized_nfc, *normalized_nfd);
    }

    #[test]
    fn test_normalize_unicode_variants() {
        let cases = vec![
            ("café", "cafe\u{0301}"),
            ("Å", "A\u{030A}"),
            ("ñ", "n\u{0303}"),
        ];

        for (nfc, nfd) in cases {
            assert_eq!(*normalize(nfc), *normalize(nfd));
        }
    }

    #[test]
    fn test_trim_whitespace() {
        let cases = vec![
            ("  example.com  ", "example.com"),
            ("\texample.com\t", "example.com"),
            ("example.com\n", "example.com"),
            ("example.com\r\n", "example.com"),
            ("  correct horse  ", "correct horse"),
        ];

        for (input, expected) in cases {
            assert_eq!(*normalize(input), expected);
        }
    }

    #[test]
    fn test_empty_after_trim() {
        for input in ["   ", "\t\t", "\n", ""] {
            assert_eq!(*normalize(input), "");
        }
    }

    #[test]
    fn test_normalization_idempotent() {
        let first = normalize("cafe\u{0301}");
        let second = normalize(&first);
        assert_eq!(*first, *second);
    }

    #[test]
    fn test_control_character_positions() {
        assert!(control_character_positions("example.com").is_empty());
        assert_eq!(control_character_positions("ex\u{0007}am\u{001b}ple"), vec![2, 5]);
    }

    #[test]
    fn test_clean_input_needs_no_confirmation() {
        assert!(confirm_control_characters("example.com", "Domain").is_ok());
    }

    #[test]
    fn test_normalized_input_derives_same_password() {
        let nfc = crate_settings("café", "example.com");
        let nfd = crate_settings("  cafe\u{0301}\n", "example.com");

        let first = domainpass::derive_password(&nfc).unwrap();
        let second = domainpass::derive_password(&nfd).unwrap();
        assert_eq!(*first, *second);
    }

    fn crate_settings(master: &str, domain: &str) -> domainpass::DerivationSettings {
        domainpass::DerivationSettings::new(normalize(master).as_str(), normalize(domain).as_str())
    }
}
