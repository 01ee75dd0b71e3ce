mod ui;

use anyhow::Result;
use clap::Parser;
use domainpass::{
    derive_password, DerivationSettings, DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH,
};
use std::time::Instant;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "domainpass",
    version,
    about = "Deterministic per-domain password derivation from a single master phrase"
)]
struct Cli {
    /// Domain the password is for (prompted when omitted)
    #[arg(short, long)]
    domain: Option<String>,

    /// Additional info mixed into the derivation, e.g. a username or a counter
    #[arg(short, long)]
    info: Option<String>,

    /// Password length
    #[arg(short, long, default_value_t = DEFAULT_PASSWORD_LENGTH, value_parser = parse_length)]
    length: usize,

    /// Do not replace the tail of the password with special characters
    #[arg(long)]
    no_special: bool,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    /// Log diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_length(s: &str) -> Result<usize, String> {
    let length: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid length", s))?;

    if length > MAX_PASSWORD_LENGTH {
        return Err(format!(
            "length must be at most {}, got {}",
            MAX_PASSWORD_LENGTH, length
        ));
    }

    Ok(length)
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let master_phrase = ui::prompt_master_phrase()?;

    let (domain, additional_info) = match cli.domain {
        Some(domain) => (
            ui::normalize(&domain),
            ui::normalize(cli.info.as_deref().unwrap_or_default()),
        ),
        None => {
            let domain = ui::prompt_line(1, "Domain")?;
            let additional_info = match cli.info {
                Some(info) => ui::normalize(&info),
                None => ui::prompt_line(2, "Additional info")?,
            };
            (domain, additional_info)
        }
    };

    let input_info = ui::InputInfo {
        master_byte_length: master_phrase.len(),
        master_char_count: master_phrase.chars().count(),
        domain: domain.as_str().to_owned(),
        has_additional_info: !additional_info.is_empty(),
    };

    let settings = DerivationSettings {
        master_phrase,
        domain,
        additional_info,
        password_length: cli.length,
        include_special_characters: !cli.no_special,
    };
    debug!(?settings, "deriving password");

    let start = Instant::now();
    let password = derive_password(&settings)?;
    debug!(elapsed_us = start.elapsed().as_micros() as u64, "derivation finished");

    let output_config = ui::OutputConfig {
        password_length: settings.password_length,
        include_special_characters: settings.include_special_characters,
    };

    ui::display_output(&password, &input_info, &output_config, &options);

    Ok(())
}
