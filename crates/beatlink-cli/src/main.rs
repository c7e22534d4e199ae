use std::io::Read;

use beatlink::derive::derive_positions_for_sequence;
use beatlink::link::{ShareOptions, generate_share_url, generate_viewer_url};
use beatlink::prelude::*;
use clap::{Parser, Subcommand};
use serde_json::json;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "beatlink")]
#[command(about = "Encode, decode, and share choreography sequences")]
struct Cli {
    /// Never compress (encode, share, view)
    #[arg(long, global = true)]
    raw: bool,

    /// Origin for generated URLs
    #[arg(
        long,
        global = true,
        env = "BEATLINK_ORIGIN",
        default_value = "https://app.example.com"
    )]
    origin: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read sequence JSON on stdin, print the encoded string
    Encode,
    /// Print the sequence JSON for an encoded string
    Decode { encoded: String },
    /// Read sequence JSON on stdin, print a share URL
    Share { module: String },
    /// Read sequence JSON on stdin, print a viewer URL
    View,
    /// Print the module and sequence a link opens
    Open { url: String },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn read_sequence() -> Result<SequenceData, Box<dyn std::error::Error>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

fn config(origin: &str) -> Result<LinkConfig, BeatlinkError> {
    let config = LinkConfig {
        origin: origin.to_string(),
        ..LinkConfig::default()
    };
    Ok(config.validated()?)
}

async fn open(input: &str) -> Result<serde_json::Value, BeatlinkError> {
    if let Some(sequence) = parse_viewer_url(input) {
        let sequence = derive_positions_for_sequence(sequence, &CompassResolver).await;
        return Ok(json!({ "viewer": true, "sequence": sequence }));
    }

    let Some((target, link)) = open_deep_link(input) else {
        return Err(beatlink::link::LinkError::MalformedLink(
            "not a share or viewer link".into(),
        )
        .into());
    };
    let sequence = derive_positions_for_sequence(link.sequence, &CompassResolver).await;
    Ok(json!({
        "module": link.module,
        "target": target,
        "destination": target.destination(),
        "sequence": sequence,
    }))
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    beatlink::init_logging();

    let cli = Cli::parse();
    let options = ShareOptions { compress: !cli.raw };

    match cli.command {
        Command::Encode => {
            let sequence = read_sequence()?;
            let encoded = if options.compress {
                encode_with_compression(&sequence)
            } else {
                encode(&sequence)
            };
            println!("{encoded}");
        }
        Command::Decode { encoded } => {
            let sequence = decode_with_compression(encoded.trim())?;
            println!("{}", serde_json::to_string_pretty(&sequence)?);
        }
        Command::Share { module } => {
            let sequence = read_sequence()?;
            let origin = config(&cli.origin)?.origin_url()?;
            println!("{}", generate_share_url(&origin, &sequence, &module, options)?);
        }
        Command::View => {
            let sequence = read_sequence()?;
            let origin = config(&cli.origin)?.origin_url()?;
            println!("{}", generate_viewer_url(&origin, &sequence, options));
        }
        Command::Open { url } => {
            let opened = open(&url).await?;
            println!("{}", serde_json::to_string_pretty(&opened)?);
        }
    }

    tracing::debug!("done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_share_with_raw() {
        let cli = Cli::try_parse_from(["beatlink", "--raw", "share", "construct"]).unwrap();
        assert!(cli.raw);
        assert!(matches!(cli.command, Command::Share { module } if module == "construct"));
    }

    #[test]
    fn test_cli_raw_after_subcommand() {
        let cli = Cli::try_parse_from(["beatlink", "view", "--raw"]).unwrap();
        assert!(cli.raw);
        assert!(matches!(cli.command, Command::View));
    }

    #[test]
    fn test_cli_origin_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "beatlink",
            "--origin",
            "http://localhost:5173",
            "decode",
            ":|:",
        ])
        .unwrap();
        assert_eq!(cli.origin, "http://localhost:5173");
        assert!(matches!(cli.command, Command::Decode { encoded } if encoded == ":|:"));
    }

    #[test]
    fn test_cli_missing_operand_is_error() {
        assert!(Cli::try_parse_from(["beatlink", "decode"]).is_err());
        assert!(Cli::try_parse_from(["beatlink", "open"]).is_err());
        assert!(Cli::try_parse_from(["beatlink"]).is_err());
    }

    #[test]
    fn test_cli_extra_operand_is_error() {
        assert!(Cli::try_parse_from(["beatlink", "encode", "extra"]).is_err());
        assert!(Cli::try_parse_from(["beatlink", "share", "a", "b"]).is_err());
    }

    #[test]
    fn test_config_rejects_bad_origin() {
        assert!(config("not a url").is_err());
        assert_eq!(config("https://x.test/app/").unwrap().origin, "https://x.test");
    }

    #[tokio::test]
    async fn test_open_viewer_path_derives_positions() {
        let opened = open("/sequence/%3A%7Cnneeiic1ps%3Asswwiic1ps").await.unwrap();
        assert_eq!(opened["viewer"], true);
        assert_eq!(opened["sequence"]["beats"][0]["start_position"], "alpha1");
    }

    #[tokio::test]
    async fn test_open_garbage_is_error() {
        assert!(open("https://app.example.com/?sheet=settings").await.is_err());
    }
}
