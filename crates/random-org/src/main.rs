//! random-org - command line access to the random.org Basic API.
//!
//! Reads `RANDOM_ORG_API_KEY` (and optionally `RANDOM_ORG_ENDPOINT`,
//! `RANDOM_ORG_TIMEOUT_SECS`) from the environment or a `.env` file.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use random_org::{RandMax, RandomOrgClient};

const USAGE: &str = "Usage: random-org <command> [arg]

Commands:
  usage            Show quota for the configured key
  integer <max>    Integer in [0, max)
  float [max]      Float in [0, max), default [0, 1)
  rand [max]       Like float, also accepts integers and ranges such as 1..=6
  hex [len]        Hex string of len random bytes (default 16)
  base64 [len]     Base64 string of len random bytes (default 16)
  uuid             Version 4 UUID";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "random_org=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let command = args.next();
    let arg = args.next();

    let client = RandomOrgClient::from_env();
    if client.config().api_key().is_empty() {
        tracing::warn!("RANDOM_ORG_API_KEY is not set; requests will be rejected");
    }

    match command.as_deref() {
        Some("usage") => usage(&client),
        Some("integer") => {
            let max = arg.context("integer needs a maximum")?;
            let max: i64 = max.parse().with_context(|| format!("not an integer: {max}"))?;
            if max <= 0 {
                anyhow::bail!("maximum must be positive, got {max}");
            }
            println!("{}", client.random_number(max)?);
            Ok(())
        }
        Some("float") => {
            let max: f64 = match arg {
                Some(max) => max.parse().with_context(|| format!("not a number: {max}"))?,
                None => 1.0,
            };
            println!("{}", client.rng().rand(max)?);
            Ok(())
        }
        Some("rand") => {
            let max: RandMax = arg.as_deref().unwrap_or_default().parse()?;
            println!("{}", client.rng().rand(max)?);
            Ok(())
        }
        Some("hex") => {
            println!("{}", client.hex(length(arg)?)?);
            Ok(())
        }
        Some("base64") => {
            println!("{}", client.base64(length(arg)?)?);
            Ok(())
        }
        Some("uuid") => {
            println!("{}", client.uuid()?);
            Ok(())
        }
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!(USAGE),
    }
}

fn length(arg: Option<String>) -> anyhow::Result<Option<usize>> {
    arg.map(|len| {
        len.parse()
            .with_context(|| format!("not a byte length: {len}"))
    })
    .transpose()
}

fn usage(client: &RandomOrgClient) -> anyhow::Result<()> {
    let usage = client.usage().context("fetching usage")?;
    println!("status:         {}", usage.status().unwrap_or("unknown"));
    if let Some(created) = usage.creation_time() {
        println!("created:        {created}");
    }
    for (label, value) in [
        ("bits left", usage.bits_left()),
        ("requests left", usage.requests_left()),
        ("total bits", usage.total_bits()),
        ("total requests", usage.total_requests()),
    ] {
        if let Some(value) = value {
            println!("{:<16}{value}", format!("{label}:"));
        }
    }
    Ok(())
}
