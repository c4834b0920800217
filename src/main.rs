use anyhow::{Context, Result, bail};
use futures::future::join_all;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use peekaleet::config::Config;
use peekaleet::{LoadOptions, ProfileClient, ProfileSnapshot};

const USAGE: &str = "usage: peekaleet [USERNAME...] [--all] [--total] [--topics] [--recent[=N]] [--contest] [--streak]";

struct Args {
    usernames: Vec<String>,
    options: LoadOptions,
}

fn parse_args(args: impl IntoIterator<Item = String>, defaults: LoadOptions) -> Result<Args> {
    let mut usernames = Vec::new();
    let mut options = defaults;

    for arg in args {
        match arg.as_str() {
            "--all" => options = LoadOptions::all().recent_limit(options.recent_limit),
            "--total" => options.total_count = true,
            "--topics" => options.topicwise = true,
            "--recent" => options.recent = true,
            "--contest" => options.contest = true,
            "--streak" => options.streak = true,
            "-h" | "--help" => bail!(USAGE),
            s if s.starts_with("--recent=") => {
                let n = &s["--recent=".len()..];
                options.recent = true;
                options.recent_limit = n
                    .parse()
                    .ok()
                    .filter(|n| *n > 0)
                    .with_context(|| format!("--recent expects a positive integer, got {n:?}"))?;
            }
            s if s.starts_with('-') => bail!("unknown flag {s}\n{USAGE}"),
            _ => usernames.push(arg),
        }
    }

    Ok(Args { usernames, options })
}

async fn fetch(config: &Config, username: String, options: LoadOptions) -> Result<ProfileSnapshot> {
    let mut client = ProfileClient::with_settings(username.as_str(), &config.client_settings())?;
    client
        .load(options)
        .await
        .with_context(|| format!("Failed to load profile for {username}"))?;
    Ok(client.snapshot())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "peekaleet=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?.unwrap_or_default();
    let mut args = parse_args(std::env::args().skip(1), config.load)?;
    if args.usernames.is_empty() {
        match &config.username {
            Some(name) => args.usernames.push(name.clone()),
            None => bail!("no username given and none set in config.toml\n{USAGE}"),
        }
    }

    let results = join_all(
        args.usernames
            .iter()
            .map(|name| fetch(&config, name.clone(), args.options)),
    )
    .await;

    let mut failed = false;
    for (name, result) in args.usernames.iter().zip(results) {
        match result {
            Ok(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            Err(e) => {
                eprintln!("{name}: {e:#}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(args(&["alice", "--total", "--recent=3", "bob"]), LoadOptions::default()).unwrap();
        assert_eq!(parsed.usernames, ["alice", "bob"]);
        assert!(parsed.options.total_count && parsed.options.recent);
        assert_eq!(parsed.options.recent_limit, 3);
        assert!(!parsed.options.streak);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_args(args(&["--recent=0"]), LoadOptions::default()).is_err());
        assert!(parse_args(args(&["--recent=abc"]), LoadOptions::default()).is_err());
        assert!(parse_args(args(&["--chart"]), LoadOptions::default()).is_err());
    }

    #[test]
    fn test_all_keeps_configured_limit() {
        let defaults = LoadOptions::default().recent_limit(5);
        let parsed = parse_args(args(&["--all"]), defaults).unwrap();
        assert_eq!(parsed.options, LoadOptions::all().recent_limit(5));
    }
}
