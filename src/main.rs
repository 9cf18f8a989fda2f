use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fidelio::ui::App;
use fidelio::Config;

/// Classical ciphers and textbook RSA, from a terminal menu
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Prime table file (whitespace-separated integers)
    #[arg(long)]
    primes: Option<PathBuf>,
    /// Symbols per RSA packet
    #[arg(long)]
    group_size: Option<usize>,
    /// Public exponent draws before key generation gives up
    #[arg(long)]
    max_attempts: Option<usize>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("reading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(path) = cli.primes {
        config = config.with_prime_table(path);
    }
    if let Some(size) = cli.group_size {
        config = config.with_group_size(size);
    }
    if let Some(attempts) = cli.max_attempts {
        config = config.with_max_attempts(attempts);
    }

    let stdin = io::stdin();
    let mut app = App::new(config, stdin.lock(), io::stdout());
    app.load_saved_keys();
    app.run().context("terminal I/O failed")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error running application: {:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(["fidelio", "--group-size", "3", "--max-attempts", "25"]);
        assert_eq!(cli.group_size, Some(3));
        assert_eq!(cli.max_attempts, Some(25));
        assert!(cli.config.is_none());
    }
}
