use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use zeroize::Zeroizing;

use primeshare::cli::{Cli, Commands};
use primeshare::commands::{
    hide_message, inspect_share, max_length, message_limits, recover_message, share_format,
};
use primeshare::Config;

/// Read a message securely from stdin (hidden input when TTY available)
fn read_message() -> Result<Zeroizing<String>> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter message:");
        let message = rpassword::read_password().context("Failed to read message from stdin")?;
        Ok(Zeroizing::new(message))
    } else {
        // Piped input: take everything, minus one trailing newline
        let mut message = Zeroizing::new(String::new());
        io::stdin()
            .lock()
            .read_to_string(&mut message)
            .context("Failed to read message from stdin")?;
        if message.ends_with('\n') {
            message.pop();
            if message.ends_with('\r') {
                message.pop();
            }
        }
        Ok(message)
    }
}

/// Read shares securely from stdin (hidden input when TTY available)
/// User should input shares one per line, followed by an empty line to finish
fn read_shares() -> Result<Vec<Zeroizing<String>>> {
    let mut shares = Vec::new();

    if atty::is(atty::Stream::Stdin) {
        eprintln!("Enter shares (one per line, empty line to finish):");

        loop {
            let share = Zeroizing::new(
                rpassword::read_password().context("Failed to read share from stdin")?,
            );
            if share.trim().is_empty() {
                break;
            }
            shares.push(Zeroizing::new(share.trim().to_string()));
        }
    } else {
        for line in io::stdin().lock().lines() {
            let line = Zeroizing::new(line.context("Failed to read line from stdin")?);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            shares.push(Zeroizing::new(trimmed.to_string()));
        }
    }

    if shares.is_empty() {
        anyhow::bail!("No shares provided");
    }

    Ok(shares)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hide {
            shares,
            threshold,
            prime,
            wide,
        } => {
            let message = read_message()?;

            let mut config = Config::new(shares, *threshold).with_format(share_format(wide));
            if let Some(prime) = prime {
                config = config.with_prime(prime);
            }

            let hidden = hide_message(message.as_bytes(), &config)?;
            eprintln!("{}:", hidden.summary());
            for share in &hidden.shares {
                println!("{share}");
            }
        }
        Commands::Recover { prime } => {
            let shares = read_shares()?;
            let config = Config {
                prime,
                ..Config::default()
            };

            let shares: Vec<&str> = shares.iter().map(|share| share.as_str()).collect();
            let message = recover_message(&shares, &config)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&message)
                .and_then(|()| stdout.flush())
                .context("Failed to write recovered message")?;
        }
        Commands::Limits { wide } => {
            let message = read_message()?;
            let limits = message_limits(message.as_bytes(), wide)?;
            println!("shares:    {} to {}", limits.min_shares, limits.max_shares);
            println!(
                "threshold: {} to {}",
                limits.min_threshold, limits.max_threshold
            );
        }
        Commands::MaxLength { prime, wide } => {
            let config = Config {
                prime,
                format: share_format(wide),
                ..Config::default()
            };
            println!("{}", max_length(&config)?);
        }
        Commands::Inspect { share } => {
            let info = inspect_share(&share)?;
            println!("chunk: {}", info.chunk);
            println!("x:     {}", info.x);
            println!("width: {}", info.width);
            println!("wide:  {}", info.wide);
        }
    }

    Ok(())
}
