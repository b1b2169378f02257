//! feedstream - manage feeds, streams and stream assignments
//!
//! CLI entry point for the feed service client.

mod config;
mod display;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use feedstream_core::{ApiClient, ApiError};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Command-line client for the feed aggregation service
#[derive(Parser, Debug)]
#[command(name = "feedstream", version, about)]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/feedstream/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every request and response status to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage feeds
    #[command(subcommand, visible_alias = "f")]
    Feeds(FeedCommand),

    /// Manage streams
    #[command(subcommand, visible_alias = "s")]
    Streams(StreamCommand),

    /// Assign feeds to streams
    #[command(subcommand, visible_alias = "a")]
    Assignments(AssignmentCommand),
}

#[derive(Subcommand, Debug)]
enum FeedCommand {
    /// List feeds
    List,

    /// Create a feed
    Create {
        /// URI of the feed
        #[arg(short, long)]
        uri: String,

        /// Fetch the feed with the service's alternate (Googlebot) agent
        #[arg(short, long)]
        googlebot: bool,
    },
}

#[derive(Subcommand, Debug)]
enum StreamCommand {
    /// List streams
    List,

    /// Create a stream
    Create {
        /// Name of the stream
        #[arg(short, long)]
        name: String,

        /// Permalink slug; the service derives one from the name if omitted
        #[arg(short, long)]
        permalink: Option<String>,
    },

    /// List the feeds assigned to a stream
    Feeds {
        /// Stream id
        #[arg(short, long)]
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum AssignmentCommand {
    /// Assign a feed to a stream
    Create {
        /// Stream id
        #[arg(short, long)]
        stream: String,

        /// Feed id
        #[arg(short, long)]
        feed: String,
    },

    /// Remove every assignment of a feed to a stream
    Destroy {
        /// Stream id
        #[arg(short, long)]
        stream: String,

        /// Feed id
        #[arg(short, long)]
        feed: String,
    },
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_feeds(api: &ApiClient, command: FeedCommand) -> Result<()> {
    match command {
        FeedCommand::List => {
            let feeds = api.list_feeds().context("Failed to list feeds")?;
            display::print_feeds(&feeds);
        }
        FeedCommand::Create { uri, googlebot } => {
            let feed = api
                .create_feed(&uri, googlebot)
                .with_context(|| format!("Failed to create feed '{uri}'"))?;
            println!("{}", feed.id);
        }
    }
    Ok(())
}

fn run_streams(api: &ApiClient, command: StreamCommand) -> Result<()> {
    match command {
        StreamCommand::List => {
            let streams = api.list_streams().context("Failed to list streams")?;
            display::print_streams(&streams);
        }
        StreamCommand::Create { name, permalink } => {
            let stream = api
                .create_stream(&name, permalink.as_deref())
                .with_context(|| format!("Failed to create stream '{name}'"))?;
            println!("{}", stream.id);
        }
        StreamCommand::Feeds { id } => {
            let entries = api
                .list_stream_feeds(&id)
                .with_context(|| format!("Failed to list feeds of stream '{id}'"))?;
            display::print_stream_feeds(&entries);
        }
    }
    Ok(())
}

fn run_assignments(api: &ApiClient, command: AssignmentCommand) -> Result<()> {
    match command {
        AssignmentCommand::Create { stream, feed } => {
            let assignment = api.create_assignment(&stream, &feed).with_context(|| {
                format!("Failed to assign feed '{feed}' to stream '{stream}'")
            })?;
            println!("{}", assignment.id);
        }
        AssignmentCommand::Destroy { stream, feed } => {
            match api.destroy_assignment(&stream, &feed) {
                Ok(0) => eprintln!("{}", "No matching assignment".dimmed()),
                Ok(deleted) => println!("Removed {deleted} assignment(s)"),
                Err(err) => {
                    if let ApiError::PartialDeletion { deleted, .. } = &err {
                        eprintln!(
                            "{} removed {deleted} assignment(s) before failing",
                            "Warning:".yellow().bold()
                        );
                    }
                    return Err(err).with_context(|| {
                        format!("Failed to remove feed '{feed}' from stream '{stream}'")
                    });
                }
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let api = ApiClient::connect(&settings);

    match cli.command {
        Command::Feeds(command) => run_feeds(&api, command),
        Command::Streams(command) => run_streams(&api, command),
        Command::Assignments(command) => run_assignments(&api, command),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn aliases_resolve_to_resource_commands() {
        let args = ["feedstream", "f", "create", "-u", "https://example.com/rss", "-g"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Feeds(FeedCommand::Create { uri, googlebot }) => {
                assert_eq!(uri, "https://example.com/rss");
                assert!(googlebot);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn googlebot_defaults_to_false() {
        let cli = Cli::try_parse_from(["feedstream", "feeds", "create", "--uri", "u"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Feeds(FeedCommand::Create { googlebot: false, .. })
        ));
    }

    #[test]
    fn destroy_requires_stream_and_feed() {
        assert!(Cli::try_parse_from(["feedstream", "a", "destroy", "-s", "s1"]).is_err());
        let args = ["feedstream", "a", "destroy", "-s", "s1", "-f", "f1"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Assignments(AssignmentCommand::Destroy { .. })
        ));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = ["feedstream", "s", "list", "--config", "/tmp/x.toml", "-v"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }
}
