//! CLI command definitions and dispatch.
//!
//! Each group of subcommands is implemented in its own submodule:
//! - `extract`: artist, album, album list and lyrics extraction
//! - `maintenance`: snapshot cache and config file handling
//! - `output`: human-readable summaries and JSON output

mod extract;
mod maintenance;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;

use liner_notes::config::{self, Config};
use liner_notes::document::Language;
use liner_notes::source::{DocumentSource, HttpFetcher, SnapshotCache};

pub use extract::{cmd_album, cmd_albums, cmd_artist, cmd_lyrics};
pub use maintenance::{cmd_clear_cache, cmd_config};

/// Liner Notes CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: SourceOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct SourceOptions {
    /// Language of plain queries (en, fa, tr, ...)
    #[arg(short, long, global = true, env = "LINER_NOTES_LANG")]
    pub lang: Option<String>,

    /// Read and write page snapshots instead of always fetching
    #[arg(long, global = true, env = "LINER_NOTES_CACHE")]
    pub cache: bool,

    /// Snapshot directory (implies --cache)
    #[arg(long, global = true, env = "LINER_NOTES_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract an artist's biography from Wikipedia
    Artist {
        /// Article URL or artist name
        target: String,
        /// Read the same article in another language edition
        #[arg(long)]
        translate: Option<String>,
    },
    /// Extract an album and its track list
    Album {
        /// Article or search URL, or album name
        target: String,
        /// Search Google instead of Wikipedia for plain queries
        #[arg(long)]
        google: bool,
        /// Read the same article in another language edition
        #[arg(long)]
        translate: Option<String>,
    },
    /// Extract an artist's album list from Wikipedia
    Albums {
        /// Artist or discography article URL, or artist name
        target: String,
        /// Also read the separate discography article, if linked
        #[arg(long)]
        discography: bool,
        /// Read the same article in another language edition
        #[arg(long)]
        translate: Option<String>,
    },
    /// Extract song lyrics and their attribution from Google
    Lyrics {
        /// Search URL or song name
        target: String,
    },
    /// Remove every page snapshot
    ClearCache,
    /// Show the config file location and effective settings
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = effective_config(config::load(), &cli.options);
    let json = cli.options.json;

    match &cli.command {
        Commands::ClearCache => return cmd_clear_cache(&snapshot_cache(&config)),
        Commands::Config { save } => return cmd_config(&config, *save),
        _ => {}
    }

    let rt = Runtime::new()?;
    let source = document_source(&config)?;
    let language = config.extract.language();

    match &cli.command {
        Commands::Artist { target, translate } => {
            cmd_artist(&rt, &source, target, &language, translate.as_deref(), json)
        }
        Commands::Album {
            target,
            google,
            translate,
        } => cmd_album(&rt, &source, target, &language, *google, translate.as_deref(), json),
        Commands::Albums {
            target,
            discography,
            translate,
        } => cmd_albums(
            &rt,
            &source,
            target,
            &language,
            *discography,
            translate.as_deref(),
            json,
        ),
        Commands::Lyrics { target } => cmd_lyrics(&rt, &source, target, &language, json),
        Commands::ClearCache | Commands::Config { .. } => Ok(()),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Apply command-line overrides on top of the config file.
fn effective_config(mut config: Config, options: &SourceOptions) -> Config {
    if let Some(lang) = &options.lang {
        config.extract.default_language = Language::new(lang).to_string();
    }
    if options.cache || options.cache_dir.is_some() {
        config.fetch.cache_mode = true;
    }
    if let Some(dir) = &options.cache_dir {
        config.fetch.cache_dir = Some(dir.clone());
    }
    config
}

fn snapshot_cache(config: &Config) -> SnapshotCache {
    match &config.fetch.cache_dir {
        Some(dir) => SnapshotCache::new(dir),
        None => SnapshotCache::default_location(),
    }
}

fn document_source(config: &Config) -> anyhow::Result<DocumentSource<HttpFetcher>> {
    let fetcher = HttpFetcher::new(&config.fetch.user_agent, config.fetch.timeout())?;
    if config.fetch.cache_mode {
        let cache = snapshot_cache(config);
        tracing::debug!(dir = %cache.dir().display(), "Using page snapshots");
        Ok(DocumentSource::cached(fetcher, cache))
    } else {
        Ok(DocumentSource::live(fetcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::try_parse_from([
            "liner-notes",
            "album",
            "A Night at the Opera",
            "--google",
            "--cache-dir",
            "/tmp/pages",
            "--json",
        ])
        .unwrap();

        assert!(cli.options.json);
        assert!(matches!(cli.command, Commands::Album { google: true, .. }));

        let config = effective_config(Config::default(), &cli.options);
        assert!(config.fetch.cache_mode);
        assert_eq!(config.fetch.cache_dir, Some(PathBuf::from("/tmp/pages")));
    }

    #[test]
    fn test_lang_override() {
        let options = SourceOptions {
            lang: Some(" FA ".into()),
            ..Default::default()
        };
        let config = effective_config(Config::default(), &options);
        assert_eq!(config.extract.language(), Language::new("fa"));
        assert!(!config.fetch.cache_mode);
    }
}
