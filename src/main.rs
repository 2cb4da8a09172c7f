//! FKS Hash - Main entrypoint.
//!
//! Command line front end for building perfect hash maps over key files,
//! probing them, and managing the configuration that drives construction.

use clap::{Parser, Subcommand};
use fks_hash_lib::config::{ConfigLoader, FksConfig, LogConfig, ENV_PREFIX};
use fks_hash_lib::{FksError, FksResult, PerfectHashMap};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the FKS hash tool.
#[derive(Parser, Debug)]
#[clap(name = "fks-hash", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Build a map over a key file and print construction statistics
    Build {
        /// File with one key per line
        #[clap(short, long, value_parser)]
        keys: PathBuf,

        /// Print statistics as JSON
        #[clap(long)]
        json: bool,
    },

    /// Build a map whose values are line numbers and look up probes
    Lookup {
        /// File with one key per line
        #[clap(short, long, value_parser)]
        keys: PathBuf,

        /// Keys to look up
        #[clap(required = true)]
        probes: Vec<String>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so command output on stdout stays machine readable.
fn init_logging(log: &LogConfig) -> FksResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| FksError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Reads one key per line, skipping blank lines.
///
/// Each key is paired with its 1-based line number.
fn read_keys(path: &Path) -> FksResult<Vec<(String, usize)>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(index, line)| (line.to_string(), index + 1))
        .collect())
}

fn build(config: &FksConfig, keys: &Path, json: bool) -> FksResult<()> {
    let entries = read_keys(keys)?;
    info!(keys = entries.len(), path = ?keys, "Building perfect hash map");

    let map: PerfectHashMap<String, ()> =
        PerfectHashMap::with_config(entries.into_iter().map(|(key, _)| key), config.table.clone())?;
    let stats = map.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        println!("keys:                   {}", stats.keys);
        println!("modulus:                {}", stats.modulus);
        println!("hash seed:              {:#x}", stats.hash_seed);
        println!("rehashes:               {}", stats.rehashes);
        println!("first-level buckets:    {}", stats.first_level_size);
        println!("first-level multiplier: {}", stats.first_level_multiplier);
        println!("first-level attempts:   {}", stats.first_level_attempts);
        println!("largest bucket:         {}", stats.max_bucket);
        println!("occupied buckets:       {}", stats.occupied_buckets);
        println!("second-level slots:     {}", stats.second_level_slots);
        println!("second-level attempts:  {}", stats.second_level_attempts);
        println!("exhaustive fallbacks:   {}", stats.exhaustive_fallbacks);
    }
    Ok(())
}

fn lookup(config: &FksConfig, keys: &Path, probes: &[String]) -> FksResult<()> {
    let entries = read_keys(keys)?;
    let map: PerfectHashMap<String, usize> = PerfectHashMap::with_config(
        entries.iter().map(|(key, _)| key.clone()),
        config.table.clone(),
    )?;

    // A repeated key keeps its last line number.
    for (key, line) in entries {
        map.put(&key, line)?;
    }

    for probe in probes {
        match map.get(probe.as_str()) {
            Some(line) => println!("{probe}\t{line}"),
            None => println!("{probe}\tabsent"),
        }
    }
    Ok(())
}

fn gen_config(output: &Path) -> FksResult<()> {
    info!("Generating default configuration");
    let default_config = FksConfig::default();

    // Create parent directories if they don't exist
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| FksError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

/// Main entry point for the application.
fn main() -> FksResult<()> {
    let args = Args::parse();
    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    // gen-config must work even when the current configuration is broken.
    if let Command::GenConfig { output } = &args.command {
        init_logging(&LogConfig::default())?;
        return gen_config(output);
    }

    let config = match config_loader.load() {
        Ok(config) => config,
        Err(e) => {
            init_logging(&LogConfig::default())?;
            tracing::error!("Configuration error: {}", e);
            process::exit(1);
        }
    };
    init_logging(&config.log)?;

    let result = match &args.command {
        Command::Build { keys, json } => build(&config, keys, *json),
        Command::Lookup { keys, probes } => lookup(&config, keys, probes),
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { .. } => Ok(()),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Command failed");
    }
    result
}
