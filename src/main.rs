//! urlstate - Entry Point

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

use urlstate::codec;
use urlstate::config::ResolvedConfig;
use urlstate::merge::deep_merge;
use urlstate::model::{AppError, MergeInputError, ParamValue};

/// urlstate - rewrite URL query state and deep-merge JSON configuration
#[derive(Parser, Debug)]
#[command(name = "urlstate")]
#[command(version)]
#[command(about = "URL query-state codec and configuration deep-merge utilities")]
pub struct Args {
    /// Base path prepended to rewritten query strings (default "/")
    #[arg(short, long)]
    pub base: Option<String>,

    /// Print parsed state as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Query-state and merge operations.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a query string and print its key-value state
    Get {
        /// Query string (bare, with leading '?', or full path?query)
        query: String,
    },

    /// Set KEY to VALUE in QUERY and print the rewritten path?query
    Set {
        /// Query string to rewrite
        query: String,
        /// Key to set
        key: String,
        /// Value to assign; omit to delete the key (skip-null)
        value: Option<String>,
    },

    /// Remove keys from QUERY and print the rewritten path?query
    Unset {
        /// Query string to rewrite
        query: String,
        /// Keys to remove (missing keys are ignored)
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Deep-merge two JSON documents (primary wins) and print the result
    Merge {
        /// Primary document: inline JSON or @path-to-file
        primary: String,
        /// Secondary document: inline JSON or @path-to-file; omit for identity
        secondary: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = urlstate::config::load_config_with_precedence(args.config.clone())?;
        let merged = urlstate::config::merge_config(config_file);
        let with_env = urlstate::config::apply_env_overrides(merged);

        // --json is a bare flag: only treat it as an override when set
        let json_override = if args.json { Some(true) } else { None };
        urlstate::config::apply_cli_overrides(with_env, args.base.clone(), json_override)
    };

    urlstate::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let output = run_command(&args.command, &config)?;
    println!("{output}");

    Ok(())
}

/// Execute a subcommand against the resolved configuration.
///
/// Only `merge` can fail (its JSON inputs come from the user); the query
/// operations are total.
fn run_command(command: &Command, config: &ResolvedConfig) -> Result<String, AppError> {
    match command {
        Command::Get { query } => {
            let state = codec::parse(query);
            info!(entries = state.len(), "Parsed query state");
            Ok(render_state(&state, config.json_output))
        }
        Command::Set { query, key, value } => {
            let value = match value {
                Some(raw) => coerce_value(raw),
                None => ParamValue::Null,
            };
            Ok(codec::upsert(&config.base_path, query, key, value))
        }
        Command::Unset { query, keys } => {
            Ok(codec::remove_keys(&config.base_path, query, keys))
        }
        Command::Merge { primary, secondary } => {
            let primary = load_document(primary, "primary")?;
            let secondary = secondary
                .as_deref()
                .map(|raw| load_document(raw, "secondary"))
                .transpose()?;
            let merged = deep_merge(&primary, secondary.as_ref());
            // A tree of JSON values always re-serializes
            Ok(serde_json::to_string_pretty(&merged).unwrap_or_default())
        }
    }
}

/// Interpret a CLI value: numbers stay numbers, everything else is text.
fn coerce_value(raw: &str) -> ParamValue {
    if let Ok(n) = raw.parse::<i64>() {
        return ParamValue::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return ParamValue::Number(n);
        }
    }
    ParamValue::from(raw)
}

/// Render parsed state as `key=value` lines or a JSON object.
fn render_state(state: &urlstate::model::QueryState, json: bool) -> String {
    if json {
        let mut map = serde_json::Map::new();
        for (key, value) in state.iter() {
            let json_value = match value {
                ParamValue::Text(s) => Value::String(s.clone()),
                ParamValue::Number(n) => Value::Number(n.clone()),
                ParamValue::Null => Value::Null,
            };
            map.insert(key.to_string(), json_value);
        }
        // A Map of scalars always serializes
        serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default()
    } else {
        state
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Load a merge document: `@path` reads a file, anything else is inline JSON.
fn load_document(raw: &str, role: &'static str) -> Result<Value, MergeInputError> {
    let text = match raw.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|source| MergeInputError::FileRead {
                path: PathBuf::from(path),
                source,
            })?
        }
        None => raw.to_string(),
    };

    serde_json::from_str(&text).map_err(|e| MergeInputError::InvalidJson {
        role,
        message: e.to_string(),
    })
}
