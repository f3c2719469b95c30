use std::fs::File;
use std::io::{self, Write};

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use spacestore_blob::{Blobstore, Placement};
use spacestore_idcache::{IdCache, StoreIdCache};

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");
    match cli.command {
        Command::Blob(args) => cmd_blob(config, args.action, cli.format),
        Command::Cache(args) => cmd_cache(config, args.action, cli.format),
    }
}

fn emit(format: OutputFormat, text: String, value: serde_json::Value) {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => println!("{value}"),
    }
}

fn cmd_blob(config: Config, action: BlobAction, format: OutputFormat) -> anyhow::Result<()> {
    let mut blob_config = config.blobstore;
    if let BlobAction::Upload { copy: true, .. } = &action {
        blob_config.placement = Placement::CopyOnly;
    }
    let store = Blobstore::with_config(blob_config).context("opening blobstore")?;

    match action {
        BlobAction::Path { space_id, blob_id } => {
            let path = store.path(&space_id, &blob_id)?;
            emit(
                format,
                path.display().to_string(),
                json!({ "space_id": space_id, "blob_id": blob_id, "path": path }),
            );
        }
        BlobAction::Upload { space_id, blob_id, source, .. } => {
            let size = std::fs::metadata(&source)
                .with_context(|| format!("reading {}", source.display()))?
                .len();
            store.upload(&space_id, &blob_id, size, &source)?;
            emit(
                format,
                format!("{} Stored {}/{} ({} bytes)", "✓".green().bold(), space_id.cyan(), blob_id.yellow(), size),
                json!({ "space_id": space_id, "blob_id": blob_id, "size": size }),
            );
        }
        BlobAction::Download { space_id, blob_id, size, output } => {
            let mut blob = store.download(&space_id, &blob_id, size)?;
            match output {
                Some(path) => {
                    let mut out = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    io::copy(&mut blob, &mut out)?;
                    emit(
                        format,
                        format!("{} Wrote {} bytes to {}", "✓".green().bold(), size, path.display()),
                        json!({ "space_id": space_id, "blob_id": blob_id, "size": size, "output": path }),
                    );
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    io::copy(&mut blob, &mut stdout)?;
                    stdout.flush()?;
                }
            }
        }
        BlobAction::Delete { space_id, blob_id } => {
            store.delete(&space_id, &blob_id)?;
            emit(
                format,
                format!("{} Deleted {}/{}", "✓".green().bold(), space_id.cyan(), blob_id.yellow()),
                json!({ "space_id": space_id, "blob_id": blob_id, "deleted": true }),
            );
        }
    }
    Ok(())
}

fn cmd_cache(config: Config, action: CacheAction, format: OutputFormat) -> anyhow::Result<()> {
    let cache = StoreIdCache::new(&config.idcache)
        .with_context(|| format!("opening {} id cache", config.idcache.store))?;

    match action {
        CacheAction::Set { space_id, node_id, value } => {
            cache.set(&space_id, &node_id, &value)?;
            emit(
                format,
                format!("{} {}!{} → {}", "✓".green().bold(), space_id.cyan(), node_id.yellow(), value),
                json!({ "space_id": space_id, "node_id": node_id, "value": value }),
            );
        }
        CacheAction::Get { space_id, node_id } => {
            let value = cache.get(&space_id, &node_id);
            let text = match &value {
                Some(v) => v.clone(),
                None => "(miss)".dimmed().to_string(),
            };
            emit(
                format,
                text,
                json!({ "space_id": space_id, "node_id": node_id, "value": value }),
            );
        }
        CacheAction::Reverse { value } => {
            let pair = cache.get_reverse(&value);
            let text = match &pair {
                Some((space_id, node_id)) => format!("{} {}", space_id.cyan(), node_id.yellow()),
                None => "(miss)".dimmed().to_string(),
            };
            let body = match pair {
                Some((space_id, node_id)) => json!({ "value": value, "space_id": space_id, "node_id": node_id }),
                None => json!({ "value": value, "space_id": null, "node_id": null }),
            };
            emit(format, text, body);
        }
        CacheAction::Invalidate { space_id, node_id } => {
            cache.invalidate(&space_id, &node_id)?;
            emit(
                format,
                format!("{} Invalidated {}!{}", "✓".green().bold(), space_id.cyan(), node_id.yellow()),
                json!({ "space_id": space_id, "node_id": node_id, "invalidated": true }),
            );
        }
    }
    Ok(())
}
