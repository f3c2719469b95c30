use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spacestore",
    about = "Spacestore — sharded blob storage and identifier cache",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with `[blobstore]` and `[idcache]` sections
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Store, fetch, and remove blobs
    Blob(BlobArgs),
    /// Query and update the identifier cache
    Cache(CacheArgs),
}

#[derive(Args)]
pub struct BlobArgs {
    #[command(subcommand)]
    pub action: BlobAction,
}

#[derive(Subcommand)]
pub enum BlobAction {
    /// Print where a blob lives on disk
    Path { space_id: String, blob_id: String },
    /// Move or copy a file into the store
    Upload {
        space_id: String,
        blob_id: String,
        source: PathBuf,
        /// Always copy and keep the source file
        #[arg(long)]
        copy: bool,
    },
    /// Write a blob to a file or stdout after checking its size
    Download {
        space_id: String,
        blob_id: String,
        size: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove a blob
    Delete { space_id: String, blob_id: String },
}

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

#[derive(Subcommand)]
pub enum CacheAction {
    /// Associate a value with a space/node pair
    Set {
        space_id: String,
        node_id: String,
        value: String,
    },
    /// Look up the value for a space/node pair
    Get { space_id: String, node_id: String },
    /// Look up the space/node pair for a value
    Reverse { value: String },
    /// Drop a space/node pair and its reverse record
    Invalidate { space_id: String, node_id: String },
}
