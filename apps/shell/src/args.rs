//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "strata")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Browse and reshape a tenant's directories in an in-memory bucket")]
pub(crate) struct Cli {
    /// Configuration file (TOML, JSON or YAML); `STRATA__*` variables override it
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Tenant whose namespace the command operates on
    #[arg(short, long, default_value = "demo")]
    pub(crate) tenant: String,

    /// Local directory uploaded into the tenant's namespace before the command runs
    #[arg(short, long)]
    pub(crate) seed: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the folder/file tree below a directory
    Tree {
        #[arg(default_value = "")]
        dir: String,
    },
    /// List one directory level
    Ls {
        #[arg(default_value = "")]
        dir: String,
    },
    /// Create an empty directory
    Mkdir { dir: String },
    /// Upload a local file
    Put { dir: String, file: PathBuf },
    /// Print a file's content
    Cat { dir: String, name: String },
    /// Rename (move) a directory and everything below it
    RenameDir { from: String, to: String },
    /// Rename a file inside its directory
    RenameFile { dir: String, from: String, to: String },
    /// Delete a directory and everything below it
    RmDir { dir: String },
    /// Delete a file
    Rm { dir: String, name: String },
    /// Move a file to another directory
    Mv { src: String, dst: String, name: String },
    /// Copy a file to another directory
    Cp { src: String, dst: String, name: String },
}
