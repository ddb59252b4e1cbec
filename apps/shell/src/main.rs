#![allow(clippy::print_stdout)]

mod args;
mod seed;
mod settings;

use crate::args::{Cli, Command};
use crate::settings::load_config;
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use strata_drive::{Drive, TenantDrive};
use strata_logger::Logger;
use strata_object_store::{MemoryStore, ObjectStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _logger = Logger::from_settings(env!("CARGO_PKG_NAME"), &config.log)?;

    let store = MemoryStore::with_config(config.store);
    let drive = Drive::builder().store(store).config(config.drive).build()?;
    let tenant = drive.tenant(cli.tenant.as_str())?;

    if let Some(root) = &cli.seed {
        seed::seed(&tenant, root).await?;
    }

    run(&tenant, cli.command).await
}

async fn run<S: ObjectStore>(drive: &TenantDrive<S>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Tree { dir } => emit(&drive.subtree(&dir).await?),
        Command::Ls { dir } => emit(&drive.list_files(&dir).await?),
        Command::Mkdir { dir } => emit(&json!({ "created": drive.create_directory(&dir).await? })),
        Command::Put { dir, file } => {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("{} has no file name", file.display()))?;
            let content = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            emit(&json!({ "uploaded": drive.upload_file(&dir, &name, content).await? }))
        },
        Command::Cat { dir, name } => {
            let content = drive.download_file(&dir, &name).await?;
            println!("{}", String::from_utf8_lossy(&content));
            Ok(())
        },
        Command::RenameDir { from, to } => {
            emit(&json!({ "moved": drive.rename_directory(&from, &to).await? }))
        },
        Command::RenameFile { dir, from, to } => {
            emit(&json!({ "renamed": drive.rename_file(&dir, &from, &to).await? }))
        },
        Command::RmDir { dir } => emit(&drive.delete_directory(&dir).await?),
        Command::Rm { dir, name } => {
            drive.delete_file(&dir, &name).await?;
            emit(&json!({ "deleted": drive.key([dir.as_str(), name.as_str()])? }))
        },
        Command::Mv { src, dst, name } => {
            emit(&json!({ "moved": drive.move_file(&src, &dst, &name).await? }))
        },
        Command::Cp { src, dst, name } => {
            emit(&json!({ "copied": drive.copy_file(&src, &dst, &name).await? }))
        },
    }
}

fn emit(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
