use anyhow::Context;
use std::path::{Path, PathBuf};
use strata_drive::TenantDrive;
use strata_object_store::ObjectStore;
use tracing::info;
use walkdir::WalkDir;

/// A local file and where it lands in the tenant's namespace.
#[derive(Debug)]
struct SeedFile {
    dir: String,
    name: String,
    path: PathBuf,
}

/// Uploads every file below `root` into the tenant's namespace, keeping relative paths.
/// Empty local directories become directory markers.
pub(crate) async fn seed<S: ObjectStore>(drive: &TenantDrive<S>, root: &Path) -> anyhow::Result<usize> {
    let walk_root = root.to_path_buf();
    let (files, empty_dirs) = tokio::task::spawn_blocking(move || collect(&walk_root))
        .await
        .context("Seed directory scan panicked")??;

    for dir in &empty_dirs {
        drive.create_directory(dir).await?;
    }
    for file in &files {
        let content = tokio::fs::read(&file.path)
            .await
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        drive.upload_file(&file.dir, &file.name, content).await?;
    }

    info!(root = %root.display(), files = files.len(), directories = empty_dirs.len(), "Bucket seeded");
    Ok(files.len())
}

fn collect(root: &Path) -> anyhow::Result<(Vec<SeedFile>, Vec<String>)> {
    let mut files = Vec::new();
    let mut empty_dirs = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to scan {}", root.display()))?;
        let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
        let relative = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_file() {
            let (dir, name) = relative.rsplit_once('/').unwrap_or(("", relative.as_str()));
            files.push(SeedFile {
                dir: dir.to_owned(),
                name: name.to_owned(),
                path: entry.path().to_path_buf(),
            });
        } else if entry.file_type().is_dir() && is_empty_dir(entry.path()) {
            empty_dirs.push(relative);
        }
    }

    Ok((files, empty_dirs))
}

fn is_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use strata_drive::Drive;
    use strata_object_store::MemoryStore;

    #[tokio::test]
    async fn test_seed_mirrors_local_tree() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("docs/été")).unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();
        fs::write(tmp.path().join("readme.md"), "hi").unwrap();
        fs::write(tmp.path().join("docs/été/plage.txt"), "sun").unwrap();

        let store = MemoryStore::new();
        let drive = Drive::builder().store(store.clone()).build().unwrap();
        let alice = drive.tenant("alice").unwrap();

        let uploaded = seed(&alice, tmp.path()).await.unwrap();

        assert_eq!(uploaded, 2);
        assert_eq!(
            store.keys(),
            vec!["alice/docs/ete/plage.txt", "alice/empty/.keep", "alice/readme.md"]
        );
    }
}
