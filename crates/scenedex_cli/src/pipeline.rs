//! Shared pipeline helpers for CLI commands.
//!
//! Contains the steps both `index` and `query` run: configuration loading,
//! scene file discovery, and the build-resume-commit loop that fills an
//! [`AssetCache`].

use std::num::NonZeroUsize;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use scenedex_cache::{AssetCache, BuildOutcome, BuildProgress};
use scenedex_config::{BuildConfig, IndexConfig, ScanConfig};
use serde::Serialize;

use crate::{GlobalArgs, SourceArgs};

/// What indexing one file produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// The indexed file.
    pub path: PathBuf,
    /// Documents extracted from the file.
    pub documents: usize,
    /// Total references counted in the file.
    pub references: u64,
    /// Build calls needed to finish the file.
    pub passes: usize,
}

/// Loads the configuration named by `--config`, or `scenedex.toml` from the
/// current directory when present.
pub fn load_config(global: &GlobalArgs) -> Result<IndexConfig, Box<dyn std::error::Error>> {
    let config = match global.config {
        Some(ref path) => scenedex_config::load_config_file(Path::new(path))?,
        None => scenedex_config::load_config(&std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Expands the given paths into the scene files to index.
///
/// Files named explicitly are always included; directories are scanned
/// recursively for the configured extensions. Results are sorted and
/// deduplicated.
pub fn discover_scene_files(
    paths: &[PathBuf],
    scan: &ScanConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, scan, &mut files);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(format!("no such file or directory: {}", path.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, scan: &ScanConfig, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("skipping {}: {e}", dir.display());
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, scan, files);
        } else if is_scene_file(&path, scan) {
            files.push(path);
        }
    }
}

/// Returns `true` if the file's extension is one of the configured ones.
pub fn is_scene_file(path: &Path, scan: &ScanConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| scan.matches_extension(ext))
}

/// Applies `--batch-size` on top of the configured build settings.
pub fn build_config(config: &IndexConfig, args: &SourceArgs) -> BuildConfig {
    match args.batch_size {
        Some(size) => BuildConfig::with_batch_size(size.get()),
        None => config.build.clone(),
    }
}

/// Resolves configuration and files, then indexes and commits every file.
pub fn index_sources(
    args: &SourceArgs,
    global: &GlobalArgs,
) -> Result<(AssetCache, Vec<FileSummary>), Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let files = discover_scene_files(&args.paths, &config.scan)?;
    if files.is_empty() && !global.quiet {
        eprintln!("warning: no scene files found");
    }

    let mut cache = AssetCache::new(&build_config(&config, args));
    let mut summaries = Vec::with_capacity(files.len());
    for path in &files {
        let summary = index_file(&mut cache, path, args.interrupt_every)?;
        if !global.quiet {
            eprintln!(
                "   Indexed {} ({} documents)",
                summary.path.display(),
                summary.documents
            );
        }
        summaries.push(summary);
    }
    Ok((cache, summaries))
}

/// Builds `path` to completion and commits it.
///
/// With `interrupt_every`, the build is stopped after that many checkpoints
/// and resumed until it completes.
pub fn index_file(
    cache: &mut AssetCache,
    path: &Path,
    interrupt_every: Option<NonZeroUsize>,
) -> Result<FileSummary, Box<dyn std::error::Error>> {
    let mut documents = 0;
    let mut passes = 0;
    let index = loop {
        passes += 1;
        let mut checkpoints = 0;
        let mut signal = |progress: &BuildProgress| {
            documents = progress.documents_total;
            checkpoints += 1;
            match interrupt_every {
                Some(n) if checkpoints % n.get() == 0 => ControlFlow::Break(()),
                _ => ControlFlow::Continue(()),
            }
        };
        match cache.build(path, &mut signal)? {
            BuildOutcome::Complete(index) => break index,
            BuildOutcome::Cancelled(progress) => {
                log::debug!(
                    "{}: resuming after {} documents",
                    path.display(),
                    progress.documents_total
                );
            }
        }
    };

    let summary = FileSummary {
        path: path.to_path_buf(),
        documents,
        references: index.reference_count(),
        passes,
    };
    cache.commit(path, index);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenedex_common::Anchor;
    use std::fs;
    use tempfile::TempDir;

    const SCENE: &str = "\
%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &1
GameObject:
  m_Component:
  - component: {fileID: 2}
--- !u!4 &2
Transform:
  m_GameObject: {fileID: 1}
--- !u!114 &3 stripped
MonoBehaviour:
  m_GameObject: {fileID: 1}
";

    fn source_args(paths: Vec<PathBuf>) -> SourceArgs {
        SourceArgs {
            paths,
            batch_size: None,
            interrupt_every: None,
        }
    }

    #[test]
    fn discover_scans_directories_recursively() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("Assets/Scenes");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("Main.unity"), SCENE).unwrap();
        fs::write(tmp.path().join("Assets/Player.prefab"), SCENE).unwrap();
        fs::write(tmp.path().join("Assets/Player.cs"), "class Player {}").unwrap();

        let files =
            discover_scene_files(&[tmp.path().to_path_buf()], &ScanConfig::default()).unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("Assets/Player.prefab"),
                nested.join("Main.unity"),
            ]
        );
    }

    #[test]
    fn discover_keeps_explicit_files_and_dedups() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("notes.yaml");
        fs::write(&file, SCENE).unwrap();
        let files =
            discover_scene_files(&[file.clone(), file.clone()], &ScanConfig::default()).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn discover_missing_path_errors() {
        let tmp = TempDir::new().unwrap();
        let result = discover_scene_files(&[tmp.path().join("missing")], &ScanConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn scene_file_extension_check() {
        let scan = ScanConfig::default();
        assert!(is_scene_file(Path::new("a/Main.unity"), &scan));
        assert!(is_scene_file(Path::new("a/Mat.MAT"), &scan));
        assert!(!is_scene_file(Path::new("a/Readme"), &scan));
    }

    #[test]
    fn batch_size_flag_overrides_config() {
        let config = IndexConfig::default();
        let mut args = source_args(Vec::new());
        assert_eq!(build_config(&config, &args).batch_size, 5000);
        args.batch_size = NonZeroUsize::new(2);
        assert_eq!(build_config(&config, &args).batch_size, 2);
    }

    #[test]
    fn interrupted_indexing_matches_uninterrupted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Main.unity");
        fs::write(&path, SCENE).unwrap();

        let mut straight = AssetCache::new(&BuildConfig::with_batch_size(1));
        let summary = index_file(&mut straight, &path, None).unwrap();
        assert_eq!(summary.passes, 1);
        assert_eq!(summary.documents, 3);

        let mut interrupted = AssetCache::new(&BuildConfig::with_batch_size(1));
        let summary = index_file(&mut interrupted, &path, NonZeroUsize::new(1)).unwrap();
        assert_eq!(summary.passes, 4);
        assert_eq!(summary.documents, 3);

        assert_eq!(straight.global().combined(), interrupted.global().combined());
        assert_eq!(interrupted.local_anchor_usages(Anchor::new(1)), 2);
        assert_eq!(interrupted.components_for(Anchor::new(1)), &[Anchor::new(2)]);
    }
}
