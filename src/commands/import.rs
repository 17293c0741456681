//! Import data files from the core repository

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Site;

/// Source path inside the core repository and the name it gets in `data/`
const SOURCES: &[(&str, &str)] = &[
    ("kb_glossary_lite.jsonl", "kb_glossary_lite.jsonl"),
    (
        "prototype/data/stories_digests.jsonl",
        "stories_digests.jsonl",
    ),
    ("static/routes.json", "routes.json"),
    ("static/tokens.json", "tokens.json"),
    ("static/components.md", "components.md"),
];

/// Outcome of an import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub core_dir: PathBuf,
    pub copied: usize,
    pub skipped: usize,
    /// Required files still absent from `data/` afterwards
    pub missing_required: Vec<String>,
}

/// Find the core repository
///
/// An explicit directory wins, then `core_path` from the config, then
/// `../<core_repo>` next to the site and next to the working directory.
pub fn resolve_core_dir(site: &Site, explicit: Option<&Path>) -> Result<PathBuf> {
    let configured = explicit
        .map(Path::to_path_buf)
        .or_else(|| site.config.core_path.as_ref().map(PathBuf::from));

    let mut candidates = Vec::new();
    match configured {
        Some(path) if path.is_absolute() => candidates.push(path),
        Some(path) => candidates.push(site.base_dir.join(path)),
        None => {
            candidates.push(site.base_dir.join("..").join(&site.config.core_repo));
            if let Ok(cwd) = std::env::current_dir() {
                candidates.push(cwd.join("..").join(&site.config.core_repo));
            }
        }
    }

    if let Some(found) = candidates.iter().find(|c| c.is_dir()) {
        return Ok(found.clone());
    }

    let checked = candidates
        .iter()
        .map(|c| format!("  {}", c.display()))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::bail!(
        "Core repository not found. Checked:\n{}\nPass --core-dir or set CORE_DIR",
        checked
    )
}

/// Copy the data files into the site's data directory
pub fn run(site: &Site, core_dir: Option<&Path>) -> Result<ImportReport> {
    let core_dir = resolve_core_dir(site, core_dir)?;
    tracing::info!("Importing data from {:?}", core_dir);

    fs::create_dir_all(&site.data_dir)
        .with_context(|| format!("Failed to create {:?}", site.data_dir))?;

    let mut report = ImportReport {
        core_dir: core_dir.clone(),
        ..Default::default()
    };

    for (src, dst) in SOURCES {
        let from = core_dir.join(src);
        if !from.is_file() {
            tracing::warn!("Source file not found, skipping: {}", src);
            report.skipped += 1;
            continue;
        }

        let to = site.data_dir.join(dst);
        match fs::copy(&from, &to) {
            Ok(_) => {
                tracing::info!("Imported {} -> {}", src, dst);
                report.copied += 1;
            }
            Err(e) => {
                tracing::error!("Failed to copy {}: {}", src, e);
                report.skipped += 1;
            }
        }
    }

    report.missing_required = site
        .config
        .required_files
        .iter()
        .filter(|name| !site.data_dir.join(name).is_file())
        .cloned()
        .collect();
    if !report.missing_required.is_empty() {
        tracing::warn!(
            "Required files still missing: {}",
            report.missing_required.join(", ")
        );
    }

    tracing::info!(
        "Import finished: {} copied, {} skipped",
        report.copied,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_import_copies_and_renames() {
        let core = tempfile::tempdir().unwrap();
        write(&core.path().join("kb_glossary_lite.jsonl"), "{}\n");
        write(
            &core.path().join("prototype/data/stories_digests.jsonl"),
            "{}\n",
        );
        write(&core.path().join("static/routes.json"), "{}");
        write(&core.path().join("static/tokens.json"), "{}");

        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let report = run(&site, Some(core.path())).unwrap();

        assert_eq!(report.copied, 4);
        assert_eq!(report.skipped, 1);
        assert!(report.missing_required.is_empty());
        assert!(site.data_dir.join("stories_digests.jsonl").exists());
        assert!(site.data_dir.join("routes.json").exists());
        assert!(!site.data_dir.join("components.md").exists());
    }

    #[test]
    fn test_import_reports_missing_required() {
        let core = tempfile::tempdir().unwrap();
        write(&core.path().join("static/tokens.json"), "{}");

        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let report = run(&site, Some(core.path())).unwrap();

        assert_eq!(report.copied, 1);
        assert_eq!(report.missing_required, vec!["routes.json".to_string()]);
    }

    #[test]
    fn test_failed_copy_is_skipped() {
        let core = tempfile::tempdir().unwrap();
        write(&core.path().join("static/routes.json"), "{}");
        write(&core.path().join("static/tokens.json"), "{}");

        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        // a directory in the way makes the copy fail
        fs::create_dir_all(site.data_dir.join("routes.json")).unwrap();

        let report = run(&site, Some(core.path())).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, 4);
        assert!(site.data_dir.join("tokens.json").is_file());
        assert_eq!(report.missing_required, vec!["routes.json".to_string()]);
    }

    #[test]
    fn test_missing_core_dir_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let missing = dir.path().join("no-such-core");

        let err = run(&site, Some(&missing)).unwrap_err().to_string();
        assert!(err.contains("no-such-core"));
        assert!(err.contains("Checked"));
    }

    #[test]
    fn test_config_core_path_relative_to_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("vendor/core")).unwrap();

        let mut site = Site::new(dir.path()).unwrap();
        site.config.core_path = Some("vendor/core".to_string());
        let found = resolve_core_dir(&site, None).unwrap();
        assert_eq!(found, dir.path().join("vendor/core"));
    }
}
