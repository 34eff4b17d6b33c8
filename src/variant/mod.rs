//! Switches which prebuilt UI variant a component path points at.
//!
//! A variants directory holds one subdirectory per prebuilt variant. The
//! link path (where the build expects the component) is made a symlink to
//! the chosen one. A real directory found at the link path is moved aside
//! to `<link>.backup` first so nothing is lost.

pub mod error;

pub use error::*;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

/// What currently sits at the link path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Missing,
    /// A symlink into the variants directory.
    Linked(String),
    /// A symlink pointing somewhere else.
    Foreign(PathBuf),
    /// A real directory or file, not managed by the switcher.
    Unmanaged,
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkState::Missing => f.write_str("nothing linked"),
            LinkState::Linked(name) => write!(f, "linked to variant {name}"),
            LinkState::Foreign(target) => write!(f, "linked outside the variants directory ({})", target.display()),
            LinkState::Unmanaged => f.write_str("a real directory (not managed)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub variant: String,
    pub previous: LinkState,
    /// Where an unmanaged directory was moved, if one was.
    pub backup: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct VariantSwitcher {
    variants_dir: PathBuf,
    link: PathBuf,
}

impl VariantSwitcher {
    pub fn new(variants_dir: impl Into<PathBuf>, link: impl Into<PathBuf>) -> Self {
        Self { variants_dir: variants_dir.into(), link: link.into() }
    }

    pub fn link(&self) -> &Path {
        &self.link
    }

    /// Variant names, sorted.
    pub fn available(&self) -> Result<Vec<String>, VariantError> {
        let entries = fs::read_dir(&self.variants_dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VariantError::MissingVariantsDir(self.variants_dir.clone()),
            _ => io_error(&self.variants_dir, e),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.variants_dir, e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    #[instrument(skip(self), fields(link = %self.link.display()))]
    pub fn check(&self) -> Result<LinkState, VariantError> {
        let meta = match fs::symlink_metadata(&self.link) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LinkState::Missing),
            Err(e) => return Err(io_error(&self.link, e)),
        };
        if !meta.file_type().is_symlink() {
            return Ok(LinkState::Unmanaged);
        }

        let target = fs::read_link(&self.link).map_err(|e| io_error(&self.link, e))?;
        let resolved = match self.link.parent() {
            Some(parent) if target.is_relative() => parent.join(&target),
            _ => target.clone(),
        };
        let variants = fs::canonicalize(&self.variants_dir).map_err(|e| io_error(&self.variants_dir, e))?;
        let state = match fs::canonicalize(&resolved) {
            Ok(path) if path.parent() == Some(variants.as_path()) => path
                .file_name()
                .map(|name| LinkState::Linked(name.to_string_lossy().into_owned()))
                .unwrap_or(LinkState::Foreign(target)),
            _ => LinkState::Foreign(target),
        };
        debug!(state = %state, "Checked link");
        Ok(state)
    }

    #[instrument(skip(self), fields(link = %self.link.display()))]
    pub fn switch(&self, name: &str) -> Result<SwitchOutcome, VariantError> {
        let available = self.available()?;
        if !available.iter().any(|v| v == name) {
            return Err(VariantError::UnknownVariant { name: name.to_string(), available });
        }

        let previous = self.check()?;
        let mut backup = None;
        match &previous {
            LinkState::Missing => {
                if let Some(parent) = self.link.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
                }
            }
            LinkState::Linked(_) | LinkState::Foreign(_) => {
                fs::remove_file(&self.link).map_err(|e| io_error(&self.link, e))?;
            }
            LinkState::Unmanaged => {
                let target = backup_path(&self.link);
                if fs::symlink_metadata(&target).is_ok() {
                    return Err(VariantError::BackupExists { link: self.link.clone(), backup: target });
                }
                warn!(backup = %target.display(), "Moving unmanaged directory aside");
                fs::rename(&self.link, &target).map_err(|e| io_error(&self.link, e))?;
                backup = Some(target);
            }
        }

        let source = fs::canonicalize(self.variants_dir.join(name)).map_err(|e| io_error(&self.variants_dir, e))?;
        make_link(&source, &self.link)?;
        info!(variant = name, "Variant linked");
        Ok(SwitchOutcome { variant: name.to_string(), previous, backup })
    }
}

fn backup_path(link: &Path) -> PathBuf {
    let mut name = link.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".backup");
    link.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> VariantError {
    VariantError::Io { path: path.to_path_buf(), source }
}

#[cfg(unix)]
fn make_link(source: &Path, link: &Path) -> Result<(), VariantError> {
    std::os::unix::fs::symlink(source, link).map_err(|e| io_error(link, e))
}

#[cfg(windows)]
fn make_link(source: &Path, link: &Path) -> Result<(), VariantError> {
    std::os::windows::fs::symlink_dir(source, link).map_err(|e| io_error(link, e))
}

#[cfg(not(any(unix, windows)))]
fn make_link(_source: &Path, _link: &Path) -> Result<(), VariantError> {
    Err(VariantError::Unsupported)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> (TempDir, VariantSwitcher) {
        let dir = tempfile::tempdir().unwrap();
        for variant in ["classic", "compact"] {
            fs::create_dir_all(dir.path().join("variants").join(variant)).unwrap();
        }
        let switcher = VariantSwitcher::new(dir.path().join("variants"), dir.path().join("src/components/Admin"));
        (dir, switcher)
    }

    #[test]
    fn lists_variants_sorted() {
        let (_dir, switcher) = layout();
        assert_eq!(switcher.available().unwrap(), vec!["classic", "compact"]);
    }

    #[test]
    fn switch_links_and_check_reports_it() {
        let (_dir, switcher) = layout();
        assert_eq!(switcher.check().unwrap(), LinkState::Missing);

        let first = switcher.switch("classic").unwrap();
        assert_eq!(first.previous, LinkState::Missing);
        assert_eq!(switcher.check().unwrap(), LinkState::Linked("classic".into()));

        let second = switcher.switch("compact").unwrap();
        assert_eq!(second.previous, LinkState::Linked("classic".into()));
        assert_eq!(switcher.check().unwrap(), LinkState::Linked("compact".into()));
    }

    #[test]
    fn real_directory_is_moved_aside() {
        let (dir, switcher) = layout();
        fs::create_dir_all(switcher.link()).unwrap();
        fs::write(switcher.link().join("index.js"), "local edits").unwrap();
        assert_eq!(switcher.check().unwrap(), LinkState::Unmanaged);

        let outcome = switcher.switch("compact").unwrap();
        let backup = dir.path().join("src/components/Admin.backup");
        assert_eq!(outcome.backup.as_deref(), Some(backup.as_path()));
        assert_eq!(fs::read_to_string(backup.join("index.js")).unwrap(), "local edits");
        assert_eq!(switcher.check().unwrap(), LinkState::Linked("compact".into()));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let (_dir, switcher) = layout();
        let err = switcher.switch("retro").unwrap_err();
        assert!(matches!(err, VariantError::UnknownVariant { ref name, .. } if name == "retro"));
        assert_eq!(switcher.check().unwrap(), LinkState::Missing);
    }
}
