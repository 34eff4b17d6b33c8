use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VariantError {
    #[error("Filesystem error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown variant {name:?}; available: {}", available.join(", "))]
    UnknownVariant { name: String, available: Vec<String> },
    #[error("Variants directory {} does not exist", .0.display())]
    MissingVariantsDir(PathBuf),
    #[error("Cannot move {} aside: {} already exists", link.display(), backup.display())]
    BackupExists { link: PathBuf, backup: PathBuf },
    #[error("Symlinks are not supported on this platform")]
    Unsupported,
}
