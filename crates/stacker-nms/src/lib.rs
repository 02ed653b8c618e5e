//! Host-version adapters and the storage type registry.
//!
//! The storage engine depends only on the [`VersionAdapter`] capability
//! interface. This crate provides the concrete per-version implementations
//! and selects one at startup from the detected host engine version. It
//! also owns the registry mapping a [`StorageType`] tag to constructors, so
//! call sites never name a concrete storage encoding.

use std::sync::Arc;

use stacker_storage::{StorageError, StorageResult, VersionAdapter};

mod registry;
mod shared;
pub mod v1_16;
pub mod v1_19;

pub use registry::{STORAGE_CTORS, StorageCtor, StorageTypeRegistry};

/// Select the adapter for a `major.minor.patch` host version string.
///
/// Fails with [`StorageError::UnsupportedVersion`] when no adapter covers
/// the version.
pub fn select_adapter(host_version: &str) -> StorageResult<Arc<dyn VersionAdapter>> {
    let unsupported = || StorageError::UnsupportedVersion(host_version.to_string());

    let mut parts = host_version.split('.');
    let major: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(unsupported)?;
    let minor: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(unsupported)?;

    let adapter: Arc<dyn VersionAdapter> = match (major, minor) {
        (1, 16..=18) => Arc::new(v1_16::Adapter),
        (1, 19..=20) => Arc::new(v1_19::Adapter),
        _ => return Err(unsupported()),
    };

    tracing::info!(
        host_version,
        adapter = adapter.name(),
        "selected host version adapter"
    );
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_known_versions() {
        assert_eq!(select_adapter("1.16.5").unwrap().name(), "v1_16");
        assert_eq!(select_adapter("1.18.2").unwrap().name(), "v1_16");
        assert_eq!(select_adapter("1.19.3").unwrap().name(), "v1_19");
        assert_eq!(select_adapter("1.20.1").unwrap().name(), "v1_19");
    }

    #[test]
    fn test_reject_unknown_versions() {
        for version in ["1.8.8", "2.0.0", "nonsense", "1"] {
            assert!(matches!(
                select_adapter(version),
                Err(StorageError::UnsupportedVersion(_))
            ));
        }
    }
}
