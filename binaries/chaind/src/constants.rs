//! General constants used throughout `chaind`.

use const_format::formatcp;

/// `chaind`'s semantic version (`MAJOR.MINOR.PATCH`) as string.
pub const VERSION: &str = clap::crate_version!();

/// Major version number of `chaind`.
pub const MAJOR_VERSION: &str = env!("CARGO_PKG_VERSION_MAJOR");

/// Minor version number of `chaind`.
pub const MINOR_VERSION: &str = env!("CARGO_PKG_VERSION_MINOR");

/// Patch version number of `chaind`.
pub const PATCH_VERSION: &str = env!("CARGO_PKG_VERSION_PATCH");

/// [`VERSION`] + the build type.
///
/// If a debug build, the suffix is `-debug`, else it is `-release`.
pub const VERSION_BUILD: &str = formatcp!("{VERSION}-{}", if cfg!(debug_assertions) { "debug" } else { "release" });

/// The panic message used when `chaind` encounters a critical internal invariant violation
/// (a poisoned mutex, an unreachable match arm). Collaborator failures never panic; they are
/// routed into the apply pipeline's rewind transition instead.
pub const PANIC_CRITICAL_SERVICE_ERROR: &str =
    "A service critical to chaind's function returned an unexpected error.";

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn version() {
        let semantic_version = format!("{MAJOR_VERSION}.{MINOR_VERSION}.{PATCH_VERSION}");
        assert_eq!(VERSION, semantic_version);
    }
}
