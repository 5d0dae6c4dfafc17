//! Node directories and filenames.

//---------------------------------------------------------------------------------------------------- Use
use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

//---------------------------------------------------------------------------------------------------- Const
/// The node's main directory.
///
/// This is the PATH used for any top-level node directories.
///
/// | OS      | PATH                                             |
/// |---------|---------------------------------------------------|
/// | Windows | `C:\Users\Alice\AppData\Roaming\chainsync\`        |
/// | macOS   | `/Users/Alice/Library/Application Support/chainsync/` |
/// | Linux   | `/home/alice/.config/chainsync/`                   |
///
/// This is shared between all binaries in this workspace.
///
/// # Value
/// This is `chainsync` on `Windows|macOS` and `chainsync` on everything else.
pub const NODE_DIR: &str = "chainsync";

/// Attempt to create all node directories.
///
/// This currently creates these directories:
/// - [`node_cache_dir()`]
/// - [`node_config_dir()`]
/// - [`node_data_dir()`]
///
/// # Errors
/// This will return early if any of the above functions error.
pub fn node_create_dir_all() -> std::io::Result<()> {
    for path in [node_cache_dir(), node_config_dir(), node_data_dir()] {
        std::fs::create_dir_all(path)?;
    }

    Ok(())
}

//---------------------------------------------------------------------------------------------------- Directories
/// Create a (private) `OnceLock` and accessor function for common PATHs used by this workspace.
///
/// This creates all the functions used in [`node_create_dir_all`].
macro_rules! impl_dir_oncelock_and_fn {
    ($(
        $(#[$attr:meta])* // Documentation and any `derive`'s.
        $fn:ident,        // Name of the corresponding access function.
        $dirs_fn:ident,   // Name of the `dirs` function to use, the PATH prefix.
        $once_lock:ident, // Name of the `OnceLock`.
        $expect:literal   // Panic message if directory get fails.
    ),* $(,)?) => {$(
        /// Local `OnceLock` containing the Path.
        static $once_lock: OnceLock<PathBuf> = OnceLock::new();

        // Create the `OnceLock` if needed, append
        // the node directory string and return.
        $(#[$attr])*
        pub fn $fn() -> &'static Path {
            $once_lock.get_or_init(|| {
                // This should never panic.
                let mut path = dirs::$dirs_fn().expect($expect);

                // Consider a user who does `HOME=/ ./chaind`:
                // should we say "that's your problem" and panic here?
                // We really don't want a `rm -rf /` type of situation.
                assert!(
                    path.parent().is_some(),
                    "SAFETY: returned OS directory was either root or empty, aborting"
                );

                path.push(NODE_DIR);
                path
            })
        }
    )*};
}

impl_dir_oncelock_and_fn! {
    /// The node's cache directory.
    node_cache_dir,
    cache_dir,
    NODE_CACHE_DIR,
    "Cache directory was not found",

    /// The node's configuration directory.
    node_config_dir,
    config_dir,
    NODE_CONFIG_DIR,
    "Configuration directory was not found",

    /// The node's data directory.
    node_data_dir,
    data_dir,
    NODE_DATA_DIR,
    "Data directory was not found",
}

/// The directory rotating log files are written under, relative to a node's data directory.
pub fn logs_path(data_directory: &Path) -> PathBuf {
    data_directory.join("logs")
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod test {}
