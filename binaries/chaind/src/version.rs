use const_format::formatcp;

pub const CHAIND_VERSION: &str = formatcp!("{}", clap::crate_version!());
pub const CHAIND_VERSION_IS_RELEASE: bool = !cfg!(debug_assertions);
