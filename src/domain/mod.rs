//! Domain logic - pure business rules independent of git operations

pub mod package;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use package::PackageRef;
pub use tag::{TagMatcher, TagPattern};
pub use version::{bump_version, ReleaseLevel};
