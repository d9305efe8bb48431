pub mod providers;
pub mod release_pattern;
pub mod show_patterns;

pub use release_pattern::{analyze_episodes, analyze_release_pattern, ReleasePatternService};
