//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::flags::{CurrentMode, Flags, KeyMode};

/// Order in which a tree walk yields directories relative to their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkMode {
    /// Only entries without children.
    LeavesOnly,
    /// Directories before their contents.
    #[default]
    SelfFirst,
    /// Directories after their contents.
    ChildFirst,
}

/// Configuration for walking a directory tree.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory of the walk.
    pub root: PathBuf,

    /// Representation of `current()`.
    #[builder(default)]
    #[serde(default)]
    pub current: CurrentMode,

    /// Representation of `key()`.
    #[builder(default)]
    #[serde(default)]
    pub key: KeyMode,

    /// Skip `.` and `..`.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub skip_dots: bool,

    /// Descend through symlinked directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Join paths with `/` regardless of host convention.
    #[builder(default = "false")]
    #[serde(default)]
    pub unix_paths: bool,

    /// Ordering of directories against their contents.
    #[builder(default)]
    #[serde(default)]
    pub mode: WalkMode,

    /// Maximum depth to descend (None = unlimited, 0 = root level only).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Include hidden entries (names starting with `.`).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_true() -> bool {
    true
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a simple config for walking a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            current: CurrentMode::default(),
            key: KeyMode::default(),
            skip_dots: true,
            follow_symlinks: false,
            unix_paths: false,
            mode: WalkMode::default(),
            max_depth: None,
            include_hidden: true,
        }
    }

    /// Iterator flags implied by this config.
    pub fn flags(&self) -> Flags {
        let mut flags = Flags::from_modes(self.current, self.key);
        flags.set(Flags::SKIP_DOTS, self.skip_dots);
        flags.set(Flags::FOLLOW_SYMLINKS, self.follow_symlinks);
        flags.set(Flags::UNIX_PATHS, self.unix_paths);
        flags
    }

    /// Check if hidden entries should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WalkConfig::builder()
            .root("/home/user")
            .max_depth(Some(2u32))
            .follow_symlinks(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, Some(2));
        assert!(config.follow_symlinks);
        assert!(config.skip_dots);
    }

    #[test]
    fn test_config_builder_requires_root() {
        assert!(WalkConfig::builder().build().is_err());
        assert!(WalkConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_flags_from_config() {
        let mut config = WalkConfig::new("/test");
        assert_eq!(
            config.flags(),
            Flags::CURRENT_AS_FILEINFO | Flags::KEY_AS_PATHNAME | Flags::SKIP_DOTS
        );

        config.skip_dots = false;
        config.unix_paths = true;
        config.key = KeyMode::Filename;
        let flags = config.flags();
        assert!(!flags.skip_dots());
        assert_eq!(flags.separator(), '/');
        assert_eq!(flags.key_mode(), KeyMode::Filename);
    }

    #[test]
    fn test_should_skip_hidden() {
        let mut config = WalkConfig::new("/test");

        // By default, hidden files are included
        assert!(!config.should_skip_hidden(".git"));

        config.include_hidden = false;
        assert!(config.should_skip_hidden(".git"));
        assert!(!config.should_skip_hidden("src"));
    }
}
