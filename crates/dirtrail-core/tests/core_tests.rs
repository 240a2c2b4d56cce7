use dirtrail_core::{
    CurrentMode, DirectoryEntry, EntryKind, FileInfo, Flags, IterError, KeyMode, WalkConfig,
    WalkMode,
};
use std::ffi::OsString;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_flags_render_file_info_and_pathname_key() {
    let flags = Flags::default();
    assert!(flags.contains(Flags::CURRENT_AS_FILEINFO));
    assert_eq!(flags.current_mode(), CurrentMode::FileInfo);
    assert_eq!(flags.key_mode(), KeyMode::Pathname);
}

#[test]
fn test_flags_compose_independently() {
    let flags = Flags::SKIP_DOTS | Flags::FOLLOW_SYMLINKS | Flags::UNIX_PATHS;
    assert!(flags.skip_dots());
    assert!(flags.follow_symlinks());
    assert_eq!(flags.separator(), '/');
    // Representation bits are untouched by the boolean options.
    assert_eq!(flags.current_mode(), CurrentMode::FileInfo);
    assert_eq!(flags.key_mode(), KeyMode::Pathname);
}

#[test]
fn test_flags_serde_roundtrip_preserves_bits() {
    let flags = Flags::CURRENT_AS_PATHNAME | Flags::SKIP_DOTS;
    let json = serde_json::to_string(&flags).unwrap();
    let back: Flags = serde_json::from_str(&json).unwrap();
    assert_eq!(back, flags);
}

#[test]
fn test_entry_kind_is_looked_up_each_time() {
    let temp = TempDir::new().unwrap();
    let entry = DirectoryEntry::new(
        temp.path().as_os_str(),
        OsString::from("thing"),
        std::path::MAIN_SEPARATOR,
    );

    fs::write(temp.path().join("thing"), "x").unwrap();
    assert_eq!(entry.kind().unwrap(), EntryKind::File);

    fs::remove_file(temp.path().join("thing")).unwrap();
    fs::create_dir(temp.path().join("thing")).unwrap();
    assert_eq!(entry.kind().unwrap(), EntryKind::Directory);

    fs::remove_dir(temp.path().join("thing")).unwrap();
    assert!(matches!(entry.kind().unwrap_err(), IterError::NotFound { .. }));
}

#[test]
fn test_file_info_stat() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("report.csv");
    fs::write(&path, "a,b,c\n").unwrap();

    let info = FileInfo::stat(&path, "report.csv").unwrap();
    assert!(info.is_file());
    assert_eq!(info.size, 6);
    assert_eq!(info.extension(), Some("csv"));
    assert!(info.link_target.is_none());

    let err = FileInfo::stat(temp.path().join("missing"), "missing").unwrap_err();
    assert!(err.is_io());
}

#[cfg(unix)]
#[test]
fn test_file_info_stat_symlink() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("target")).unwrap();
    std::os::unix::fs::symlink("target", temp.path().join("link")).unwrap();

    let info = FileInfo::stat(temp.path().join("link"), "link").unwrap();
    assert!(info.is_symlink());
    assert!(!info.is_dir());
    assert_eq!(info.link_target.as_deref(), Some("target"));
}

#[test]
fn test_walk_config_defaults() {
    let config = WalkConfig::default();
    assert_eq!(config.mode, WalkMode::SelfFirst);
    assert!(config.skip_dots);
    assert!(config.include_hidden);
    assert!(config.max_depth.is_none());
    assert!(config.flags().skip_dots());
}

#[test]
fn test_walk_config_deserializes_with_defaults() {
    let config: WalkConfig =
        serde_json::from_str(r#"{ "root": "/data", "mode": "child_first" }"#).unwrap();
    assert_eq!(config.mode, WalkMode::ChildFirst);
    assert!(config.skip_dots);
    assert_eq!(config.current, CurrentMode::FileInfo);
}
