/*!
 * Tests for marker-delimited replacement
 */

use std::fs;
use anyhow::Result;
use appfont::app_config::{MarkerConfig, END_MARKER, START_MARKER};
use appfont::errors::InstallError;
use appfont::glyph_map::{GlyphTable, MappingBuilder};
use appfont::injector::{replace_marked_span, InjectionOutcome, Injector};
use crate::common;

fn sample_script(body: &str) -> String {
    format!(
        "#!/bin/bash\nsource \"$CONFIG_DIR/colors.sh\"\n\n{}\n{}\n{}\n\necho done\n",
        START_MARKER, body, END_MARKER
    )
}

/// Test that the result equals prefix + fragment + suffix
#[test]
fn test_replace_marked_span_withBothMarkers_shouldSpliceFragment() {
    let document = sample_script("old stuff\nmore old stuff");
    let prefix = "#!/bin/bash\nsource \"$CONFIG_DIR/colors.sh\"\n\n";
    let suffix = "\n\necho done\n";

    let patched = replace_marked_span(&document, START_MARKER, END_MARKER, "F").unwrap();

    assert_eq!(patched, format!("{}F{}", prefix, suffix));
}

/// Test that re-running with the generated fragment changes nothing
#[test]
fn test_patch_file_runTwice_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_file(temp_dir.path(), "space.sh", &sample_script("old"))?;
    let fragment = MappingBuilder::default().build(&GlyphTable::builtin());
    let injector = Injector::new(MarkerConfig::default());

    injector.patch_file(&script, &fragment)?;
    let once = fs::read_to_string(&script)?;
    injector.patch_file(&script, &fragment)?;
    let twice = fs::read_to_string(&script)?;

    assert_eq!(once, twice);
    assert!(once.contains("\"Safari\" | \"Safari Technology Preview\")"));
    assert!(once.ends_with("### END-OF-ICON-MAP\n\necho done\n"));
    Ok(())
}

/// Test that patching through a symlink updates the linked file and keeps the link
#[cfg(unix)]
#[test]
fn test_patch_file_throughSymlink_shouldUpdateTargetAndKeepLink() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dotfiles = temp_dir.path().join("dotfiles");
    fs::create_dir_all(&dotfiles)?;
    let real = common::create_test_file(&dotfiles, "sketchybarrc", &sample_script("old"))?;
    let link = temp_dir.path().join("sketchybarrc");
    std::os::unix::fs::symlink(&real, &link)?;
    let injector = Injector::new(MarkerConfig::default());

    injector.patch_file(&link, "NEW")?;

    assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
    assert_eq!(fs::read_link(&link)?, real);
    let expected = "#!/bin/bash\nsource \"$CONFIG_DIR/colors.sh\"\n\nNEW\n\necho done\n";
    assert_eq!(fs::read_to_string(&real)?, expected);
    assert_eq!(fs::read_to_string(&link)?, expected);
    // The temp file went next to the real file and was renamed away
    assert_eq!(fs::read_dir(&dotfiles)?.count(), 1);
    Ok(())
}

/// Test that an up-to-date script is not rewritten
#[cfg(unix)]
#[test]
fn test_patch_file_withUpToDateScript_shouldNotRewrite() -> Result<()> {
    use std::os::unix::fs::MetadataExt;

    let temp_dir = common::create_temp_dir()?;
    let fragment = MappingBuilder::default().build(&GlyphTable::empty());
    let script = common::create_test_file(temp_dir.path(), "space.sh", &format!("a\n{}\nb\n", fragment))?;
    let inode_before = fs::metadata(&script)?.ino();
    let injector = Injector::new(MarkerConfig::default());

    let outcome = injector.patch_file(&script, &fragment)?;

    assert!(matches!(outcome, InjectionOutcome::Patched(_)));
    // An atomic rewrite would have swapped in a new inode
    assert_eq!(fs::metadata(&script)?.ino(), inode_before);
    Ok(())
}

/// Test that an end marker mentioned before the region does not block patching
#[test]
fn test_patch_file_withEndMarkerInCommentAbove_shouldPatchRealRegion() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("# region ends at {}\n{}\nold\n{}\ntail\n", END_MARKER, START_MARKER, END_MARKER);
    let script = common::create_test_file(temp_dir.path(), "space.sh", &content)?;
    let injector = Injector::new(MarkerConfig::default());

    injector.patch_file(&script, "NEW")?;

    assert_eq!(
        fs::read_to_string(&script)?,
        format!("# region ends at {}\nNEW\ntail\n", END_MARKER)
    );
    Ok(())
}

/// Test that a missing end marker fails and leaves the file unchanged
#[test]
fn test_patch_file_withoutEndMarker_shouldFailWithoutModifying() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let original = format!("#!/bin/bash\n{}\nold\n", START_MARKER);
    let script = common::create_test_file(temp_dir.path(), "space.sh", &original)?;
    let injector = Injector::new(MarkerConfig::default());

    let err = injector.patch_file(&script, "NEW").unwrap_err();

    assert!(err.is_marker_not_found());
    if let InstallError::MarkerNotFound { path, .. } = &err {
        assert!(path.ends_with("space.sh"));
    }
    assert_eq!(fs::read_to_string(&script)?, original);
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);
    Ok(())
}

/// Test that a missing script reports a filesystem error
#[test]
fn test_patch_file_withMissingScript_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let injector = Injector::new(MarkerConfig::default());

    let result = injector.patch_file(temp_dir.path().join("missing.sh"), "NEW");

    assert!(matches!(result, Err(InstallError::Filesystem { .. })));
    Ok(())
}

/// Test that the standalone write copies bytes unchanged
#[test]
fn test_write_standalone_shouldCopyBytesUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "icon_map.sh", common::PACKAGED_ICON_MAP)?;
    let destination = temp_dir.path().join(".config").join("sketchybar").join("icon_map.sh");
    let injector = Injector::new(MarkerConfig::default());

    let outcome = injector.write_standalone(&source, &destination)?;

    assert_eq!(outcome, InjectionOutcome::Written(destination.clone()));
    assert_eq!(fs::read(&destination)?, fs::read(&source)?);
    Ok(())
}
