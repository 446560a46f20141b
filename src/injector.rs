/*!
 * Marker-delimited injection of the icon map into user scripts.
 *
 * The span from the first start marker through the end of the first end
 * marker after it is replaced wholesale. Text outside the span is never touched.
 */

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::MarkerConfig;
use crate::errors::{InstallResult, MarkerNotFound};
use crate::file_utils::FileManager;

/// Replace everything from `start_marker` through `end_marker` (both
/// included) with `replacement`.
///
/// The end marker is searched for after the start marker, so a stray end
/// marker earlier in the document is ignored. Fails when either marker is
/// missing.
pub fn replace_marked_span(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Result<String, MarkerNotFound> {
    let not_found = || MarkerNotFound {
        start_marker: start_marker.to_string(),
        end_marker: end_marker.to_string(),
    };

    let start = document.find(start_marker).ok_or_else(not_found)?;
    let search_from = start + start_marker.len();
    let end = document[search_from..]
        .find(end_marker)
        .map(|offset| search_from + offset)
        .ok_or_else(not_found)?;

    let before = &document[..start];
    let after = &document[end + end_marker.len()..];

    let mut patched = String::with_capacity(before.len() + replacement.len() + after.len());
    patched.push_str(before);
    patched.push_str(replacement);
    patched.push_str(after);
    Ok(patched)
}

/// Where the fragment ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionOutcome {
    /// An existing script was patched in place
    Patched(PathBuf),
    /// The packaged fragment file was written standalone
    Written(PathBuf),
}

impl InjectionOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Patched(p) | Self::Written(p) => p,
        }
    }
}

/// Applies a fragment to a script, or writes the standalone icon map
#[derive(Debug, Clone)]
pub struct Injector {
    markers: MarkerConfig,
}

impl Injector {
    pub fn new(markers: MarkerConfig) -> Self {
        Self { markers }
    }

    /// Rewrite `script` with its marked span replaced by `fragment`.
    ///
    /// The file is left untouched if the markers are missing or the write fails.
    pub fn patch_file<P: AsRef<Path>>(&self, script: P, fragment: &str) -> InstallResult<InjectionOutcome> {
        let script = std::path::absolute(script.as_ref())
            .unwrap_or_else(|_| script.as_ref().to_path_buf());

        let contents = FileManager::read_to_string(&script)?;
        let patched = replace_marked_span(&contents, &self.markers.start, &self.markers.end, fragment)
            .map_err(|e| e.at(&script))?;

        if patched == contents {
            debug!("Icon map in {:?} is already up to date", script);
            return Ok(InjectionOutcome::Patched(script));
        }

        FileManager::write_atomic(&script, &patched)?;
        info!("Updated icon map in {:?}", script);

        Ok(InjectionOutcome::Patched(script))
    }

    /// Copy the packaged fragment file to `destination` unchanged
    pub fn write_standalone<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        packaged_fragment: P1,
        destination: P2,
    ) -> InstallResult<InjectionOutcome> {
        let destination = destination.as_ref();
        let bytes = FileManager::copy_file(packaged_fragment, destination)?;
        info!("Wrote icon map to {:?} ({} bytes)", destination, bytes);
        Ok(InjectionOutcome::Written(destination.to_path_buf()))
    }
}
