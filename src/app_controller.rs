use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::app_config::{Config, InstallEnvironment};
use crate::errors::{InstallError, InstallResult};
use crate::file_utils::FileManager;
use crate::glyph_map::{GlyphTable, MappingBuilder};
use crate::injector::{InjectionOutcome, Injector};

// @module: Application controller for font and icon map installation

/// Summary of a completed install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Where the font was copied to
    pub font_path: PathBuf,
    /// Where the icon map ended up
    pub icon_map: InjectionOutcome,
    /// Whether the status bar was reloaded
    pub reloaded: bool,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Home directory and platform, resolved once
    env: InstallEnvironment,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, env: InstallEnvironment) -> Self {
        Self { config, env }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured glyph table, or the built-in one
    pub fn load_table(&self) -> InstallResult<GlyphTable> {
        match &self.config.table_path {
            Some(path) => {
                debug!("Loading glyph table from {:?}", path);
                GlyphTable::load(path)
            }
            None => Ok(GlyphTable::builtin()),
        }
    }

    fn builder(&self) -> MappingBuilder {
        MappingBuilder::new(&self.config.markers.start, &self.config.markers.end)
    }

    /// Render the marker-wrapped icon map function
    pub fn build_fragment(&self) -> InstallResult<String> {
        let table = self.load_table()?;
        Ok(self.builder().build(&table))
    }

    /// Write the standalone icon map script into the dist directory
    pub fn build_dist(&self) -> InstallResult<PathBuf> {
        let table = self.load_table()?;
        let script = self.builder().build_script(&table);
        let destination = self.config.fragment_source();

        FileManager::write_to_file(&destination, &script)?;
        info!("Built icon map with {} entries: {:?}", table.len(), destination);

        Ok(destination)
    }

    /// Install the font, then patch `script` or write the standalone icon map.
    ///
    /// Nothing is written if the platform is unsupported.
    pub fn install(&self, script: Option<&Path>, reload: bool) -> InstallResult<InstallReport> {
        let font_dir = self.env.font_dir()?;

        // Build before any write so a bad table aborts cleanly
        let fragment = match script {
            Some(_) => Some(self.build_fragment()?),
            None => None,
        };

        FileManager::ensure_dir(&font_dir)?;
        let font_path = font_dir.join(&self.config.font_file_name);
        FileManager::copy_file(self.config.font_source(), &font_path)?;
        info!("Installed font to {:?}", font_path);

        let injector = Injector::new(self.config.markers.clone());
        let icon_map = match (script, fragment) {
            (Some(script), Some(fragment)) => injector.patch_file(script, &fragment)?,
            _ => injector.write_standalone(
                self.config.fragment_source(),
                self.env.icon_map_config_path(&self.config.fragment_file_name),
            )?,
        };

        let reloaded = if reload {
            self.reload_status_bar()?;
            true
        } else {
            debug!("Skipping status bar reload");
            false
        };

        Ok(InstallReport {
            font_path,
            icon_map,
            reloaded,
        })
    }

    /// Run the configured reload command; failure to spawn or a non-zero exit is an error
    pub fn reload_status_bar(&self) -> InstallResult<()> {
        let (program, args) = self
            .config
            .reload
            .command
            .split_first()
            .ok_or_else(|| InstallError::ReloadFailed("no reload command configured".to_string()))?;

        debug!("Running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| InstallError::ReloadFailed(format!("failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} exited with {}", program, output.status);
            return Err(InstallError::ReloadFailed(format!(
                "{} exited with {}: {}",
                program, output.status, stderr
            )));
        }

        info!("Reloaded status bar");
        Ok(())
    }
}
