/*!
 * Glyph table: which application identifiers map to which font glyph.
 *
 * The font renders ligatures such as `:safari:`, so a glyph is just the
 * string that the status bar should print for an application.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{InstallError, InstallResult};
use crate::file_utils::FileManager;

/// Glyph used when an identifier has no entry
pub const DEFAULT_FALLBACK_GLYPH: &str = ":default:";

/// One glyph and every application identifier that should render it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphEntry {
    pub glyph: String,
    pub identifiers: Vec<String>,
}

impl GlyphEntry {
    pub fn new(glyph: &str, identifiers: &[&str]) -> Self {
        Self {
            glyph: glyph.to_string(),
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered set of glyph entries plus the fallback glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphTable {
    #[serde(default = "default_fallback")]
    pub fallback: String,

    #[serde(default)]
    pub entries: Vec<GlyphEntry>,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK_GLYPH.to_string()
}

impl GlyphTable {
    /// Create a table with the default fallback glyph
    pub fn new(entries: Vec<GlyphEntry>) -> Self {
        Self {
            fallback: default_fallback(),
            entries,
        }
    }

    /// Table with no entries; renders to a fallback-only function
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check for empty glyphs, entries without identifiers and duplicate identifiers
    pub fn validate(&self) -> InstallResult<()> {
        if self.fallback.is_empty() {
            return Err(InstallError::InvalidTable("fallback glyph is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.glyph.is_empty() {
                return Err(InstallError::InvalidTable(format!(
                    "entry for {:?} has an empty glyph",
                    entry.identifiers
                )));
            }
            if entry.identifiers.is_empty() {
                return Err(InstallError::InvalidTable(format!(
                    "glyph {} has no identifiers",
                    entry.glyph
                )));
            }
            for id in &entry.identifiers {
                if !seen.insert(id.as_str()) {
                    return Err(InstallError::InvalidTable(format!(
                        "identifier {:?} is mapped more than once",
                        id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Glyph for `identifier`, or the fallback
    pub fn lookup(&self, identifier: &str) -> &str {
        self.entries
            .iter()
            .find(|e| e.identifiers.iter().any(|id| id == identifier))
            .map(|e| e.glyph.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Parse and validate a JSON table
    pub fn from_json(json: &str) -> InstallResult<Self> {
        let table: GlyphTable = serde_json::from_str(json)
            .map_err(|e| InstallError::InvalidTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a JSON table from disk
    pub fn load<P: AsRef<Path>>(path: P) -> InstallResult<Self> {
        let json = FileManager::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Table shipped with the font
    pub fn builtin() -> Self {
        Self::new(vec![
            GlyphEntry::new(":ableton:", &["Live"]),
            GlyphEntry::new(":affinity_designer:", &["Affinity Designer"]),
            GlyphEntry::new(":alacritty:", &["Alacritty"]),
            GlyphEntry::new(":alfred:", &["Alfred"]),
            GlyphEntry::new(":android_studio:", &["Android Studio"]),
            GlyphEntry::new(":app_store:", &["App Store"]),
            GlyphEntry::new(":arc:", &["Arc"]),
            GlyphEntry::new(":brave_browser:", &["Brave Browser"]),
            GlyphEntry::new(":calendar:", &["Calendar", "Fantastical", "Cron", "Amie", "Notion Calendar"]),
            GlyphEntry::new(":chrome:", &["Google Chrome", "Google Chrome Canary"]),
            GlyphEntry::new(":code:", &["Code", "Code - Insiders"]),
            GlyphEntry::new(":discord:", &["Discord", "Discord Canary", "Discord PTB"]),
            GlyphEntry::new(":docker:", &["Docker", "Docker Desktop"]),
            GlyphEntry::new(":finder:", &["Finder"]),
            GlyphEntry::new(":firefox:", &["Firefox"]),
            GlyphEntry::new(":git_hub:", &["GitHub Desktop"]),
            GlyphEntry::new(":iterm:", &["iTerm", "iTerm2"]),
            GlyphEntry::new(":kitty:", &["kitty"]),
            GlyphEntry::new(":mail:", &["Mail", "HEY"]),
            GlyphEntry::new(":messages:", &["Messages", "Nachrichten"]),
            GlyphEntry::new(":music:", &["Music"]),
            GlyphEntry::new(":notes:", &["Notes"]),
            GlyphEntry::new(":obsidian:", &["Obsidian"]),
            GlyphEntry::new(":safari:", &["Safari", "Safari Technology Preview"]),
            GlyphEntry::new(":slack:", &["Slack"]),
            GlyphEntry::new(":spotify:", &["Spotify"]),
            GlyphEntry::new(":gear:", &["System Preferences", "System Settings"]),
            GlyphEntry::new(":telegram:", &["Telegram"]),
            GlyphEntry::new(":terminal:", &["Terminal"]),
            GlyphEntry::new(":wezterm:", &["WezTerm"]),
            GlyphEntry::new(":zed:", &["Zed"]),
            GlyphEntry::new(":zoom:", &["zoom.us"]),
        ])
    }
}
