/*!
 * Renders a glyph table into the `__icon_map` bash function.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::{END_MARKER, START_MARKER};
use crate::glyph_map::table::GlyphTable;

/// Characters that keep their special meaning inside bash double quotes
static BASH_DQUOTE_SPECIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\\"$`])"#).expect("Invalid bash escape regex")
});

/// Name of the generated bash function
pub const FUNCTION_NAME: &str = "__icon_map";

/// Variable the generated function assigns its result to
pub const RESULT_VARIABLE: &str = "icon_result";

/// Escape `value` for use inside a bash double-quoted string
pub fn bash_quote(value: &str) -> String {
    format!("\"{}\"", BASH_DQUOTE_SPECIAL.replace_all(value, r"\$1"))
}

// @renders: One `case` arm assigning the result variable
fn case_arm(pattern: &str, glyph: &str) -> String {
    format!(
        "    {})\n        {}={}\n        ;;\n",
        pattern,
        RESULT_VARIABLE,
        bash_quote(glyph)
    )
}

/// Builds the marker-wrapped icon map fragment
#[derive(Debug, Clone)]
pub struct MappingBuilder {
    start_marker: String,
    end_marker: String,
}

impl Default for MappingBuilder {
    fn default() -> Self {
        Self::new(START_MARKER, END_MARKER)
    }
}

impl MappingBuilder {
    pub fn new(start_marker: &str, end_marker: &str) -> Self {
        Self {
            start_marker: start_marker.to_string(),
            end_marker: end_marker.to_string(),
        }
    }

    /// Render the fragment: start marker, the function, end marker.
    ///
    /// The output does not end in a newline so that whatever followed the
    /// end marker in a patched script is preserved as-is.
    pub fn build(&self, table: &GlyphTable) -> String {
        let mut out = format!(
            "{}\nfunction {}() {{\n    case \"$1\" in\n",
            self.start_marker, FUNCTION_NAME
        );

        for entry in &table.entries {
            let pattern = entry
                .identifiers
                .iter()
                .map(|id| bash_quote(id))
                .collect::<Vec<_>>()
                .join(" | ");
            out.push_str(&case_arm(&pattern, &entry.glyph));
        }

        out.push_str(&case_arm("*", &table.fallback));
        out.push_str("    esac\n}\n");
        out.push_str(&self.end_marker);

        out
    }

    /// Standalone script: shebang followed by the fragment
    pub fn build_script(&self, table: &GlyphTable) -> String {
        format!("#!/usr/bin/env bash\n\n{}\n", self.build(table))
    }
}
