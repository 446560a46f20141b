/*!
 * # appfont - status bar app icon font installer
 *
 * Installs an icon font for sketchybar and the `__icon_map` shell helper
 * that maps application names to the font's glyphs.
 *
 * ## Features
 *
 * - Generate the `__icon_map` bash function from a glyph table
 * - Install the font into the per-user font directory (macOS, Linux)
 * - Patch the marker-delimited icon map region of an existing script
 * - Write a standalone `icon_map.sh` when no script is given
 * - Reload the status bar after installing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration and process environment
 * - `glyph_map`: Glyph table and bash function generation:
 *   - `glyph_map::table`: identifier → glyph data
 *   - `glyph_map::builder`: fragment rendering
 * - `injector`: Marker-delimited replacement
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod glyph_map;
pub mod injector;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, InstallEnvironment, Platform};
pub use app_controller::{Controller, InstallReport};
pub use glyph_map::{GlyphEntry, GlyphTable, MappingBuilder};
pub use injector::{replace_marked_span, InjectionOutcome, Injector};
pub use errors::{InstallError, InstallResult, MarkerNotFound};
