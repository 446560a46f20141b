/*!
 * Glyph map generation.
 *
 * - `table`: identifier → glyph data, built-in or loaded from JSON
 * - `builder`: renders a table into the bash lookup function
 */

pub mod builder;
pub mod table;

pub use builder::MappingBuilder;
pub use table::{GlyphEntry, GlyphTable, DEFAULT_FALLBACK_GLYPH};
