pub mod services;
pub mod types;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
pub(crate) fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}
