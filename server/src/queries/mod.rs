//! Read-only lookups, one module per entity.
//!
//! Helpers return `Option`/`Vec` on absence; callers decide whether a
//! missing row is an error.

pub mod allergens;
pub mod cuisines;
pub mod ingredients;
pub mod recipes;
pub mod users;

/// Substring pattern for `LIKE ... ESCAPE '\'`, with wildcards in `text`
/// matched literally.
pub fn contains_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
