use crate::error::CookmateError;
use crate::model::Recipe;

/// Serialize the recipe as the downloadable JSON document
pub fn export_json(recipe: &Recipe) -> Result<String, CookmateError> {
    Ok(serde_json::to_string_pretty(recipe)?)
}

/// File name for the exported recipe.
///
/// Whitespace runs become a single `_`, anything that is not an ASCII letter,
/// digit, `_` or `-` is dropped, and a name with nothing left falls back to
/// `recipe`.
pub fn export_file_name(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut pending_gap = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            continue;
        }
        if pending_gap && !stem.is_empty() {
            stem.push('_');
        }
        pending_gap = false;
        stem.push(c);
    }

    if stem.is_empty() {
        stem.push_str("recipe");
    }
    format!("{}.json", stem)
}
