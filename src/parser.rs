use log::debug;

use crate::error::CookmateError;
use crate::model::Recipe;

/// Decode the model's answer into a [`Recipe`].
///
/// Accepts the bare JSON object, optionally wrapped in a single Markdown code
/// fence. Every required field must be present with the right type, and the
/// recipe must have a name, at least one ingredient and at least one step.
/// Anything else is a [`CookmateError::Parse`].
pub fn parse_recipe(text: &str) -> Result<Recipe, CookmateError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(CookmateError::Parse("the model returned an empty answer".to_string()));
    }

    let recipe: Recipe = serde_json::from_str(body).map_err(|e| {
        debug!("Rejected model output: {}", body);
        CookmateError::Parse(e.to_string())
    })?;

    check_shape(&recipe)?;
    Ok(recipe)
}

fn check_shape(recipe: &Recipe) -> Result<(), CookmateError> {
    if recipe.name.trim().is_empty() {
        return Err(CookmateError::Parse("recipe has an empty name".to_string()));
    }
    if recipe.ingredients.is_empty() {
        return Err(CookmateError::Parse("recipe lists no ingredients".to_string()));
    }
    if recipe.instructions.is_empty() {
        return Err(CookmateError::Parse("recipe has no instructions".to_string()));
    }
    Ok(())
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}
