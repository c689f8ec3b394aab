use crate::model::{Choice, RecipeRequest};

/// The instruction template sent to the model.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
///
/// Contains `{{INGREDIENTS}}`, `{{MAX_MINUTES}}`, `{{MEAL_TYPE}}`, `{{DIETARY}}`,
/// `{{CUISINE}}` and `{{SKILL}}` placeholders that are filled in by `build_prompt`.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

/// Field names the model is asked to return, in document order
pub const RECIPE_FIELDS: [&str; 10] = [
    "name",
    "description",
    "prep_time",
    "cook_time",
    "total_time",
    "servings",
    "ingredients",
    "instructions",
    "tips",
    "nutrition_highlights",
];

/// Render the request into the prompt text.
///
/// Pure: the same request always produces the same prompt. The user's
/// ingredient text is substituted last so placeholder-looking input is left
/// as typed.
pub fn build_prompt(request: &RecipeRequest) -> String {
    RECIPE_PROMPT_TEMPLATE
        .replace("{{MAX_MINUTES}}", &request.max_minutes.to_string())
        .replace("{{MEAL_TYPE}}", request.meal_type.label())
        .replace("{{DIETARY}}", &request.dietary_label())
        .replace("{{CUISINE}}", request.cuisine_style.label())
        .replace("{{SKILL}}", request.skill_level.label())
        .replace("{{INGREDIENTS}}", request.ingredients.trim())
}
