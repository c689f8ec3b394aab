//! HTML rendering of the single page UI.
//!
//! Everything here is a pure function of its inputs. Every piece of text that
//! came from the user or the model is escaped before it is written out.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::error::CookmateError;
use crate::model::{
    Advisory, Choice, CuisineStyle, DietaryTag, MealType, Recipe, RecipeRequest, SkillLevel,
    MAX_MINUTES, MIN_MINUTES,
};
use crate::store::ResultStore;

const STYLE: &str = include_str!("style.css");

/// Transient message shown above the result. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error {
        message: String,
        hints: &'static [&'static str],
    },
}

impl Banner {
    pub fn from_error(error: &CookmateError) -> Self {
        Banner::Error {
            message: error.to_string(),
            hints: error.remediation_hints(),
        }
    }
}

/// Everything needed to draw one page
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub store: &'a ResultStore,
    /// Values the form is pre-filled with
    pub form: &'a RecipeRequest,
    pub banner: Option<Banner>,
    /// Notes about the recipe just generated
    pub advisories: &'a [Advisory],
    /// Set when the app cannot generate at all
    pub configuration_error: Option<&'a str>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut main = String::new();

    if let Some(reason) = view.configuration_error {
        main.push_str(&render_banner(&Banner::Error {
            message: format!("Configuration error: {}", reason),
            hints: CookmateError::Configuration(String::new()).remediation_hints(),
        }));
    }

    if let Some(banner) = &view.banner {
        main.push_str(&render_banner(banner));
    }

    match view.store {
        ResultStore::Holding(recipe) => {
            main.push_str(&render_recipe(recipe, view.advisories));
            main.push_str(&render_actions());
        }
        // An error replaces the onboarding text rather than sitting on top of it
        ResultStore::Empty if !matches!(view.banner, Some(Banner::Error { .. })) => {
            main.push_str(&render_onboarding());
        }
        ResultStore::Empty => {}
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>COOKMATE</title>
<style>
{style}</style>
</head>
<body>
<aside class="sidebar">
{form}
</aside>
<main class="main">
<div class="main-header">🧑‍🍳 COOKMATE</div>
<div class="sub-header">Create delicious recipes from your ingredients with AI-powered suggestions</div>
{main}
</main>
</body>
</html>
"#,
        style = STYLE,
        form = render_form(view.form, view.configuration_error.is_some()),
        main = main,
    )
}

/// The recipe card: header, time badges, ingredients, numbered steps, and
/// the optional tips and nutrition sections.
pub fn render_recipe(recipe: &Recipe, advisories: &[Advisory]) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<div class="recipe-container">
<div class="recipe-title">🍽️ {}</div>
<p class="recipe-description">{}</p>
</div>
<div class="badges">
<span class="time-badge">⏲️ Prep: {}min</span>
<span class="time-badge">🔥 Cook: {}min</span>
<span class="time-badge">⏰ Total: {}min</span>
<span class="time-badge">👥 Serves: {}</span>
</div>
"#,
        encode_text(&recipe.name),
        encode_text(&recipe.description),
        recipe.prep_time,
        recipe.cook_time,
        recipe.total_time,
        recipe.servings,
    );

    for advisory in advisories {
        let _ = writeln!(
            html,
            r#"<div class="advisory">⚠️ {}</div>"#,
            encode_text(&advisory.to_string())
        );
    }

    html.push_str("<div class=\"recipe-columns\">\n<div>\n");

    html.push_str("<div class=\"recipe-section\"><h3>🛒 Ingredients</h3>\n");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(
            html,
            r#"<div class="ingredient-item">• {}</div>"#,
            encode_text(ingredient)
        );
    }
    html.push_str("</div>\n");

    if !recipe.tips.is_empty() {
        html.push_str("<div class=\"recipe-section\"><h3>💡 Chef's Tips</h3>\n");
        for tip in &recipe.tips {
            let _ = writeln!(html, "<p>💡 {}</p>", encode_text(tip));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n<div>\n");

    html.push_str("<div class=\"recipe-section\"><h3>👨‍🍳 Instructions</h3>\n");
    for (number, step) in recipe.numbered_steps() {
        let _ = writeln!(
            html,
            r#"<div class="step"><span class="step-number">{}</span><span>{}</span></div>"#,
            number,
            encode_text(step)
        );
    }
    html.push_str("</div>\n");

    if !recipe.nutrition_highlights.is_empty() {
        html.push_str("<div class=\"recipe-section\"><h3>🥗 Nutritional Highlights</h3>\n");
        for highlight in &recipe.nutrition_highlights {
            let _ = writeln!(html, "<p>🌟 {}</p>", encode_text(highlight));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n</div>\n");
    html
}

pub fn render_onboarding() -> String {
    r#"<div class="onboarding">
<h2>🎯 How to Use</h2>
<p>
1. 📝 Enter your available ingredients<br>
2. ⏰ Set your cooking time preference<br>
3. 🎛️ Choose your meal preferences<br>
4. ✨ Click "Generate Recipe" to get started!
</p>
</div>
"#
    .to_string()
}

pub fn render_banner(banner: &Banner) -> String {
    match banner {
        Banner::Success(message) => format!(
            "<div class=\"success-message\">✅ {}</div>\n",
            encode_text(message)
        ),
        Banner::Error { message, hints } => {
            let mut html = format!(
                "<div class=\"error-message\">❌ {}</div>\n",
                encode_text(message)
            );
            if !hints.is_empty() {
                html.push_str("<h3>🔧 Troubleshooting Tips:</h3>\n<ul>\n");
                for hint in hints.iter() {
                    let _ = writeln!(html, "<li>{}</li>", encode_text(hint));
                }
                html.push_str("</ul>\n");
            }
            html
        }
    }
}

fn render_actions() -> String {
    r#"<div class="actions">
<form method="get" action="/recipe.json"><button class="secondary-button" type="submit">📄 Download Recipe (JSON)</button></form>
<form method="post" action="/reset"><button class="secondary-button" type="submit">🔄 Generate New Recipe</button></form>
</div>
"#
    .to_string()
}

fn render_form(form: &RecipeRequest, disabled: bool) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<form method="post" action="/generate" onsubmit="var b=this.querySelector('.primary-button');b.disabled=true;b.textContent='🤖 AI Chef is creating your recipe...';">
<fieldset{disabled} style="border:none;padding:0;margin:0">
<h2 style="color:#2E8B57">🔧 Recipe Settings</h2>
<label for="ingredients">🥕 Available Ingredients</label>
<textarea id="ingredients" name="ingredients" placeholder="e.g., chicken breast, rice, onions, garlic, tomatoes...">{ingredients}</textarea>
<label for="max_minutes">⏰ Maximum Cooking Time: <output id="minutes_value">{minutes}</output> minutes</label>
<input id="max_minutes" name="max_minutes" type="range" min="{min}" max="{max}" step="5" value="{minutes}" oninput="document.getElementById('minutes_value').textContent=this.value" style="width:100%">
<div class="row">
<div><label for="meal_type">🍽️ Meal Type</label>{meal}</div>
<div><label for="skill_level">👨‍🍳 Skill Level</label>{skill}</div>
</div>
<label>🥗 Dietary Preferences</label>
<div class="checks">{dietary}</div>
<label for="cuisine_style">🌍 Cuisine Style</label>{cuisine}
<button class="primary-button" type="submit">✨ Generate Recipe</button>
</fieldset>
</form>
<div class="setup">⚙️ The model API key is read from <code>GEMINI_API_KEY</code> (or <code>COOKMATE__PROVIDER__API_KEY</code>) when the server starts. Get one at <a href="https://aistudio.google.com/app/apikey">Google AI Studio</a>.</div>"#,
        disabled = if disabled { " disabled" } else { "" },
        ingredients = encode_text(&form.ingredients),
        minutes = form.max_minutes,
        min = MIN_MINUTES,
        max = MAX_MINUTES,
        meal = render_select::<MealType>("meal_type", form.meal_type),
        skill = render_select::<SkillLevel>("skill_level", form.skill_level),
        dietary = render_dietary_checks(form),
        cuisine = render_select::<CuisineStyle>("cuisine_style", form.cuisine_style),
    );

    html
}

fn render_select<T: Choice>(name: &str, selected: T) -> String {
    let mut html = format!(r#"<select id="{name}" name="{name}">"#);
    for option in T::ALL.iter().copied() {
        let label = option.label();
        let _ = write!(
            html,
            r#"<option value="{}"{}>{}</option>"#,
            encode_double_quoted_attribute(label),
            if option == selected { " selected" } else { "" },
            encode_text(label)
        );
    }
    html.push_str("</select>");
    html
}

fn render_dietary_checks(form: &RecipeRequest) -> String {
    let mut html = String::new();
    for tag in DietaryTag::ALL.iter().copied() {
        let label = tag.label();
        let _ = write!(
            html,
            r#"<label><input type="checkbox" name="dietary_tags" value="{}"{}> {}</label>"#,
            encode_double_quoted_attribute(label),
            if form.dietary_tags.contains(&tag) {
                " checked"
            } else {
                ""
            },
            encode_text(label)
        );
    }
    html
}
