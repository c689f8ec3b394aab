//! COOKMATE: turn the ingredients you have into a recipe.
//!
//! The pipeline is `RecipeRequest` → prompt → model → `Recipe`. [`generate_recipe`]
//! runs it once; [`App`] adds the single result slot and the web UI state on top.

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod presenter;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod store;

pub use crate::app::{App, ExportedRecipe, Generation};
pub use crate::config::{AppConfig, ProviderConfig, ServerConfig};
pub use crate::error::CookmateError;
pub use crate::export::{export_file_name, export_json};
pub use crate::model::{
    Advisory, Choice, CuisineStyle, DietaryTag, MealType, Recipe, RecipeRequest, SkillLevel,
};
pub use crate::parser::parse_recipe;
pub use crate::prompt::build_prompt;
pub use crate::providers::{GoogleProvider, LlmProvider, OpenAIProvider, ProviderFactory};
pub use crate::store::ResultStore;

/// Generate one recipe with the given provider.
///
/// The request is validated before anything is sent, so blank ingredients
/// never reach the network.
///
/// # Example
/// ```no_run
/// # use cookmate::{generate_recipe, GoogleProvider, MealType, ProviderConfig, RecipeRequest};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = GoogleProvider::new(&ProviderConfig::default())?;
/// let request = RecipeRequest::new("chicken, rice").with_meal_type(MealType::Dinner);
/// let recipe = generate_recipe(&provider, &request).await?;
/// println!("{}", recipe.name);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(
    provider: &dyn LlmProvider,
    request: &RecipeRequest,
) -> Result<Recipe, CookmateError> {
    request.validate()?;
    let prompt = build_prompt(request);
    let raw = provider.generate_json(&prompt).await?;
    parse_recipe(&raw)
}
