//! Generate a single recipe from the command line and print it
//!
//! Reads the same configuration as the server (cookmate.toml, COOKMATE__*
//! variables, GEMINI_API_KEY). Ingredients come from the first argument.
//!
//! ```text
//! GEMINI_API_KEY=... cargo run --example generate_once -- "chicken, rice"
//! ```

use cookmate::{
    export_json, generate_recipe, AppConfig, CuisineStyle, MealType, ProviderFactory,
    RecipeRequest,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ingredients = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "chicken, rice, garlic".to_string());

    let config = AppConfig::load()?;
    let provider = ProviderFactory::create(&config.provider)?;

    let request = RecipeRequest::new(ingredients)
        .with_max_minutes(30)
        .with_meal_type(MealType::Dinner)
        .with_cuisine_style(CuisineStyle::Any);

    let recipe = generate_recipe(&*provider, &request).await?;

    println!("=== {} ===", recipe.name);
    println!("{}\n", recipe.description);
    for (number, step) in recipe.numbered_steps() {
        println!("{}. {}", number, step);
    }
    for advisory in recipe.advisories(request.max_minutes) {
        println!("note: {}", advisory);
    }

    println!("\n{}", export_json(&recipe)?);
    Ok(())
}
