use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cookmate::presenter::{render_page, Banner, PageView};
use cookmate::{
    generate_recipe, parse_recipe, App, CookmateError, CuisineStyle, LlmProvider,
    MealType, RecipeRequest, ResultStore, SkillLevel,
};

const DINNER_JSON: &str = r#"{
    "name": "Garlic Chicken Rice",
    "description": "A one-pan weeknight dinner",
    "prep_time": 10,
    "cook_time": 15,
    "total_time": 25,
    "servings": 2,
    "ingredients": ["2 chicken thighs", "1 cup rice", "2 cloves garlic"],
    "instructions": ["Rinse the rice", "Brown the chicken", "Simmer everything together", "Rest and serve"],
    "tips": ["Use day-old rice for better texture"],
    "nutrition_highlights": ["High in protein"]
}"#;

/// Replays a fixed answer and remembers every prompt it was sent
struct StubProvider {
    answer: &'static str,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    fn answering(answer: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, CookmateError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.to_string())
    }
}

fn dinner_request() -> RecipeRequest {
    RecipeRequest::new("chicken, rice")
        .with_max_minutes(30)
        .with_meal_type(MealType::Dinner)
        .with_skill_level(SkillLevel::Beginner)
        .with_cuisine_style(CuisineStyle::Any)
}

#[tokio::test]
async fn test_dinner_request_fills_store() {
    let provider = StubProvider::answering(DINNER_JSON);
    let app = App::new(provider.clone());

    let generation = app.generate(&dinner_request()).await.unwrap();
    assert!(generation.advisories.is_empty());

    let ResultStore::Holding(recipe) = app.snapshot() else {
        panic!("store should be holding a recipe");
    };
    assert_eq!(recipe.name, "Garlic Chicken Rice");
    assert_eq!(recipe.description, "A one-pan weeknight dinner");
    assert_eq!(
        (recipe.prep_time, recipe.cook_time, recipe.total_time),
        (10, 15, 25)
    );
    assert_eq!(recipe.servings, 2);
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.tips.len(), 1);
    assert_eq!(recipe.nutrition_highlights.len(), 1);

    let steps: Vec<_> = recipe.numbered_steps().collect();
    assert_eq!(
        steps,
        vec![
            (1, "Rinse the rice"),
            (2, "Brown the chicken"),
            (3, "Simmer everything together"),
            (4, "Rest and serve"),
        ]
    );

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("**Meal Type:** Dinner"));
    assert!(prompts[0].contains("**Maximum Cooking Time:** 30 minutes"));
}

#[tokio::test]
async fn test_not_json_leaves_store_and_shows_error() {
    let app = App::new(StubProvider::answering("not json"));

    let result = app.generate(&dinner_request()).await;
    let err = match result {
        Err(e) => e,
        Ok(_) => panic!("expected a parse error"),
    };
    assert!(matches!(err, CookmateError::Parse(_)));
    assert!(app.snapshot().is_empty());

    let store = app.snapshot();
    let form = dinner_request();
    let html = render_page(&PageView {
        store: &store,
        form: &form,
        banner: Some(Banner::from_error(&err)),
        advisories: &[],
        configuration_error: None,
    });
    assert!(html.contains(r#"class="error-message""#));
    assert!(!html.contains(r#"class="recipe-container""#));
    assert!(!html.contains("How to Use"));
}

/// Answers from a script, one entry per call
struct ScriptedProvider {
    answers: Mutex<VecDeque<Result<String, CookmateError>>>,
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn generate_json(&self, _prompt: &str) -> Result<String, CookmateError> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CookmateError::Parse("script exhausted".to_string())))
    }
}

#[tokio::test]
async fn test_failed_generation_keeps_previous_recipe() {
    let app = App::new(Arc::new(ScriptedProvider {
        answers: Mutex::new(VecDeque::from(vec![
            Ok(DINNER_JSON.to_string()),
            Err(CookmateError::Service {
                status: 503,
                message: "model overloaded".to_string(),
            }),
            Ok("{\"name\": \"half a recipe\"}".to_string()),
        ])),
    }));

    app.generate(&dinner_request()).await.unwrap();
    let before = app.snapshot();
    assert!(!before.is_empty());

    let transport = app.generate(&dinner_request()).await;
    assert!(matches!(transport, Err(CookmateError::Service { .. })));
    assert_eq!(app.snapshot(), before);

    let partial = app.generate(&dinner_request()).await;
    assert!(matches!(partial, Err(CookmateError::Parse(_))));
    assert_eq!(app.snapshot(), before);
}

#[tokio::test]
async fn test_blank_ingredients_never_reach_the_model() {
    let provider = StubProvider::answering(DINNER_JSON);
    let app = App::new(provider.clone());

    for text in ["", "   ", "\n\t"] {
        let result = app.generate(&RecipeRequest::new(text)).await;
        assert!(matches!(result, Err(CookmateError::Validation(_))));

        let direct = generate_recipe(&*provider, &RecipeRequest::new(text)).await;
        assert!(matches!(direct, Err(CookmateError::Validation(_))));
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_reset_returns_to_onboarding() {
    let app = App::new(StubProvider::answering(DINNER_JSON));
    app.generate(&dinner_request()).await.unwrap();
    assert!(!app.snapshot().is_empty());

    app.reset();
    let store = app.snapshot();
    assert!(store.is_empty());

    let form = RecipeRequest::default();
    let html = render_page(&PageView {
        store: &store,
        form: &form,
        banner: None,
        advisories: &[],
        configuration_error: None,
    });
    assert!(html.contains("How to Use"));
}

#[tokio::test]
async fn test_new_generation_replaces_old_recipe() {
    let app = App::new(StubProvider::answering(DINNER_JSON));
    app.generate(&dinner_request()).await.unwrap();
    let second = app.generate(&dinner_request()).await.unwrap();
    assert_eq!(app.snapshot(), ResultStore::Holding(second.recipe));
}

#[tokio::test]
async fn test_export_round_trip() {
    let app = App::new(StubProvider::answering(DINNER_JSON));
    let generation = app.generate(&dinner_request()).await.unwrap();

    let exported = app.export().unwrap().unwrap();
    assert_eq!(exported.file_name, "Garlic_Chicken_Rice.json");
    assert_eq!(parse_recipe(&exported.json).unwrap(), generation.recipe);
}

#[tokio::test]
async fn test_over_limit_recipe_is_kept_with_advisory() {
    let slow = DINNER_JSON
        .replace(r#""cook_time": 15"#, r#""cook_time": 50"#)
        .replace(r#""total_time": 25"#, r#""total_time": 60"#);
    let slow: &'static str = Box::leak(slow.into_boxed_str());
    let app = App::new(StubProvider::answering(slow));

    let generation = app.generate(&dinner_request()).await.unwrap();
    assert_eq!(generation.recipe.total_time, 60);
    assert_eq!(generation.advisories.len(), 1);
    assert!(!app.snapshot().is_empty());
}
