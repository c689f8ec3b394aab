use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CookmateError;

/// Shortest cooking time a request may ask for, in minutes
pub const MIN_MINUTES: u32 = 15;
/// Longest cooking time a request may ask for, in minutes
pub const MAX_MINUTES: u32 = 180;
/// Cooking time preselected in the form, in minutes
pub const DEFAULT_MINUTES: u32 = 45;

/// A closed set of options offered to the user as a select or checkbox group.
///
/// `label` is the exact string shown in the form and interpolated into the
/// prompt; `from_label` is its case-insensitive inverse.
pub trait Choice: Copy + Eq + 'static {
    /// Every option, in display order
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.label().eq_ignore_ascii_case(label))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MealType {
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl Choice for MealType {
    const ALL: &'static [Self] = &[
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
        MealType::Dessert,
    ];

    fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snack => "Snack",
            MealType::Dessert => "Dessert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Choice for SkillLevel {
    const ALL: &'static [Self] = &[
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

/// Dietary preference. Ordering follows declaration order, which is also the
/// order tags appear in the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    LowCarb,
    Keto,
    Paleo,
}

impl Choice for DietaryTag {
    const ALL: &'static [Self] = &[
        DietaryTag::Vegetarian,
        DietaryTag::Vegan,
        DietaryTag::GlutenFree,
        DietaryTag::DairyFree,
        DietaryTag::LowCarb,
        DietaryTag::Keto,
        DietaryTag::Paleo,
    ];

    fn label(self) -> &'static str {
        match self {
            DietaryTag::Vegetarian => "Vegetarian",
            DietaryTag::Vegan => "Vegan",
            DietaryTag::GlutenFree => "Gluten-Free",
            DietaryTag::DairyFree => "Dairy-Free",
            DietaryTag::LowCarb => "Low-Carb",
            DietaryTag::Keto => "Keto",
            DietaryTag::Paleo => "Paleo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CuisineStyle {
    #[default]
    Any,
    Italian,
    Indian,
    Chinese,
    Mexican,
    Mediterranean,
    Thai,
    Japanese,
    American,
    French,
}

impl Choice for CuisineStyle {
    const ALL: &'static [Self] = &[
        CuisineStyle::Any,
        CuisineStyle::Italian,
        CuisineStyle::Indian,
        CuisineStyle::Chinese,
        CuisineStyle::Mexican,
        CuisineStyle::Mediterranean,
        CuisineStyle::Thai,
        CuisineStyle::Japanese,
        CuisineStyle::American,
        CuisineStyle::French,
    ];

    fn label(self) -> &'static str {
        match self {
            CuisineStyle::Any => "Any",
            CuisineStyle::Italian => "Italian",
            CuisineStyle::Indian => "Indian",
            CuisineStyle::Chinese => "Chinese",
            CuisineStyle::Mexican => "Mexican",
            CuisineStyle::Mediterranean => "Mediterranean",
            CuisineStyle::Thai => "Thai",
            CuisineStyle::Japanese => "Japanese",
            CuisineStyle::American => "American",
            CuisineStyle::French => "French",
        }
    }
}

/// The user's preferences for one generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRequest {
    /// Free text list of what is available, usually comma separated
    pub ingredients: String,
    pub max_minutes: u32,
    pub meal_type: MealType,
    pub skill_level: SkillLevel,
    pub dietary_tags: BTreeSet<DietaryTag>,
    pub cuisine_style: CuisineStyle,
}

impl Default for RecipeRequest {
    fn default() -> Self {
        Self {
            ingredients: String::new(),
            max_minutes: DEFAULT_MINUTES,
            meal_type: MealType::default(),
            skill_level: SkillLevel::default(),
            dietary_tags: BTreeSet::new(),
            cuisine_style: CuisineStyle::default(),
        }
    }
}

impl RecipeRequest {
    /// Create a request with default preferences
    ///
    /// # Example
    /// ```
    /// use cookmate::{MealType, RecipeRequest};
    ///
    /// let request = RecipeRequest::new("chicken, rice")
    ///     .with_max_minutes(30)
    ///     .with_meal_type(MealType::Dinner);
    /// assert!(request.validate().is_ok());
    /// ```
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    pub fn with_max_minutes(mut self, minutes: u32) -> Self {
        self.max_minutes = minutes;
        self
    }

    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = meal_type;
        self
    }

    pub fn with_skill_level(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = skill_level;
        self
    }

    pub fn with_dietary_tag(mut self, tag: DietaryTag) -> Self {
        self.dietary_tags.insert(tag);
        self
    }

    pub fn with_cuisine_style(mut self, cuisine_style: CuisineStyle) -> Self {
        self.cuisine_style = cuisine_style;
        self
    }

    /// Check that the request may be sent to the model
    pub fn validate(&self) -> Result<(), CookmateError> {
        if self.ingredients.trim().is_empty() {
            return Err(CookmateError::Validation(
                "Please enter some ingredients to get started".to_string(),
            ));
        }
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&self.max_minutes) {
            return Err(CookmateError::Validation(format!(
                "Maximum cooking time must be between {} and {} minutes, got {}",
                MIN_MINUTES, MAX_MINUTES, self.max_minutes
            )));
        }
        Ok(())
    }

    /// Build a request from submitted form fields.
    ///
    /// Keys that are absent keep their default. `dietary_tags` may repeat.
    /// The ingredient text is not checked here, see [`RecipeRequest::validate`].
    pub fn from_form_pairs<K, V>(pairs: &[(K, V)]) -> Result<Self, CookmateError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = RecipeRequest::default();
        for (key, value) in pairs {
            request.apply_form_field(key.as_ref(), value.as_ref())?;
        }
        Ok(request)
    }

    /// Rebuild as much of a rejected form as possible, so it can be shown
    /// again with the user's input intact. Fields that do not parse keep
    /// their defaults.
    pub fn refill_from_form_pairs<K, V>(pairs: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = RecipeRequest::default();
        for (key, value) in pairs {
            let _ = request.apply_form_field(key.as_ref(), value.as_ref());
        }
        request
    }

    fn apply_form_field(&mut self, key: &str, value: &str) -> Result<(), CookmateError> {
        match key {
            "ingredients" => self.ingredients = value.to_string(),
            "max_minutes" => {
                self.max_minutes = value.trim().parse().map_err(|_| {
                    CookmateError::Validation(format!(
                        "Maximum cooking time must be a whole number of minutes, got '{}'",
                        value
                    ))
                })?
            }
            "meal_type" => self.meal_type = parse_choice("meal type", value)?,
            "skill_level" => self.skill_level = parse_choice("skill level", value)?,
            "cuisine_style" => self.cuisine_style = parse_choice("cuisine style", value)?,
            "dietary_tags" => {
                self.dietary_tags
                    .insert(parse_choice("dietary preference", value)?);
            }
            _ => {}
        }
        Ok(())
    }

    /// Dietary tags as shown to the model, `None` when there are none
    pub fn dietary_label(&self) -> String {
        if self.dietary_tags.is_empty() {
            "None".to_string()
        } else {
            self.dietary_tags
                .iter()
                .map(|tag| tag.label())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

fn parse_choice<T: Choice>(what: &str, value: &str) -> Result<T, CookmateError> {
    T::from_label(value)
        .ok_or_else(|| CookmateError::Validation(format!("Unknown {}: '{}'", what, value)))
}

/// A recipe returned by the model.
///
/// Field order matches the JSON document the model is asked for and the
/// exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub description: String,
    /// Minutes
    pub prep_time: u32,
    /// Minutes
    pub cook_time: u32,
    /// Minutes
    pub total_time: u32,
    pub servings: u32,
    pub ingredients: Vec<String>,
    /// Steps in cooking order
    pub instructions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nutrition_highlights: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recipe {
    /// Instructions paired with their 1-based step number
    pub fn numbered_steps(&self) -> impl Iterator<Item = (usize, &str)> {
        self.instructions
            .iter()
            .enumerate()
            .map(|(i, step)| (i + 1, step.as_str()))
    }

    /// Timing inconsistencies in the model's answer. These are reported,
    /// never corrected.
    pub fn advisories(&self, max_minutes: u32) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        let sum = self.prep_time.saturating_add(self.cook_time);
        if sum != self.total_time {
            advisories.push(Advisory::TimeMismatch {
                prep: self.prep_time,
                cook: self.cook_time,
                total: self.total_time,
            });
        }
        if self.total_time > max_minutes {
            advisories.push(Advisory::OverTimeLimit {
                total: self.total_time,
                limit: max_minutes,
            });
        }

        advisories
    }
}

/// Non-fatal observation about a generated recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    TimeMismatch { prep: u32, cook: u32, total: u32 },
    OverTimeLimit { total: u32, limit: u32 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::TimeMismatch { prep, cook, total } => write!(
                f,
                "Prep ({}min) and cook ({}min) times do not add up to the total ({}min)",
                prep, cook, total
            ),
            Advisory::OverTimeLimit { total, limit } => write!(
                f,
                "Total time of {}min is over your {}min limit",
                total, limit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(prep: u32, cook: u32, total: u32) -> Recipe {
        Recipe {
            name: "Fried Rice".to_string(),
            description: "Quick".to_string(),
            prep_time: prep,
            cook_time: cook,
            total_time: total,
            servings: 2,
            ingredients: vec!["rice".to_string()],
            instructions: vec!["Fry".to_string(), "Serve".to_string()],
            tips: vec![],
            nutrition_highlights: vec![],
        }
    }

    #[test]
    fn test_choice_labels_round_trip() {
        for tag in DietaryTag::ALL {
            assert_eq!(DietaryTag::from_label(tag.label()), Some(*tag));
        }
        assert_eq!(
            DietaryTag::from_label("gluten-free"),
            Some(DietaryTag::GlutenFree)
        );
        assert_eq!(MealType::from_label(" dinner "), Some(MealType::Dinner));
        assert_eq!(CuisineStyle::from_label("Klingon"), None);
    }

    #[test]
    fn test_defaults() {
        let request = RecipeRequest::default();
        assert_eq!(request.max_minutes, 45);
        assert_eq!(request.meal_type, MealType::Breakfast);
        assert_eq!(request.skill_level, SkillLevel::Beginner);
        assert_eq!(request.cuisine_style, CuisineStyle::Any);
        assert!(request.dietary_tags.is_empty());
    }

    #[test]
    fn test_validate_rejects_blank_ingredients() {
        for text in ["", "   ", "\n\t "] {
            let result = RecipeRequest::new(text).validate();
            assert!(matches!(result, Err(CookmateError::Validation(_))));
        }
    }

    #[test]
    fn test_validate_time_bounds() {
        assert!(RecipeRequest::new("eggs").with_max_minutes(15).validate().is_ok());
        assert!(RecipeRequest::new("eggs").with_max_minutes(180).validate().is_ok());
        assert!(RecipeRequest::new("eggs").with_max_minutes(14).validate().is_err());
        assert!(RecipeRequest::new("eggs").with_max_minutes(181).validate().is_err());
    }

    #[test]
    fn test_from_form_pairs() {
        let pairs = vec![
            ("ingredients", "chicken, rice"),
            ("max_minutes", "30"),
            ("meal_type", "Dinner"),
            ("skill_level", "Advanced"),
            ("dietary_tags", "Keto"),
            ("dietary_tags", "Vegan"),
            ("cuisine_style", "Thai"),
            ("unrelated", "ignored"),
        ];
        let request = RecipeRequest::from_form_pairs(&pairs).unwrap();
        assert_eq!(request.ingredients, "chicken, rice");
        assert_eq!(request.max_minutes, 30);
        assert_eq!(request.meal_type, MealType::Dinner);
        assert_eq!(request.skill_level, SkillLevel::Advanced);
        assert_eq!(request.cuisine_style, CuisineStyle::Thai);
        assert_eq!(request.dietary_label(), "Vegan, Keto");
    }

    #[test]
    fn test_from_form_pairs_rejects_unknown_values() {
        let bad_time = RecipeRequest::from_form_pairs(&[("max_minutes", "soon")]);
        assert!(matches!(bad_time, Err(CookmateError::Validation(_))));

        let bad_meal = RecipeRequest::from_form_pairs(&[("meal_type", "Brunch")]);
        assert!(matches!(bad_meal, Err(CookmateError::Validation(_))));
    }

    #[test]
    fn test_refill_keeps_what_parsed() {
        let pairs = [
            ("ingredients", "leeks, potatoes"),
            ("max_minutes", "soon"),
            ("meal_type", "Lunch"),
            ("cuisine_style", "Martian"),
        ];
        assert!(RecipeRequest::from_form_pairs(&pairs).is_err());

        let refilled = RecipeRequest::refill_from_form_pairs(&pairs);
        assert_eq!(refilled.ingredients, "leeks, potatoes");
        assert_eq!(refilled.meal_type, MealType::Lunch);
        assert_eq!(refilled.max_minutes, DEFAULT_MINUTES);
        assert_eq!(refilled.cuisine_style, CuisineStyle::default());
    }

    #[test]
    fn test_dietary_label_none() {
        assert_eq!(RecipeRequest::new("eggs").dietary_label(), "None");
    }

    #[test]
    fn test_numbered_steps_start_at_one() {
        let recipe = recipe(5, 20, 25);
        let steps: Vec<_> = recipe.numbered_steps().collect();
        assert_eq!(steps, vec![(1, "Fry"), (2, "Serve")]);
    }

    #[test]
    fn test_advisories() {
        assert!(recipe(5, 20, 25).advisories(30).is_empty());

        let advisories = recipe(10, 20, 25).advisories(20);
        assert_eq!(
            advisories,
            vec![
                Advisory::TimeMismatch {
                    prep: 10,
                    cook: 20,
                    total: 25
                },
                Advisory::OverTimeLimit {
                    total: 25,
                    limit: 20
                },
            ]
        );
        assert!(advisories[1].to_string().contains("20min limit"));
    }
}
