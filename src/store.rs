use crate::model::Recipe;

/// The single "current result" slot.
///
/// `Empty -> Holding` on a successful generation, `Holding -> Holding` when a
/// newer recipe replaces the old one, `Holding -> Empty` on reset. Failed
/// generations never touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultStore {
    #[default]
    Empty,
    Holding(Recipe),
}

impl ResultStore {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResultStore::Empty)
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            ResultStore::Empty => None,
            ResultStore::Holding(recipe) => Some(recipe),
        }
    }

    /// Store a freshly parsed recipe, discarding any previous one
    pub fn replace(&mut self, recipe: Recipe) {
        *self = ResultStore::Holding(recipe);
    }

    pub fn reset(&mut self) {
        *self = ResultStore::Empty;
    }
}
