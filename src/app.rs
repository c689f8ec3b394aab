use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{error, info, warn};

use crate::config::ProviderConfig;
use crate::error::CookmateError;
use crate::export::{export_file_name, export_json};
use crate::generate_recipe;
use crate::model::{Advisory, Choice, Recipe, RecipeRequest};
use crate::providers::{LlmProvider, ProviderFactory};
use crate::store::ResultStore;

/// A successful generation
#[derive(Debug, Clone)]
pub struct Generation {
    pub recipe: Recipe,
    pub advisories: Vec<Advisory>,
}

/// A recipe ready to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRecipe {
    pub file_name: String,
    pub json: String,
}

/// The running application: one model client, one result slot.
///
/// At most one generation runs at a time. The slot lock is only held for
/// the instant a result is committed, never across the model call.
pub struct App {
    provider: Result<Arc<dyn LlmProvider>, String>,
    rejected: Mutex<Option<String>>,
    slot: Mutex<Slot>,
    in_flight: AtomicBool,
}

/// The stored recipe and the request that produced it
#[derive(Debug, Default)]
struct Slot {
    store: ResultStore,
    request: Option<RecipeRequest>,
}

impl App {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Ok(provider),
            rejected: Mutex::new(None),
            slot: Mutex::new(Slot::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Build the app from configuration.
    ///
    /// A provider that cannot be created does not abort startup: the app
    /// comes up blocked and reports the problem on every page.
    pub fn from_config(config: &ProviderConfig) -> Self {
        match ProviderFactory::create(config) {
            Ok(provider) => {
                info!(
                    "Using provider '{}' with model '{}'",
                    provider.provider_name(),
                    config.model
                );
                Self::new(Arc::from(provider))
            }
            Err(e) => {
                error!("{}", e);
                Self::misconfigured(e.to_string())
            }
        }
    }

    pub fn misconfigured(reason: impl Into<String>) -> Self {
        Self {
            provider: Err(reason.into()),
            rejected: Mutex::new(None),
            slot: Mutex::new(Slot::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Why generation is unavailable, if it is.
    ///
    /// Covers both a provider that could not be built and a credential the
    /// model service rejected at runtime.
    pub fn configuration_error(&self) -> Option<String> {
        match &self.provider {
            Err(reason) => Some(reason.clone()),
            Ok(_) => self.lock_rejected().clone(),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run one generation end to end and store the result.
    ///
    /// On any error the stored recipe is left exactly as it was.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Generation, CookmateError> {
        let provider = self
            .provider
            .as_ref()
            .map_err(|reason| CookmateError::Configuration(reason.clone()))?;
        if let Some(reason) = self.lock_rejected().clone() {
            return Err(CookmateError::Configuration(reason));
        }

        request.validate()?;
        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        info!(
            "Generating {} recipe with {} ({} min, {})",
            request.meal_type.label(),
            provider.provider_name(),
            request.max_minutes,
            request.cuisine_style.label()
        );

        let recipe = generate_recipe(&**provider, request)
            .await
            .map_err(|e| {
                if e.is_fatal() {
                    error!("Generation blocked until reconfigured: {}", e);
                    *self.lock_rejected() = Some(e.to_string());
                } else {
                    warn!("Generation failed: {}", e);
                }
                e
            })?;

        let advisories = recipe.advisories(request.max_minutes);
        for advisory in &advisories {
            warn!("{}: {}", recipe.name, advisory);
        }

        {
            let mut slot = self.lock_slot();
            slot.store.replace(recipe.clone());
            slot.request = Some(request.clone());
        }
        info!("Generated '{}'", recipe.name);

        Ok(Generation { recipe, advisories })
    }

    /// Forget the current recipe
    pub fn reset(&self) {
        let mut slot = self.lock_slot();
        slot.store.reset();
        slot.request = None;
        info!("Recipe cleared");
    }

    pub fn snapshot(&self) -> ResultStore {
        self.lock_slot().store.clone()
    }

    /// The request behind the stored recipe, `None` when empty
    pub fn last_request(&self) -> Option<RecipeRequest> {
        self.lock_slot().request.clone()
    }

    /// Timing notes for the stored recipe, checked against the request that produced it
    pub fn advisories(&self) -> Vec<Advisory> {
        let slot = self.lock_slot();
        match (slot.store.recipe(), &slot.request) {
            (Some(recipe), Some(request)) => recipe.advisories(request.max_minutes),
            _ => Vec::new(),
        }
    }

    /// The current recipe as a downloadable document, `None` when empty
    pub fn export(&self) -> Result<Option<ExportedRecipe>, CookmateError> {
        let slot = self.lock_slot();
        let Some(recipe) = slot.store.recipe() else {
            return Ok(None);
        };
        Ok(Some(ExportedRecipe {
            file_name: export_file_name(&recipe.name),
            json: export_json(recipe)?,
        }))
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        // The slot is replaced wholesale, so a poisoned value is still whole
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_rejected(&self) -> MutexGuard<'_, Option<String>> {
        self.rejected.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the in-flight flag for the duration of one generation
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CookmateError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CookmateError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
