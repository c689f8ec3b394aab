use thiserror::Error;

/// Errors that can occur while generating a recipe
#[derive(Error, Debug)]
pub enum CookmateError {
    /// Missing or rejected credential, unknown provider, or any other setup problem
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    /// The submitted preferences cannot be dispatched
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The model service could not be reached
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The model service answered with a failure
    #[error("Model service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    /// The model answered with something that is not a recipe
    #[error("Failed to parse recipe: {0}")]
    Parse(String),

    /// Another generation is still running
    #[error("A recipe is already being generated, please wait for it to finish")]
    Busy,

    /// A recipe could not be written out as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Socket or file error outside the model call
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CookmateError {
    /// Name of the error class, as shown to the user
    pub fn kind(&self) -> &'static str {
        match self {
            CookmateError::Configuration(_) | CookmateError::ConfigLoad(_) => "configuration",
            CookmateError::Validation(_) => "validation",
            CookmateError::Transport(_) | CookmateError::Service { .. } => "transport",
            CookmateError::Parse(_) => "parse",
            CookmateError::Busy => "busy",
            CookmateError::Serialization(_) => "serialization",
            CookmateError::Io(_) => "io",
        }
    }

    /// Fatal errors block every generation until the process is reconfigured
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CookmateError::Configuration(_) | CookmateError::ConfigLoad(_)
        )
    }

    /// Short suggestions shown next to the error message
    pub fn remediation_hints(&self) -> &'static [&'static str] {
        match self {
            CookmateError::Configuration(_) | CookmateError::ConfigLoad(_) => &[
                "Set GEMINI_API_KEY (or COOKMATE__PROVIDER__API_KEY) and restart",
                "Check the [provider] section of cookmate.toml",
            ],
            CookmateError::Validation(_) => &[
                "Enter at least one ingredient, separated by commas",
                "Keep the cooking time between 15 and 180 minutes",
            ],
            CookmateError::Transport(_) | CookmateError::Service { .. } => &[
                "Check your API key configuration",
                "Verify your internet connection",
                "Try again in a moment",
            ],
            CookmateError::Parse(_) => &[
                "Try again, the model may answer differently",
                "Try with different or fewer ingredients",
            ],
            CookmateError::Busy => &["Wait for the current recipe to finish"],
            CookmateError::Serialization(_) | CookmateError::Io(_) => &[],
        }
    }
}
