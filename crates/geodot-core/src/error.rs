use thiserror::Error;

/// Which coordinate field failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateField {
    Longitude,
    Latitude,
}

impl std::fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Longitude => write!(f, "longitude"),
            Self::Latitude => write!(f, "latitude"),
        }
    }
}

/// A local action was blocked by missing or malformed user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("A building name is required")]
    MissingName,

    #[error("A point symbol is required")]
    MissingSymbol,

    #[error("Malformed {field}: {value:?} is not a decimal number")]
    MalformedCoordinate {
        field: CoordinateField,
        value: String,
    },

    #[error("Name, longitude and latitude are all required for a building point")]
    IncompleteBuildingPoint,

    #[error("No image is loaded")]
    NoImage,

    #[error("The image has not been saved to the server yet")]
    ImageNotPersisted,

    #[error("There are no points to save")]
    NothingToSave,
}

#[derive(Error, Debug)]
pub enum GeodotError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("{title} ({status}): {detail}")]
    Http {
        status: u16,
        title: String,
        detail: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl GeodotError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// True for errors raised by the backend or the transport to it.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Http { .. })
    }
}

impl From<csv::Error> for GeodotError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<calamine::Error> for GeodotError {
    fn from(e: calamine::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeodotError>;
