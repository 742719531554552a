use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Use YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid unit '{0}'. Valid units: mpg, kpl")]
    InvalidUnit(String),

    #[error("Car model is required")]
    MissingCarModel,

    #[error("No {kind} at row {row}")]
    RowNotFound { kind: &'static str, row: usize },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
