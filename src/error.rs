#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Failed to serialize state: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog lookup failed: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
