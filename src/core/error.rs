use thiserror::Error;

#[derive(Error, Debug)]
pub enum WargamesError {
    #[error("Invalid unit '{name}': {reason}")]
    InvalidUnit { name: String, reason: String },

    #[error("Army name must not be blank")]
    BlankArmyName,

    #[error("Army '{0}' has no units")]
    EmptyArmy(String),

    #[error("Terrain must be set for terrain-based simulation")]
    TerrainNotSet,

    #[error("Delay must not be negative: {0} ms")]
    NegativeDelay(i64),

    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("Unknown terrain: {0}")]
    UnknownTerrain(String),

    #[error("Army file error on line {line}: {reason}")]
    ArmyFile { line: usize, reason: String },

    #[error("No {0} army selected")]
    NoArmySelected(&'static str),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, WargamesError>;
