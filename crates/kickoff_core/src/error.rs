use thiserror::Error;

/// Spec document 검증 실패
///
/// Raised at load time only. A spec that fails validation never reaches the
/// engine, so none of these can surface from a per-minute invocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("Failed to parse spec document: {0}")]
    Parse(String),

    #[error("Unsupported tick duration: {tick_seconds}s x 6 ticks must equal 60s")]
    InvalidTickDuration { tick_seconds: u32 },

    #[error("Invalid regulation minutes: {minutes}")]
    InvalidRegulationMinutes { minutes: u32 },

    #[error("Unknown state '{name}'")]
    UnknownState { name: String },

    #[error("Duplicate state '{state}'")]
    DuplicateState { state: String },

    #[error("Missing state '{state}'")]
    MissingState { state: String },

    #[error("State '{state}': unknown destination '{to}'")]
    UnknownDestination { state: String, to: String },

    #[error("State '{state}': invalid possession directive '{value}' (expected retain|flip)")]
    InvalidPossession { state: String, value: String },

    #[error("State '{state}': probability {p} outside [0, 1]")]
    ProbabilityOutOfRange { state: String, p: f64 },

    #[error("State '{state}': unknown shot result '{result}'")]
    UnknownShotResult { state: String, result: String },

    #[error("State '{state}': unknown zone '{zone}'")]
    UnknownZone { state: String, zone: String },

    #[error("State '{state}': missing zone table '{zone}'")]
    MissingZone { state: String, zone: String },

    #[error("State '{state}': expected a {expected} table")]
    MissingTable { state: String, expected: &'static str },

    #[error("State '{state}' ({table}): probabilities sum to {sum:.6}, expected 1.0")]
    SumMismatch { state: String, table: String, sum: f64 },
}

/// Token decoding failure
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Malformed compact token: {0}")]
    MalformedCompact(#[from] rmp_serde::decode::Error),

    #[error("Token encoding failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Unsupported token version: found {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("Invalid token minute: {minute}")]
    InvalidMinute { minute: u32 },
}

impl TokenError {
    /// Input errors are recovered by starting from a fresh token.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TokenError::Malformed(_) => true,
            TokenError::MalformedCompact(_) => true,
            TokenError::UnsupportedVersion { .. } => true,
            TokenError::InvalidMinute { .. } => true,
            TokenError::Encode(_) => false,
        }
    }
}

/// API 경계 에러
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Commentary template error: {0}")]
    Commentary(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Collaborator failure: {0}")]
    Collaborator(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            EngineError::InvalidRequest(err.to_string())
        } else {
            EngineError::Serialization(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
