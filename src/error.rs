use std::fmt;

/// Failure loading host-supplied data (tuning, keyboard layouts, word lists).
///
/// The game loop itself never fails; these only surface while setting it up.
#[derive(Debug)]
pub enum LoadError {
    Json(serde_json::Error),
    InvalidTuning { field: &'static str, reason: String },
    EmptyWordList { category: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed JSON: {err}"),
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
            Self::EmptyWordList { category } => {
                write!(f, "category `{category}` has no playable words")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
