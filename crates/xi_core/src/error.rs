use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("Data validation error for {player}: {detail}")]
    DataValidation { player: String, detail: String },

    #[error("Infeasible constraints: {0}")]
    InfeasibleConstraints(String),

    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SelectionError {
    pub fn validation(player: impl Into<String>, detail: impl Into<String>) -> Self {
        SelectionError::DataValidation { player: player.into(), detail: detail.into() }
    }

    /// Whether the selector may retry the run with the heuristic solver.
    pub fn allows_fallback(&self) -> bool {
        matches!(self, SelectionError::Solver(_))
    }
}

impl From<serde_yaml::Error> for SelectionError {
    fn from(err: serde_yaml::Error) -> Self {
        SelectionError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SelectionError {
    fn from(err: serde_json::Error) -> Self {
        SelectionError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
