//! # Selector Configuration
//!
//! One struct holds every tunable of a selection run: form scoring, venue
//! weights, squad constraints and the solver to use. Every field has a
//! default, so a config file only needs the values it changes.
//!
//! ```rust
//! use xi_core::config::SelectorConfig;
//!
//! let config = SelectorConfig::from_yaml_str("constraints:\n  budget: 95.0\n").unwrap();
//! assert_eq!(config.constraints.budget, 95.0);
//! assert_eq!(config.constraints.squad_size, 11);
//! ```

mod form_config;

pub use form_config::{FormConfig, MissingHistory, Normalization};

use crate::error::{Result, SelectionError};
use crate::scoring::VenueWeights;
use crate::selector::ConstraintSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Exact integer program (default)
    #[default]
    Milp,
    /// Exact enumeration, small pools only
    Exhaustive,
    /// Heuristic, always fast
    Greedy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SelectorConfig {
    pub form: FormConfig,
    pub venue: VenueWeights,
    pub constraints: ConstraintSet,
    pub solver: SolverKind,
}

impl SelectorConfig {
    /// Standard Dream11 contest rules
    pub fn dream11() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SelectorConfig = serde_yaml::from_str(yaml)?;
        config.constraints.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SelectionError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                let config: SelectorConfig = serde_json::from_str(&text)?;
                config.constraints.validate()?;
                Ok(config)
            }
            _ => Self::from_yaml_str(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SelectorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SelectorConfig::dream11());
        assert_eq!(config.solver, SolverKind::Milp);
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let yaml = r#"
form:
  decay_rate: 0.25
  normalization: percentile
  missing_history: role_mean
venue:
  batting_weight: 1.2
  home_team: CSK
  home_boost: 1.05
constraints:
  budget: 90.0
  team_bounds: { min: 2, max: 6 }
  role_bounds:
    WK: { min: 1, max: 2 }
solver: greedy
"#;
        let config = SelectorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.form.decay_rate, 0.25);
        assert_eq!(config.form.lookback_months, 36);
        assert_eq!(config.form.normalization, Normalization::Percentile);
        assert_eq!(config.form.missing_history, MissingHistory::RoleMean);
        assert_eq!(config.venue.home_team.as_deref(), Some("CSK"));
        assert_eq!(config.constraints.budget, 90.0);
        assert_eq!(config.constraints.team_bounds.max, 6);
        assert_eq!(config.constraints.bounds_for(Role::WicketKeeper).max, 2);
        assert_eq!(config.solver, SolverKind::Greedy);
    }

    #[test]
    fn test_incoherent_constraints_rejected() {
        let yaml = "constraints:\n  role_bounds:\n    BAT: { min: 5, max: 2 }\n";
        let err = SelectorConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidConstraints(_)));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = SelectorConfig::from_yaml_str("constraints: [1, 2").unwrap_err();
        assert!(matches!(err, SelectionError::Config(_)));
    }
}
