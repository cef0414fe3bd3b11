//! Engine configuration.
//!
//! [`EngineConfig`] carries the recognized configuration options: strategy,
//! the all-abstain and tie sub-policies, fault degradation, label voter
//! settings and the label hierarchy. It is loaded from TOML once at startup
//! and turned into an immutable [`DecisionManager`](crate::DecisionManager).
//!
//! ```toml
//! strategy = "consensus"
//! allow_if_all_abstain = false
//! allow_on_tie = false
//! degrade_voter_faults = true
//!
//! [label_voter]
//! prefix = "ROLE_"
//! on_missing = "deny"
//!
//! [hierarchy]
//! ROLE_ADMIN = ["ROLE_MODERATOR"]
//! ROLE_MODERATOR = ["ROLE_USER"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hierarchy::LabelHierarchy;
use crate::manager::DecisionManagerBuilder;
use crate::strategy::{Strategy, StrategyPolicy};
use crate::voter::{DEFAULT_LABEL_PREFIX, LabelVoter, MissingLabelPolicy};

/// Environment variable naming the default configuration file.
pub const CONFIG_ENV_VAR: &str = "WARRANT_CONFIG";

/// Settings for the built-in [`LabelVoter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelVoterConfig {
    /// Prefix that makes an attribute label-shaped.
    pub prefix: String,
    /// Vote for label-shaped attributes the actor lacks.
    pub on_missing: MissingLabelPolicy,
}

impl Default for LabelVoterConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LABEL_PREFIX.to_string(),
            on_missing: MissingLabelPolicy::default(),
        }
    }
}

/// Complete engine configuration.
///
/// Every field has a default, so an empty file is a valid configuration:
/// affirmative strategy, deny on all-abstain and on ties, fault degradation
/// on, `ROLE_` labels, no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Aggregation strategy.
    pub strategy: Strategy,
    /// Outcome when every voter abstains.
    pub allow_if_all_abstain: bool,
    /// Outcome of a consensus tie.
    pub allow_on_tie: bool,
    /// Count failing voters as abstaining instead of aborting the decision.
    pub degrade_voter_faults: bool,
    /// Label voter settings.
    pub label_voter: LabelVoterConfig,
    /// Label -> labels it implies.
    pub hierarchy: BTreeMap<String, Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            allow_if_all_abstain: false,
            allow_on_tie: false,
            degrade_voter_faults: true,
            label_voter: LabelVoterConfig::default(),
            hierarchy: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::parse(e, None))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::parse(e, Some(path)))?;
        log::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Strategy with its sub-policies.
    pub fn policy(&self) -> StrategyPolicy {
        StrategyPolicy::new(self.strategy)
            .allow_if_all_abstain(self.allow_if_all_abstain)
            .allow_on_tie(self.allow_on_tie)
    }

    /// Validate and build the label hierarchy.
    pub fn build_hierarchy(&self) -> Result<LabelHierarchy> {
        LabelHierarchy::new(
            self.hierarchy
                .iter()
                .map(|(label, implied)| (label.clone(), implied.clone())),
        )
    }

    /// A label voter over `hierarchy` with the configured prefix and policy.
    pub fn label_voter(&self, hierarchy: Arc<LabelHierarchy>) -> LabelVoter {
        LabelVoter::new(hierarchy)
            .with_prefix(self.label_voter.prefix.clone())
            .with_missing_policy(self.label_voter.on_missing)
    }

    /// Check the whole configuration without building anything else.
    pub fn validate(&self) -> Result<()> {
        self.build_hierarchy().map(|_| ())
    }

    /// A builder with policies applied and the label voter registered first.
    ///
    /// Returns the shared hierarchy too, so application voters can be
    /// constructed over the same label closure before they are registered.
    pub fn manager_builder(&self) -> Result<(DecisionManagerBuilder, Arc<LabelHierarchy>)> {
        let hierarchy = Arc::new(self.build_hierarchy()?);
        let builder = DecisionManagerBuilder::new()
            .with_config(self)
            .named_voter("labels", self.label_voter(hierarchy.clone()));
        Ok((builder, hierarchy))
    }
}
