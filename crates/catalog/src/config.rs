//! Catalog configuration.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockwise_core::CatalogError;

/// Environment variable selecting the [`MissingProductPolicy`].
pub const MISSING_PRODUCT_POLICY_ENV: &str = "STOCKWISE_MISSING_PRODUCT_POLICY";

/// What order processing does with a line item whose product is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingProductPolicy {
    /// Drop the line item and keep going.
    #[default]
    Skip,
    /// Reject the whole order before any stock is touched.
    Abort,
}

impl MissingProductPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingProductPolicy::Skip => "skip",
            MissingProductPolicy::Abort => "abort",
        }
    }
}

impl core::fmt::Display for MissingProductPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingProductPolicy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MissingProductPolicy::Skip),
            "abort" => Ok(MissingProductPolicy::Abort),
            other => Err(CatalogError::validation(format!(
                "unknown missing-product policy '{other}' (expected 'skip' or 'abort')"
            ))),
        }
    }
}

/// Runtime configuration for a [`crate::CatalogManager`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub missing_product_policy: MissingProductPolicy,
}

impl CatalogConfig {
    /// Read configuration from the process environment.
    ///
    /// Invalid values are logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CatalogConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(MISSING_PRODUCT_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => config.missing_product_policy = policy,
                Err(e) => tracing::warn!(
                    variable = MISSING_PRODUCT_POLICY_ENV,
                    error = %e,
                    default = %config.missing_product_policy,
                    "invalid catalog configuration; using default"
                ),
            }
        }

        config
    }

    pub fn with_missing_product_policy(mut self, policy: MissingProductPolicy) -> Self {
        self.missing_product_policy = policy;
        self
    }
}
