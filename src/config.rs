//! Configuration parsing module for the permission gate
//!
//! Each protected endpoint gets a `PermissionsConfig`. It can be built in code
//! or loaded from a TOML file holding one table per endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use claims_gate::config::load_config;
//!
//! let config = load_config("gate.toml")?;
//! let orders = config.endpoint("orders_write")?;
//! ```

use crate::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Claim type carrying permission grants unless configured otherwise
pub const DEFAULT_PERMISSION_CLAIM_TYPE: &str = "permissions";

/// Claim type carrying scope grants unless configured otherwise
pub const DEFAULT_SCOPE_CLAIM_TYPE: &str = "http://schemas.microsoft.com/identity/claims/scope";

/// Separator for permission tokens packed into one claim value
pub const DEFAULT_PERMISSION_CLAIM_SEPARATOR: char = ',';

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Per-endpoint permission requirements keyed by endpoint name
    #[serde(default)]
    pub endpoints: BTreeMap<String, PermissionsConfig>,
}

impl GateConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_config(path)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GateError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Get the requirements of one endpoint
    pub fn endpoint(&self, name: &str) -> Result<PermissionsConfig> {
        self.endpoints.get(name).cloned().ok_or_else(|| {
            GateError::Config(format!("No permissions configured for endpoint '{}'", name))
        })
    }
}

/// Requirements of a single endpoint
///
/// Fixed once the gate is built. Any one of `allowed_permissions` is enough;
/// an empty list lets nothing through by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Permissions that satisfy the check (any one suffices)
    #[serde(default)]
    pub allowed_permissions: Vec<String>,

    /// Accept a matching scope claim as equivalent to a permission
    #[serde(default = "default_allow_scopes")]
    pub allow_scopes: bool,

    /// Claim type holding permission grants
    #[serde(default = "default_permission_claim_type")]
    pub permission_claim_type: String,

    /// Separator for permission tokens packed into one claim value
    #[serde(default = "default_permission_claim_separator")]
    pub permission_claim_separator: char,

    /// Claim type holding scope grants
    #[serde(default = "default_scope_claim_type")]
    pub scope_claim_type: String,

    /// Separator for scope tokens; falls back to `permission_claim_separator`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_claim_separator: Option<char>,
}

fn default_allow_scopes() -> bool {
    true
}

fn default_permission_claim_type() -> String {
    DEFAULT_PERMISSION_CLAIM_TYPE.to_string()
}

fn default_permission_claim_separator() -> char {
    DEFAULT_PERMISSION_CLAIM_SEPARATOR
}

fn default_scope_claim_type() -> String {
    DEFAULT_SCOPE_CLAIM_TYPE.to_string()
}

impl PermissionsConfig {
    /// Require any one of `allowed_permissions`, with every other setting at its default
    pub fn new<I, P>(allowed_permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            allowed_permissions: allowed_permissions.into_iter().map(Into::into).collect(),
            allow_scopes: default_allow_scopes(),
            permission_claim_type: default_permission_claim_type(),
            permission_claim_separator: DEFAULT_PERMISSION_CLAIM_SEPARATOR,
            scope_claim_type: default_scope_claim_type(),
            scope_claim_separator: None,
        }
    }

    pub fn with_allow_scopes(mut self, allow_scopes: bool) -> Self {
        self.allow_scopes = allow_scopes;
        self
    }

    pub fn with_permission_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.permission_claim_type = claim_type.into();
        self
    }

    pub fn with_permission_claim_separator(mut self, separator: char) -> Self {
        self.permission_claim_separator = separator;
        self
    }

    pub fn with_scope_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.scope_claim_type = claim_type.into();
        self
    }

    pub fn with_scope_claim_separator(mut self, separator: char) -> Self {
        self.scope_claim_separator = Some(separator);
        self
    }

    /// Separator actually used when splitting scope claims
    pub fn effective_scope_separator(&self) -> char {
        self.scope_claim_separator
            .unwrap_or(self.permission_claim_separator)
    }
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Example
///
/// ```rust,ignore
/// let config = claims_gate::config::load_config("gate.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GateConfig> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading gate configuration");

    let content = std::fs::read_to_string(path)?;
    let config = GateConfig::from_toml_str(&content)?;

    for (name, endpoint) in &config.endpoints {
        if endpoint.allowed_permissions.is_empty() {
            tracing::warn!(endpoint = %name, "Endpoint has no allowed permissions; every request will be rejected");
        }
    }

    Ok(config)
}
