//! Principal and claim types consumed by the gate

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single `(type, value)` assertion about the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, matched case-sensitively
    #[serde(rename = "type")]
    pub claim_type: String,
    /// Raw claim value, possibly a delimited list
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Authenticated caller as handed over by the authentication layer
///
/// A claim type may occur any number of times. The authentication layer is
/// expected to insert this into the request extensions before the gate runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsPrincipal {
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl ClaimsPrincipal {
    /// Create a principal from an arbitrary claim list
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    /// Create a principal holding no claims at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Add a claim, keeping any existing claims of the same type
    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(claim_type, value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl FromIterator<Claim> for ClaimsPrincipal {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Decoded JWT payload
///
/// Signature and expiry checks belong to the authentication layer; by the
/// time this reaches the gate the payload is trusted for its content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    #[serde(default)]
    pub sub: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Every other member, including permission and scope claims
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl JwtClaims {
    /// Parse a decoded JWT payload
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Values of one payload member, one entry per claim instance
    ///
    /// Strings give one value, arrays give one value per scalar element,
    /// numbers and booleans are rendered as text. Objects and nulls carry no
    /// claim value.
    pub fn values_of(&self, claim_type: &str) -> Vec<String> {
        match claim_type {
            "sub" => non_empty(&self.sub),
            "iss" => non_empty(&self.iss),
            "exp" => self.exp.iter().map(|exp| exp.to_string()).collect(),
            _ => match self.extra.get(claim_type) {
                Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
                Some(value) => scalar_to_string(value).into_iter().collect(),
                None => Vec::new(),
            },
        }
    }

    /// Flatten the payload into a claim list
    pub fn to_principal(&self) -> ClaimsPrincipal {
        let mut extra: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        extra.sort_unstable();

        let mut names = vec!["sub", "iss", "exp"];
        names.extend(extra);

        names
            .into_iter()
            .flat_map(|name| {
                self.values_of(name)
                    .into_iter()
                    .map(move |value| Claim::new(name, value))
            })
            .collect()
    }
}

impl From<&JwtClaims> for ClaimsPrincipal {
    fn from(claims: &JwtClaims) -> Self {
        claims.to_principal()
    }
}

fn non_empty(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
