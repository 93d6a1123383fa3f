use std::collections::HashSet;

use crate::types::{ClaimsPrincipal, JwtClaims};

/// Anything that can answer "all values for claim type T"
///
/// Lookups are exact and case-sensitive. Each returned entry is one claim
/// instance; its value may still pack several tokens behind a separator.
pub trait ClaimSource {
    fn claim_values(&self, claim_type: &str) -> Vec<String>;
}

impl ClaimSource for ClaimsPrincipal {
    fn claim_values(&self, claim_type: &str) -> Vec<String> {
        self.claims
            .iter()
            .filter(|claim| claim.claim_type == claim_type)
            .map(|claim| claim.value.clone())
            .collect()
    }
}

impl ClaimSource for JwtClaims {
    fn claim_values(&self, claim_type: &str) -> Vec<String> {
        self.values_of(claim_type)
    }
}

impl<T: ClaimSource + ?Sized> ClaimSource for &T {
    fn claim_values(&self, claim_type: &str) -> Vec<String> {
        (**self).claim_values(claim_type)
    }
}

/// Split one raw claim value into trimmed, non-empty tokens
pub fn split_claim_value(raw: &str, separator: char) -> impl Iterator<Item = &str> {
    raw.split(separator)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Every candidate token the source carries for `claim_type`
///
/// Two claim instances `"x"` and `"y"` produce the same set as a single
/// instance `"x,y"` split on `,`.
pub fn candidate_tokens<S: ClaimSource + ?Sized>(
    source: &S,
    claim_type: &str,
    separator: char,
) -> HashSet<String> {
    source
        .claim_values(claim_type)
        .iter()
        .flat_map(|raw| split_claim_value(raw, separator).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Claim;

    fn tokens(raw: &str, separator: char) -> Vec<&str> {
        split_claim_value(raw, separator).collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_trims_whitespace() {
        assert_eq!(tokens("a, b ,c", ','), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_discards_empty_tokens() {
        assert_eq!(tokens(",a,,b,", ','), vec!["a", "b"]);
        assert_eq!(tokens(" , ,", ','), Vec::<&str>::new());
        assert_eq!(tokens("", ','), Vec::<&str>::new());
    }

    #[test]
    fn test_split_custom_separator() {
        assert_eq!(tokens("read;write", ';'), vec!["read", "write"]);
        assert_eq!(tokens("read,write", ';'), vec!["read,write"]);
    }

    #[test]
    fn test_claim_values_exact_type_match() {
        let principal = ClaimsPrincipal::new(vec![
            Claim::new("permissions", "a"),
            Claim::new("Permissions", "b"),
            Claim::new("permissions", "c"),
        ]);

        assert_eq!(principal.claim_values("permissions"), vec!["a", "c"]);
        assert_eq!(principal.claim_values("Permissions"), vec!["b"]);
        assert!(principal.claim_values("scope").is_empty());
    }

    #[test]
    fn test_multiple_claims_equal_packed_claim() {
        let separate = ClaimsPrincipal::anonymous()
            .with_claim("permissions", "x")
            .with_claim("permissions", "y");
        let packed = ClaimsPrincipal::anonymous().with_claim("permissions", "x,y");

        assert_eq!(
            candidate_tokens(&separate, "permissions", ','),
            candidate_tokens(&packed, "permissions", ',')
        );
        assert_eq!(candidate_tokens(&packed, "permissions", ','), set(&["x", "y"]));
    }

    #[test]
    fn test_candidate_tokens_from_jwt_array_and_packed_string() {
        let claims = JwtClaims::from_json(
            r#"{"permissions": ["orders.read", "orders.write, orders.delete"]}"#,
        )
        .unwrap();

        assert_eq!(
            candidate_tokens(&claims, "permissions", ','),
            set(&["orders.read", "orders.write", "orders.delete"])
        );
    }
}
