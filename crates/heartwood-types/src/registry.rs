//! Injected catalog of available wood tokens.
//!
//! Passed explicitly to layout and pricing code so both stay testable in
//! isolation; never a module-level singleton.

use serde::{Deserialize, Serialize};

/// The set of wood tokens a cell may hold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WoodRegistry {
    tokens: Vec<String>,
}

impl WoodRegistry {
    pub fn new(tokens: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The stock catalog offered by the storefront.
    pub fn standard() -> Self {
        Self::new([
            "maple",
            "walnut",
            "cherry",
            "oak",
            "padauk",
            "wenge",
            "purpleheart",
            "ash",
        ])
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for WoodRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let registry = WoodRegistry::standard();
        assert!(registry.contains("walnut"));
        assert!(!registry.contains("balsa"));
        assert_eq!(registry.len(), 8);
    }
}
