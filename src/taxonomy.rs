//! Static tactic taxonomy
//!
//! A read-only knowledge base of known persuasion/manipulation tactics,
//! grouped by category. Loaded once at startup and used as contextual
//! grounding for the analysis prompt; it is never used to validate what the
//! generative service returns. A missing or malformed resource degrades to
//! the empty taxonomy with a warning, never a startup failure.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One named tactic inside a category.
#[derive(Debug, Clone, Deserialize)]
pub struct TacticDefinition {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// On-disk document shape: a single `taxonomy` key mapping category name to
/// its tactic definitions. A document without the key parses as empty.
#[derive(Debug, Deserialize)]
struct TaxonomyDocument {
    #[serde(default)]
    taxonomy: BTreeMap<String, Vec<TacticDefinition>>,
}

/// Process-wide, read-only tactic catalog.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    categories: BTreeMap<String, Vec<TacticDefinition>>,
}

impl Taxonomy {
    /// The empty taxonomy (no categories).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the taxonomy from a JSON resource.
    ///
    /// Absence, unreadability, and malformation all degrade to the empty
    /// taxonomy; the cause is logged at warn level and startup continues.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "taxonomy resource not readable, continuing with empty taxonomy"
                );
                return Self::empty();
            }
        };

        match serde_json::from_str::<TaxonomyDocument>(&raw) {
            Ok(document) => {
                let taxonomy = Self {
                    categories: document.taxonomy,
                };
                tracing::info!(
                    path = %path.display(),
                    categories = taxonomy.category_count(),
                    tactics = taxonomy.tactic_count(),
                    "taxonomy loaded"
                );
                taxonomy
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "taxonomy resource malformed, continuing with empty taxonomy"
                );
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn tactic_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Iterate categories and their tactics in stable (alphabetical) order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[TacticDefinition])> {
        self.categories
            .iter()
            .map(|(name, tactics)| (name.as_str(), tactics.as_slice()))
    }
}
