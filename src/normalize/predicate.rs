//! Predicate Normalization
//!
//! Two-tier lookup of free-text relationship phrases: canonical element
//! names first, then the mapping table of deprecated predicates.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::model::Qualifier;

const DEFAULT_TABLE: &str = include_str!("../../data/predicate_table.yaml");

/// Phrases the spreadsheets spell differently from the model.
const SYNONYMS: &[(&str, &str)] = &[(
    "decreases abundance or activity of",
    "decreases activity or abundance of",
)];

const CHEMICAL_ENTITY: &str = "chemical entity";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelElement {
    pub name: String,
    #[serde(default)]
    pub id_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredicateMappingItem {
    #[serde(rename = "mapped predicate")]
    pub mapped_predicate: Option<String>,
    pub predicate: Option<String>,
    #[serde(rename = "qualified predicate")]
    pub qualified_predicate: Option<String>,
    #[serde(rename = "object aspect qualifier", default)]
    pub object_aspect_qualifier: Option<String>,
    #[serde(rename = "object direction qualifier", default)]
    pub object_direction_qualifier: Option<String>,
}

/// Read-only lookup table handed to the [`Normalizer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredicateTable {
    #[serde(default)]
    pub elements: Vec<ModelElement>,
    /// Collections are scanned in file order, items in list order.
    #[serde(default)]
    pub mappings: IndexMap<String, Vec<PredicateMappingItem>>,
}

impl PredicateTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Result<Self> {
        serde_yaml::from_str(DEFAULT_TABLE).context("Failed to parse built-in predicate table")
    }

    /// Load a table from YAML, or JSON when the file extension says so.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read predicate table {}", path.display()))?;

        let table = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(table)
    }
}

/// Result of converting one relationship phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateMapping {
    /// Canonical name with spaces replaced by underscores.
    pub predicate_name: String,
    pub object_aspect_qualifier: Option<String>,
    pub object_direction_qualifier: Option<String>,
    /// `biolink:`-prefixed qualified predicate, absent on a total miss.
    pub qualified_predicate: Option<String>,
}

impl PredicateMapping {
    fn passthrough(phrase: &str) -> Self {
        Self {
            predicate_name: phrase.to_string(),
            object_aspect_qualifier: None,
            object_direction_qualifier: None,
            qualified_predicate: None,
        }
    }

    /// Asset qualifiers for this mapping, present whenever a qualified
    /// predicate was found. Missing aspect/direction become empty values.
    pub fn qualifiers(&self) -> Option<Vec<Qualifier>> {
        let qualified = self.qualified_predicate.as_ref()?;
        let aspect = self.object_aspect_qualifier.as_deref().unwrap_or_default();
        let direction = self.object_direction_qualifier.as_deref().unwrap_or_default();

        Some(vec![
            Qualifier::new("biolink_qualified_predicate", qualified.clone()),
            Qualifier::new("biolink_object_aspect_qualifier", aspect.replace(' ', "_")),
            Qualifier::new("biolink_object_direction_qualifier", direction),
        ])
    }
}

pub struct Normalizer {
    table: PredicateTable,
    element_index: HashMap<String, usize>,
}

impl Normalizer {
    pub fn new(table: PredicateTable) -> Self {
        let element_index = table
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (element_key(&e.name), i))
            .collect();
        Self { table, element_index }
    }

    pub fn element(&self, name: &str) -> Option<&ModelElement> {
        self.element_index
            .get(&element_key(name))
            .map(|&i| &self.table.elements[i])
    }

    /// Id prefixes that mark an identifier as a chemical entity.
    pub fn chemical_prefixes(&self) -> &[String] {
        self.element(CHEMICAL_ENTITY)
            .map(|e| e.id_prefixes.as_slice())
            .unwrap_or_default()
    }

    pub fn convert_predicate(&self, phrase: &str) -> PredicateMapping {
        let phrase = SYNONYMS
            .iter()
            .find(|(from, _)| *from == phrase)
            .map(|(_, to)| *to)
            .unwrap_or(phrase);

        if let Some(element) = self.element(phrase) {
            return PredicateMapping {
                predicate_name: element.name.replace(' ', "_"),
                object_aspect_qualifier: None,
                object_direction_qualifier: None,
                qualified_predicate: Some(format!("biolink:{}", element.name)),
            };
        }

        let mapped = self
            .table
            .mappings
            .values()
            .flatten()
            .find(|item| item.mapped_predicate.as_deref() == Some(phrase));

        match mapped {
            Some(item) => PredicateMapping {
                predicate_name: item.predicate.as_deref().unwrap_or(phrase).replace(' ', "_"),
                object_aspect_qualifier: item.object_aspect_qualifier.clone(),
                object_direction_qualifier: item.object_direction_qualifier.clone(),
                qualified_predicate: item
                    .qualified_predicate
                    .as_ref()
                    .map(|q| format!("biolink:{}", q)),
            },
            None => {
                debug!("No predicate mapping for '{}', passing through", phrase);
                PredicateMapping::passthrough(phrase)
            }
        }
    }
}

fn element_key(name: &str) -> String {
    let name = name.trim();
    let name = name.strip_prefix("biolink:").unwrap_or(name);
    name.replace('_', " ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(PredicateTable::builtin().unwrap())
    }

    #[test]
    fn test_exact_element_match() {
        let mapping = normalizer().convert_predicate("gene associated with condition");

        assert_eq!(mapping.predicate_name, "gene_associated_with_condition");
        assert_eq!(mapping.object_aspect_qualifier, None);
        assert_eq!(mapping.qualified_predicate.as_deref(), Some("biolink:gene associated with condition"));
    }

    #[test]
    fn test_element_lookup_tolerates_curie_and_underscores() {
        let n = normalizer();
        assert!(n.element("biolink:treats").is_some());
        assert!(n.element("Physically_Interacts_With").is_some());
        assert!(n.element("cures").is_none());
    }

    #[test]
    fn test_mapping_table_fallback() {
        let mapping = normalizer().convert_predicate("increases expression of");

        assert_eq!(mapping.predicate_name, "affects");
        assert_eq!(mapping.object_aspect_qualifier.as_deref(), Some("expression"));
        assert_eq!(mapping.object_direction_qualifier.as_deref(), Some("increased"));
        assert_eq!(mapping.qualified_predicate.as_deref(), Some("biolink:causes"));
    }

    #[test]
    fn test_synonym_rule_is_symmetric_in_result() {
        let n = normalizer();
        assert_eq!(
            n.convert_predicate("decreases abundance or activity of"),
            n.convert_predicate("decreases activity or abundance of")
        );
    }

    #[test]
    fn test_first_mapping_wins() {
        let table: PredicateTable = serde_yaml::from_str(
            r#"
mappings:
  first:
    - mapped predicate: blocks
      predicate: affects
      qualified predicate: causes
      object direction qualifier: decreased
  second:
    - mapped predicate: blocks
      predicate: regulates
      qualified predicate: regulates
"#,
        )
        .unwrap();

        let mapping = Normalizer::new(table).convert_predicate("blocks");
        assert_eq!(mapping.predicate_name, "affects");
        assert_eq!(mapping.object_aspect_qualifier, None);
    }

    #[test]
    fn test_total_miss_passes_phrase_through() {
        let mapping = normalizer().convert_predicate("is best friends with");

        assert_eq!(mapping.predicate_name, "is best friends with");
        assert_eq!(mapping.qualified_predicate, None);
        assert_eq!(mapping.qualifiers(), None);
    }

    #[test]
    fn test_qualifiers_fill_missing_parts_with_empty_values() {
        let quals = normalizer().convert_predicate("treats").qualifiers().unwrap();
        let values: Vec<_> = quals.iter().map(|q| q.value.as_str()).collect();
        assert_eq!(values, vec!["biolink:treats", "", ""]);

        let quals = normalizer()
            .convert_predicate("decreases activity or abundance of")
            .qualifiers()
            .unwrap();
        assert_eq!(quals[1].value, "activity_or_abundance");
        assert_eq!(quals[2].value, "decreased");
    }

    #[test]
    fn test_chemical_prefixes_loaded() {
        let n = normalizer();
        assert!(n.chemical_prefixes().iter().any(|p| p == "PUBCHEM.COMPOUND"));
    }

    #[test]
    fn test_load_json_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"elements": [{"name": "treats"}], "mappings": {}}"#,
        )
        .unwrap();

        let table = PredicateTable::load(&path).unwrap();
        assert_eq!(table.elements.len(), 1);
    }
}
