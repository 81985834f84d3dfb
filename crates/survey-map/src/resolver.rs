//! Resolution of logical concepts to concrete field names.

use std::collections::HashSet;

use rapidfuzz::distance::jaro_winkler;

use crate::catalog::FieldCatalog;
use crate::fields::LogicalField;
use crate::utils::normalize_text;

/// Minimum Jaro-Winkler similarity for a near-miss suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Known field names of one record set.
///
/// Resolution is exact and ordered: the first candidate present wins, later
/// candidates are never consulted.
#[derive(Debug, Clone, Default)]
pub struct SchemaResolver {
    /// Field names in schema order.
    names: Vec<String>,
    lookup: HashSet<String>,
}

/// A field that looks like a candidate name but does not match it exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSuggestion {
    pub candidate: String,
    pub field: String,
    pub similarity: f64,
}

impl SchemaResolver {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        let lookup = names.iter().cloned().collect();
        Self { names, lookup }
    }

    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    /// First candidate present in the schema.
    pub fn resolve<'a, S: AsRef<str>>(&'a self, candidates: &[S]) -> Option<&'a str> {
        candidates.iter().find_map(|candidate| {
            self.lookup
                .get(candidate.as_ref())
                .map(String::as_str)
        })
    }

    /// Resolve a logical concept using the catalog's candidate list.
    pub fn resolve_field(&self, catalog: &FieldCatalog, field: LogicalField) -> Option<&str> {
        self.resolve(catalog.candidates(field))
    }

    /// Fields whose lower-cased name contains every fragment.
    pub fn fields_containing_all(&self, fragments: &[&str]) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| {
                let lower = name.to_lowercase();
                fragments
                    .iter()
                    .all(|fragment| lower.contains(&fragment.to_lowercase()))
            })
            .map(String::as_str)
            .collect()
    }

    /// Candidates present in the schema, in candidate order.
    pub fn present<'a, S: AsRef<str>>(&'a self, candidates: &[S]) -> Vec<&'a str> {
        candidates
            .iter()
            .filter_map(|candidate| self.lookup.get(candidate.as_ref()).map(String::as_str))
            .collect()
    }

    /// Near-miss fields for an unresolved candidate list, best first.
    ///
    /// Used for diagnostics only; resolution itself never matches fuzzily.
    pub fn suggest<S: AsRef<str>>(&self, candidates: &[S], limit: usize) -> Vec<FieldSuggestion> {
        let mut suggestions = Vec::new();
        for candidate in candidates {
            let normalized_candidate = normalize_text(candidate.as_ref());
            for name in &self.names {
                let similarity = jaro_winkler::similarity(
                    normalized_candidate.chars(),
                    normalize_text(name).chars(),
                );
                if similarity >= SUGGESTION_THRESHOLD && name != candidate.as_ref() {
                    suggestions.push(FieldSuggestion {
                        candidate: candidate.as_ref().to_string(),
                        field: name.clone(),
                        similarity,
                    });
                }
            }
        }
        suggestions.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.field.cmp(&b.field))
        });
        let mut seen = HashSet::new();
        suggestions.retain(|suggestion| seen.insert(suggestion.field.clone()));
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_candidate_wins() {
        let resolver = SchemaResolver::new(["LGA", "lga", "ward"]);
        assert_eq!(resolver.resolve(&["lgas", "lga", "LGA"]), Some("lga"));
        assert_eq!(resolver.resolve(&["LGA", "lga"]), Some("LGA"));
    }

    #[test]
    fn resolution_is_case_sensitive() {
        let resolver = SchemaResolver::new(["Ward"]);
        assert_eq!(resolver.resolve(&["ward"]), None);
        assert_eq!(resolver.resolve(&["ward", "Ward"]), Some("Ward"));
    }

    #[test]
    fn absent_when_nothing_matches() {
        let resolver = SchemaResolver::new(["a", "b"]);
        let empty: [&str; 0] = [];
        assert_eq!(resolver.resolve(&["c"]), None);
        assert_eq!(resolver.resolve(&empty), None);
    }

    #[test]
    fn resolves_logical_fields_through_catalog() {
        let resolver = SchemaResolver::new(["Q3.Ward", "Q2. Local Government Area"]);
        let catalog = FieldCatalog::default();
        assert_eq!(
            resolver.resolve_field(&catalog, LogicalField::Region),
            Some("Q2. Local Government Area")
        );
        assert_eq!(
            resolver.resolve_field(&catalog, LogicalField::Ward),
            Some("Q3.Ward")
        );
        assert_eq!(resolver.resolve_field(&catalog, LogicalField::Community), None);
    }

    #[test]
    fn finds_fields_by_fragments() {
        let resolver = SchemaResolver::new([
            "Total_Children_U5",
            "eligible_children",
            "child_name",
        ]);
        assert_eq!(
            resolver.fields_containing_all(&["child", "total"]),
            vec!["Total_Children_U5"]
        );
        assert_eq!(
            resolver.fields_containing_all(&["eligible", "child"]),
            vec!["eligible_children"]
        );
    }

    #[test]
    fn suggests_near_misses() {
        let resolver = SchemaResolver::new(["Q3 Ward", "username"]);
        let suggestions = resolver.suggest(&["Q3.Ward"], 3);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].field, "Q3 Ward");
    }
}
