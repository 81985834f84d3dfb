use std::collections::HashMap;

use survey_model::CommunityEntry;

/// Immutable community reference data with code and name lookups.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<CommunityEntry>,
    by_code: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new(entries: Vec<CommunityEntry>) -> Self {
        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_code.insert(entry.community_code.clone(), idx);
            by_name.insert(entry.community_name.clone(), idx);
        }
        Self {
            entries,
            by_code,
            by_name,
        }
    }

    /// Entries in table order, duplicates included.
    pub fn entries(&self) -> &[CommunityEntry] {
        &self.entries
    }

    /// Entries with one row per community code (last occurrence), in first-seen order.
    pub fn communities(&self) -> Vec<&CommunityEntry> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .filter(|entry| seen.insert(entry.community_code.as_str()))
            .filter_map(|entry| self.entry(&entry.community_code))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, code: &str) -> Option<&CommunityEntry> {
        self.by_code.get(code).map(|idx| &self.entries[*idx])
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.entry(code).map(|entry| entry.community_name.as_str())
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|idx| self.entries[*idx].community_code.as_str())
    }

    pub fn planned_for(&self, code: &str) -> Option<u32> {
        self.entry(code).map(|entry| entry.planned_households)
    }

    /// Distinct regions in table order.
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !regions.contains(&entry.region.as_str()) {
                regions.push(&entry.region);
            }
        }
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, name: &str, planned: u32) -> CommunityEntry {
        CommunityEntry {
            region: "kiru".to_string(),
            ward: "baawa".to_string(),
            community_code: code.to_string(),
            community_name: name.to_string(),
            planned_households: planned,
        }
    }

    #[test]
    fn lookups_in_both_directions() {
        let table = ReferenceTable::new(vec![entry("50111", "Baawa Cikin Gari", 57)]);
        assert_eq!(table.name_for("50111"), Some("Baawa Cikin Gari"));
        assert_eq!(table.code_for("Baawa Cikin Gari"), Some("50111"));
        assert_eq!(table.planned_for("50111"), Some(57));
        assert_eq!(table.planned_for("99999"), None);
    }

    #[test]
    fn communities_collapse_duplicate_codes() {
        let table = ReferenceTable::new(vec![
            entry("1", "A", 3),
            entry("2", "B", 4),
            entry("1", "A2", 5),
        ]);
        let communities = table.communities();
        assert_eq!(communities.len(), 2);
        assert_eq!(communities[0].community_name, "A2");
        assert_eq!(communities[1].community_code, "2");
    }
}
