use std::collections::BTreeMap;

use crate::record::RecordSet;

/// A primary household record set plus auxiliary child repeat-group sets.
///
/// Auxiliary sets are keyed by sheet name and iterate in name order.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub primary: RecordSet,
    pub auxiliary: BTreeMap<String, RecordSet>,
}

impl Workbook {
    pub fn new(primary: RecordSet) -> Self {
        Self {
            primary,
            auxiliary: BTreeMap::new(),
        }
    }

    /// The fallback used when a load fails.
    pub fn empty() -> Self {
        Self::new(RecordSet::empty("household"))
    }

    pub fn with_auxiliary(mut self, records: RecordSet) -> Self {
        self.auxiliary.insert(records.name().to_string(), records);
        self
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        std::iter::once(self.primary.name())
            .chain(self.auxiliary.keys().map(String::as_str))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.auxiliary.values().all(RecordSet::is_empty)
    }
}
