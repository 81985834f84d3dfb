use serde::{Deserialize, Serialize};

/// One row of the static community reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityEntry {
    pub region: String,
    pub ward: String,
    pub community_code: String,
    pub community_name: String,
    /// Target household count assigned before data collection.
    pub planned_households: u32,
}
