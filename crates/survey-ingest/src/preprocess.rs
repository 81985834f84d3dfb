//! Community code normalisation applied after loading.

use survey_standards::ReferenceTable;
use tracing::debug;

use crate::error::Result;
use crate::workbook::Workbook;

/// Field carrying raw community codes in the household export.
pub const RAW_COMMUNITY_CODE_COLUMN: &str = "community_name";
/// Preserved copy of the raw codes used for grouping.
pub const COMMUNITY_CODE_COLUMN: &str = "Community_Code_Original";
/// Human-readable community name.
pub const COMMUNITY_NAME_COLUMN: &str = "Q4. Community Name";

/// Copy raw community codes to [`COMMUNITY_CODE_COLUMN`] and derive names.
///
/// Names come from the reference table; codes the table does not know keep
/// any name already present in the record. A no-op when the primary set has
/// no raw code field.
pub fn preprocess(workbook: &mut Workbook, reference: &ReferenceTable) -> Result<()> {
    let primary = &mut workbook.primary;
    let Some(codes) = primary.texts(RAW_COMMUNITY_CODE_COLUMN) else {
        debug!(sheet = primary.name(), "no community code field, skipping preprocessing");
        return Ok(());
    };
    let existing_names = primary.texts(COMMUNITY_NAME_COLUMN);

    let mut mapped = 0usize;
    let names: Vec<Option<String>> = codes
        .iter()
        .enumerate()
        .map(|(idx, code)| {
            let from_reference = code
                .as_deref()
                .and_then(|code| reference.name_for(code))
                .map(str::to_string);
            if from_reference.is_some() {
                mapped += 1;
            }
            from_reference.or_else(|| {
                existing_names
                    .as_ref()
                    .and_then(|names| names.get(idx).cloned().flatten())
            })
        })
        .collect();

    primary.set_texts(COMMUNITY_CODE_COLUMN, codes)?;
    primary.set_texts(COMMUNITY_NAME_COLUMN, names)?;
    debug!(
        sheet = primary.name(),
        records = primary.height(),
        mapped,
        "derived community names from reference table"
    );
    Ok(())
}
