//! Record sets backed by Polars data frames.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, Series,
};
use survey_map::{FieldCatalog, LogicalField, SchemaResolver};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_string_non_empty, parse_f64};

/// One data sheet: a named frame plus the resolver over its field names.
#[derive(Debug, Clone)]
pub struct RecordSet {
    name: String,
    frame: DataFrame,
    resolver: SchemaResolver,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        let resolver = resolver_for(&frame);
        Self {
            name: name.into(),
            frame,
            resolver,
        }
    }

    /// A record set with no fields and no records.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, DataFrame::empty())
    }

    /// Build a text-valued record set from named columns of equal length.
    pub fn from_columns<I, S, T>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Option<T>>)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let name = name.into();
        let cols: Vec<Column> = columns
            .into_iter()
            .map(|(field, values)| {
                let values: Vec<Option<String>> =
                    values.into_iter().map(|value| value.map(Into::into)).collect();
                Series::new(field.as_ref().into(), values).into_column()
            })
            .collect();
        let frame = DataFrame::new(cols).map_err(|e| IngestError::frame(&name, e))?;
        Ok(Self::new(name, frame))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn resolver(&self) -> &SchemaResolver {
        &self.resolver
    }

    pub fn field_names(&self) -> &[String] {
        self.resolver.field_names()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.resolver.contains(field)
    }

    pub fn resolve<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&str> {
        self.resolver.resolve(candidates)
    }

    pub fn resolve_field(&self, catalog: &FieldCatalog, field: LogicalField) -> Option<&str> {
        self.resolver.resolve_field(catalog, field)
    }

    /// Trimmed cell text; None for null, blank, or unknown fields.
    pub fn text(&self, field: &str, row: usize) -> Option<String> {
        let column = self.frame.column(field).ok()?;
        any_to_string_non_empty(column.get(row).unwrap_or(AnyValue::Null))
    }

    /// Numeric cell value; None when the cell is absent or not a number.
    pub fn number(&self, field: &str, row: usize) -> Option<f64> {
        self.text(field, row).as_deref().and_then(parse_f64)
    }

    /// Every cell of one field, or None when the field is unknown.
    pub fn texts(&self, field: &str) -> Option<Vec<Option<String>>> {
        let column = self.frame.column(field).ok()?;
        let values = (0..self.frame.height())
            .map(|idx| any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        Some(values)
    }

    /// Keep the records whose mask entry is true.
    pub fn filter(&self, keep: &[bool]) -> Result<Self> {
        if self.frame.width() == 0 {
            return Ok(self.clone());
        }
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        let frame = self
            .frame
            .filter(&mask)
            .map_err(|e| IngestError::frame(&self.name, e))?;
        Ok(Self {
            name: self.name.clone(),
            frame,
            resolver: self.resolver.clone(),
        })
    }

    /// Insert or replace a text field.
    pub fn set_texts(&mut self, field: &str, values: Vec<Option<String>>) -> Result<()> {
        let series = Series::new(field.into(), values);
        self.frame
            .with_column(series)
            .map_err(|e| IngestError::frame(&self.name, e))?;
        self.resolver = resolver_for(&self.frame);
        Ok(())
    }
}

fn resolver_for(frame: &DataFrame) -> SchemaResolver {
    SchemaResolver::new(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn households() -> RecordSet {
        RecordSet::from_columns(
            "household",
            vec![
                ("unique_code", vec![Some("HH001"), Some(" "), None]),
                ("Q17", vec![Some("25"), Some("abc"), Some(" 40 ")]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn text_treats_blank_as_absent() {
        let records = households();
        assert_eq!(records.text("unique_code", 0).as_deref(), Some("HH001"));
        assert_eq!(records.text("unique_code", 1), None);
        assert_eq!(records.text("unique_code", 2), None);
        assert_eq!(records.text("missing", 0), None);
    }

    #[test]
    fn number_fails_open_on_text() {
        let records = households();
        assert_eq!(records.number("Q17", 0), Some(25.0));
        assert_eq!(records.number("Q17", 1), None);
        assert_eq!(records.number("Q17", 2), Some(40.0));
    }

    #[test]
    fn filter_keeps_masked_rows() {
        let records = households();
        let kept = records.filter(&[true, false, true]).unwrap();
        assert_eq!(kept.height(), 2);
        assert_eq!(kept.text("Q17", 1).as_deref(), Some("40"));
    }

    #[test]
    fn set_texts_refreshes_resolver() {
        let mut records = households();
        records
            .set_texts("Q3.Ward", vec![Some("baawa".to_string()), None, None])
            .unwrap();
        assert_eq!(records.resolve(&["ward", "Q3.Ward"]), Some("Q3.Ward"));
        assert_eq!(records.field_names().len(), 3);
    }

    #[test]
    fn empty_record_set_has_no_fields() {
        let records = RecordSet::empty("household");
        assert!(records.is_empty());
        assert!(records.field_names().is_empty());
        assert_eq!(records.filter(&[]).unwrap().height(), 0);
    }
}
