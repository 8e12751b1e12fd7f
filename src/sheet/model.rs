use serde::{Deserialize, Serialize};

use super::csv::{self, Row};

/// 1-based row number in the external sheet; row 1 holds the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetRow(pub u32);

impl SheetRow {
    /// Index into the data rows (header excluded), if this row addresses one.
    pub fn data_index(self) -> Option<usize> {
        self.0.checked_sub(2).map(|i| i as usize)
    }
}

/// Parsed export: header row followed by data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<Row>,
}

impl Sheet {
    pub fn parse(text: &str) -> Self {
        Self {
            rows: csv::parse(text),
        }
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn row(&self, row: SheetRow) -> Option<&Row> {
        row.data_index().and_then(|i| self.rows.get(i + 1))
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_rows_map_to_data_indices() {
        assert_eq!(SheetRow(0).data_index(), None);
        assert_eq!(SheetRow(1).data_index(), None);
        assert_eq!(SheetRow(2).data_index(), Some(0));
        assert_eq!(SheetRow(7).data_index(), Some(5));
    }

    #[test]
    fn addresses_rows_below_header() {
        let sheet = Sheet::parse("email,name\na@x.com,A\nb@x.com,B");
        assert_eq!(sheet.header(), ["email", "name"]);
        assert_eq!(sheet.row(SheetRow(1)), None);
        assert_eq!(sheet.row(SheetRow(2)).unwrap()[0], "a@x.com");
        assert_eq!(sheet.row(SheetRow(3)).unwrap()[1], "B");
        assert_eq!(sheet.row(SheetRow(4)), None);
    }

    #[test]
    fn empty_sheet_has_empty_header() {
        let sheet = Sheet::parse("");
        assert!(sheet.header().is_empty());
        assert!(sheet.into_rows().is_empty());
    }

    #[test]
    fn sheet_row_is_a_bare_number_on_the_wire() {
        assert_eq!(serde_json::to_string(&SheetRow(5)).unwrap(), "5");
        let row: SheetRow = serde_json::from_str("3").unwrap();
        assert_eq!(row, SheetRow(3));
    }
}
