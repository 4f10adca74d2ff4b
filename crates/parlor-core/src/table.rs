//! Tabular datasets and their CSV encoding
//!
//! A [`Table`] is an ordered header plus rows of raw cell text. Cells are
//! kept as the exact strings read from the file so that rewriting a table
//! never reformats cells nobody touched.

use thiserror::Error;

use crate::model::Record;

/// Table errors
#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode table: {0}")]
    Encode(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Row has {actual} cells, expected {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// A named set of cells to append to a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.push((column.into(), value.into()));
        self
    }

    /// Build a row from a typed record
    #[must_use]
    pub fn from_record<R: Record>(record: &R) -> Self {
        let cells = R::columns()
            .iter()
            .map(|c| (*c).to_string())
            .zip(record.to_cells())
            .collect();
        Self { cells }
    }

    /// Value of a column in this row
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }
}

/// Header plus rows of cell text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given header
    #[must_use]
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Decode a CSV blob with a header line
    ///
    /// An empty blob decodes to a table with no header and no rows. Short
    /// rows are padded with empty cells; long rows are truncated.
    ///
    /// # Errors
    /// Returns an error if the CSV is malformed
    pub fn from_csv(bytes: &[u8]) -> Result<Self, TableError> {
        if bytes.iter().all(|b| matches!(b, b'\n' | b'\r')) {
            return Ok(Self::default());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Encode as CSV with a header line
    ///
    /// # Errors
    /// Returns an error if the CSV writer fails
    pub fn to_csv(&self) -> Result<Vec<u8>, TableError> {
        if self.columns.is_empty() {
            return Ok(Vec::new());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| TableError::Encode(e.to_string()))
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows (with or without a header)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at a row and column
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Overwrite one cell in place
    ///
    /// # Errors
    /// Returns an error if the column is unknown or the row is out of range
    pub fn set_cell(
        &mut self,
        row: usize,
        column: &str,
        value: impl Into<String>,
    ) -> Result<(), TableError> {
        let col = self
            .column_index(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        let len = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(TableError::RowOutOfRange { index: row, len })?;
        target[col] = value.into();
        Ok(())
    }

    /// Append a row of cells aligned with the header
    ///
    /// # Errors
    /// Returns an error if the row width differs from the header width
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::WidthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a named row, aligning it with the header
    ///
    /// Columns the table lacks are added (existing rows get empty cells);
    /// columns the row lacks are left empty.
    pub fn push_named(&mut self, row: &Row) {
        for column in row.columns() {
            if self.column_index(column).is_none() {
                self.columns.push(column.to_string());
                for existing in &mut self.rows {
                    existing.push(String::new());
                }
            }
        }

        let cells = self
            .columns
            .iter()
            .map(|c| row.get(c).unwrap_or_default().to_string())
            .collect();
        self.rows.push(cells);
    }

    /// All cells of a column, top to bottom
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a str> + 'a {
        let col = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |r| col.map(|c| r[c].as_str()))
    }

    /// Keep only the rows matching a predicate
    #[must_use]
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Self, usize) -> bool,
    {
        let rows = (0..self.rows.len())
            .filter(|&i| keep(self, i))
            .map(|i| self.rows[i].clone())
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS_CSV: &str = "Date,Product,Quantity,Unit,Price,Total,Party,Advance,Status\n\
        2024-01-01,Milk,10.0,ltr,50.0,500.0,Acme,100.0,Pending\n\
        2024-01-02,\"Dahi, sweet\",1.5,kg,80.0,120.0,,0.0,Completed\n";

    #[test]
    fn test_decode_orders() {
        let table = Table::from_csv(ORDERS_CSV.as_bytes()).unwrap();
        assert_eq!(table.columns().len(), 9);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "Product"), Some("Dahi, sweet"));
        assert_eq!(table.cell(1, "Party"), Some(""));
        assert_eq!(table.cell(0, "Missing"), None);
        assert_eq!(table.cell(5, "Product"), None);
    }

    #[test]
    fn test_encode_is_stable() {
        let table = Table::from_csv(ORDERS_CSV.as_bytes()).unwrap();
        let bytes = table.to_csv().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), ORDERS_CSV);
    }

    #[test]
    fn test_empty_blob_is_empty_table() {
        let table = Table::from_csv(b"").unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert!(table.to_csv().unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_are_empty_table() {
        assert!(Table::from_csv(b"\n\r\n").unwrap().columns().is_empty());
    }

    #[test]
    fn test_whitespace_header_is_kept() {
        let table = Table::with_columns(&[" "]);
        let bytes = table.to_csv().unwrap();
        assert_eq!(Table::from_csv(&bytes).unwrap().columns(), &[" ".to_string()]);
    }

    #[test]
    fn test_header_only() {
        let table = Table::from_csv(b"Date,Product\n").unwrap();
        assert_eq!(table.columns(), &["Date".to_string(), "Product".to_string()]);
        assert!(table.is_empty());
        assert_eq!(table.to_csv().unwrap(), b"Date,Product\n");
    }

    #[test]
    fn test_ragged_rows_are_aligned() {
        let table = Table::from_csv(b"A,B,C\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows()[0], vec!["1", "", ""]);
        assert_eq!(table.rows()[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_set_cell() {
        let mut table = Table::from_csv(ORDERS_CSV.as_bytes()).unwrap();
        table.set_cell(0, "Status", "Completed").unwrap();
        assert_eq!(table.cell(0, "Status"), Some("Completed"));

        assert!(matches!(
            table.set_cell(9, "Status", "Completed"),
            Err(TableError::RowOutOfRange { index: 9, len: 2 })
        ));
        assert!(matches!(
            table.set_cell(0, "Colour", "red"),
            Err(TableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::with_columns(&["A", "B"]);
        table.push_row(vec!["1".into(), "2".into()]).unwrap();
        assert!(table.push_row(vec!["1".into()]).is_err());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_push_named_adopts_header_when_empty() {
        let mut table = Table::default();
        table.push_named(&Row::new().with("Date", "2024-01-01").with("Product", "Milk"));
        assert_eq!(table.columns(), &["Date".to_string(), "Product".to_string()]);
        assert_eq!(table.cell(0, "Product"), Some("Milk"));
    }

    #[test]
    fn test_push_named_aligns_columns() {
        let mut table = Table::with_columns(&["A", "B"]);
        table.push_row(vec!["1".into(), "2".into()]).unwrap();
        table.push_named(&Row::new().with("B", "b").with("C", "c"));

        assert_eq!(table.columns().len(), 3);
        assert_eq!(table.rows()[0], vec!["1", "2", ""]);
        assert_eq!(table.rows()[1], vec!["", "b", "c"]);
    }

    #[test]
    fn test_column_values_and_filter() {
        let table = Table::from_csv(ORDERS_CSV.as_bytes()).unwrap();
        let totals: Vec<&str> = table.column_values("Total").collect();
        assert_eq!(totals, vec!["500.0", "120.0"]);
        assert_eq!(table.column_values("Nope").count(), 0);

        let pending = table.filter_rows(|t, i| t.cell(i, "Status") == Some("Pending"));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.columns(), table.columns());
    }
}
