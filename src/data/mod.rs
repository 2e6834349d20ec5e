//! Input tables: the observational dataset and the skeleton constraint.

use std::{collections::HashSet, io, path::Path};

use crate::error::{GiesError, Result};

pub mod skeleton;

pub use skeleton::{FixedGaps, Skeleton};

/// Numeric samples with named columns. Rows are samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(GiesError::Dataset("no columns".into()));
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if c.is_empty() {
                return Err(GiesError::Dataset("empty column name".into()));
            }
            if !seen.insert(c.as_str()) {
                return Err(GiesError::Dataset(format!("duplicate column '{}'", c)));
            }
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(GiesError::Dataset(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Read a comma-separated file whose first line holds the column names.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .map(|field| {
                    field.trim().parse::<f64>().map_err(|_| {
                        GiesError::Dataset(format!("row {}: '{}' is not numeric", i, field))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Write the samples without header or index, comma separated.
    pub fn write_headerless(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|v| v.to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let text = "A,B,C\n1,2,3\n4.5,-1,0\n";
        let data = Dataset::from_csv_reader(text.as_bytes()).unwrap();
        assert_eq!(data.columns(), ["A", "B", "C"]);
        assert_eq!(data.rows()[1], vec![4.5, -1.0, 0.0]);
        assert_eq!(data.column_index("C"), Some(2));
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let text = "A,B\n1,x\n";
        let err = Dataset::from_csv_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, GiesError::Dataset(_)));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Dataset::new(vec!["A".into(), "A".into()], vec![]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Dataset::new(vec!["A".into(), "B".into()], vec![vec![1.0]]).unwrap_err();
        assert!(matches!(err, GiesError::Dataset(_)));
    }

    #[test]
    fn headerless_output_has_only_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let data = Dataset::new(
            vec!["x".into(), "y".into()],
            vec![vec![1.0, 2.5], vec![-3.0, 0.125]],
        )
        .unwrap();
        data.write_headerless(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,2.5\n-3,0.125\n");
    }
}
