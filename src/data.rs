//! Data
//!
//! Integer-encoded categorical storage and the row/column view the tree
//! builder recurses over.
use crate::errors::DecTreeError;
use crate::utils::validate_column_index;
use hashbrown::HashMap;
use std::io::Write;
use std::sync::Arc;

/// Per-column bijection between raw strings and dense codes.
///
/// Codes are handed out in order of first appearance, starting at zero,
/// and never change once assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    values: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Code for `value`, assigning the next free one if it is new.
    pub fn encode(&mut self, value: &str) -> usize {
        if let Some(code) = self.index.get(value) {
            return *code;
        }
        let code = self.values.len();
        self.index.insert(value.to_string(), code);
        self.values.push(value.to_string());
        code
    }

    /// Code for `value`, if it has been observed.
    pub fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// String behind `code`, if any.
    pub fn value(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(|s| s.as_str())
    }

    /// Observed strings, indexed by code.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Row major table of encoded values together with the column names and
/// vocabularies. Grows while parsing, immutable once wrapped in a `Dataset`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub column_names: Vec<String>,
    pub vocabularies: Vec<Vocabulary>,
    pub rows: Vec<Vec<usize>>,
}

impl Table {
    pub fn new(column_names: Vec<String>) -> Self {
        let vocabularies = vec![Vocabulary::new(); column_names.len()];
        Table {
            column_names,
            vocabularies,
            rows: Vec::new(),
        }
    }

    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Encode a row of raw fields and append it.
    ///
    /// * `line` - 1-based source line, reported on a field count mismatch.
    /// * `fields` - Raw string fields, one per column.
    pub fn push_row(&mut self, line: usize, fields: &[&str]) -> Result<usize, DecTreeError> {
        if fields.len() != self.n_columns() {
            return Err(DecTreeError::RowLength(line, self.n_columns(), fields.len()));
        }
        let row = fields
            .iter()
            .zip(self.vocabularies.iter_mut())
            .map(|(field, vocabulary)| vocabulary.encode(field))
            .collect();
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }
}

/// A view over a shared `Table`.
///
/// The view is a list of enabled row indices plus a mask of columns that are
/// still candidates for splitting. Filtering produces a new view over the
/// same table, so recursion never copies the encoded data.
#[derive(Debug, Clone)]
pub struct Dataset {
    table: Arc<Table>,
    enabled_rows: Vec<usize>,
    enabled_columns: Vec<bool>,
}

impl From<Table> for Dataset {
    fn from(table: Table) -> Self {
        Dataset::new(Arc::new(table))
    }
}

impl Dataset {
    /// View with every row and column of `table` enabled.
    pub fn new(table: Arc<Table>) -> Self {
        let enabled_rows = (0..table.n_rows()).collect();
        let enabled_columns = vec![true; table.n_columns()];
        Dataset {
            table,
            enabled_rows,
            enabled_columns,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn n_columns(&self) -> usize {
        self.table.n_columns()
    }

    fn check_column(&self, column_index: usize) -> Result<(), DecTreeError> {
        validate_column_index(column_index, self.n_columns())
    }

    /// Number of distinct values observed for a column across the whole table.
    pub fn cardinality(&self, column_index: usize) -> Result<usize, DecTreeError> {
        self.check_column(column_index)?;
        Ok(self.table.vocabularies[column_index].len())
    }

    /// Mark a column as no longer eligible for splitting.
    pub fn disable_column(&mut self, column_index: usize) -> Result<(), DecTreeError> {
        self.check_column(column_index)?;
        self.enabled_columns[column_index] = false;
        Ok(())
    }

    /// New view restricted to the enabled rows whose `column_index` equals `value`.
    ///
    /// * `column_index` - Column to match on.
    /// * `value` - Value code to keep.
    /// * `disable_column` - Also disable `column_index` in the returned view,
    ///   since every remaining row now shares that value.
    pub fn filter(&self, column_index: usize, value: usize, disable_column: bool) -> Result<Dataset, DecTreeError> {
        self.check_column(column_index)?;
        let mut enabled_columns = self.enabled_columns.clone();
        if disable_column {
            enabled_columns[column_index] = false;
        }
        let enabled_rows = self
            .enabled_rows
            .iter()
            .copied()
            .filter(|&i| self.table.rows[i][column_index] == value)
            .collect();
        Ok(Dataset {
            table: Arc::clone(&self.table),
            enabled_rows,
            enabled_columns,
        })
    }

    /// Count every value code of a column over the enabled rows.
    ///
    /// Returns one counter per code in the column's vocabulary and the total
    /// number of rows counted.
    ///
    /// * `column_index` - Column whose values are counted.
    /// * `condition` - Optional `(column, value)`; only rows matching it are counted.
    pub fn count_values(
        &self,
        column_index: usize,
        condition: Option<(usize, usize)>,
    ) -> Result<(Vec<usize>, usize), DecTreeError> {
        self.check_column(column_index)?;
        if let Some((conditional_column, _)) = condition {
            self.check_column(conditional_column)?;
        }
        let mut counters = vec![0; self.table.vocabularies[column_index].len()];
        let mut total = 0;
        for &i in &self.enabled_rows {
            let row = &self.table.rows[i];
            let matches = match condition {
                Some((conditional_column, conditional_value)) => row[conditional_column] == conditional_value,
                None => true,
            };
            if matches {
                counters[row[column_index]] += 1;
                total += 1;
            }
        }
        Ok((counters, total))
    }

    /// Value counters for every column in one pass over the enabled rows.
    /// Disabled columns get an empty counter vector.
    pub fn count_all(&self) -> Vec<Vec<usize>> {
        let mut all_counters: Vec<Vec<usize>> = self
            .enabled_columns
            .iter()
            .zip(self.table.vocabularies.iter())
            .map(|(&enabled, vocabulary)| if enabled { vec![0; vocabulary.len()] } else { Vec::new() })
            .collect();
        for &i in &self.enabled_rows {
            let row = &self.table.rows[i];
            for (j, counters) in all_counters.iter_mut().enumerate() {
                if self.enabled_columns[j] {
                    counters[row[j]] += 1;
                }
            }
        }
        all_counters
    }

    /// True when no column takes more than one distinct value, i.e. no
    /// counter vector has two or more nonzero entries.
    pub fn all_equal(all_counters: &[Vec<usize>]) -> bool {
        all_counters
            .iter()
            .all(|counters| counters.iter().filter(|&&c| c > 0).count() <= 1)
    }

    /// No enabled column can tell the enabled rows apart.
    pub fn is_indistinguishable(&self) -> bool {
        Dataset::all_equal(&self.count_all())
    }

    /// Indices of the enabled columns, ascending.
    pub fn get_enabled_columns(&self) -> Vec<usize> {
        self.enabled_columns
            .iter()
            .enumerate()
            .filter(|(_, &enabled)| enabled)
            .map(|(j, _)| j)
            .collect()
    }

    pub fn is_column_enabled(&self, column_index: usize) -> Result<bool, DecTreeError> {
        self.check_column(column_index)?;
        Ok(self.enabled_columns[column_index])
    }

    pub fn enabled_rows(&self) -> &[usize] {
        &self.enabled_rows
    }

    pub fn enabled_rows_count(&self) -> usize {
        self.enabled_rows.len()
    }

    pub fn enabled_columns_count(&self) -> usize {
        self.enabled_columns.iter().filter(|&&enabled| enabled).count()
    }

    /// Encoded value of a physical row.
    pub fn value(&self, row_index: usize, column_index: usize) -> Result<usize, DecTreeError> {
        self.check_column(column_index)?;
        self.table
            .rows
            .get(row_index)
            .map(|row| row[column_index])
            .ok_or_else(|| {
                DecTreeError::InvalidParameter(
                    "row_index".to_string(),
                    format!("an index below {}", self.table.n_rows()),
                    row_index.to_string(),
                )
            })
    }

    pub fn get_column_name(&self, column_index: usize) -> Result<&str, DecTreeError> {
        self.check_column(column_index)?;
        Ok(&self.table.column_names[column_index])
    }

    /// Raw string behind a value code.
    pub fn get_value_string(&self, column_index: usize, value_index: usize) -> Result<&str, DecTreeError> {
        self.check_column(column_index)?;
        self.table.vocabularies[column_index]
            .value(value_index)
            .ok_or(DecTreeError::UnknownValueCode(column_index, value_index))
    }

    /// Code behind a raw string.
    pub fn get_value_code(&self, column_index: usize, value: &str) -> Result<usize, DecTreeError> {
        self.check_column(column_index)?;
        self.table.vocabularies[column_index]
            .get(value)
            .ok_or_else(|| {
                DecTreeError::UnknownValueString(self.table.column_names[column_index].clone(), value.to_string())
            })
    }

    /// Dump the header and the encoded enabled rows, every field followed by `separator`.
    pub fn write_encoded<W: Write>(&self, output: &mut W, separator: char) -> Result<(), DecTreeError> {
        let to_err = |e: std::io::Error| DecTreeError::UnableToWrite(e.to_string());
        write!(output, "# ").map_err(to_err)?;
        for column_name in &self.table.column_names {
            write!(output, "{}{}", column_name, separator).map_err(to_err)?;
        }
        writeln!(output).map_err(to_err)?;
        for &i in &self.enabled_rows {
            for value in &self.table.rows[i] {
                write!(output, "{}{}", value, separator).map_err(to_err)?;
            }
            writeln!(output).map_err(to_err)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_table() -> Table {
        let mut table = Table::new(vec!["Outlook".to_string(), "Wind".to_string(), "Play".to_string()]);
        let rows = [
            ["Sunny", "Weak", "No"],
            ["Sunny", "Strong", "No"],
            ["Overcast", "Weak", "Yes"],
            ["Rain", "Weak", "Yes"],
            ["Rain", "Strong", "No"],
        ];
        for (i, row) in rows.iter().enumerate() {
            table.push_row(i + 2, row).unwrap();
        }
        table
    }

    #[test]
    fn test_vocabulary_dense_codes() {
        let mut vocabulary = Vocabulary::new();
        assert_eq!(vocabulary.encode("b"), 0);
        assert_eq!(vocabulary.encode("a"), 1);
        assert_eq!(vocabulary.encode("b"), 0);
        assert_eq!(vocabulary.encode("c"), 2);
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.value(1), Some("a"));
        assert_eq!(vocabulary.value(3), None);
        assert_eq!(vocabulary.get("c"), Some(2));
    }

    #[test]
    fn test_vocabulary_density_on_table() {
        let table = weather_table();
        for (j, vocabulary) in table.vocabularies.iter().enumerate() {
            let mut seen: Vec<usize> = table.rows.iter().map(|row| row[j]).collect();
            seen.sort();
            seen.dedup();
            assert_eq!(seen, (0..vocabulary.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_push_row_length_mismatch() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        let res = table.push_row(4, &["x"]);
        assert!(matches!(res, Err(DecTreeError::RowLength(4, 2, 1))));
        assert_eq!(table.n_rows(), 0);
    }

    #[test]
    fn test_count_values() {
        let dataset = Dataset::from(weather_table());
        let (counters, total) = dataset.count_values(2, None).unwrap();
        assert_eq!(counters, vec![3, 2]);
        assert_eq!(total, 5);

        // Play given Outlook = Rain
        let (counters, total) = dataset.count_values(2, Some((0, 2))).unwrap();
        assert_eq!(counters, vec![1, 1]);
        assert_eq!(total, 2);
    }

    #[test]
    fn test_filter_is_subset() {
        let dataset = Dataset::from(weather_table());
        for column in 0..dataset.n_columns() {
            for value in 0..dataset.cardinality(column).unwrap() {
                let filtered = dataset.filter(column, value, true).unwrap();
                assert!(filtered.enabled_rows().iter().all(|i| dataset.enabled_rows().contains(i)));
                assert!(filtered
                    .enabled_rows()
                    .iter()
                    .all(|&i| dataset.value(i, column).unwrap() == value));
                assert!(!filtered.is_column_enabled(column).unwrap());
                assert!(dataset.is_column_enabled(column).unwrap());
            }
        }
        let kept = dataset.filter(0, 0, false).unwrap();
        assert!(kept.is_column_enabled(0).unwrap());
        assert_eq!(kept.enabled_rows(), &[0, 1]);

        let nested = dataset.filter(0, 2, true).unwrap().filter(1, 1, true).unwrap();
        assert_eq!(nested.enabled_rows(), &[4]);
        assert_eq!(nested.enabled_columns_count(), 1);
    }

    #[test]
    fn test_count_all_and_all_equal() {
        let mut dataset = Dataset::from(weather_table());
        dataset.disable_column(2).unwrap();
        let all_counters = dataset.count_all();
        assert_eq!(all_counters[0], vec![2, 1, 2]);
        assert_eq!(all_counters[1], vec![3, 2]);
        assert!(all_counters[2].is_empty());
        assert!(!Dataset::all_equal(&all_counters));

        let single = dataset.filter(0, 0, true).unwrap().filter(1, 0, false).unwrap();
        assert!(single.is_indistinguishable());
        assert!(Dataset::all_equal(&[vec![0, 4, 0], vec![], vec![1]]));
    }

    #[test]
    fn test_enabled_accessors() {
        let mut dataset = Dataset::from(weather_table());
        assert_eq!(dataset.enabled_rows_count(), 5);
        assert_eq!(dataset.enabled_columns_count(), 3);
        dataset.disable_column(1).unwrap();
        assert_eq!(dataset.get_enabled_columns(), vec![0, 2]);
        assert_eq!(dataset.enabled_columns_count(), 2);
    }

    #[test]
    fn test_reverse_lookups() {
        let dataset = Dataset::from(weather_table());
        assert_eq!(dataset.get_column_name(1).unwrap(), "Wind");
        assert_eq!(dataset.get_value_string(0, 1).unwrap(), "Overcast");
        assert_eq!(dataset.get_value_code(0, "Rain").unwrap(), 2);
        assert!(matches!(
            dataset.get_value_string(0, 7),
            Err(DecTreeError::UnknownValueCode(0, 7))
        ));
        assert!(matches!(
            dataset.get_value_code(1, "Calm"),
            Err(DecTreeError::UnknownValueString(..))
        ));
    }

    #[test]
    fn test_out_of_range_column() {
        let mut dataset = Dataset::from(weather_table());
        assert!(matches!(dataset.disable_column(3), Err(DecTreeError::ColumnOutOfRange(3, 3))));
        assert!(dataset.filter(9, 0, true).is_err());
        assert!(dataset.count_values(3, None).is_err());
        assert!(dataset.count_values(0, Some((5, 0))).is_err());
        assert!(dataset.get_column_name(3).is_err());
    }

    #[test]
    fn test_write_encoded() {
        let dataset = Dataset::from(weather_table()).filter(0, 0, true).unwrap();
        let mut buffer = Vec::new();
        dataset.write_encoded(&mut buffer, ';').unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "# Outlook;Wind;Play;\n0;0;0;\n0;1;0;\n");
    }
}
