use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::types::RowValues;

/// Column name → value, in server column order.
pub type AssocRow = IndexMap<String, RowValues>;

/// A row from a database query result
///
/// This struct represents a single row from a database query result,
/// with access to both the column names and the values.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub rows: Vec<RowValues>,
    // Shared name → index lookup, built once per result set
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    /// Create a new database row
    ///
    /// # Arguments
    ///
    /// * `column_names` - The column names
    /// * `rows` - The values for this row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let cache = Arc::new(index_columns(&column_names));
        Self {
            column_names,
            rows,
            column_index_cache: cache,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Pair each value with its column name.
    ///
    /// When a query returns two columns with the same name the later one wins, keeping the
    /// position of the first.
    #[must_use]
    pub fn into_assoc(self) -> AssocRow {
        self.column_names
            .iter()
            .cloned()
            .zip(self.rows)
            .collect()
    }
}

/// Later duplicates win, matching what a name-keyed fetch returns.
pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_row;

    #[test]
    fn lookup_by_name_and_index() {
        let row = create_test_row(
            vec!["id".into(), "name".into()],
            vec![RowValues::Int(1), RowValues::Text("Cup".into())],
        );
        assert_eq!(row.get_column_index("name"), Some(1));
        assert_eq!(row.get("id"), Some(&RowValues::Int(1)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.get_by_index(5), None);
    }

    #[test]
    fn duplicate_column_names_keep_the_later_value() {
        let row = create_test_row(
            vec!["a".into(), "a".into()],
            vec![RowValues::Int(1), RowValues::Int(2)],
        );
        assert_eq!(row.get("a"), Some(&RowValues::Int(2)));
        let assoc = row.into_assoc();
        assert_eq!(assoc.len(), 1);
        assert_eq!(assoc["a"], RowValues::Int(2));
    }
}
