use std::sync::Arc;

use indexmap::IndexMap;

use super::result_set::ResultSet;
use super::row::{AssocRow, CustomDbRow};
use crate::types::RowValues;

/// Forward-only cursor over one executed result set.
///
/// The draining fetches (`fetch_one`, `fetch_all`, `fetch_column`, `fetch_pairs`,
/// `fetch_all_keyed`) consume the cursor and release the buffered rows before returning.
/// `fetch_row` and `fetch_assoc` read one row at a time; call [`ResultCursor::free`] (or drop
/// the cursor) when stopping early.
#[derive(Debug)]
pub struct ResultCursor {
    column_names: Arc<Vec<String>>,
    rows: Option<std::vec::IntoIter<CustomDbRow>>,
    rows_affected: usize,
}

impl ResultCursor {
    #[must_use]
    pub fn new(result: ResultSet) -> Self {
        let column_names = result
            .get_column_names()
            .map_or_else(|| Arc::new(Vec::new()), Arc::clone);
        Self {
            column_names,
            rows_affected: result.rows_affected,
            rows: Some(result.results.into_iter()),
        }
    }

    /// Column names in server order; empty for statements that return no rows.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn rows_affected(&self) -> usize {
        self.rows_affected
    }

    #[must_use]
    pub fn is_freed(&self) -> bool {
        self.rows.is_none()
    }

    fn next_raw(&mut self) -> Option<CustomDbRow> {
        self.rows.as_mut()?.next()
    }

    /// First cell of the first row, or `None` when the query matched nothing.
    ///
    /// A NULL cell comes back as `Some(RowValues::Null)`.
    #[must_use]
    pub fn fetch_one(mut self) -> Option<RowValues> {
        let row = self.next_raw();
        self.free();
        row.and_then(|row| row.rows.into_iter().next())
    }

    /// Next row as positional values.
    pub fn fetch_row(&mut self) -> Option<Vec<RowValues>> {
        self.next_raw().map(|row| row.rows)
    }

    /// Next row keyed by column name.
    pub fn fetch_assoc(&mut self) -> Option<AssocRow> {
        self.next_raw().map(CustomDbRow::into_assoc)
    }

    #[must_use]
    pub fn fetch_all(mut self) -> Vec<AssocRow> {
        let rows = self.by_ref().map(CustomDbRow::into_assoc).collect();
        self.free();
        rows
    }

    /// First column of every remaining row.
    #[must_use]
    pub fn fetch_column(mut self) -> Vec<RowValues> {
        let column = self
            .by_ref()
            .map(|row| row.rows.into_iter().next().unwrap_or(RowValues::Null))
            .collect();
        self.free();
        column
    }

    /// Column 0 → column 1 for every remaining row. A later duplicate key overwrites the
    /// earlier value.
    #[must_use]
    pub fn fetch_pairs(mut self) -> IndexMap<String, RowValues> {
        let mut pairs = IndexMap::new();
        while let Some(row) = self.next_raw() {
            let mut values = row.rows.into_iter();
            let key = values.next().unwrap_or(RowValues::Null).to_key();
            let value = values.next().unwrap_or(RowValues::Null);
            pairs.insert(key, value);
        }
        self.free();
        pairs
    }

    /// Column 0 keys the map; the remaining columns form the value row. A later duplicate key
    /// overwrites the earlier row.
    #[must_use]
    pub fn fetch_all_keyed(mut self) -> IndexMap<String, AssocRow> {
        let mut keyed = IndexMap::new();
        while let Some(row) = self.next_raw() {
            let mut assoc = row.into_assoc();
            if let Some((_, key)) = assoc.shift_remove_index(0) {
                keyed.insert(key.to_key(), assoc);
            }
        }
        self.free();
        keyed
    }

    /// Release the buffered rows. Safe to call any number of times.
    pub fn free(&mut self) {
        self.rows = None;
    }
}

impl Iterator for ResultCursor {
    type Item = CustomDbRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::create_result_set as result;

    fn text(s: &str) -> RowValues {
        RowValues::Text(s.to_string())
    }

    fn goods() -> ResultSet {
        result(
            &["code", "name", "price"],
            vec![
                vec![text("001"), text("Cup"), text("20.00")],
                vec![text("002"), text("Plate"), text("30.50")],
            ],
        )
    }

    #[test]
    fn fetch_one_on_empty_is_none() {
        let cursor = ResultCursor::new(result(&["name"], vec![]));
        assert_eq!(cursor.fetch_one(), None);
    }

    #[test]
    fn fetch_one_distinguishes_null_cell() {
        let cursor = ResultCursor::new(result(&["name"], vec![vec![RowValues::Null]]));
        assert_eq!(cursor.fetch_one(), Some(RowValues::Null));
    }

    #[test]
    fn row_by_row_then_free() {
        let mut cursor = ResultCursor::new(goods());
        assert_eq!(cursor.fetch_row().unwrap()[1], text("Cup"));
        let assoc = cursor.fetch_assoc().unwrap();
        assert_eq!(assoc.get("name"), Some(&text("Plate")));
        assert_eq!(cursor.fetch_assoc(), None);
        cursor.free();
        cursor.free();
        assert!(cursor.is_freed());
        assert_eq!(cursor.fetch_row(), None);
    }

    #[test]
    fn fetch_all_keeps_column_order() {
        let rows = ResultCursor::new(goods()).fetch_all();
        assert_eq!(rows.len(), 2);
        let names: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(names, ["code", "name", "price"]);
    }

    #[test]
    fn pairs_and_keyed() {
        let pairs = ResultCursor::new(goods()).fetch_pairs();
        assert_eq!(pairs.get("001"), Some(&text("Cup")));
        assert_eq!(pairs.get("002"), Some(&text("Plate")));

        let keyed = ResultCursor::new(goods()).fetch_all_keyed();
        let plate = &keyed["002"];
        assert_eq!(plate.len(), 2);
        assert_eq!(plate.get("price"), Some(&text("30.50")));
        assert!(plate.get("code").is_none());
    }

    #[test]
    fn duplicate_keys_overwrite() {
        let rs = result(
            &["k", "v"],
            vec![
                vec![RowValues::Int(1), text("a")],
                vec![RowValues::Int(2), text("b")],
                vec![RowValues::Int(1), text("c")],
            ],
        );
        let pairs = ResultCursor::new(rs).fetch_pairs();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs.get_index(0), Some((&"1".to_string(), &text("c"))));
    }

    #[test]
    fn column_drains_first_column() {
        let column = ResultCursor::new(goods()).fetch_column();
        assert_eq!(column, vec![text("001"), text("002")]);
    }
}
