mod cursor;
mod result_set;
mod row;

pub use cursor::ResultCursor;
pub use result_set::ResultSet;
pub use row::{AssocRow, CustomDbRow};
