pub mod interval;
pub mod table;
pub mod value;

// re-export for cleaner imports
pub use self::interval::Interval;
pub use self::table::{Column, ColumnData, Table};
pub use self::value::{DataType, RowLabel, Value};
