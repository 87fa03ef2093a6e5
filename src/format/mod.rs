//! Formatting policy for synthesized tables.

mod formatter;
mod layout;

pub use formatter::{ColumnFormatter, DEFAULT_DATE_HEADER_FORMAT};
pub use layout::{
    ColumnLayout, DEFAULT_FIRST_COLUMN_WIDTH_CM, DEFAULT_OTHER_COLUMN_WIDTH_CM,
    DEFAULT_TABLE_STYLE,
};
