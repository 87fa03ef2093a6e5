//! Tabular input data: cell values, datasets and loaders.

mod dataset;
#[cfg(feature = "csv")]
mod delimited;
mod loader;
mod value;
#[cfg(feature = "xlsx")]
mod workbook;

pub use dataset::TabularDataset;
#[cfg(feature = "csv")]
pub use delimited::CsvLoader;
pub use loader::{DatasetLoader, JsonLoader, LoaderRegistry};
pub use value::CellValue;
#[cfg(feature = "xlsx")]
pub use workbook::XlsxLoader;
