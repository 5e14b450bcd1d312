//! CSV and JSON projections of a simulation, in the column layout existing
//! consumers of the step table expect.

pub mod csv_export;
pub mod error;
pub mod json_export;

pub use csv_export::{format_number, to_csv_string, write_csv, write_sweep_csv};
pub use error::ExportError;
pub use json_export::{to_json_string, write_json};
