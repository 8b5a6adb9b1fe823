//! File system boundary: reading exported JSON and writing results

pub mod acquire;
pub mod writer;

pub use acquire::{SourceFile, collect_inputs, collect_json_files, find_json_files, read_files};
pub use writer::write_files;
