//! One-shot bulk import of the initial collection from CSV

mod csv;
mod importer;

pub use csv::CsvTable;
pub use importer::{
    build_records, lower_case_words, run_import, ImportOptions, ImportReport, SequenceGenerator,
};
