pub mod import_record;
pub mod import_service;

pub use import_record::{ImportLocation, ImportRecord};
pub use import_service::{ImportFailure, ImportReport, ImportService};
