pub mod api;
pub mod core;
pub mod leads;
pub mod report;
