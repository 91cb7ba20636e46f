mod engine;
mod rmd;
mod types;

pub use engine::project;
pub use rmd::{FALLBACK_RMD_FACTOR, TERMINAL_AGE, projection_years, rmd_factor, rmd_start_age};
pub use types::{
    ConvertToRothSummary, DEFAULT_GROWTH_RATE_PERCENT, KeepQualifiedSummary, ProjectionInput,
    ProjectionResult, QualifiedYear, RothYear,
};
