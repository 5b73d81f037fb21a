use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Cannot evaluate an empty sample, at least one year of observations is required")]
    EmptySample,
}
