//! Turns raw observations into probabilities, trends and date suggestions.

pub mod error;
pub mod evaluator;
pub mod summary;
pub mod trend;
pub mod window;
