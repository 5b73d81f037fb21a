pub mod criteria;
pub mod dashboard;
pub mod distribution;
pub mod gauge;
pub mod heatmap;
pub mod infographic;
pub mod pipeline;
pub mod precipitation;
pub mod temperature;
pub mod trend;
