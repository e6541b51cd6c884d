pub mod assessment;
pub mod monitoring;
