pub mod analysis;
pub mod application;
pub mod assessment;
pub mod candidate;
pub mod vacancy;
