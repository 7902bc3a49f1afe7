pub mod payload;
pub mod threshold;
