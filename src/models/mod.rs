pub mod cwa_dataset;
pub mod outlook;
