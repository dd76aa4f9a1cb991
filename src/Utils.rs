//! different utility modules used throughout the project
/// tiny module to set up logging and save samples into csv file
pub mod logger;
/// plots of the curve, the solid of revolution and its cross-section
pub mod plots;
/// TOML task files
pub mod task_config;
