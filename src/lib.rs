pub mod aew_core;
pub mod logger;
