pub mod common;
pub mod env;
