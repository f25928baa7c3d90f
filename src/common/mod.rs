pub mod error;
pub mod eval;
pub mod logger;
pub mod policy;
pub mod spaces;
pub mod utils;
