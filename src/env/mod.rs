pub mod base;
pub mod go_left;
pub mod wrappers;
