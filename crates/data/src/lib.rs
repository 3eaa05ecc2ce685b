//! Loading and validation for battle configuration and encounter tables.

pub mod load;

pub use load::*;
