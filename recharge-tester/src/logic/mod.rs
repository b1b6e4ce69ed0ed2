pub mod checks;
pub mod fixtures;
pub mod reports;
pub mod tester;

pub use tester::*;
