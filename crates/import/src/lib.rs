pub mod classify;
pub mod clean;
pub mod patterns;
pub mod statement;

pub use classify::{Classifier, PatternError};
pub use clean::Cleaner;
pub use statement::{read_anz, read_natwest, read_statement, StatementError, StatementRow};
