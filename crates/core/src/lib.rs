pub mod amend;
pub mod category;
pub mod transaction;
pub(crate) mod util;

pub use amend::Amendments;
pub use category::{CategoryBook, CategoryError, CategoryResolver, EXCLUDE_CATEGORY};
pub use transaction::{Bank, Transaction, UnknownBank};
