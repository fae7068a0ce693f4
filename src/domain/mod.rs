pub mod category;
pub mod common;
pub mod draft;
pub mod transaction;

pub use category::{category_name, Category, CategoryKind, CategoryLookup};
pub use common::{Displayable, Identifiable};
pub use draft::TransactionDraft;
pub use transaction::{InstallmentPlan, PaymentMethod, Transaction, TransactionKind};
