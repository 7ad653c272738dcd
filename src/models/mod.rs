//! Records exchanged with the backend. Field names on the wire are
//! Portuguese; every record is owned and validated by the server.

pub mod account;
pub mod card;
pub mod category;
pub mod expense;
pub mod financing;
pub mod income;
pub mod vehicle;

pub use account::{Account, AccountKind};
pub use card::CreditCard;
pub use category::{Category, CategoryKind};
pub use expense::{Expense, ExpenseKind};
pub use financing::Financing;
pub use income::Income;
pub use vehicle::{Vehicle, VehicleExpense, VehicleExpenseKind};

pub(crate) fn default_true() -> bool {
    true
}
