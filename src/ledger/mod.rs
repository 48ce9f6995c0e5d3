//! Transaction variants and the typed ledger container that stores them.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use ledger::{Ledger, SharedLedger};
pub use transaction::{
    format_day, try_format_day, CalendarDay, EntryFields, ExpenseTransaction, IncomeTransaction,
    Reportable, Transaction, TransactionKind, DEFAULT_DATE_FORMAT,
};
