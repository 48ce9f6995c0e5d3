//! Console front end: prompts, input parsing and styled output around the
//! ledger core.

pub mod output;
pub mod prompts;
pub mod session;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};

pub use prompts::{PromptSource, ScriptedPrompts, TerminalPrompts};
pub use session::{run, Session};

/// Parses a decimal amount typed at the console. Surrounding whitespace is
/// ignored; sign is not checked.
pub fn parse_amount(raw: &str) -> LedgerResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidAmount("amount is required".into()));
    }
    Decimal::from_str(trimmed)
        .map_err(|err| LedgerError::InvalidAmount(format!("`{trimmed}`: {err}")))
}
