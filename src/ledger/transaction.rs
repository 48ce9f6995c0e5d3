use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date layout used by [`Reportable::summary`].
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders a day with `date_format`. Returns `None` when the format asks for
/// fields a plain date does not carry, such as hours or a UTC offset.
pub fn try_format_day(date: NaiveDate, date_format: &str) -> Option<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", date.format(date_format)).ok()?;
    Some(rendered)
}

/// Like [`try_format_day`], falling back to [`DEFAULT_DATE_FORMAT`].
pub fn format_day(date: NaiveDate, date_format: &str) -> String {
    try_format_day(date, date_format)
        .unwrap_or_else(|| date.format(DEFAULT_DATE_FORMAT).to_string())
}

/// Something that can render itself as a one-line, human readable summary.
pub trait Reportable {
    fn summary_with(&self, date_format: &str) -> String;

    fn summary(&self) -> String {
        self.summary_with(DEFAULT_DATE_FORMAT)
    }
}

/// Read access shared by every transaction variant.
pub trait Transaction: Reportable + Clone {
    fn fields(&self) -> &EntryFields;

    fn kind(&self) -> TransactionKind;

    /// Variant specific label: income source or expense category.
    fn detail(&self) -> &str;

    fn id(&self) -> u32 {
        self.fields().id
    }

    fn date(&self) -> NaiveDate {
        self.fields().date
    }

    fn amount(&self) -> Decimal {
        self.fields().amount
    }

    fn description(&self) -> &str {
        &self.fields().description
    }
}

/// Values accepted wherever a calendar day is expected. Time of day is dropped.
pub trait CalendarDay {
    fn to_day(self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn to_day(self) -> NaiveDate {
        self
    }
}

impl CalendarDay for NaiveDateTime {
    fn to_day(self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn to_day(self) -> NaiveDate {
        self.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
        }
    }

    pub fn tag(&self) -> String {
        format!("[{}]", self.label())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields common to incomes and expenses. Set once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    id: u32,
    date: NaiveDate,
    amount: Decimal,
    description: String,
}

impl EntryFields {
    fn new(id: u32, date: NaiveDate, amount: Decimal, description: String) -> Self {
        Self {
            id,
            date,
            amount,
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTransaction {
    #[serde(flatten)]
    fields: EntryFields,
    category: String,
}

impl ExpenseTransaction {
    /// Builds an expense. Values are taken as given; negative amounts and
    /// empty strings are not rejected.
    pub fn new(
        id: u32,
        date: impl CalendarDay,
        amount: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            fields: EntryFields::new(id, date.to_day(), amount, description.into()),
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Reportable for ExpenseTransaction {
    fn summary_with(&self, date_format: &str) -> String {
        format!(
            "{} {} | {} | {} | {}",
            TransactionKind::Expense.tag(),
            format_day(self.date(), date_format),
            self.category,
            self.amount(),
            self.description()
        )
    }
}

impl Transaction for ExpenseTransaction {
    fn fields(&self) -> &EntryFields {
        &self.fields
    }

    fn kind(&self) -> TransactionKind {
        TransactionKind::Expense
    }

    fn detail(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTransaction {
    #[serde(flatten)]
    fields: EntryFields,
    source: String,
}

impl IncomeTransaction {
    /// Builds an income entry. Values are taken as given.
    pub fn new(
        id: u32,
        date: impl CalendarDay,
        amount: Decimal,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            fields: EntryFields::new(id, date.to_day(), amount, description.into()),
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Reportable for IncomeTransaction {
    fn summary_with(&self, date_format: &str) -> String {
        format!(
            "{} {} | {} | {} | {}",
            TransactionKind::Income.tag(),
            format_day(self.date(), date_format),
            self.source,
            self.amount(),
            self.description()
        )
    }
}

impl Transaction for IncomeTransaction {
    fn fields(&self) -> &EntryFields {
        &self.fields
    }

    fn kind(&self) -> TransactionKind {
        TransactionKind::Income
    }

    fn detail(&self) -> &str {
        &self.source
    }
}
