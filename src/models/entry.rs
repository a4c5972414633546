//! Financial entry model
//!
//! One entry holds a store's credits and debits for a single month. The
//! revenue, expense and net figures are never stored: they are computed from
//! the leaf amounts every time they are read, so they cannot drift from the
//! leaves that produce them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

use super::ids::EntryId;
use super::money::Money;
use super::period::{Month, Period};
use super::row::{ALL_STORES_KEYWORD, CONSOLIDATED_LABEL};

/// Earliest and latest accepted years for an entry
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

const MAX_STORE_LEN: usize = 100;

/// Credit leaf amounts (money coming in)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credits {
    /// Cash register
    pub caixa: Money,
    pub delta: Money,
    pub pag_bank_debit: Money,
    pub pag_bank_credit: Money,
    /// Delivery platform payouts
    pub ifood: Money,
}

impl Credits {
    /// Sum of all credit leaves
    pub fn total(&self) -> Money {
        self.leaves().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Leaf names and amounts in display order
    pub fn leaves(&self) -> [(&'static str, Money); 5] {
        [
            ("caixa", self.caixa),
            ("delta", self.delta),
            ("pagBankDebit", self.pag_bank_debit),
            ("pagBankCredit", self.pag_bank_credit),
            ("ifood", self.ifood),
        ]
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, other: Self) {
        self.caixa += other.caixa;
        self.delta += other.delta;
        self.pag_bank_debit += other.pag_bank_debit;
        self.pag_bank_credit += other.pag_bank_credit;
        self.ifood += other.ifood;
    }
}

/// Debit leaf amounts (money going out)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Debits {
    /// Cash register
    pub caixa: Money,
    pub pag_bank_debit: Money,
    pub pag_bank_credit: Money,
    /// Lottery payouts
    pub loteria: Money,
}

impl Debits {
    /// Sum of all debit leaves
    pub fn total(&self) -> Money {
        self.leaves().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Leaf names and amounts in display order
    pub fn leaves(&self) -> [(&'static str, Money); 4] {
        [
            ("caixa", self.caixa),
            ("pagBankDebit", self.pag_bank_debit),
            ("pagBankCredit", self.pag_bank_credit),
            ("loteria", self.loteria),
        ]
    }
}

impl AddAssign for Debits {
    fn add_assign(&mut self, other: Self) {
        self.caixa += other.caixa;
        self.pag_bank_debit += other.pag_bank_debit;
        self.pag_bank_credit += other.pag_bank_credit;
        self.loteria += other.loteria;
    }
}

/// Revenue, expense and net figures derived from a set of leaves
///
/// Only constructible from revenue and expense, so `net` always equals
/// `revenue - expense`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    revenue: Money,
    expense: Money,
    net: Money,
}

impl Totals {
    pub fn new(revenue: Money, expense: Money) -> Self {
        Self {
            revenue,
            expense,
            net: revenue - expense,
        }
    }

    /// Totals of a pair of leaf groups
    pub fn of(credits: &Credits, debits: &Debits) -> Self {
        Self::new(credits.total(), debits.total())
    }

    pub fn revenue(&self) -> Money {
        self.revenue
    }

    pub fn expense(&self) -> Money {
        self.expense
    }

    pub fn net(&self) -> Money {
        self.net
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        *self = Totals::new(self.revenue + other.revenue, self.expense + other.expense);
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Totals::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// A store's financial record for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    /// Assigned by the entry store on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,

    /// Store name
    pub store: String,

    pub year: i32,

    pub month: Month,

    #[serde(default)]
    pub credits: Credits,

    #[serde(default)]
    pub debits: Debits,

    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

impl FinancialEntry {
    /// Create an unsaved entry with all leaves at zero
    pub fn new(store: impl Into<String>, year: i32, month: Month) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            store: store.into(),
            year,
            month,
            credits: Credits::default(),
            debits: Debits::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an unsaved entry with the given leaves
    pub fn with_amounts(
        store: impl Into<String>,
        year: i32,
        month: Month,
        credits: Credits,
        debits: Debits,
    ) -> Self {
        let mut entry = Self::new(store, year, month);
        entry.credits = credits;
        entry.debits = debits;
        entry
    }

    /// The (year, month) bucket of this entry
    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }

    /// Sum of all credit leaves
    pub fn total_revenues(&self) -> Money {
        self.credits.total()
    }

    /// Sum of all debit leaves
    pub fn total_expenses(&self) -> Money {
        self.debits.total()
    }

    /// Revenues minus expenses
    pub fn net_result(&self) -> Money {
        self.total_revenues() - self.total_expenses()
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.credits, &self.debits)
    }

    /// Whether the entry has been persisted
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Mark the entry as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the entry's dimensions
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        let store = self.store.trim();
        if store.is_empty() {
            return Err(EntryValidationError::EmptyStore);
        }
        if store.len() > MAX_STORE_LEN {
            return Err(EntryValidationError::StoreTooLong(store.len()));
        }
        if store.eq_ignore_ascii_case(ALL_STORES_KEYWORD)
            || store.eq_ignore_ascii_case(CONSOLIDATED_LABEL)
        {
            return Err(EntryValidationError::ReservedStore(store.to_string()));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(EntryValidationError::YearOutOfRange(self.year));
        }
        Ok(())
    }
}

impl fmt::Display for FinancialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.store, self.period())
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyStore,
    StoreTooLong(usize),
    /// Names that select the consolidated view
    ReservedStore(String),
    YearOutOfRange(i32),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStore => write!(f, "Store name cannot be empty"),
            Self::StoreTooLong(len) => {
                write!(f, "Store name too long ({} chars, max {})", len, MAX_STORE_LEN)
            }
            Self::ReservedStore(name) => {
                write!(f, "Store name '{}' is reserved for the all-stores view", name)
            }
            Self::YearOutOfRange(year) => {
                write!(f, "Year {} out of range ({}-{})", year, MIN_YEAR, MAX_YEAR)
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}
