//! Entry CLI commands
//!
//! Implements CLI commands for recording and maintaining monthly entries.

use std::io::IsTerminal;

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_list, format_money_colored};
use crate::error::{StorebookError, StorebookResult};
use crate::models::{Credits, Debits, FinancialEntry, Money, Period};
use crate::services::{CreateEntryInput, EntryChanges, EntryService};
use crate::storage::Storage;

/// Leaf amounts, e.g. "1250.00" or "R$1250.00"
#[derive(Args, Debug, Default)]
pub struct AmountArgs {
    /// Cash register takings
    #[arg(long)]
    pub credit_caixa: Option<String>,
    #[arg(long)]
    pub credit_delta: Option<String>,
    #[arg(long)]
    pub credit_pag_bank_debit: Option<String>,
    #[arg(long)]
    pub credit_pag_bank_credit: Option<String>,
    /// Delivery platform payouts
    #[arg(long)]
    pub credit_ifood: Option<String>,
    /// Cash paid out of the register
    #[arg(long)]
    pub debit_caixa: Option<String>,
    #[arg(long)]
    pub debit_pag_bank_debit: Option<String>,
    #[arg(long)]
    pub debit_pag_bank_credit: Option<String>,
    #[arg(long)]
    pub debit_loteria: Option<String>,
}

impl AmountArgs {
    /// Write every given amount into the leaves; returns whether any was given
    pub fn apply(&self, credits: &mut Credits, debits: &mut Debits) -> StorebookResult<bool> {
        let mut changed = false;
        let mut set = |target: &mut Money, value: &Option<String>, flag: &str| {
            if let Some(text) = value {
                *target = parse_amount(text, flag)?;
                changed = true;
            }
            Ok::<(), StorebookError>(())
        };

        set(&mut credits.caixa, &self.credit_caixa, "--credit-caixa")?;
        set(&mut credits.delta, &self.credit_delta, "--credit-delta")?;
        set(&mut credits.pag_bank_debit, &self.credit_pag_bank_debit, "--credit-pag-bank-debit")?;
        set(&mut credits.pag_bank_credit, &self.credit_pag_bank_credit, "--credit-pag-bank-credit")?;
        set(&mut credits.ifood, &self.credit_ifood, "--credit-ifood")?;
        set(&mut debits.caixa, &self.debit_caixa, "--debit-caixa")?;
        set(&mut debits.pag_bank_debit, &self.debit_pag_bank_debit, "--debit-pag-bank-debit")?;
        set(&mut debits.pag_bank_credit, &self.debit_pag_bank_credit, "--debit-pag-bank-credit")?;
        set(&mut debits.loteria, &self.debit_loteria, "--debit-loteria")?;

        Ok(changed)
    }
}

fn parse_amount(text: &str, flag: &str) -> StorebookResult<Money> {
    Money::parse(text).map_err(|e| {
        StorebookError::Validation(format!("Invalid amount for {}: '{}' ({})", flag, text, e))
    })
}

fn parse_period(text: &str) -> StorebookResult<Period> {
    Period::parse(text).map_err(|e| {
        StorebookError::Validation(format!("Invalid period '{}': {} (expected YYYY-MM)", text, e))
    })
}

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record a store's figures for a month
    Add {
        /// Store name
        store: String,
        /// Period as YYYY-MM
        period: String,
        #[command(flatten)]
        amounts: AmountArgs,
    },
    /// Change an entry's store, period or amounts
    Edit {
        /// Entry ID (ent-xxxxxxxx or full UUID)
        entry: String,
        /// New store name
        #[arg(long)]
        store: Option<String>,
        /// New period as YYYY-MM
        #[arg(long)]
        period: Option<String>,
        #[command(flatten)]
        amounts: AmountArgs,
    },
    /// Delete an entry
    Delete {
        /// Entry ID (ent-xxxxxxxx or full UUID)
        entry: String,
    },
    /// Show every figure of one entry
    Show {
        /// Entry ID (ent-xxxxxxxx or full UUID)
        entry: String,
    },
    /// List recorded entries, newest first
    List {
        /// Only entries of this store
        #[arg(short, long)]
        store: Option<String>,
    },
    /// List the stores that have entries
    Stores,
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> StorebookResult<()> {
    let service = EntryService::new(storage, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Add {
            store,
            period,
            amounts,
        } => {
            let period = parse_period(&period)?;
            let mut credits = Credits::default();
            let mut debits = Debits::default();
            amounts.apply(&mut credits, &mut debits)?;

            let entry = service.create(CreateEntryInput {
                store,
                year: period.year,
                month: period.month,
                credits,
                debits,
            })?;

            print_saved("Created", &entry, symbol);
        }

        EntryCommands::Edit {
            entry,
            store,
            period,
            amounts,
        } => {
            let found = service.find(&entry)?;
            let id = found
                .id
                .ok_or_else(|| StorebookError::entry_not_found(&entry))?;

            let mut changes = EntryChanges {
                store,
                ..Default::default()
            };
            if let Some(period) = period {
                let period = parse_period(&period)?;
                changes.year = Some(period.year);
                changes.month = Some(period.month);
            }

            let mut credits = found.credits;
            let mut debits = found.debits;
            if amounts.apply(&mut credits, &mut debits)? {
                changes.credits = Some(credits);
                changes.debits = Some(debits);
            }

            if changes.is_empty() {
                println!("No changes specified. Use --store, --period or an amount flag.");
                return Ok(());
            }

            let updated = service.update(id, changes)?;
            print_saved("Updated", &updated, symbol);
        }

        EntryCommands::Delete { entry } => {
            let found = service.find(&entry)?;
            let id = found
                .id
                .ok_or_else(|| StorebookError::entry_not_found(&entry))?;

            let deleted = service.delete(id)?;
            println!(
                "Deleted entry {} ({} {})",
                id,
                deleted.store,
                deleted.period()
            );
        }

        EntryCommands::Show { entry } => {
            let found = service.find(&entry)?;
            print!("{}", format_entry_details(&found, symbol));
        }

        EntryCommands::List { store } => {
            let mut entries = service.list()?;
            if let Some(store) = store {
                entries.retain(|e| e.store == store);
            }
            print!("{}", format_entry_list(&entries, symbol));
        }

        EntryCommands::Stores => {
            let stores = service.stores()?;
            if stores.is_empty() {
                println!("No stores recorded yet.");
            } else {
                for store in stores {
                    println!("{}", store);
                }
            }
        }
    }

    Ok(())
}

fn print_saved(action: &str, entry: &FinancialEntry, symbol: &str) {
    let net = if std::io::stdout().is_terminal() {
        format_money_colored(entry.net_result(), symbol)
    } else {
        entry.net_result().format_with_symbol(symbol)
    };

    println!(
        "{} entry {} ({} {})",
        action,
        entry.id.map(|id| id.to_string()).unwrap_or_default(),
        entry.store,
        entry.period()
    );
    println!(
        "  Revenues: {}",
        entry.total_revenues().format_with_symbol(symbol)
    );
    println!(
        "  Expenses: {}",
        entry.total_expenses().format_with_symbol(symbol)
    );
    println!("  Net:      {}", net);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_amounts() {
        let amounts = AmountArgs {
            credit_caixa: Some("1250.50".into()),
            debit_loteria: Some("R$30".into()),
            ..Default::default()
        };

        let mut credits = Credits::default();
        let mut debits = Debits::default();
        assert!(amounts.apply(&mut credits, &mut debits).unwrap());

        assert_eq!(credits.caixa, Money::from_cents(125_050));
        assert_eq!(debits.loteria, Money::from_cents(3_000));
        assert_eq!(credits.ifood, Money::zero());
    }

    #[test]
    fn test_apply_nothing() {
        let mut credits = Credits::default();
        let mut debits = Debits::default();
        assert!(!AmountArgs::default()
            .apply(&mut credits, &mut debits)
            .unwrap());
    }

    #[test]
    fn test_invalid_amount_names_flag() {
        let amounts = AmountArgs {
            credit_ifood: Some("abc".into()),
            ..Default::default()
        };
        let err = amounts
            .apply(&mut Credits::default(), &mut Debits::default())
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("--credit-ifood"));
    }

    #[test]
    fn test_parse_period_rejects_garbage() {
        assert!(parse_period("2024-13").unwrap_err().is_validation());
        assert_eq!(parse_period("2024-01").unwrap().year, 2024);
    }
}
