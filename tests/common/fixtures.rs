//! Test fixtures and data factories
//!
//! Provides factory methods for creating rows and tables with sensible
//! defaults. Column names follow the default `ColumnMap`.

use journal_batch::{Row, RowTable};
use std::collections::BTreeMap;

/// Factory for creating test rows
pub struct RowFactory;

impl RowFactory {
    /// A line row with an account and a signed amount
    pub fn line(index: usize, marker: &str, account: &str, amount: &str) -> Row {
        Row::new(index, BTreeMap::new())
            .with_marker(marker)
            .with_field("account", account)
            .with_field("amount", amount)
    }

    /// A first row carrying every header column
    pub fn header_line(index: usize, marker: &str, account: &str, amount: &str) -> Row {
        Self::line(index, marker, account, amount)
            .with_field("site", "fr01")
            .with_field("entry_type", "odg")
            .with_field("accounting_date", "2024-03-31")
            .with_field("currency", "eur")
            .with_field("header_description", "Month-end accrual")
            .with_field("reference", "ACC-03")
    }
}

/// Factory for creating test tables
pub struct TableFactory;

impl TableFactory {
    /// `count` balanced two-line Groups keyed `G0`, `G1`, ...
    ///
    /// The first account of Group `n` is `1000 + n`, which keeps document
    /// numbers from [`super::ScriptedClient`] distinct per Group.
    pub fn balanced_groups(count: usize) -> RowTable {
        (0..count)
            .flat_map(|n| {
                let amount = format!("{}.50", 10 + n);
                [
                    RowFactory::line(n * 2, &format!("G{}", n), &(1000 + n).to_string(), &amount),
                    RowFactory::line(n * 2 + 1, "", "9000", &format!("-{}", amount)),
                ]
            })
            .collect()
    }

    /// The table from a JSON literal, as the spreadsheet reader would hand it over
    pub fn from_json(value: serde_json::Value) -> RowTable {
        RowTable::from_json_str(&value.to_string()).unwrap()
    }
}
