//! Group to journal entry conversion

use super::parse::{normalize_account, parse_amount, parse_date};
use super::types::{BuildOutcome, JournalEntry, JournalLine, ValidationError};
use crate::config::{ColumnMap, Config, default_tolerance};
use crate::core::grouping::Group;
use crate::core::table::Row;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

/// Builds journal entries from Groups
///
/// Checks run in a fixed order and stop at the first failure: required
/// fields, header consistency across the Group, date and number parsing,
/// the balance check, and finally the already-submitted skip rule.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    columns: ColumnMap,
    tolerance: Decimal,
    require_header: bool,
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new(ColumnMap::default())
    }
}

impl EntryBuilder {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            columns,
            tolerance: default_tolerance(),
            require_header: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.columns.clone())
            .with_tolerance(config.batch.balance_tolerance)
            .with_require_header(config.batch.require_header)
    }

    /// Set the balance tolerance
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Require header fields on the first row of each Group
    pub fn with_require_header(mut self, require_header: bool) -> Self {
        self.require_header = require_header;
        self
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Decide what happens to a Group
    pub fn build(&self, group: &Group<'_>) -> BuildOutcome {
        match self.try_build(group) {
            Err(error) => {
                debug!("Group {} is invalid: {}", group.key(), error);
                BuildOutcome::Invalid(error)
            }
            Ok(_) if group.rows().iter().all(Row::is_submitted) => BuildOutcome::AlreadySubmitted,
            Ok(entry) => BuildOutcome::Ready(entry),
        }
    }

    fn try_build(&self, group: &Group<'_>) -> Result<JournalEntry, ValidationError> {
        self.check_complete(group)?;
        self.check_consistent(group)?;

        let mut entry = self.header(group)?;
        entry.lines = group
            .rows()
            .iter()
            .map(|row| self.line(row, entry.description_by_default.as_deref()))
            .collect::<Result<Vec<_>, _>>()?;

        let imbalance = group
            .rows()
            .iter()
            .zip(&entry.lines)
            .try_fold(Decimal::ZERO, |sum, (row, line)| {
                sum.checked_add(line.signed_amount())
                    .ok_or(ValidationError::OutOfRange { row: row.index() })
            })?;
        if imbalance.abs() > self.tolerance {
            return Err(ValidationError::Unbalanced {
                imbalance,
                tolerance: self.tolerance,
            });
        }

        Ok(entry)
    }

    fn check_complete(&self, group: &Group<'_>) -> Result<(), ValidationError> {
        let columns = &self.columns;
        for row in group.rows() {
            if row.field(&columns.account).is_none() {
                return Err(missing(row, &columns.account));
            }
            let has_value = [
                &columns.amount,
                &columns.debit,
                &columns.credit,
                &columns.quantity,
            ]
            .iter()
            .any(|column| row.field(column).is_some());
            if !has_value {
                return Err(missing(row, &columns.amount));
            }
        }

        if self.require_header {
            let first = group.first();
            if let Some(column) = columns
                .required_header()
                .into_iter()
                .find(|column| first.field(column).is_none())
            {
                return Err(missing(first, column));
            }
        }
        Ok(())
    }

    /// Site, entry type, accounting date and currency may not change inside a Group
    fn check_consistent(&self, group: &Group<'_>) -> Result<(), ValidationError> {
        for column in self.columns.consistent_header() {
            let is_date = column == self.columns.accounting_date;
            let mut expected: Option<&str> = None;
            for row in group.rows() {
                let Some(found) = row.field(column) else {
                    continue;
                };
                match expected {
                    None => expected = Some(found),
                    Some(value) if same_header_value(is_date, value, found) => {}
                    Some(value) => {
                        return Err(ValidationError::InconsistentHeader {
                            row: row.index(),
                            field: column.to_string(),
                            expected: value.to_string(),
                            found: found.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn header(&self, group: &Group<'_>) -> Result<JournalEntry, ValidationError> {
        let columns = &self.columns;
        let first = group.first();
        // Consistent columns may be left blank on the first row
        let shared = |column: &str| group.rows().iter().find_map(|row| row.field(column));

        let accounting_date = group
            .rows()
            .iter()
            .find_map(|row| row.field(&columns.accounting_date).map(|raw| (row, raw)))
            .map(|(row, raw)| {
                parse_date(raw).ok_or_else(|| ValidationError::BadDate {
                    row: row.index(),
                    field: columns.accounting_date.clone(),
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        Ok(JournalEntry {
            site: upper(shared(&columns.site)),
            document_type: upper(shared(&columns.entry_type)),
            accounting_date,
            description_by_default: text(first.field(&columns.header_description)),
            source_currency: upper(shared(&columns.currency)),
            reference: text(first.field(&columns.reference)),
            lines: Vec::new(),
        })
    }

    fn line(
        &self,
        row: &Row,
        header_description: Option<&str>,
    ) -> Result<JournalLine, ValidationError> {
        let columns = &self.columns;
        let quantity = number(row, &columns.quantity)?.filter(|quantity| !quantity.is_zero());

        // A quantity line is sent without debit or credit
        let (debit, credit) = match quantity {
            Some(_) => (None, None),
            None => {
                let amount = self.signed_amount(row)?;
                if amount.is_sign_negative() && !amount.is_zero() {
                    (None, Some(amount.abs()))
                } else {
                    (Some(amount), None)
                }
            }
        };

        let dimensions: BTreeMap<String, String> = columns
            .dimensions
            .iter()
            .filter_map(|dimension| {
                row.field(&dimension.column)
                    .map(|value| (dimension.key.clone(), value.to_string()))
            })
            .collect();

        Ok(JournalLine {
            // Presence was checked before parsing started
            account: row
                .field(&columns.account)
                .map(normalize_account)
                .unwrap_or_default(),
            line_description: text(row.field(&columns.line_description).or(header_description)),
            debit,
            credit,
            quantity,
            business_partner: upper(row.field(&columns.business_partner)),
            tax_code: upper(row.field(&columns.tax_code)),
            free_reference: text(row.field(&columns.free_reference)),
            dimensions,
        })
    }

    /// The amount cell when filled, otherwise debit minus credit
    fn signed_amount(&self, row: &Row) -> Result<Decimal, ValidationError> {
        let columns = &self.columns;
        if let Some(amount) = number(row, &columns.amount)? {
            return Ok(amount);
        }
        let debit = number(row, &columns.debit)?;
        let credit = number(row, &columns.credit)?;
        if debit.is_none() && credit.is_none() {
            return Err(missing(row, &columns.amount));
        }
        debit
            .unwrap_or_default()
            .checked_sub(credit.unwrap_or_default())
            .ok_or(ValidationError::OutOfRange { row: row.index() })
    }
}

fn missing(row: &Row, column: &str) -> ValidationError {
    ValidationError::MissingField {
        row: row.index(),
        field: column.to_string(),
    }
}

fn number(row: &Row, column: &str) -> Result<Option<Decimal>, ValidationError> {
    row.field(column)
        .map(|raw| {
            parse_amount(raw).ok_or_else(|| ValidationError::BadNumber {
                row: row.index(),
                field: column.to_string(),
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn same_header_value(is_date: bool, left: &str, right: &str) -> bool {
    if is_date {
        if let (Some(left), Some(right)) = (parse_date(left), parse_date(right)) {
            return left == right;
        }
    }
    left.eq_ignore_ascii_case(right)
}

fn text(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn upper(value: Option<&str>) -> Option<String> {
    value.map(str::to_uppercase)
}
