//! Journal entry payload and validation error types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Payload built from one Group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounting_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_by_default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Sum of signed line amounts, `None` when it leaves the decimal range
    pub fn total(&self) -> Option<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.signed_amount()))
    }
}

/// One line of a journal entry, built from one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_description: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub debit: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub credit: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_partner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_reference: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub dimensions: BTreeMap<String, String>,
}

impl JournalLine {
    /// Debit minus credit; quantity lines carry neither and count as zero
    pub fn signed_amount(&self) -> Decimal {
        match (self.debit, self.credit) {
            (Some(debit), Some(credit)) => debit.saturating_sub(credit),
            (Some(debit), None) => debit,
            (None, Some(credit)) => -credit,
            (None, None) => Decimal::ZERO,
        }
    }

    /// Whether the line is sent as a quantity instead of an amount
    pub fn is_quantity_line(&self) -> bool {
        self.quantity.is_some()
    }
}

/// Why a Group could not be turned into a journal entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing-field: row {row} has no value for '{field}'")]
    MissingField { row: usize, field: String },

    #[error("bad-number: row {row} has '{value}' in '{field}', which is not a number")]
    BadNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("bad-date: row {row} has '{value}' in '{field}', which is not a date")]
    BadDate {
        row: usize,
        field: String,
        value: String,
    },

    #[error("bad-number: amounts from row {row} exceed the supported decimal range")]
    OutOfRange { row: usize },

    #[error(
        "inconsistent-header: row {row} has '{found}' in '{field}', but the Group already uses '{expected}'"
    )]
    InconsistentHeader {
        row: usize,
        field: String,
        expected: String,
        found: String,
    },

    #[error("unbalanced: lines sum to {imbalance}, allowed tolerance is {tolerance}")]
    Unbalanced {
        imbalance: Decimal,
        tolerance: Decimal,
    },
}

impl ValidationError {
    /// Stable tag of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing-field",
            ValidationError::BadNumber { .. } | ValidationError::OutOfRange { .. } => "bad-number",
            ValidationError::BadDate { .. } => "bad-date",
            ValidationError::InconsistentHeader { .. } => "inconsistent-header",
            ValidationError::Unbalanced { .. } => "unbalanced",
        }
    }
}

/// Result of building one Group
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// Valid and not yet submitted
    Ready(JournalEntry),
    /// Every row already carries a document number
    AlreadySubmitted,
    Invalid(ValidationError),
}
