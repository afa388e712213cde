//! Column-name contract between the row table and the entry builder

use serde::{Deserialize, Serialize};

/// Mapping from logical fields to row-table column names
///
/// The defaults match the row tables produced by the spreadsheet reader;
/// deployments whose sheet uses other headers remap them here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    // Line fields
    pub account: String,
    pub amount: String,
    pub debit: String,
    pub credit: String,
    pub quantity: String,
    pub line_description: String,
    pub business_partner: String,
    pub tax_code: String,
    pub free_reference: String,

    // Header fields, read from the first row of a Group
    pub site: String,
    pub entry_type: String,
    pub accounting_date: String,
    pub header_description: String,
    pub currency: String,
    pub reference: String,

    /// Analytic dimensions: API key and source column
    pub dimensions: Vec<DimensionColumn>,
}

/// One analytic dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionColumn {
    /// Key in the API payload
    pub key: String,
    /// Column in the row table
    pub column: String,
}

impl DimensionColumn {
    pub fn new(key: &str, column: &str) -> Self {
        Self {
            key: key.to_string(),
            column: column.to_string(),
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            account: "account".to_string(),
            amount: "amount".to_string(),
            debit: "debit".to_string(),
            credit: "credit".to_string(),
            quantity: "quantity".to_string(),
            line_description: "description".to_string(),
            business_partner: "bp".to_string(),
            tax_code: "tax".to_string(),
            free_reference: "free_reference".to_string(),
            site: "site".to_string(),
            entry_type: "entry_type".to_string(),
            accounting_date: "accounting_date".to_string(),
            header_description: "header_description".to_string(),
            currency: "currency".to_string(),
            reference: "reference".to_string(),
            dimensions: vec![
                DimensionColumn::new("fixture", "FIX"),
                DimensionColumn::new("broker", "BRK"),
                DimensionColumn::new("department", "DEP"),
                DimensionColumn::new("location", "LOC"),
                DimensionColumn::new("type", "TYP"),
                DimensionColumn::new("product", "PDT"),
                DimensionColumn::new("analysis", "ANA"),
            ],
        }
    }
}

impl ColumnMap {
    /// Header columns that become required when `require_header` is set
    pub fn required_header(&self) -> [&str; 5] {
        [
            self.site.as_str(),
            self.entry_type.as_str(),
            self.accounting_date.as_str(),
            self.currency.as_str(),
            self.header_description.as_str(),
        ]
    }

    /// Header columns that must hold a single value across a Group
    pub fn consistent_header(&self) -> [&str; 4] {
        [
            self.site.as_str(),
            self.entry_type.as_str(),
            self.accounting_date.as_str(),
            self.currency.as_str(),
        ]
    }

    /// Every mapped column with the logical field it feeds
    pub fn named_columns(&self) -> Vec<(&str, &str)> {
        let mut columns = vec![
            ("account", self.account.as_str()),
            ("amount", self.amount.as_str()),
            ("debit", self.debit.as_str()),
            ("credit", self.credit.as_str()),
            ("quantity", self.quantity.as_str()),
            ("line_description", self.line_description.as_str()),
            ("business_partner", self.business_partner.as_str()),
            ("tax_code", self.tax_code.as_str()),
            ("free_reference", self.free_reference.as_str()),
            ("site", self.site.as_str()),
            ("entry_type", self.entry_type.as_str()),
            ("accounting_date", self.accounting_date.as_str()),
            ("header_description", self.header_description.as_str()),
            ("currency", self.currency.as_str()),
            ("reference", self.reference.as_str()),
        ];
        columns.extend(
            self.dimensions
                .iter()
                .map(|dimension| (dimension.key.as_str(), dimension.column.as_str())),
        );
        columns
    }
}
