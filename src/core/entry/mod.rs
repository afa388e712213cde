//! Entry Builder: turns a Group into a journal entry payload or a validation failure

mod builder;
mod parse;
mod types;


pub use builder::EntryBuilder;
pub use parse::{normalize_account, parse_amount, parse_date};
pub use types::{BuildOutcome, JournalEntry, JournalLine, ValidationError};
