//! Converts between raw text fields and [Transaction] values.
//!
//! Both front-end form fields and rows of the ledger file go through this
//! module, so the parse and serialize functions must agree: serializing a
//! transaction and parsing it back yields an equal transaction.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, transaction::Transaction};

/// The calendar date format used by forms and the ledger file.
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse four raw text fields into a [Transaction].
///
/// The description accepts any string, including the empty string. The
/// category accepts any string and gets its first character uppercased, the
/// rest is left unchanged: "income" becomes "Income" but "EXPENSE" stays
/// "EXPENSE".
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidDate] if `raw_date` is not a date in the format `YYYY-MM-DD`,
/// - or [Error::InvalidAmount] if `raw_amount` is not a decimal number.
pub fn parse(
    raw_date: &str,
    raw_description: &str,
    raw_category: &str,
    raw_amount: &str,
) -> Result<Transaction, Error> {
    let date = Date::parse(raw_date, &DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(raw_date.to_owned()))?;

    let amount: f64 = raw_amount
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAmount(raw_amount.to_owned()))?;

    Ok(Transaction {
        date,
        description: raw_description.to_owned(),
        category: capitalize_first(raw_category),
        amount,
    })
}

/// Render a [Transaction] as the four text fields of a ledger file row.
///
/// The date is rendered as `YYYY-MM-DD` and the amount as a plain decimal
/// number with no forced precision, so `parse` on the result returns an
/// equal transaction. Two-decimal display formatting is a rendering concern,
/// see [crate::html::format_currency].
pub fn serialize(transaction: &Transaction) -> [String; 4] {
    [
        transaction.date.to_string(),
        transaction.description.clone(),
        transaction.category.clone(),
        transaction.amount.to_string(),
    ]
}

/// Uppercase the first character of `text`, leaving the rest unchanged.
///
/// This is deliberately not title-casing: "EXPENSE" stays "EXPENSE".
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
