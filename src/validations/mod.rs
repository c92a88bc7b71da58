pub mod error;


use serde_json::Value;
use uuid::Uuid;

use crate::models::EntryType;

use error::*;

pub const MAX_AMOUNT: f64 = 1_000_000_000.0;
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

///
/// Transaction fields that passed every rule, ready to be written
///
#[derive(Debug, PartialEq)]
pub struct ValidTransaction {
    pub description: String,
    pub amount: f64,
    pub entry_type: EntryType,
}

///
/// Category fields that passed every rule, ready to be written
///
#[derive(Debug, PartialEq)]
pub struct ValidCategory {
    pub name: String,
    pub entry_type: EntryType,
    pub parent_id: Option<Uuid>,
}

///
/// Checks description, amount and type in that order.
/// The first failing rule is returned.
///
pub fn validate_transaction(
    description: Option<&Value>,
    amount: Option<&Value>,
    entry_type: Option<&Value>,
) -> Result<ValidTransaction> {
    let description = validate_description(text_field(description, Error::DescriptionRequired)?)?;
    let amount = validate_amount(amount)?;
    let entry_type = validate_entry_type(text_field(entry_type, Error::InvalidType)?)?;

    Ok(ValidTransaction { description, amount, entry_type })
}

///
/// Checks name presence, type, name length and the parent id in that order.
/// An empty `parent_id` is the same as none.
///
pub fn validate_category(
    name: Option<&Value>,
    entry_type: Option<&Value>,
    parent_id: Option<&Value>,
) -> Result<ValidCategory> {
    let name = text_field(name, Error::CategoryNameRequired)?
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(Error::CategoryNameRequired);
    }
    let entry_type = validate_entry_type(text_field(entry_type, Error::InvalidType)?)?;
    if name.chars().count() > MAX_CATEGORY_NAME_LEN {
        return Err(Error::CategoryNameTooLong);
    }

    let parent_id = match parent_id {
        Some(id) => text_field(Some(id), Error::InvalidParentId(id.to_string()))?,
        None => None,
    };
    let parent_id = match parent_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Some(
            Uuid::parse_str(id).map_err(|_| Error::InvalidParentId(id.to_string()))?
        ),
        None => None,
    };

    Ok(ValidCategory { name: name.to_string(), entry_type, parent_id })
}

///
/// Reads a loosely typed body field as text. Absent and `null` read as `None`;
/// any other non-string value fails with `err`.
///
pub fn text_field(value: Option<&Value>, err: Error) -> Result<Option<&str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(err),
    }
}

/// Returns the trimmed description
pub fn validate_description(description: Option<&str>) -> Result<String> {
    match description.map(str::trim) {
        Some(description) if !description.is_empty() => Ok(description.to_string()),
        _ => Err(Error::DescriptionRequired),
    }
}

///
/// Accepts a JSON number or a numeric string.
/// The parsed value must be finite, positive and at most [`MAX_AMOUNT`].
///
pub fn validate_amount(amount: Option<&Value>) -> Result<f64> {
    let amount = match amount {
        None | Some(Value::Null) => return Err(Error::AmountRequired),
        Some(Value::Number(num)) => num.as_f64().ok_or(Error::AmountNotNumeric)?,
        Some(Value::String(num)) => num.trim().parse::<f64>()
            .map_err(|_| Error::AmountNotNumeric)?,
        Some(_) => return Err(Error::AmountNotNumeric),
    };

    if amount.is_nan() {
        return Err(Error::AmountNotNumeric);
    }
    if amount <= 0.0 {
        return Err(Error::AmountNotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(Error::AmountTooLarge);
    }
    Ok(amount)
}

pub fn validate_entry_type(entry_type: Option<&str>) -> Result<EntryType> {
    entry_type.and_then(|t| t.parse().ok()).ok_or(Error::InvalidType)
}

///
/// Parses a `YYYY-MM` month into its year and month number
///
pub fn validate_month(month: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidMonth(month.to_string());

    let (year, month_num) = month.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month_num.len() != 2
        || !year.chars().chain(month_num.chars()).all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month_num = month_num.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month_num) {
        return Err(invalid());
    }

    Ok((year, month_num))
}
