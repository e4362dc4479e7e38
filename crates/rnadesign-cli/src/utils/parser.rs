use rnadesign::core::models::category::{DataType, DesignCategory};
use rnadesign::engine::filter::FilterPredicate;
use rnadesign::engine::sort::{SortArgs, SortOrder};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid sort '{0}'. Expected 'column:asc|desc' or 'sequence:asc|desc:REFERENCE'.")]
    InvalidSortFormat(String),

    #[error("Invalid filter '{0}'. Expected 'column=value' or 'column=min..max'.")]
    InvalidFilterFormat(String),

    #[error("Unknown column '{0}'.")]
    UnknownColumn(String),

    #[error("Unknown sort order '{0}'. Expected 'asc' or 'desc'.")]
    UnknownOrder(String),

    #[error("Column list cannot be empty.")]
    EmptyColumnList,
}

pub fn parse_category(name: &str) -> Result<DesignCategory, ParseError> {
    name.parse::<DesignCategory>()
        .map_err(|_| ParseError::UnknownColumn(name.trim().to_string()))
}

/// Parses `column[:order[:reference]]`. The order defaults to ascending.
pub fn parse_sort_arg(text: &str) -> Result<(DesignCategory, SortOrder, SortArgs), ParseError> {
    let mut parts = text.splitn(3, ':');
    let name = parts
        .next()
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ParseError::InvalidSortFormat(text.to_string()))?;
    let category = parse_category(name)?;
    let order = match parts.next() {
        None => SortOrder::Ascending,
        Some(order) => order
            .parse::<SortOrder>()
            .map_err(|_| ParseError::UnknownOrder(order.to_string()))?,
    };
    let args = match parts.next().map(str::trim) {
        None => SortArgs::None,
        Some("") => return Err(ParseError::InvalidSortFormat(text.to_string())),
        Some(reference) => SortArgs::ReferenceSequence(reference.to_string()),
    };
    Ok((category, order, args))
}

/// Parses `column=value`. Numeric columns take `min..max` where either side may be empty;
/// a bare number matches exactly.
pub fn parse_filter_arg(text: &str) -> Result<FilterPredicate, ParseError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidFilterFormat(text.to_string()))?;
    let category = parse_category(name)?;
    let value = value.trim();

    match category.data_type() {
        DataType::Int | DataType::Number => match value.split_once("..") {
            Some((min, max)) => Ok(FilterPredicate::new(category, Some(min), Some(max))),
            None => Ok(FilterPredicate::new(category, Some(value), Some(value))),
        },
        DataType::String | DataType::Boolean => {
            Ok(FilterPredicate::new(category, Some(value), None))
        }
    }
}

pub fn parse_column_list(text: &str) -> Result<Vec<DesignCategory>, ParseError> {
    let columns = text
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(parse_category)
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(ParseError::EmptyColumnList);
    }
    Ok(columns)
}
