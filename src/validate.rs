// Field validation rules.
//
// Each parser takes one raw line as typed by the operator and returns
// `Ok(None)` when the line is blank (the operator cancelled), `Ok(Some(v))`
// for a valid value, or a `FieldError` whose message is shown to the
// operator. No I/O happens here; prompting and retrying live in `prompt`.

use crate::model::{CarId, MAX_PRODUCTION_YEAR, MIN_PRODUCTION_YEAR};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Car ID must only contain digits!")]
    IdNotDigits,

    #[error("Car ID must be a positive integer!")]
    IdOutOfRange,

    #[error(
        "The name must contain only printable ASCII characters \
         (letters, digits, spaces, punctuation)!"
    )]
    NameNotPrintable,

    #[error("Car production year must be an integer!")]
    YearNotInteger,

    #[error(
        "Car production year must be greater than or equal to 1900 \
         and less than or equal to 2000."
    )]
    YearOutOfRange,

    #[error("Value must be 'y' or 'n' or an empty line to exit!")]
    NotYesNo,
}

/// Strips ASCII whitespace only. Anything else, including Unicode spaces,
/// stays in the value and is judged by the field rule.
fn trim_ascii(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_ascii_whitespace())
}

fn is_blank(line: &str) -> bool {
    trim_ascii(line).is_empty()
}

/// Printable ASCII is the range from space up to tilde.
pub fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}

/// A name is valid when it is non-empty and every character is printable ASCII.
pub fn name_is_valid(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_printable_ascii)
}

pub fn year_is_valid(year: i64) -> bool {
    (i64::from(MIN_PRODUCTION_YEAR)..=i64::from(MAX_PRODUCTION_YEAR)).contains(&year)
}

pub fn parse_id(line: &str) -> Result<Option<CarId>, FieldError> {
    if is_blank(line) {
        return Ok(None);
    }
    let digits = trim_ascii(line);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::IdNotDigits);
    }
    let raw: u64 = digits.parse().map_err(|_| FieldError::IdOutOfRange)?;
    CarId::new(raw).map(Some).ok_or(FieldError::IdOutOfRange)
}

pub fn parse_name(line: &str) -> Result<Option<String>, FieldError> {
    if is_blank(line) {
        return Ok(None);
    }
    let name = trim_ascii(line);
    if !name_is_valid(name) {
        return Err(FieldError::NameNotPrintable);
    }
    Ok(Some(name.to_string()))
}

pub fn parse_production_year(line: &str) -> Result<Option<u16>, FieldError> {
    if is_blank(line) {
        return Ok(None);
    }
    let year: i64 = trim_ascii(line).parse().map_err(|_| FieldError::YearNotInteger)?;
    if !year_is_valid(year) {
        return Err(FieldError::YearOutOfRange);
    }
    // In range, so it fits.
    Ok(Some(year as u16))
}

pub fn parse_convertible(line: &str) -> Result<Option<bool>, FieldError> {
    if is_blank(line) {
        return Ok(None);
    }
    match trim_ascii(line).to_ascii_lowercase().as_str() {
        "y" => Ok(Some(true)),
        "n" => Ok(Some(false)),
        _ => Err(FieldError::NotYesNo),
    }
}
