//! Field rules for user requests.
//!
//! Requests derive `validator::Validate`; `violations` flattens the outcome
//! into the list of human-readable messages callers report.

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, Utc};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::constants::MIN_AGE;

/// Collect every rule violation of `request` as a message.
///
/// Returns an empty list when the request is valid. Messages are ordered by
/// field name so reports are stable.
pub fn violations<T: Validate>(request: &T) -> Vec<String> {
    match request.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => violation_messages(&errors),
    }
}

fn violation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect()
}

/// Full years between `date_of_birth` and `on`. Negative for future dates.
pub fn implied_age(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Date of birth must not be in the future and must imply an adult.
pub(crate) fn validate_birth_date(date_of_birth: &NaiveDate) -> Result<(), ValidationError> {
    check_birth_date(*date_of_birth, today())
}

fn check_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date_of_birth > today {
        return Err(rule(
            "birth_date_in_future",
            "Date of birth cannot be in the future",
        ));
    }
    if implied_age(date_of_birth, today) < MIN_AGE {
        return Err(rule(
            "birth_date_under_age",
            "Date of birth must imply an age of at least 18",
        ));
    }
    Ok(())
}

/// The declared age cannot exceed what the date of birth allows.
pub(crate) fn validate_age_against_birth_date(
    age: i32,
    date_of_birth: NaiveDate,
) -> Result<(), ValidationError> {
    check_age_against_birth_date(age, date_of_birth, today())
}

fn check_age_against_birth_date(
    age: i32,
    date_of_birth: NaiveDate,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if date_of_birth <= today && age > implied_age(date_of_birth, today) {
        return Err(rule(
            "age_birth_date_mismatch",
            "Age is not consistent with date of birth",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_AGE;
    use crate::user::{CreateUserRequest, UpdateUserRequest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_implied_age_counts_full_years() {
        assert_eq!(implied_age(date(1994, 6, 4), date(2024, 6, 3)), 29);
        assert_eq!(implied_age(date(1994, 6, 4), date(2024, 6, 4)), 30);
        assert_eq!(implied_age(date(2030, 1, 1), date(2024, 1, 1)), -6);
    }

    #[test]
    fn test_valid_create_request_has_no_violations() {
        let request = CreateUserRequest::new("Alice", 30, date(1994, 6, 4));
        assert!(violations(&request).is_empty());
    }

    #[test]
    fn test_invalid_create_request_reports_every_field() {
        let future = today() + chrono::Duration::days(30);
        let request = CreateUserRequest::new("", 0, future);

        let messages = violations(&request);

        assert!(messages.contains(&"Name must not be empty".to_string()));
        assert!(messages.contains(&"Age must be between 18 and 120".to_string()));
        assert!(messages.contains(&"Date of birth cannot be in the future".to_string()));
    }

    #[test]
    fn test_under_age_update_request_is_rejected() {
        let birth = today() - chrono::Duration::days(365 * 17);
        let request = UpdateUserRequest::new(1, "Alice", 17, birth);

        let messages = violations(&request);

        assert!(!messages.is_empty());
        assert!(messages.contains(&"Age must be between 18 and 120".to_string()));
    }

    #[test]
    fn test_age_bounds_match_constants() {
        let birth = date(1900, 1, 1);
        assert!(violations(&CreateUserRequest::new("A", MIN_AGE, birth)).is_empty());
        assert!(violations(&CreateUserRequest::new("A", MAX_AGE, birth)).is_empty());
        assert!(!violations(&CreateUserRequest::new("A", MIN_AGE - 1, birth)).is_empty());
        assert!(!violations(&CreateUserRequest::new("A", MAX_AGE + 1, birth)).is_empty());
    }

    #[test]
    fn test_birth_date_rules() {
        let today = date(2024, 6, 4);
        assert!(check_birth_date(date(1994, 6, 4), today).is_ok());
        assert!(check_birth_date(date(2024, 6, 5), today).is_err());
        assert!(check_birth_date(date(2007, 1, 2), today).is_err());
        assert!(check_birth_date(date(2006, 6, 4), today).is_ok());
    }

    #[test]
    fn test_age_cannot_exceed_birth_date() {
        let today = date(2024, 6, 4);
        assert!(check_age_against_birth_date(30, date(1994, 6, 4), today).is_ok());
        assert!(check_age_against_birth_date(25, date(1994, 6, 4), today).is_ok());
        assert!(check_age_against_birth_date(31, date(1994, 6, 4), today).is_err());
    }
}
