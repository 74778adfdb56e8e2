//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Swiss social insurance number, e.g. 756.1234.5678.97
    static ref AHV_NUMBER: Regex = Regex::new(r"^756\.\d{4}\.\d{4}\.\d{2}$").unwrap();
    // Time of day as HH:MM, 24-hour clock
    static ref TIME_OF_DAY: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

/// Validates a Swiss AHV number (756.XXXX.XXXX.XX).
pub fn validate_ahv_number(value: &str) -> Result<(), ValidationError> {
    if AHV_NUMBER.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("ahv_number_format");
        err.message = Some("AHV number must have the form 756.XXXX.XXXX.XX".into());
        Err(err)
    }
}

/// Validates a time-of-day string in HH:MM form.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if TIME_OF_DAY.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_of_day_format");
        err.message = Some("Time must have the form HH:MM".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ahv_number() {
        assert!(validate_ahv_number("756.1234.5678.97").is_ok());
    }

    #[test]
    fn test_invalid_ahv_number() {
        assert!(validate_ahv_number("756.1234.5678").is_err());
        assert!(validate_ahv_number("123.4567.8901.23").is_err());
        assert!(validate_ahv_number("756-1234-5678-97").is_err());
        assert!(validate_ahv_number("").is_err());
    }

    #[test]
    fn test_valid_time_of_day() {
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("13:00").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
    }

    #[test]
    fn test_invalid_time_of_day() {
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("7:00").is_err());
        assert!(validate_time_of_day("13:60").is_err());
        assert!(validate_time_of_day("13.00").is_err());
    }

}
