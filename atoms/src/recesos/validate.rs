//! Leave-request date arithmetic. Two distinct counts exist and both are
//! used: the business-day span caps the request length, the inclusive
//! calendar-day count feeds the dashboard statistics.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::ValidationError;

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays in the half-open interval `[start, end)`, no holiday calendar.
/// Zero when `end <= start`.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    let mut current = start;
    while current < end {
        if !is_weekend(current) {
            count += 1;
        }
        current = match current.checked_add_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    count
}

/// Inclusive calendar-day count, `end - start + 1`.
pub fn calendar_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Decide whether a proposed leave interval is acceptable. On success
/// returns the inclusive calendar-day count.
pub fn validate_leave_request(
    start_date: NaiveDate,
    end_date: NaiveDate,
    max_business_days: i64,
) -> Result<i64, ValidationError> {
    if end_date < start_date {
        return Err(ValidationError::EndBeforeStart);
    }
    let business_days = business_days_between(start_date, end_date);
    if business_days > max_business_days {
        return Err(ValidationError::ExceedsMaxDuration {
            days: business_days,
            max: max_business_days,
        });
    }
    Ok(calendar_days_between(start_date, end_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn monday_to_thursday_within_cap() {
        // 2024-06-03 is a Monday, 2024-06-06 a Thursday.
        let result = validate_leave_request(d(2024, 6, 3), d(2024, 6, 6), 3);
        assert_eq!(result, Ok(4));
    }

    #[test]
    fn end_before_start_rejected_regardless_of_span() {
        let result = validate_leave_request(d(2024, 6, 7), d(2024, 6, 3), 3);
        assert_eq!(result, Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn week_spanning_request_exceeds_cap() {
        // Monday to the following Monday crosses five weekdays.
        let result = validate_leave_request(d(2024, 6, 3), d(2024, 6, 10), 3);
        assert_eq!(
            result,
            Err(ValidationError::ExceedsMaxDuration { days: 5, max: 3 })
        );
    }

    #[test]
    fn single_day_request_is_one_calendar_day() {
        assert_eq!(validate_leave_request(d(2024, 6, 3), d(2024, 6, 3), 3), Ok(1));
    }

    #[test]
    fn weekend_only_interval_has_no_business_days() {
        // Saturday to Monday: only the Saturday and Sunday fall inside
        // the half-open interval.
        assert_eq!(business_days_between(d(2024, 6, 8), d(2024, 6, 10)), 0);
        // The calendar count still sees three days.
        assert_eq!(calendar_days_between(d(2024, 6, 8), d(2024, 6, 10)), 3);
    }

    #[test]
    fn business_span_skips_the_weekend() {
        // Friday to Tuesday: Friday and Monday are the weekdays in range.
        assert_eq!(business_days_between(d(2024, 6, 7), d(2024, 6, 11)), 2);
    }

    #[test]
    fn cap_is_configuration_not_constant() {
        // The same interval passes when the configured cap is looser.
        let result = validate_leave_request(d(2024, 6, 3), d(2024, 6, 10), 5);
        assert_eq!(result, Ok(8));
    }
}
