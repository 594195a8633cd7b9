use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A reimbursement base value published for one provider. Append-only
/// history; the current value is the most recent `effective_date`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Nbu {
    pub id: String,
    pub id_obrasocial: i64,
    pub value: f64,
    pub effective_date: NaiveDate,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateNbuPayload {
    pub id_obrasocial: i64,
    pub value: f64,
    pub effective_date: NaiveDate,
}

pub fn validate_value(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field: "value" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_values_accepted() {
        assert_eq!(validate_value(35.5), Ok(()));
        assert_eq!(
            validate_value(0.0),
            Err(ValidationError::NotPositive { field: "value" })
        );
        assert_eq!(
            validate_value(-1.0),
            Err(ValidationError::NotPositive { field: "value" })
        );
    }
}
