use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// One dated contribution toward a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Absent until persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub goal_id: String,
    #[serde(with = "crate::dates::utc_datetime")]
    pub date: DateTime<Utc>,
    pub amount: f64,
    /// Running total after this record, filled in for the records table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl Record {
    pub fn new(goal_id: impl Into<String>, date: DateTime<Utc>, amount: f64) -> Self {
        Record {
            id: None,
            goal_id: goal_id.into(),
            date,
            amount,
            progress: None,
        }
    }
}

/// Payload for logging a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub goal_id: String,
    #[serde(with = "crate::dates::utc_datetime")]
    pub date: DateTime<Utc>,
    pub amount: f64,
}

impl NewRecord {
    pub fn validate(&self) -> Result<()> {
        if self.goal_id.trim().is_empty() {
            return Err(ValidationError::MissingField("goalId".to_string()).into());
        }
        if !self.amount.is_finite() {
            return Err(ValidationError::InvalidInput(format!(
                "Record amount must be a finite number, got {}",
                self.amount
            ))
            .into());
        }
        Ok(())
    }

    pub fn into_record(self, id: String) -> Record {
        Record {
            id: Some(id),
            goal_id: self.goal_id,
            date: self.date,
            amount: self.amount,
            progress: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_json_uses_camel_case_and_skips_empty_fields() {
        let record = Record::new("g-1", Utc.with_ymd_and_hms(2023, 10, 30, 0, 0, 0).unwrap(), 1.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "goalId": "g-1",
                "date": "2023-10-30T00:00:00.000Z",
                "amount": 1.5
            })
        );
    }

    #[test]
    fn unpersisted_record_deserializes_without_id() {
        let record: Record =
            serde_json::from_str(r#"{"goalId":"g-1","date":"2023-10-31","amount":9}"#).unwrap();
        assert_eq!(record.id, None);
        assert_eq!(record.amount, 9.0);
    }

    #[test]
    fn new_record_rejects_non_finite_amounts() {
        let mut new_record = NewRecord {
            goal_id: "g-1".to_string(),
            date: Utc::now(),
            amount: f64::NAN,
        };
        assert!(new_record.validate().is_err());

        new_record.amount = 0.0;
        assert!(new_record.validate().is_ok());

        new_record.goal_id = String::new();
        assert!(new_record.validate().is_err());
    }
}
