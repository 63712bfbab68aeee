/// Survey record queries: insert and bulk fetch
///
/// Records are append-only. There is no update or delete; a repeat visit to
/// the same subject is simply another row.

use crate::db::models::{normalize_email, FormRecord, FormSubmission};
use crate::db::Database;
use crate::error::{IntakeError, Result};
use sqlx::Row;

impl Database {
    /// Insert one completed survey submission
    ///
    /// Only the attribution pair is validated: the email must be non-empty
    /// after trim + lowercase and the password non-empty after trim. Every
    /// survey field is stored exactly as submitted, empty string included.
    ///
    /// # Arguments
    /// * `submission` - The filled (or partially filled) form
    ///
    /// # Returns
    /// * `Ok(i64)` - The new record ID
    /// * `Err(IntakeError::Validation)` - Missing email or password; no row is created
    pub async fn insert_record(&self, submission: FormSubmission) -> Result<i64> {
        let email = normalize_email(&submission.email);
        let password = submission.password.trim();

        if email.is_empty() || password.is_empty() {
            return Err(IntakeError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO form_records (
                email, password, woman_name, husband_name, district, upazila, village, landmark,
                collection_date, collection_time, admission_date, admission_time,
                registration_number, lmp_date, lmp_date_2, usg_available, usg_date,
                delivery_mode, delivery_date, outcome, birth_order_1, birth_order_2,
                delivery_time_1, newborn_sex, diagnosis_confirmed, diagnosis_confirmed_2,
                perinatal_case, newborn_admitted, convulsions, convulsions_2,
                ventilator_used, ventilator_used_2, paramedic_name,
                somch_checked, swmch_checked, somch_checked_2, swmch_checked_2,
                mobile_1, mobile_2, mobile_3, interview_end_time, interview_end_time_2,
                interview_end_time_3, interview_end_time_4, interview_end_time_5
            ) VALUES (?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?,?)
            RETURNING id
            "#,
        )
        .bind(&email)
        .bind(password)
        .bind(&submission.woman_name)
        .bind(&submission.husband_name)
        .bind(&submission.district)
        .bind(&submission.upazila)
        .bind(&submission.village)
        .bind(&submission.landmark)
        .bind(&submission.collection_date)
        .bind(&submission.collection_time)
        .bind(&submission.admission_date)
        .bind(&submission.admission_time)
        .bind(&submission.registration_number)
        .bind(&submission.lmp_date)
        .bind(&submission.lmp_date_2)
        .bind(&submission.usg_available)
        .bind(&submission.usg_date)
        .bind(&submission.delivery_mode)
        .bind(&submission.delivery_date)
        .bind(&submission.outcome)
        .bind(&submission.birth_order_1)
        .bind(&submission.birth_order_2)
        .bind(&submission.delivery_time_1)
        .bind(&submission.newborn_sex)
        .bind(&submission.diagnosis_confirmed)
        .bind(&submission.diagnosis_confirmed_2)
        .bind(&submission.perinatal_case)
        .bind(&submission.newborn_admitted)
        .bind(&submission.convulsions)
        .bind(&submission.convulsions_2)
        .bind(&submission.ventilator_used)
        .bind(&submission.ventilator_used_2)
        .bind(&submission.paramedic_name)
        .bind(&submission.somch_checked)
        .bind(&submission.swmch_checked)
        .bind(&submission.somch_checked_2)
        .bind(&submission.swmch_checked_2)
        .bind(&submission.mobile_1)
        .bind(&submission.mobile_2)
        .bind(&submission.mobile_3)
        .bind(&submission.interview_end_time)
        .bind(&submission.interview_end_time_2)
        .bind(&submission.interview_end_time_3)
        .bind(&submission.interview_end_time_4)
        .bind(&submission.interview_end_time_5)
        .fetch_one(self.pool())
        .await?;

        Ok(row.get(0))
    }

    /// Fetch every stored survey record
    ///
    /// No ordering clause: rows come back in the engine's own insertion
    /// order, fully materialized.
    pub async fn fetch_all_records(&self) -> Result<Vec<FormRecord>> {
        let records = sqlx::query_as::<_, FormRecord>("SELECT * FROM form_records")
            .fetch_all(self.pool())
            .await?;

        Ok(records)
    }

    /// Count stored survey records
    pub async fn record_count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM form_records")
            .fetch_one(self.pool())
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_submission() -> FormSubmission {
        FormSubmission {
            email: "collector@example.com".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_minimal_record() {
        let db = Database::new_test().await.unwrap();

        let id = db.insert_record(minimal_submission()).await.unwrap();
        assert!(id > 0);

        let records = db.fetch_all_records().await.unwrap();
        assert_eq!(records.len(), 1);

        // Every omitted field comes back as an empty string, never NULL
        let record = &records[0];
        assert_eq!(record.email, "collector@example.com");
        assert_eq!(record.password, "hunter2");
        assert_eq!(record.woman_name, "");
        assert_eq!(record.delivery_mode, "");
        assert_eq!(record.interview_end_time_5, "");
    }

    #[tokio::test]
    async fn test_insert_rejects_missing_credentials() {
        let db = Database::new_test().await.unwrap();

        let mut no_email = minimal_submission();
        no_email.email = "   ".to_string();

        let mut no_password = minimal_submission();
        no_password.password = "".to_string();

        for submission in [no_email, no_password] {
            let result = db.insert_record(submission).await;
            assert!(matches!(result, Err(IntakeError::Validation(_))));
        }

        // The failed attempts created no rows
        assert_eq!(db.record_count().await.unwrap(), 0);
        assert!(db.fetch_all_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_normalizes_email() {
        let db = Database::new_test().await.unwrap();

        let mut submission = minimal_submission();
        submission.email = "  Collector@Example.COM ".to_string();
        db.insert_record(submission).await.unwrap();

        let records = db.fetch_all_records().await.unwrap();
        assert_eq!(records[0].email, "collector@example.com");
    }

    #[tokio::test]
    async fn test_insert_full_record_roundtrip() {
        let db = Database::new_test().await.unwrap();

        let mut submission = minimal_submission();
        submission.woman_name = "Amina Begum".to_string();
        submission.district = "Sylhet".to_string();
        submission.upazila = "Beanibazar".to_string();
        submission.collection_date = "2025-03-14".to_string();
        submission.delivery_mode = "Caesarean".to_string();
        submission.birth_order_1 = "2".to_string();
        submission.newborn_sex = "Female".to_string();
        submission.convulsions = "No".to_string();
        submission.mobile_1 = "01712345678".to_string();
        submission.interview_end_time_3 = "14:35".to_string();

        db.insert_record(submission.clone()).await.unwrap();

        let records = db.fetch_all_records().await.unwrap();
        let record = &records[0];
        assert_eq!(record.woman_name, submission.woman_name);
        assert_eq!(record.district, submission.district);
        assert_eq!(record.upazila, submission.upazila);
        assert_eq!(record.collection_date, submission.collection_date);
        assert_eq!(record.delivery_mode, submission.delivery_mode);
        assert_eq!(record.birth_order_1, submission.birth_order_1);
        assert_eq!(record.newborn_sex, submission.newborn_sex);
        assert_eq!(record.convulsions, submission.convulsions);
        assert_eq!(record.mobile_1, submission.mobile_1);
        assert_eq!(record.interview_end_time_3, submission.interview_end_time_3);
        // Untouched fields still default to empty
        assert_eq!(record.husband_name, "");
    }

    #[tokio::test]
    async fn test_repeat_submissions_are_separate_rows() {
        let db = Database::new_test().await.unwrap();

        let mut submission = minimal_submission();
        submission.registration_number = "SOMCH-2025-0042".to_string();

        let id1 = db.insert_record(submission.clone()).await.unwrap();
        let id2 = db.insert_record(submission).await.unwrap();
        assert_ne!(id1, id2);

        assert_eq!(db.record_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_preserves_insertion_order() {
        let db = Database::new_test().await.unwrap();

        for name in ["first", "second", "third"] {
            let mut submission = minimal_submission();
            submission.woman_name = name.to_string();
            db.insert_record(submission).await.unwrap();
        }

        let records = db.fetch_all_records().await.unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.woman_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
