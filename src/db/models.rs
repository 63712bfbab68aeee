/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Trim whitespace and lowercase an email address.
///
/// The normalized form is the uniqueness and lookup key everywhere: accounts,
/// login, and record attribution all go through this.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A registered field worker
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string, never the plaintext password
    pub password_hash: String,
    pub is_logged_in: bool,
    pub created_at: String, // ISO 8601 format from SQLite
}

/// One completed survey submission as stored
///
/// Every survey field is text and may legitimately be empty; absence is the
/// empty string, never NULL. The owning worker's email/password ride along in
/// the row so exported files stand on their own.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FormRecord {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub woman_name: String,
    pub husband_name: String,
    pub district: String,
    pub upazila: String,
    pub village: String,
    pub landmark: String,
    pub collection_date: String,
    pub collection_time: String,
    pub admission_date: String,
    pub admission_time: String,
    pub registration_number: String,
    pub lmp_date: String,
    pub lmp_date_2: String,
    pub usg_available: String,
    pub usg_date: String,
    pub delivery_mode: String,
    pub delivery_date: String,
    pub outcome: String,
    pub birth_order_1: String,
    pub birth_order_2: String,
    pub delivery_time_1: String,
    pub newborn_sex: String,
    pub diagnosis_confirmed: String,
    pub diagnosis_confirmed_2: String,
    pub perinatal_case: String,
    pub newborn_admitted: String,
    pub convulsions: String,
    pub convulsions_2: String,
    pub ventilator_used: String,
    pub ventilator_used_2: String,
    pub paramedic_name: String,
    pub somch_checked: String,
    pub swmch_checked: String,
    pub somch_checked_2: String,
    pub swmch_checked_2: String,
    pub mobile_1: String,
    pub mobile_2: String,
    pub mobile_3: String,
    pub interview_end_time: String,
    pub interview_end_time_2: String,
    pub interview_end_time_3: String,
    pub interview_end_time_4: String,
    pub interview_end_time_5: String,
    pub created_at: String, // ISO 8601 format from SQLite
}

/// Input for inserting a new survey submission
///
/// Deserialized straight from the data-entry form (or a JSON file on the CLI).
/// Struct-level `serde(default)` means any field the form didn't fill arrives
/// as an empty string. Only email and password are checked before insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSubmission {
    pub email: String,
    pub password: String,
    pub woman_name: String,
    pub husband_name: String,
    pub district: String,
    pub upazila: String,
    pub village: String,
    pub landmark: String,
    pub collection_date: String,
    pub collection_time: String,
    pub admission_date: String,
    pub admission_time: String,
    pub registration_number: String,
    pub lmp_date: String,
    pub lmp_date_2: String,
    pub usg_available: String,
    pub usg_date: String,
    pub delivery_mode: String,
    pub delivery_date: String,
    pub outcome: String,
    pub birth_order_1: String,
    pub birth_order_2: String,
    pub delivery_time_1: String,
    pub newborn_sex: String,
    pub diagnosis_confirmed: String,
    pub diagnosis_confirmed_2: String,
    pub perinatal_case: String,
    pub newborn_admitted: String,
    pub convulsions: String,
    pub convulsions_2: String,
    pub ventilator_used: String,
    pub ventilator_used_2: String,
    pub paramedic_name: String,
    pub somch_checked: String,
    pub swmch_checked: String,
    pub somch_checked_2: String,
    pub swmch_checked_2: String,
    pub mobile_1: String,
    pub mobile_2: String,
    pub mobile_3: String,
    pub interview_end_time: String,
    pub interview_end_time_2: String,
    pub interview_end_time_3: String,
    pub interview_end_time_4: String,
    pub interview_end_time_5: String,
}
