use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::application::CandidateApplication;

pub const MAX_UPLOAD_BYTES: i64 = 5 * 1024 * 1024;

const PHOTO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Opaque reference to a file already stored by the upload collaborator.
/// Intake only checks the declared type and size.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadedFileRef {
    #[validate(length(min = 1))]
    pub file_name: String,
    #[validate(length(min = 1))]
    pub content_type: String,
    pub size_bytes: i64,
    #[validate(length(min = 1))]
    pub storage_path: String,
}

/// The full multi-step application form, submitted in one payload once the
/// candidate finishes the last step.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationForm {
    #[validate(nested)]
    pub personal: PersonalSection,
    #[validate(length(min = 1, message = "At least one education entry is required"), nested)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub is_fresher: bool,
    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub has_references: bool,
    #[serde(default)]
    #[validate(nested)]
    pub references: Vec<ReferenceEntry>,
}

impl ApplicationForm {
    /// Schema validation plus the cross-field rules the derive cannot
    /// express. Collects every failing field rather than stopping at the
    /// first.
    pub fn validate_submission(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errs) => errs,
        };

        if !self.is_fresher && self.experience.is_empty() {
            errors.add(
                "experience",
                field_error(
                    "required",
                    "At least one experience entry is required unless applying as a fresher",
                ),
            );
        }
        if self.has_references && self.references.is_empty() {
            errors.add(
                "references",
                field_error(
                    "required",
                    "At least one reference is required when references are declared",
                ),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonalSection {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Father's/guardian's name is required"))]
    pub guardian_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 7, message = "A valid phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "National ID is required"))]
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,
    #[validate(custom(function = validate_photo_ref))]
    pub photo: UploadedFileRef,
    #[validate(custom(function = validate_resume_ref))]
    pub resume: UploadedFileRef,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EducationEntry {
    #[validate(length(min = 1, message = "Education level is required"))]
    pub level: String,
    #[validate(length(min = 1, message = "Institution is required"))]
    pub institution: String,
    #[validate(length(min = 1, message = "Course is required"))]
    pub course: String,
    #[validate(custom(function = validate_passing_year))]
    pub passing_year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExperienceEntry {
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Employment type is required"))]
    pub employment_type: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Job description is required"))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReferenceEntry {
    #[validate(length(min = 1, message = "Reference name is required"))]
    pub name: String,
    pub designation: Option<String>,
    #[validate(length(min = 1, message = "Reference contact is required"))]
    pub contact: String,
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_resume_ref(file: &UploadedFileRef) -> Result<(), ValidationError> {
    if file.content_type != "application/pdf" {
        return Err(field_error("resume_type", "Only PDF files are allowed for resume"));
    }
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(field_error("resume_size", "Resume must be under 5MB"));
    }
    Ok(())
}

fn validate_photo_ref(file: &UploadedFileRef) -> Result<(), ValidationError> {
    if !PHOTO_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(field_error(
            "photo_type",
            "Only JPEG, PNG or WEBP images are allowed for photo",
        ));
    }
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(field_error("photo_size", "Photo must be under 5MB"));
    }
    Ok(())
}

fn validate_passing_year(year: &str) -> Result<(), ValidationError> {
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(field_error("passing_year", "Passing year must be a 4-digit year"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: uuid::Uuid,
    pub invite_id: uuid::Uuid,
    pub candidate_id: uuid::Uuid,
    pub job_id: Option<uuid::Uuid>,
    pub is_complete: bool,
    pub status: String,
    pub evaluation_status: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<CandidateApplication> for ApplicationResponse {
    fn from(app: CandidateApplication) -> Self {
        Self {
            id: app.id,
            invite_id: app.invite_id,
            candidate_id: app.candidate_id,
            job_id: app.job_id,
            is_complete: app.is_complete,
            status: app.status,
            evaluation_status: app.evaluation_status,
            created_at: app.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub job_id: Option<uuid::Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateApplicationStatusPayload {
    #[validate(length(min = 1))]
    pub status: String,
}
