use chrono::NaiveDate;
use hiring_portal_backend::dto::application_dto::{
    ApplicationForm, EducationEntry, ExperienceEntry, PersonalSection, ReferenceEntry,
    UploadedFileRef, MAX_UPLOAD_BYTES,
};

fn pdf_resume() -> UploadedFileRef {
    UploadedFileRef {
        file_name: "resume.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes: 120_000,
        storage_path: "uploads/resume.pdf".to_string(),
    }
}

fn jpeg_photo() -> UploadedFileRef {
    UploadedFileRef {
        file_name: "photo.jpg".to_string(),
        content_type: "image/jpeg".to_string(),
        size_bytes: 80_000,
        storage_path: "uploads/photo.jpg".to_string(),
    }
}

fn personal() -> PersonalSection {
    PersonalSection {
        full_name: "Amina Rahimova".to_string(),
        guardian_name: "Karim Rahimov".to_string(),
        email: "amina@example.com".to_string(),
        phone: "+99290000000".to_string(),
        national_id: "A1234567".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1996, 4, 12).unwrap(),
        gender: "female".to_string(),
        address: "12 Rudaki Ave".to_string(),
        city: "Dushanbe".to_string(),
        province: "Districts of Republican Subordination".to_string(),
        nationality: "Tajik".to_string(),
        photo: jpeg_photo(),
        resume: pdf_resume(),
    }
}

fn education() -> Vec<EducationEntry> {
    vec![EducationEntry {
        level: "Bachelor".to_string(),
        institution: "Tajik National University".to_string(),
        course: "Computer Science".to_string(),
        passing_year: "2018".to_string(),
    }]
}

fn experience() -> Vec<ExperienceEntry> {
    vec![ExperienceEntry {
        company: "Acme Corp".to_string(),
        position: "Backend Engineer".to_string(),
        employment_type: "full_time".to_string(),
        start_date: NaiveDate::from_ymd_opt(2019, 1, 7).unwrap(),
        end_date: None,
        description: "REST services and reporting".to_string(),
    }]
}

fn complete_form() -> ApplicationForm {
    ApplicationForm {
        personal: personal(),
        education: education(),
        is_fresher: false,
        experience: experience(),
        has_references: true,
        references: vec![ReferenceEntry {
            name: "Firuza Nazarova".to_string(),
            designation: Some("Engineering Manager".to_string()),
            contact: "+99291111111".to_string(),
        }],
    }
}

#[test]
fn complete_form_passes_validation() {
    assert!(complete_form().validate_submission().is_ok());
}

#[test]
fn png_resume_is_rejected() {
    let mut form = complete_form();
    form.personal.resume.content_type = "image/png".to_string();
    form.personal.resume.file_name = "resume.png".to_string();

    let errors = form.validate_submission().unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();
    let message = value["personal"]["resume"][0]["message"]
        .as_str()
        .unwrap_or_default();
    assert_eq!(message, "Only PDF files are allowed for resume");
}

#[test]
fn oversized_resume_is_rejected() {
    let mut form = complete_form();
    form.personal.resume.size_bytes = MAX_UPLOAD_BYTES + 1;

    let errors = form.validate_submission().unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        value["personal"]["resume"][0]["code"].as_str(),
        Some("resume_size")
    );
}

#[test]
fn experience_is_required_unless_fresher() {
    let mut form = complete_form();
    form.experience.clear();

    let errors = form.validate_submission().unwrap_err();
    assert!(errors.field_errors().contains_key("experience"));

    form.is_fresher = true;
    assert!(form.validate_submission().is_ok());
}

#[test]
fn declared_references_must_be_present() {
    let mut form = complete_form();
    form.has_references = true;
    form.references.clear();

    let errors = form.validate_submission().unwrap_err();
    assert!(errors.field_errors().contains_key("references"));

    form.has_references = false;
    assert!(form.validate_submission().is_ok());
}

#[test]
fn all_failing_fields_are_reported_together() {
    let mut form = complete_form();
    form.personal.email = "not-an-email".to_string();
    form.education.clear();
    form.experience.clear();

    let errors = form.validate_submission().unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();

    assert!(value["personal"]["email"].is_array());
    assert!(value["education"].is_array());
    assert!(value["experience"].is_array());
}

#[test]
fn invalid_passing_year_is_rejected() {
    let mut form = complete_form();
    form.education[0].passing_year = "20x8".to_string();

    let errors = form.validate_submission().unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        value["education"]["0"]["passing_year"][0]["code"].as_str(),
        Some("passing_year")
    );
}

#[test]
fn form_round_trips_through_json() {
    let form = complete_form();
    let json = serde_json::to_value(&form).unwrap();
    let parsed: ApplicationForm = serde_json::from_value(json).unwrap();
    assert!(parsed.validate_submission().is_ok());
    assert_eq!(parsed.personal.email, form.personal.email);
}

#[test]
fn optional_sections_default_when_omitted() {
    let mut json = serde_json::to_value(complete_form()).unwrap();
    let obj = json.as_object_mut().unwrap();
    obj.remove("is_fresher");
    obj.remove("experience");
    obj.remove("has_references");
    obj.remove("references");

    let parsed: ApplicationForm = serde_json::from_value(json).unwrap();
    assert!(!parsed.is_fresher);
    assert!(parsed.experience.is_empty());

    // With neither fresher flag nor experience, submission must fail.
    assert!(parsed.validate_submission().is_err());
}
