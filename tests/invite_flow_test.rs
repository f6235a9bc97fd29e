use std::env;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use hiring_portal_backend::dto::application_dto::{
    ApplicationForm, EducationEntry, ExperienceEntry, PersonalSection, UploadedFileRef,
};
use hiring_portal_backend::dto::evaluation_dto::{QuestionScorePayload, RecordEvaluationPayload};
use hiring_portal_backend::error::Error;
use hiring_portal_backend::services::application_service::ApplicationService;
use hiring_portal_backend::services::evaluation_service::EvaluationService;
use hiring_portal_backend::services::invite_service::InviteService;

// These tests need a live Postgres; they skip when DATABASE_URL is unset so
// the rest of the suite stays runnable without one.
async fn setup() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    if env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL not set; skipping");
        return None;
    }
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("INTEGRATION_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("VENUE_LATITUDE", "38.5598");
    env::set_var("VENUE_LONGITUDE", "68.7870");

    let _ = hiring_portal_backend::config::init_config();
    let pool = hiring_portal_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrations");
    Some(pool)
}

async fn seed_candidate(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(r#"INSERT INTO candidates (id, name, email) VALUES ($1, $2, $3)"#)
        .bind(id)
        .bind("Amina Rahimova")
        .bind(format!("amina_{}@example.com", id))
        .execute(pool)
        .await
        .expect("seed candidate");
    id
}

async fn seed_evaluator(pool: &PgPool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO users (id, external_id, name, email, role, is_active)
           VALUES ($1, $2, $3, $4, 'interviewer', TRUE)"#,
    )
    .bind(id)
    .bind(format!("ext-{}", id))
    .bind("Firuza Nazarova")
    .bind(format!("firuza_{}@example.com", id))
    .execute(pool)
    .await
    .expect("seed evaluator");
    id
}

fn complete_form() -> ApplicationForm {
    ApplicationForm {
        personal: PersonalSection {
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
            photo: UploadedFileRef {
                file_name: "photo.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                size_bytes: 80_000,
                storage_path: "uploads/photo.jpg".to_string(),
            },
            resume: UploadedFileRef {
                file_name: "resume.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                size_bytes: 120_000,
                storage_path: "uploads/resume.pdf".to_string(),
            },
        },
        education: vec![EducationEntry {
            level: "Bachelor".to_string(),
            institution: "Tajik National University".to_string(),
            course: "Computer Science".to_string(),
            passing_year: "2018".to_string(),
        }],
        is_fresher: false,
        experience: vec![ExperienceEntry {
            company: "Acme Corp".to_string(),
            position: "Backend Engineer".to_string(),
            employment_type: "full_time".to_string(),
            start_date: NaiveDate::from_ymd_opt(2019, 1, 7).unwrap(),
            end_date: None,
            description: "REST services and reporting".to_string(),
        }],
        has_references: false,
        references: vec![],
    }
}

#[tokio::test]
async fn opening_a_stale_invite_flips_it_to_expired() {
    let Some(pool) = setup().await else { return };
    let candidate_id = seed_candidate(&pool).await;
    let invites = InviteService::new(pool.clone());

    let issued = invites
        .issue(candidate_id, None, Utc::now() + Duration::hours(1), None, None)
        .await
        .expect("issue");
    invites.mark_sent(issued.invite.id).await.expect("mark sent");

    sqlx::query(r#"UPDATE invites SET expires_at = NOW() - INTERVAL '1 day' WHERE id = $1"#)
        .bind(issued.invite.id)
        .execute(&pool)
        .await
        .expect("backdate expiry");

    let err = invites
        .mark_opened(&issued.access_token)
        .await
        .expect_err("stale invite must not open");
    assert!(matches!(err, Error::Expired(_)), "got {:?}", err);

    let invite = invites.get_by_id(issued.invite.id).await.expect("reload");
    assert_eq!(invite.status, "expired");
}

#[tokio::test]
async fn second_submission_on_the_same_invite_is_rejected() {
    let Some(pool) = setup().await else { return };
    let candidate_id = seed_candidate(&pool).await;
    let invites = InviteService::new(pool.clone());
    let applications = ApplicationService::new(pool.clone());

    let issued = invites
        .issue(candidate_id, None, Utc::now() + Duration::days(7), None, None)
        .await
        .expect("issue");
    invites.mark_sent(issued.invite.id).await.expect("mark sent");

    let application = applications
        .submit(&issued.access_token, complete_form())
        .await
        .expect("first submission");
    assert_eq!(application.status, "applied");
    assert!(application.is_complete);

    let err = applications
        .submit(&issued.access_token, complete_form())
        .await
        .expect_err("duplicate submission must fail");
    assert!(matches!(err, Error::AlreadySubmitted(_)), "got {:?}", err);

    let invite = invites.get_by_id(issued.invite.id).await.expect("reload");
    assert_eq!(invite.status, "submitted");
}

#[tokio::test]
async fn evaluation_fans_out_scores_and_completes_the_application() {
    let Some(pool) = setup().await else { return };
    let candidate_id = seed_candidate(&pool).await;
    let invites = InviteService::new(pool.clone());
    let applications = ApplicationService::new(pool.clone());
    let evaluations = EvaluationService::new(pool.clone());

    let issued = invites
        .issue(candidate_id, None, Utc::now() + Duration::days(7), None, None)
        .await
        .expect("issue");
    invites.mark_sent(issued.invite.id).await.expect("mark sent");
    let application = applications
        .submit(&issued.access_token, complete_form())
        .await
        .expect("submission");
    assert_eq!(application.evaluation_status, "pending");

    let evaluator_id = seed_evaluator(&pool).await;
    let payload = RecordEvaluationPayload {
        qualifications: Some("Strong".to_string()),
        experience: Some("Relevant".to_string()),
        technical_skills: Some("Solid".to_string()),
        communication_skills: None,
        confidence: None,
        overall_comments: Some("Hire".to_string()),
        rating: 4,
        scores: vec![
            QuestionScorePayload {
                question: "Problem solving".to_string(),
                rating: 4,
            },
            QuestionScorePayload {
                question: "System design".to_string(),
                rating: 3,
            },
            QuestionScorePayload {
                question: "Communication".to_string(),
                rating: 5,
            },
        ],
    };

    let recorded = evaluations
        .record(application.id, evaluator_id, payload.clone())
        .await
        .expect("record evaluation");
    assert_eq!(recorded.scores.len(), 3);
    assert_eq!(recorded.rating, 4);

    let reloaded = applications.get_by_id(application.id).await.expect("reload");
    assert_eq!(reloaded.evaluation_status, "completed");

    let err = evaluations
        .record(application.id, evaluator_id, payload)
        .await
        .expect_err("repeat evaluation must fail");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);

    let listed = evaluations
        .list_for_application(application.id)
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].scores.len(), 3);
}

#[tokio::test]
async fn concurrent_duplicate_evaluations_yield_one_conflict() {
    let Some(pool) = setup().await else { return };
    let candidate_id = seed_candidate(&pool).await;
    let invites = InviteService::new(pool.clone());
    let applications = ApplicationService::new(pool.clone());
    let evaluations = EvaluationService::new(pool.clone());

    let issued = invites
        .issue(candidate_id, None, Utc::now() + Duration::days(7), None, None)
        .await
        .expect("issue");
    invites.mark_sent(issued.invite.id).await.expect("mark sent");
    let application = applications
        .submit(&issued.access_token, complete_form())
        .await
        .expect("submission");

    let evaluator_id = seed_evaluator(&pool).await;
    let payload = RecordEvaluationPayload {
        qualifications: None,
        experience: None,
        technical_skills: None,
        communication_skills: None,
        confidence: None,
        overall_comments: None,
        rating: 3,
        scores: vec![],
    };

    // Whether the loser is caught by the pre-check or by the unique index,
    // it must surface as Conflict, never as an opaque database error.
    let (a, b) = tokio::join!(
        evaluations.record(application.id, evaluator_id, payload.clone()),
        evaluations.record(application.id, evaluator_id, payload.clone()),
    );
    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let err = outcomes
        .into_iter()
        .find_map(|r| r.err())
        .expect("one side must lose");
    assert!(matches!(err, Error::Conflict(_)), "got {:?}", err);

    let listed = evaluations
        .list_for_application(application.id)
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
}
