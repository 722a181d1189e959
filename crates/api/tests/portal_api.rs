//! HTTP-level tests for patients, visualization consultations, doctors and
//! bookings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, patch_json, post_json};
use medvision_store::seed::seed_doctors;
use serde_json::json;

// ---------------------------------------------------------------------------
// Patients and consultations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_fetch_patient() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/patients",
        json!({"name": "Sara", "age": "31", "medicalHistory": "none"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();

    let response = get(app.app(), &format!("/api/patients/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Sara");
    assert_eq!(json["medicalHistory"], "none");
}

#[tokio::test]
async fn patient_without_name_is_rejected() {
    let app = common::build_test_app();
    let response = post_json(app.app(), "/api/patients", json!({"age": "31"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_patient_returns_404() {
    let app = common::build_test_app();
    let response = get(
        app.app(),
        "/api/patients/00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn consultation_lifecycle() {
    let app = common::build_test_app();
    let patient = body_json(post_json(app.app(), "/api/patients", json!({"name": "Omar"})).await).await;
    let patient_id = patient["id"].as_str().unwrap();

    let response = post_json(
        app.app(),
        "/api/consultations",
        json!({
            "patientId": patient_id,
            "procedureType": "rhinoplasty",
            "beforeImageUrl": "/uploads/before.png",
            "isProcessing": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["isProcessing"], true);

    let response = patch_json(
        app.app(),
        &format!("/api/consultations/{id}"),
        json!({"afterImageUrl": "/uploads/after.png", "isProcessing": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["afterImageUrl"], "/uploads/after.png");
    assert_eq!(updated["isProcessing"], false);
    assert_eq!(updated["beforeImageUrl"], "/uploads/before.png");

    let listed = body_json(get(app.app(), &format!("/api/consultations?patientId={patient_id}")).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn consultation_for_unknown_patient_returns_404() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/consultations",
        json!({
            "patientId": "00000000-0000-0000-0000-000000000000",
            "procedureType": "dental"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn doctors_filter_by_specialty_keyword() {
    let app = common::build_test_app();
    seed_doctors(&app.state.store).await;

    let all = body_json(get(app.app(), "/api/doctors").await).await;
    assert_eq!(all.as_array().unwrap().len(), 6);

    let nose = body_json(get(app.app(), "/api/doctors?specialty=rhinoplasty").await).await;
    let nose = nose.as_array().unwrap();
    assert!(!nose.is_empty());
    assert!(nose.iter().all(|d| d["specialty"] == "جراحة تجميل الأنف"));
}

#[tokio::test]
async fn register_doctor_applies_defaults() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/register-doctor",
        json!({
            "name": "د. ليلى",
            "email": "laila@example.com",
            "phone": "0500000000",
            "specialty": "طب الجلدية",
            "hourlyRate": 350
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["doctor"]["status"], "approved");
    let id = json["id"].as_str().unwrap();

    let doctor = body_json(get(app.app(), &format!("/api/doctors/{id}")).await).await;
    assert_eq!(doctor["rating"], 4.5);
    assert_eq!(doctor["experience"], 0);
    assert_eq!(doctor["hourlyRate"], 35_000);
    assert_eq!(doctor["bio"], "Specialist in طب الجلدية");
    assert_eq!(doctor["isActive"], true);
}

#[tokio::test]
async fn register_doctor_requires_contact_fields() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/register-doctor",
        json!({"name": "No Contact", "specialty": "facial"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

async fn first_doctor_id(app: &common::TestApp) -> String {
    seed_doctors(&app.state.store).await;
    let doctors = body_json(get(app.app(), "/api/doctors").await).await;
    doctors[0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn booking_flow() {
    let app = common::build_test_app();
    let doctor_id = first_doctor_id(&app).await;

    let response = post_json(
        app.app(),
        "/api/appointments",
        json!({
            "doctorId": doctor_id,
            "appointmentDate": "2026-11-02T10:00:00Z",
            "consultationType": "rhinoplasty",
            "patientName": "Huda",
            "patientPhone": "0555123456"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let booking_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["consultation"]["status"], "pending");
    assert_eq!(created["consultation"]["duration"], 30);
    assert!(created["consultation"]["doctor"].is_string());
    assert!(created["consultation"]["meetingLink"]
        .as_str()
        .unwrap()
        .contains(&booking_id));

    let fetched = body_json(get(app.app(), &format!("/api/appointments/{booking_id}")).await).await;
    assert_eq!(fetched["doctor"]["id"], doctor_id.as_str());
    assert_eq!(fetched["consultation"]["patientName"], "Huda");

    let mine = body_json(get(app.app(), "/api/my-consultations?phone=0555123456").await).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let response = patch_json(
        app.app(),
        &format!("/api/appointments/{booking_id}/status"),
        json!({"status": "confirmed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get(app.app(), &format!("/api/appointments/{booking_id}")).await).await;
    assert_eq!(fetched["consultation"]["status"], "confirmed");
}

#[tokio::test]
async fn booking_with_unknown_doctor_returns_404() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/appointments",
        json!({
            "doctorId": "00000000-0000-0000-0000-000000000000",
            "appointmentDate": "2026-11-02T10:00:00Z",
            "consultationType": "facial",
            "patientName": "Huda",
            "patientPhone": "0555123456"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_missing_fields_returns_400() {
    let app = common::build_test_app();
    let response = post_json(
        app.app(),
        "/api/appointments",
        json!({"consultationType": "facial"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_booking_status_is_rejected() {
    let app = common::build_test_app();
    let doctor_id = first_doctor_id(&app).await;
    let created = body_json(
        post_json(
            app.app(),
            "/api/appointments",
            json!({
                "doctorId": doctor_id,
                "appointmentDate": "2026-11-02T10:00:00Z",
                "consultationType": "dental",
                "patientName": "Ali",
                "patientPhone": "0555000111"
            }),
        )
        .await,
    )
    .await;
    let booking_id = created["id"].as_str().unwrap();

    let response = patch_json(
        app.app(),
        &format!("/api/appointments/{booking_id}/status"),
        json!({"status": "teleported"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn my_consultations_requires_phone() {
    let app = common::build_test_app();
    let response = get(app.app(), "/api/my-consultations").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn book(app: &common::TestApp, doctor_id: &str, phone: &str) -> String {
    let created = body_json(
        post_json(
            app.app(),
            "/api/appointments",
            json!({
                "doctorId": doctor_id,
                "appointmentDate": "2026-11-03T09:30:00Z",
                "consultationType": "facial",
                "patientName": "Mona",
                "patientPhone": phone
            }),
        )
        .await,
    )
    .await;
    created["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn booking_listings_filter_by_doctor_and_phone() {
    let app = common::build_test_app();
    seed_doctors(&app.state.store).await;
    let doctors = body_json(get(app.app(), "/api/doctors").await).await;
    let first = doctors[0]["id"].as_str().unwrap().to_string();
    let second = doctors[1]["id"].as_str().unwrap().to_string();

    book(&app, &first, "0555000001").await;
    book(&app, &second, "0555000002").await;
    book(&app, &second, "0555000003").await;

    let all = body_json(get(app.app(), "/api/booking-consultations/doctor").await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let uri = format!("/api/booking-consultations/doctor?doctorId={second}");
    let by_doctor = body_json(get(app.app(), &uri).await).await;
    let by_doctor = by_doctor.as_array().unwrap();
    assert_eq!(by_doctor.len(), 2);
    assert!(by_doctor.iter().all(|b| b["doctor"]["id"] == second.as_str()));

    let by_phone = body_json(
        get(app.app(), "/api/booking-consultations/patient?phone=0555000001").await,
    )
    .await;
    let by_phone = by_phone.as_array().unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0]["doctor"]["id"], first.as_str());
}

#[tokio::test]
async fn booking_status_is_also_reachable_under_consultations() {
    let app = common::build_test_app();
    let doctor_id = first_doctor_id(&app).await;
    let booking_id = book(&app, &doctor_id, "0555000004").await;

    let response = patch_json(
        app.app(),
        &format!("/api/consultations/{booking_id}/status"),
        json!({"status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get(app.app(), &format!("/api/appointments/{booking_id}")).await).await;
    assert_eq!(fetched["consultation"]["status"], "completed");
}
