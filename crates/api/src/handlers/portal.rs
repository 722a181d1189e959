//! Handlers for the patient/consultation records and the doctor booking
//! portal.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use medvision_core::error::CoreError;
use medvision_core::portal::{
    default_bio, hourly_rate_cents, validate_booking_status, DEFAULT_DOCTOR_RATING,
};
use medvision_core::types::EntityId;
use medvision_store::models::booking::{
    BookingConsultation, BookingFilter, BookingWithDoctor, CreateBooking, NewBooking,
    UpdateBookingStatus,
};
use medvision_store::models::consultation::{Consultation, CreateConsultation, UpdateConsultation};
use medvision_store::models::doctor::{Doctor, NewDoctor, RegisterDoctor};
use medvision_store::models::patient::{CreatePatient, Patient};
use medvision_store::repositories::{BookingRepo, ConsultationRepo, DoctorRepo, PatientRepo};

use crate::error::{AppError, AppResult};
use crate::messages;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

/// GET /api/patients
pub async fn list_patients(State(state): State<AppState>) -> Json<Vec<Patient>> {
    Json(PatientRepo::list(&state.store).await)
}

/// POST /api/patients
pub async fn create_patient(
    State(state): State<AppState>,
    Json(input): Json<CreatePatient>,
) -> AppResult<(StatusCode, Json<Patient>)> {
    input.validate()?;
    let patient = PatientRepo::create(&state.store, input).await;
    tracing::info!(patient_id = %patient.id, "Patient created");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// GET /api/patients/{id}
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Patient>> {
    let patient = PatientRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| CoreError::not_found("Patient", id))?;
    Ok(Json(patient))
}

// ---------------------------------------------------------------------------
// Visualization consultations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationQuery {
    pub patient_id: Option<EntityId>,
}

/// GET /api/consultations[?patientId=]
pub async fn list_consultations(
    State(state): State<AppState>,
    Query(query): Query<ConsultationQuery>,
) -> Json<Vec<Consultation>> {
    let rows = match query.patient_id {
        Some(patient_id) => ConsultationRepo::list_by_patient(&state.store, patient_id).await,
        None => ConsultationRepo::list(&state.store).await,
    };
    Json(rows)
}

/// POST /api/consultations
///
/// A referenced patient must exist.
pub async fn create_consultation(
    State(state): State<AppState>,
    Json(input): Json<CreateConsultation>,
) -> AppResult<(StatusCode, Json<Consultation>)> {
    input.validate()?;
    if let Some(patient_id) = input.patient_id {
        if PatientRepo::find_by_id(&state.store, patient_id).await.is_none() {
            return Err(CoreError::not_found("Patient", patient_id).into());
        }
    }
    let consultation = ConsultationRepo::create(&state.store, input).await;
    Ok((StatusCode::CREATED, Json(consultation)))
}

/// GET /api/consultations/{id}
pub async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Consultation>> {
    let consultation = ConsultationRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| CoreError::not_found("Consultation", id))?;
    Ok(Json(consultation))
}

/// PATCH /api/consultations/{id}
pub async fn update_consultation(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateConsultation>,
) -> AppResult<Json<Consultation>> {
    let consultation = ConsultationRepo::update(&state.store, id, input)
        .await
        .ok_or_else(|| CoreError::not_found("Consultation", id))?;
    Ok(Json(consultation))
}

// ---------------------------------------------------------------------------
// Doctors
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DoctorQuery {
    /// Specialty keyword (`rhinoplasty`, `facial`, ...) or a literal
    /// specialty name.
    pub specialty: Option<String>,
}

/// GET /api/doctors[?specialty=]
pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<DoctorQuery>,
) -> Json<Vec<Doctor>> {
    let specialty = query.specialty.as_deref().filter(|s| !s.is_empty());
    Json(DoctorRepo::list_active(&state.store, specialty).await)
}

/// GET /api/doctors/{id}
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Doctor>> {
    let doctor = DoctorRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| CoreError::not_found("Doctor", id))?;
    Ok(Json(doctor))
}

#[derive(Debug, Serialize)]
pub struct RegisteredDoctor {
    pub id: EntityId,
    pub name: String,
    pub specialty: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DoctorRegistration {
    pub id: EntityId,
    pub message: &'static str,
    pub doctor: RegisteredDoctor,
}

/// POST /api/register-doctor
///
/// Registered doctors are active immediately with the default rating.
pub async fn register_doctor(
    State(state): State<AppState>,
    Json(input): Json<RegisterDoctor>,
) -> AppResult<(StatusCode, Json<DoctorRegistration>)> {
    input.validate()?;

    let bio = input
        .bio
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| default_bio(&input.specialty));
    let doctor = DoctorRepo::create(
        &state.store,
        NewDoctor {
            name: input.name,
            specialty: input.specialty,
            experience: input.experience.unwrap_or(0),
            rating: DEFAULT_DOCTOR_RATING,
            avatar: input.avatar,
            bio: Some(bio),
            hourly_rate: hourly_rate_cents(input.hourly_rate),
            email: Some(input.email),
            phone: Some(input.phone),
        },
    )
    .await;
    tracing::info!(doctor_id = %doctor.id, specialty = %doctor.specialty, "Doctor registered");

    Ok((
        StatusCode::CREATED,
        Json(DoctorRegistration {
            id: doctor.id,
            message: messages::DOCTOR_REGISTERED,
            doctor: RegisteredDoctor {
                id: doctor.id,
                name: doctor.name,
                specialty: doctor.specialty,
                status: "approved",
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// Booking echoed back with the doctor's display name.
#[derive(Debug, Serialize)]
pub struct BookingSummary {
    #[serde(flatten)]
    pub booking: BookingConsultation,
    pub doctor: String,
}

#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub id: EntityId,
    pub message: &'static str,
    pub consultation: BookingSummary,
}

/// POST /api/appointments
///
/// The price is the doctor's hourly rate at booking time.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingCreated>)> {
    input.validate()?;
    let (Some(doctor_id), Some(appointment_date)) = (input.doctor_id, input.appointment_date) else {
        return Err(AppError::BadRequest("doctorId and appointmentDate are required".into()));
    };

    let doctor = DoctorRepo::find_by_id(&state.store, doctor_id)
        .await
        .ok_or_else(|| CoreError::not_found("Doctor", doctor_id))?;

    let booking = BookingRepo::create(
        &state.store,
        NewBooking {
            doctor_id,
            appointment_date,
            consultation_type: input.consultation_type,
            notes: input.notes,
            patient_name: input.patient_name,
            patient_phone: input.patient_phone,
            duration: input.duration,
            price: doctor.hourly_rate,
        },
    )
    .await;
    tracing::info!(booking_id = %booking.id, doctor_id = %doctor_id, "Consultation booked");

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            id: booking.id,
            message: messages::BOOKING_CREATED,
            consultation: BookingSummary {
                booking,
                doctor: doctor.name,
            },
        }),
    ))
}

/// GET /api/appointments/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<Json<BookingWithDoctor>> {
    let booking = BookingRepo::find_with_doctor(&state.store, id)
        .await
        .ok_or_else(|| CoreError::not_found("Consultation", id))?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: Option<String>,
}

/// GET /api/my-consultations?phone=
pub async fn my_consultations(
    State(state): State<AppState>,
    Query(query): Query<PhoneQuery>,
) -> AppResult<Json<Vec<BookingWithDoctor>>> {
    let phone = query
        .phone
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("phone is required".into()))?;
    Ok(Json(BookingRepo::list_by_phone(&state.store, &phone).await))
}

/// GET /api/booking-consultations/doctor[?doctorId=]
///
/// Doctor-side portal listing. Without `doctorId` every booking is returned.
pub async fn doctor_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingFilter>,
) -> Json<Vec<BookingWithDoctor>> {
    let filter = BookingFilter {
        doctor_id: query.doctor_id,
        phone: None,
    };
    Json(BookingRepo::list(&state.store, &filter).await)
}

/// GET /api/booking-consultations/patient[?phone=]
///
/// Patient-side portal listing. Without `phone` every booking is returned.
pub async fn patient_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingFilter>,
) -> Json<Vec<BookingWithDoctor>> {
    let filter = BookingFilter {
        doctor_id: None,
        phone: query.phone,
    };
    Json(BookingRepo::list(&state.store, &filter).await)
}

#[derive(Debug, Serialize)]
pub struct StatusUpdated {
    pub message: &'static str,
}

/// PATCH /api/appointments/{id}/status
/// PATCH /api/consultations/{id}/status
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateBookingStatus>,
) -> AppResult<Json<StatusUpdated>> {
    validate_booking_status(&input.status)?;
    BookingRepo::update_status(&state.store, id, &input.status)
        .await
        .ok_or_else(|| CoreError::not_found("Consultation", id))?;
    tracing::info!(booking_id = %id, status = %input.status, "Booking status updated");
    Ok(Json(StatusUpdated {
        message: messages::BOOKING_STATUS_UPDATED,
    }))
}
