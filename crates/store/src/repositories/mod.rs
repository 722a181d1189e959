//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&Store` as the first argument. Lookups return `Option`;
//! the API layer maps a miss to a 404.

pub mod booking_repo;
pub mod consultation_repo;
pub mod doctor_repo;
pub mod file_share_repo;
pub mod image_repo;
pub mod message_repo;
pub mod patient_repo;
pub mod video_call_repo;

pub use booking_repo::BookingRepo;
pub use consultation_repo::ConsultationRepo;
pub use doctor_repo::DoctorRepo;
pub use file_share_repo::FileShareRepo;
pub use image_repo::ImageRepo;
pub use message_repo::MessageRepo;
pub use patient_repo::PatientRepo;
pub use video_call_repo::VideoCallRepo;
