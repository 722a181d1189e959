pub mod booking;
pub mod consultation;
pub mod doctor;
pub mod file_share;
pub mod image;
pub mod message;
pub mod patient;
pub mod video_call;
