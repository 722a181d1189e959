pub mod communication;
pub mod images;
pub mod portal;
