pub mod reservation;
pub mod resource;
pub mod telework_report;
