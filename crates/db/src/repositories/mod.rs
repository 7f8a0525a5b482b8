//! Repository layer: one zero-sized struct per table.

pub mod pg_booking_store;
pub mod reservation_repo;
pub mod resource_repo;
pub mod telework_report_repo;

pub use pg_booking_store::PgBookingStore;
pub use reservation_repo::ReservationRepo;
pub use resource_repo::ResourceRepo;
pub use telework_report_repo::TeleworkReportRepo;
