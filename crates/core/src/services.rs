pub mod catalog;
pub mod master_locks;
pub mod scheduling;

pub use catalog::CatalogService;
pub use master_locks::MasterLocks;
pub use scheduling::SchedulingService;
