//! Persistence port consumed by the services.
//!
//! Adapters live in `salonbook-db`. The only behaviour the services rely on
//! beyond plain storage is read-your-writes within a call, and that an adapter
//! enforcing slot uniqueness itself reports a rejected write as
//! [`StoreError::SlotTaken`] rather than as a backend failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, Master, MasterId,
    MasterProfile, NewAppointment, NewMaster, NewService, NewUser, Service, ServiceId, User,
    UserId,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Master {master_id} already has an active appointment at {time}")]
    SlotTaken {
        master_id: MasterId,
        time: DateTime<Utc>,
    },

    #[error(transparent)]
    Backend(#[from] eyre::Report),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn insert_master(&self, master: NewMaster) -> StoreResult<Master>;

    async fn find_master(&self, id: MasterId) -> StoreResult<Option<Master>>;

    async fn find_master_by_user(&self, user_id: UserId) -> StoreResult<Option<Master>>;

    /// Every master with its owning user attached.
    async fn list_masters(&self) -> StoreResult<Vec<MasterProfile>>;

    async fn insert_service(&self, service: NewService) -> StoreResult<Service>;

    async fn find_service(&self, id: ServiceId) -> StoreResult<Option<Service>>;

    async fn list_services(&self) -> StoreResult<Vec<Service>>;

    async fn insert_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;

    async fn find_appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>>;

    /// Appointments matching `filter`, in the store's natural order.
    async fn find_appointments(&self, filter: &AppointmentFilter) -> StoreResult<Vec<Appointment>>;

    /// Writes back time and status. Returns `false` when the record is gone.
    async fn update_appointment(&self, appointment: &Appointment) -> StoreResult<bool>;

    async fn delete_appointment(&self, id: AppointmentId) -> StoreResult<bool>;

    /// Batch-fetches the client, master and service of each appointment and
    /// attaches them, preserving input order.
    async fn load_details(
        &self,
        appointments: Vec<Appointment>,
    ) -> StoreResult<Vec<AppointmentDetails>>;
}
