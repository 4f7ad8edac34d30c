//! # Scheduling Service
//!
//! Creates, moves, cancels and deletes appointments while keeping the slot
//! invariant: for any master, at most one non-cancelled appointment exists at a
//! given appointment time.
//!
//! Missing client, master or service references on creation are integrity
//! errors and surface as [`SalonError::ReferenceNotFound`]. Everything else a
//! caller can routinely run into (a time in the past, a taken slot, an id that
//! no longer exists) is reported through [`BookingOutcome`] or a plain `bool`.
//!
//! Appointment times are kept at microsecond precision, the resolution the
//! PostgreSQL adapter stores. Finer input is truncated before any comparison.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::errors::{SalonError, SalonResult};
use crate::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    BookingOutcome, MasterId, NewAppointment, ServiceId, UserId,
};
use crate::services::master_locks::MasterLocks;
use crate::store::{EntityStore, StoreError};

pub struct SchedulingService {
    store: Arc<dyn EntityStore>,
    clock: Arc<dyn Clock>,
    locks: MasterLocks,
}

impl SchedulingService {
    /// Creates a scheduling service over `store`.
    ///
    /// `clock` is consulted only by the convenience forms
    /// [`create_appointment`](Self::create_appointment) and
    /// [`update_appointment`](Self::update_appointment).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use salonbook_core::{DefaultClock, services::SchedulingService, store::EntityStore};
    /// # fn example(store: Arc<dyn EntityStore>) {
    /// let scheduling = SchedulingService::new(store, Arc::new(DefaultClock));
    /// # }
    /// ```
    pub fn new(store: Arc<dyn EntityStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            locks: MasterLocks::new(),
        }
    }

    /// Books an appointment using the injected clock as the reference time.
    pub async fn create_appointment(
        &self,
        client_id: UserId,
        master_id: MasterId,
        service_id: ServiceId,
        appointment_time: DateTime<Utc>,
    ) -> SalonResult<BookingOutcome> {
        let now = self.clock.utc();
        self.create_appointment_at(client_id, master_id, service_id, appointment_time, now)
            .await
    }

    /// Books a `Pending` appointment for `client_id` with `master_id`.
    ///
    /// Checks run in a fixed order: past time, client, master, service, slot.
    /// Only the slot check and the insert run under the master's lock, so
    /// bookings against unknown references never touch the lock table.
    /// Nothing is written unless every check passes.
    ///
    /// # Errors
    ///
    /// Returns [`SalonError::ReferenceNotFound`] when the client, master or
    /// service does not exist, and [`SalonError::Database`] on store failure.
    pub async fn create_appointment_at(
        &self,
        client_id: UserId,
        master_id: MasterId,
        service_id: ServiceId,
        appointment_time: DateTime<Utc>,
        reference_time: DateTime<Utc>,
    ) -> SalonResult<BookingOutcome> {
        let appointment_time = stored_precision(appointment_time);
        let reference_time = stored_precision(reference_time);

        if appointment_time < reference_time {
            debug!(
                "Rejecting booking in the past: master={}, time={}, now={}",
                master_id, appointment_time, reference_time
            );
            return Ok(BookingOutcome::PastTime);
        }

        self.require_references(client_id, master_id, service_id)
            .await?;

        let _guard = self.locks.acquire(master_id).await;

        if self.slot_taken(master_id, appointment_time, None).await? {
            debug!(
                "Slot already taken: master={}, time={}",
                master_id, appointment_time
            );
            return Ok(BookingOutcome::SlotTaken);
        }

        let new_appointment = NewAppointment {
            client_id,
            master_id,
            service_id,
            appointment_time,
            status: AppointmentStatus::Pending,
        };

        match self.store.insert_appointment(new_appointment).await {
            Ok(appointment) => {
                info!(
                    "Appointment booked: id={}, client={}, master={}, time={}",
                    appointment.id, client_id, master_id, appointment_time
                );
                Ok(BookingOutcome::Scheduled(appointment))
            }
            Err(StoreError::SlotTaken { .. }) => {
                debug!(
                    "Store rejected booking for taken slot: master={}, time={}",
                    master_id, appointment_time
                );
                Ok(BookingOutcome::SlotTaken)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Moves and/or restates an appointment using the injected clock as the
    /// reference time.
    pub async fn update_appointment(
        &self,
        appointment_id: AppointmentId,
        new_time: DateTime<Utc>,
        new_status: AppointmentStatus,
    ) -> SalonResult<BookingOutcome> {
        let now = self.clock.utc();
        self.update_appointment_at(appointment_id, new_time, new_status, now)
            .await
    }

    /// Replaces an appointment's time and status together.
    ///
    /// The appointment may keep its own slot. Master and service references
    /// are not re-validated here; they were checked when the booking was made.
    pub async fn update_appointment_at(
        &self,
        appointment_id: AppointmentId,
        new_time: DateTime<Utc>,
        new_status: AppointmentStatus,
        reference_time: DateTime<Utc>,
    ) -> SalonResult<BookingOutcome> {
        let new_time = stored_precision(new_time);
        let reference_time = stored_precision(reference_time);

        let Some(current) = self.store.find_appointment(appointment_id).await? else {
            debug!("Update skipped, appointment not found: id={}", appointment_id);
            return Ok(BookingOutcome::UnknownAppointment);
        };

        if new_time < reference_time {
            debug!(
                "Rejecting move into the past: id={}, time={}, now={}",
                appointment_id, new_time, reference_time
            );
            return Ok(BookingOutcome::PastTime);
        }

        let _guard = self.locks.acquire(current.master_id).await;

        // Re-read under the lock so a concurrent cancel or move is not lost.
        let Some(mut appointment) = self.store.find_appointment(appointment_id).await? else {
            return Ok(BookingOutcome::UnknownAppointment);
        };

        if self
            .slot_taken(appointment.master_id, new_time, Some(appointment_id))
            .await?
        {
            debug!(
                "Update conflicts with another booking: id={}, master={}, time={}",
                appointment_id, appointment.master_id, new_time
            );
            return Ok(BookingOutcome::SlotTaken);
        }

        appointment.appointment_time = new_time;
        appointment.status = new_status;

        match self.store.update_appointment(&appointment).await {
            Ok(true) => {
                info!(
                    "Appointment updated: id={}, time={}, status={}",
                    appointment.id, appointment.appointment_time, appointment.status
                );
                Ok(BookingOutcome::Scheduled(appointment))
            }
            Ok(false) => Ok(BookingOutcome::UnknownAppointment),
            Err(StoreError::SlotTaken { .. }) => Ok(BookingOutcome::SlotTaken),
            Err(err) => Err(err.into()),
        }
    }

    /// Removes an appointment record. Returns whether anything was removed.
    pub async fn delete_appointment(&self, appointment_id: AppointmentId) -> SalonResult<bool> {
        let deleted = self.store.delete_appointment(appointment_id).await?;
        if deleted {
            info!("Appointment deleted: id={}", appointment_id);
        } else {
            debug!("Delete skipped, appointment not found: id={}", appointment_id);
        }
        Ok(deleted)
    }

    /// Marks an appointment `Cancelled`, freeing its slot. Unknown ids are
    /// ignored.
    pub async fn cancel_appointment(&self, appointment_id: AppointmentId) -> SalonResult<()> {
        let Some(current) = self.store.find_appointment(appointment_id).await? else {
            debug!("Cancel skipped, appointment not found: id={}", appointment_id);
            return Ok(());
        };

        let _guard = self.locks.acquire(current.master_id).await;

        let Some(mut appointment) = self.store.find_appointment(appointment_id).await? else {
            return Ok(());
        };

        appointment.status = AppointmentStatus::Cancelled;
        if self.store.update_appointment(&appointment).await? {
            info!("Appointment cancelled: id={}", appointment_id);
        }

        Ok(())
    }

    pub async fn get_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> SalonResult<Option<AppointmentDetails>> {
        let Some(appointment) = self.store.find_appointment(appointment_id).await? else {
            return Ok(None);
        };

        let mut details = self.store.load_details(vec![appointment]).await?;
        Ok(details.pop())
    }

    /// Every appointment booked by `client_id`, cancelled ones included, with
    /// master and service attached.
    pub async fn get_user_appointments(
        &self,
        client_id: UserId,
    ) -> SalonResult<Vec<AppointmentDetails>> {
        let appointments = self
            .store
            .find_appointments(&AppointmentFilter::for_client(client_id))
            .await?;
        debug!(
            "Loaded {} appointments for client {}",
            appointments.len(),
            client_id
        );

        Ok(self.store.load_details(appointments).await?)
    }

    /// Every appointment on `master_id`'s schedule with client and service
    /// attached.
    pub async fn get_master_appointments(
        &self,
        master_id: MasterId,
    ) -> SalonResult<Vec<AppointmentDetails>> {
        let appointments = self
            .store
            .find_appointments(&AppointmentFilter::for_master(master_id))
            .await?;
        debug!(
            "Loaded {} appointments for master {}",
            appointments.len(),
            master_id
        );

        Ok(self.store.load_details(appointments).await?)
    }

    async fn require_references(
        &self,
        client_id: UserId,
        master_id: MasterId,
        service_id: ServiceId,
    ) -> SalonResult<()> {
        if self.store.find_user(client_id).await?.is_none() {
            warn!("Booking references unknown client {}", client_id);
            return Err(SalonError::ReferenceNotFound(format!(
                "User {} does not exist",
                client_id
            )));
        }

        if self.store.find_master(master_id).await?.is_none() {
            warn!("Booking references unknown master {}", master_id);
            return Err(SalonError::ReferenceNotFound(format!(
                "Master {} does not exist",
                master_id
            )));
        }

        if self.store.find_service(service_id).await?.is_none() {
            warn!("Booking references unknown service {}", service_id);
            return Err(SalonError::ReferenceNotFound(format!(
                "Service {} does not exist",
                service_id
            )));
        }

        Ok(())
    }

    async fn slot_taken(
        &self,
        master_id: MasterId,
        time: DateTime<Utc>,
        excluding: Option<AppointmentId>,
    ) -> SalonResult<bool> {
        let mut filter = AppointmentFilter::active_at(master_id, time);
        if let Some(id) = excluding {
            filter = filter.excluding(id);
        }

        let holders: Vec<Appointment> = self.store.find_appointments(&filter).await?;
        Ok(!holders.is_empty())
    }
}

/// Drops sub-microsecond digits so two instants that the store would persist
/// identically also compare equal here.
fn stored_precision(time: DateTime<Utc>) -> DateTime<Utc> {
    time.trunc_subsecs(6)
}
