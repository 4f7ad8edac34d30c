//! PostgreSQL adapter for the [`EntityStore`] port.

use async_trait::async_trait;
use salonbook_core::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, Master, MasterId,
    MasterProfile, NewAppointment, NewMaster, NewService, NewUser, Service, ServiceId, User,
    UserId,
};
use salonbook_core::store::{EntityStore, StoreError, StoreResult};

use crate::details::{RelatedIds, attach_details, attach_users};
use crate::repositories::{appointment, master, service, user};
use crate::schema::ACTIVE_SLOT_INDEX;
use crate::DbPool;

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn users_by_ids(&self, ids: &[i64]) -> StoreResult<Vec<User>> {
        user::get_users_by_ids(&self.pool, ids)
            .await?
            .into_iter()
            .map(|row| User::try_from(row).map_err(backend))
            .collect()
    }
}

fn backend(err: salonbook_core::errors::SalonError) -> StoreError {
    StoreError::Backend(eyre::Report::new(err))
}

/// Whether `report` carries a violation of the active-slot unique index.
fn violates_active_slot(report: &eyre::Report) -> bool {
    match report.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => db_err.constraint() == Some(ACTIVE_SLOT_INDEX),
        _ => false,
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let row = user::create_user(
            &self.pool,
            &new_user.name,
            &new_user.email,
            new_user.role.as_str(),
            &new_user.password_hash,
        )
        .await?;

        User::try_from(row).map_err(backend)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        user::get_user_by_id(&self.pool, id.get())
            .await?
            .map(User::try_from)
            .transpose()
            .map_err(backend)
    }

    async fn insert_master(&self, new_master: NewMaster) -> StoreResult<Master> {
        let row = master::create_master(
            &self.pool,
            new_master.user_id.get(),
            &new_master.specialization,
        )
        .await?;

        Ok(row.into())
    }

    async fn find_master(&self, id: MasterId) -> StoreResult<Option<Master>> {
        Ok(master::get_master_by_id(&self.pool, id.get())
            .await?
            .map(Master::from))
    }

    async fn find_master_by_user(&self, user_id: UserId) -> StoreResult<Option<Master>> {
        Ok(master::get_master_by_user_id(&self.pool, user_id.get())
            .await?
            .map(Master::from))
    }

    async fn list_masters(&self) -> StoreResult<Vec<MasterProfile>> {
        let masters: Vec<Master> = master::get_all_masters(&self.pool)
            .await?
            .into_iter()
            .map(Master::from)
            .collect();

        let user_ids: Vec<i64> = masters.iter().map(|m| m.user_id.get()).collect();
        let users = self.users_by_ids(&user_ids).await?;

        attach_users(masters, users)
    }

    async fn insert_service(&self, new_service: NewService) -> StoreResult<Service> {
        let row = service::create_service(
            &self.pool,
            &new_service.name,
            new_service.duration_minutes,
            new_service.price,
        )
        .await?;

        Ok(row.into())
    }

    async fn find_service(&self, id: ServiceId) -> StoreResult<Option<Service>> {
        Ok(service::get_service_by_id(&self.pool, id.get())
            .await?
            .map(Service::from))
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        Ok(service::get_all_services(&self.pool)
            .await?
            .into_iter()
            .map(Service::from)
            .collect())
    }

    async fn insert_appointment(&self, new_appointment: NewAppointment) -> StoreResult<Appointment> {
        let result = appointment::create_appointment(
            &self.pool,
            new_appointment.client_id.get(),
            new_appointment.master_id.get(),
            new_appointment.service_id.get(),
            new_appointment.appointment_time,
            new_appointment.status.as_str(),
        )
        .await;

        match result {
            Ok(row) => Appointment::try_from(row).map_err(backend),
            Err(report) if violates_active_slot(&report) => Err(StoreError::SlotTaken {
                master_id: new_appointment.master_id,
                time: new_appointment.appointment_time,
            }),
            Err(report) => Err(report.into()),
        }
    }

    async fn find_appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id.get())
            .await?
            .map(Appointment::try_from)
            .transpose()
            .map_err(backend)
    }

    async fn find_appointments(&self, filter: &AppointmentFilter) -> StoreResult<Vec<Appointment>> {
        appointment::find_appointments(&self.pool, filter)
            .await?
            .into_iter()
            .map(|row| Appointment::try_from(row).map_err(backend))
            .collect()
    }

    async fn update_appointment(&self, updated: &Appointment) -> StoreResult<bool> {
        let result = appointment::update_appointment(
            &self.pool,
            updated.id.get(),
            updated.appointment_time,
            updated.status.as_str(),
        )
        .await;

        match result {
            Ok(updated_row) => Ok(updated_row),
            Err(report) if violates_active_slot(&report) => Err(StoreError::SlotTaken {
                master_id: updated.master_id,
                time: updated.appointment_time,
            }),
            Err(report) => Err(report.into()),
        }
    }

    async fn delete_appointment(&self, id: AppointmentId) -> StoreResult<bool> {
        Ok(appointment::delete_appointment(&self.pool, id.get()).await?)
    }

    async fn load_details(
        &self,
        appointments: Vec<Appointment>,
    ) -> StoreResult<Vec<AppointmentDetails>> {
        if appointments.is_empty() {
            return Ok(Vec::new());
        }

        let ids = RelatedIds::of(&appointments);
        let users = self.users_by_ids(&ids.users).await?;
        let masters = master::get_masters_by_ids(&self.pool, &ids.masters)
            .await?
            .into_iter()
            .map(Master::from);
        let services = service::get_services_by_ids(&self.pool, &ids.services)
            .await?
            .into_iter()
            .map(Service::from);

        attach_details(appointments, users, masters, services)
    }
}
