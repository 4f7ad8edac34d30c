//! In-process [`EntityStore`] used by tests and by deployments without a
//! database.
//!
//! Mirrors the PostgreSQL constraints that matter to the services: one master
//! profile per user, references must exist on insert, and at most one active
//! appointment per master and time.

use std::collections::BTreeMap;

use async_trait::async_trait;
use eyre::eyre;
use salonbook_core::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, Master, MasterId,
    MasterProfile, NewAppointment, NewMaster, NewService, NewUser, Service, ServiceId, User,
    UserId,
};
use salonbook_core::store::{EntityStore, StoreError, StoreResult};
use tokio::sync::RwLock;

use crate::details::{attach_details, attach_users};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    masters: BTreeMap<MasterId, Master>,
    services: BTreeMap<ServiceId, Service>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    user_seq: i64,
    master_seq: i64,
    service_seq: i64,
    appointment_seq: i64,
}

impl Tables {
    fn slot_holder(&self, candidate: &Appointment) -> Option<&Appointment> {
        if !candidate.is_active() {
            return None;
        }

        let filter = AppointmentFilter::active_at(candidate.master_id, candidate.appointment_time)
            .excluding(candidate.id);
        self.appointments.values().find(|a| filter.matches(a))
    }
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn appointment_count(&self) -> usize {
        self.tables.read().await.appointments.len()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let id = UserId(next_id(&mut tables.user_seq));
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            role: new_user.role,
            password_hash: new_user.password_hash,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert_master(&self, new_master: NewMaster) -> StoreResult<Master> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new_master.user_id) {
            return Err(eyre!("master references missing user {}", new_master.user_id).into());
        }
        if tables
            .masters
            .values()
            .any(|m| m.user_id == new_master.user_id)
        {
            return Err(eyre!(
                "user {} already owns a master profile",
                new_master.user_id
            )
            .into());
        }

        let id = MasterId(next_id(&mut tables.master_seq));
        let master = Master {
            id,
            user_id: new_master.user_id,
            specialization: new_master.specialization,
        };
        tables.masters.insert(id, master.clone());
        Ok(master)
    }

    async fn find_master(&self, id: MasterId) -> StoreResult<Option<Master>> {
        Ok(self.tables.read().await.masters.get(&id).cloned())
    }

    async fn find_master_by_user(&self, user_id: UserId) -> StoreResult<Option<Master>> {
        Ok(self
            .tables
            .read()
            .await
            .masters
            .values()
            .find(|m| m.user_id == user_id)
            .cloned())
    }

    async fn list_masters(&self) -> StoreResult<Vec<MasterProfile>> {
        let tables = self.tables.read().await;
        let masters: Vec<Master> = tables.masters.values().cloned().collect();
        attach_users(masters, tables.users.values().cloned())
    }

    async fn insert_service(&self, new_service: NewService) -> StoreResult<Service> {
        let mut tables = self.tables.write().await;
        let id = ServiceId(next_id(&mut tables.service_seq));
        let service = Service {
            id,
            name: new_service.name,
            duration_minutes: new_service.duration_minutes,
            price: new_service.price,
        };
        tables.services.insert(id, service.clone());
        Ok(service)
    }

    async fn find_service(&self, id: ServiceId) -> StoreResult<Option<Service>> {
        Ok(self.tables.read().await.services.get(&id).cloned())
    }

    async fn list_services(&self) -> StoreResult<Vec<Service>> {
        Ok(self.tables.read().await.services.values().cloned().collect())
    }

    async fn insert_appointment(&self, new_appointment: NewAppointment) -> StoreResult<Appointment> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&new_appointment.client_id)
            || !tables.masters.contains_key(&new_appointment.master_id)
            || !tables.services.contains_key(&new_appointment.service_id)
        {
            return Err(eyre!("appointment references a missing user, master or service").into());
        }

        // Id 0 is never assigned, so the candidate cannot exclude a real row.
        let mut appointment = Appointment {
            id: AppointmentId(0),
            client_id: new_appointment.client_id,
            master_id: new_appointment.master_id,
            service_id: new_appointment.service_id,
            appointment_time: new_appointment.appointment_time,
            status: new_appointment.status,
        };
        if tables.slot_holder(&appointment).is_some() {
            return Err(StoreError::SlotTaken {
                master_id: appointment.master_id,
                time: appointment.appointment_time,
            });
        }

        appointment.id = AppointmentId(next_id(&mut tables.appointment_seq));
        tables.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>> {
        Ok(self.tables.read().await.appointments.get(&id).cloned())
    }

    async fn find_appointments(&self, filter: &AppointmentFilter) -> StoreResult<Vec<Appointment>> {
        Ok(self
            .tables
            .read()
            .await
            .appointments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect())
    }

    async fn update_appointment(&self, updated: &Appointment) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.appointments.contains_key(&updated.id) {
            return Ok(false);
        }
        if tables.slot_holder(updated).is_some() {
            return Err(StoreError::SlotTaken {
                master_id: updated.master_id,
                time: updated.appointment_time,
            });
        }

        if let Some(stored) = tables.appointments.get_mut(&updated.id) {
            stored.appointment_time = updated.appointment_time;
            stored.status = updated.status;
        }
        Ok(true)
    }

    async fn delete_appointment(&self, id: AppointmentId) -> StoreResult<bool> {
        Ok(self.tables.write().await.appointments.remove(&id).is_some())
    }

    async fn load_details(
        &self,
        appointments: Vec<Appointment>,
    ) -> StoreResult<Vec<AppointmentDetails>> {
        let tables = self.tables.read().await;
        attach_details(
            appointments,
            tables.users.values().cloned(),
            tables.masters.values().cloned(),
            tables.services.values().cloned(),
        )
    }
}
