//! Batch attach of related records, shared by the store adapters.
//!
//! Adapters fetch every referenced user, master and service in one pass per
//! table and then stitch them onto the appointments here.

use std::collections::{BTreeSet, HashMap};

use eyre::eyre;
use salonbook_core::models::{
    Appointment, AppointmentDetails, Master, MasterId, MasterProfile, Service, ServiceId, User,
    UserId,
};
use salonbook_core::store::{StoreError, StoreResult};

/// Distinct ids referenced by a batch of appointments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RelatedIds {
    pub users: Vec<i64>,
    pub masters: Vec<i64>,
    pub services: Vec<i64>,
}

impl RelatedIds {
    pub fn of(appointments: &[Appointment]) -> Self {
        let mut users = BTreeSet::new();
        let mut masters = BTreeSet::new();
        let mut services = BTreeSet::new();

        for appointment in appointments {
            users.insert(appointment.client_id.get());
            masters.insert(appointment.master_id.get());
            services.insert(appointment.service_id.get());
        }

        Self {
            users: users.into_iter().collect(),
            masters: masters.into_iter().collect(),
            services: services.into_iter().collect(),
        }
    }
}

pub fn attach_details(
    appointments: Vec<Appointment>,
    users: impl IntoIterator<Item = User>,
    masters: impl IntoIterator<Item = Master>,
    services: impl IntoIterator<Item = Service>,
) -> StoreResult<Vec<AppointmentDetails>> {
    let users: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();
    let masters: HashMap<MasterId, Master> = masters.into_iter().map(|m| (m.id, m)).collect();
    let services: HashMap<ServiceId, Service> =
        services.into_iter().map(|s| (s.id, s)).collect();

    appointments
        .into_iter()
        .map(|appointment| {
            let client = users
                .get(&appointment.client_id)
                .cloned()
                .ok_or_else(|| dangling(&appointment, "user", appointment.client_id.get()))?;
            let master = masters
                .get(&appointment.master_id)
                .cloned()
                .ok_or_else(|| dangling(&appointment, "master", appointment.master_id.get()))?;
            let service = services
                .get(&appointment.service_id)
                .cloned()
                .ok_or_else(|| dangling(&appointment, "service", appointment.service_id.get()))?;

            Ok(AppointmentDetails {
                appointment,
                client,
                master,
                service,
            })
        })
        .collect()
}

pub fn attach_users(
    masters: Vec<Master>,
    users: impl IntoIterator<Item = User>,
) -> StoreResult<Vec<MasterProfile>> {
    let users: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();

    masters
        .into_iter()
        .map(|master| {
            let user = users.get(&master.user_id).cloned().ok_or_else(|| {
                StoreError::Backend(eyre!(
                    "master {} references missing user {}",
                    master.id,
                    master.user_id
                ))
            })?;
            Ok(MasterProfile { master, user })
        })
        .collect()
}

fn dangling(appointment: &Appointment, kind: &str, id: i64) -> StoreError {
    StoreError::Backend(eyre!(
        "appointment {} references missing {} {}",
        appointment.id,
        kind,
        id
    ))
}
