use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{Master, MasterId, Service, ServiceId};
use super::user::{User, UserId};
use crate::errors::SalonError;

entity_id! {
    /// Identifier of an [`Appointment`].
    AppointmentId
}

/// Lifecycle state of an appointment.
///
/// Transitions between variants are unconstrained; creation always yields
/// `Pending` and cancellation always yields `Cancelled`. Only `Cancelled`
/// releases the master's time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether an appointment in this state occupies its master's slot.
    pub fn is_active(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AppointmentStatus::Pending),
            "Confirmed" => Ok(AppointmentStatus::Confirmed),
            "Completed" => Ok(AppointmentStatus::Completed),
            "Cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(SalonError::Validation(format!(
                "Unknown appointment status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: UserId,
    pub master_id: MasterId,
    pub service_id: ServiceId,
    pub appointment_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub client_id: UserId,
    pub master_id: MasterId,
    pub service_id: ServiceId,
    pub appointment_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// An appointment with every referenced record attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: User,
    pub master: Master,
    pub service: Service,
}

/// Predicate for appointment lookups. Every populated field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub client_id: Option<UserId>,
    pub master_id: Option<MasterId>,
    pub appointment_time: Option<DateTime<Utc>>,
    pub active_only: bool,
    pub excluding: Option<AppointmentId>,
}

impl AppointmentFilter {
    pub fn for_client(client_id: UserId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::default()
        }
    }

    pub fn for_master(master_id: MasterId) -> Self {
        Self {
            master_id: Some(master_id),
            ..Self::default()
        }
    }

    /// Active appointments holding `master_id`'s slot at exactly `time`.
    pub fn active_at(master_id: MasterId, time: DateTime<Utc>) -> Self {
        Self {
            master_id: Some(master_id),
            appointment_time: Some(time),
            active_only: true,
            ..Self::default()
        }
    }

    pub fn excluding(mut self, id: AppointmentId) -> Self {
        self.excluding = Some(id);
        self
    }

    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.client_id.is_none_or(|id| appointment.client_id == id)
            && self.master_id.is_none_or(|id| appointment.master_id == id)
            && self
                .appointment_time
                .is_none_or(|time| appointment.appointment_time == time)
            && (!self.active_only || appointment.is_active())
            && self.excluding != Some(appointment.id)
    }
}

/// Result of a booking mutation that did not hit an integrity error.
///
/// Past times and taken slots are routine business outcomes, so they are
/// values rather than errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "appointment", rename_all = "snake_case")]
pub enum BookingOutcome {
    Scheduled(Appointment),
    PastTime,
    SlotTaken,
    UnknownAppointment,
}

impl BookingOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, BookingOutcome::Scheduled(_))
    }

    pub fn appointment(&self) -> Option<&Appointment> {
        match self {
            BookingOutcome::Scheduled(appointment) => Some(appointment),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: UserId,
    pub master_id: MasterId,
    pub service_id: ServiceId,
    pub appointment_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub appointment_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAppointmentResponse {
    pub deleted: bool,
}
