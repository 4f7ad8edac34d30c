use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salonbook_core::errors::SalonError;
use salonbook_core::models::{
    Appointment, AppointmentId, Master, MasterId, Service, ServiceId, User, UserId,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i64,
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMaster {
    pub id: i64,
    pub user_id: i64,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub user_id: i64,
    pub master_id: i64,
    pub service_id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<DbUser> for User {
    type Error = SalonError;

    fn try_from(row: DbUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: row.name,
            email: row.email,
            role: row.role.parse()?,
            password_hash: row.password_hash,
        })
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: ServiceId(row.id),
            name: row.name,
            duration_minutes: row.duration_minutes,
            price: row.price,
        }
    }
}

impl From<DbMaster> for Master {
    fn from(row: DbMaster) -> Self {
        Master {
            id: MasterId(row.id),
            user_id: UserId(row.user_id),
            specialization: row.specialization,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = SalonError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: AppointmentId(row.id),
            client_id: UserId(row.user_id),
            master_id: MasterId(row.master_id),
            service_id: ServiceId(row.service_id),
            appointment_time: row.appointment_time,
            status: row.status.parse()?,
        })
    }
}
