/// Declares a store-assigned integer identifier.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod appointment;
pub mod catalog;
pub mod user;

pub use appointment::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    BookingOutcome, CreateAppointmentRequest, DeleteAppointmentResponse, NewAppointment,
    UpdateAppointmentRequest,
};
pub use catalog::{Master, MasterId, MasterProfile, NewMaster, NewService, Service, ServiceId};
pub use user::{NewUser, Role, User, UserId};
