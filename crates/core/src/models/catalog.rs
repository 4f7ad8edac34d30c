use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::{User, UserId};

entity_id! {
    /// Identifier of a catalog [`Service`].
    ServiceId
}

entity_id! {
    /// Identifier of a [`Master`] profile. Distinct from the owning [`UserId`];
    /// all scheduling keys on this id.
    MasterId
}

/// Catalog item a client can book. The duration is informational and plays no
/// part in conflict detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub name: String,
    pub duration_minutes: i32,
    pub price: Decimal,
}

/// Service-provider profile, one per user with [`super::Role::Master`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Master {
    pub id: MasterId,
    pub user_id: UserId,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaster {
    pub user_id: UserId,
    pub specialization: String,
}

/// A master together with the user that owns the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterProfile {
    pub master: Master,
    pub user: User,
}
