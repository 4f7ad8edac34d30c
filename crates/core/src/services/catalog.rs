use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::errors::{SalonError, SalonResult};
use crate::models::{
    Master, MasterProfile, NewMaster, NewService, NewUser, Role, Service, User, UserId,
};
use crate::store::EntityStore;

/// Registration and lookup of users, masters and services.
pub struct CatalogService {
    store: Arc<dyn EntityStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn register_user(&self, user: NewUser) -> SalonResult<User> {
        if user.name.trim().is_empty() {
            return Err(SalonError::Validation("User name cannot be empty".to_string()));
        }
        if user.email.trim().is_empty() {
            return Err(SalonError::Validation("User email cannot be empty".to_string()));
        }

        let user = self.store.insert_user(user).await?;
        info!("User registered: id={}, role={}", user.id, user.role);
        Ok(user)
    }

    /// Creates the master profile for `user_id`. The user must exist, hold the
    /// `Master` role, and not own a profile yet.
    pub async fn register_master(
        &self,
        user_id: UserId,
        specialization: &str,
    ) -> SalonResult<Master> {
        if specialization.trim().is_empty() {
            return Err(SalonError::Validation(
                "Specialization cannot be empty".to_string(),
            ));
        }

        let user = self.store.find_user(user_id).await?.ok_or_else(|| {
            warn!("Master registration references unknown user {}", user_id);
            SalonError::ReferenceNotFound(format!("User {} does not exist", user_id))
        })?;

        if user.role != Role::Master {
            return Err(SalonError::Validation(format!(
                "User {} has role {} and cannot own a master profile",
                user_id, user.role
            )));
        }

        if let Some(existing) = self.store.find_master_by_user(user_id).await? {
            return Err(SalonError::Conflict(format!(
                "User {} already owns master profile {}",
                user_id, existing.id
            )));
        }

        let master = self
            .store
            .insert_master(NewMaster {
                user_id,
                specialization: specialization.to_string(),
            })
            .await?;
        info!("Master registered: id={}, user={}", master.id, user_id);
        Ok(master)
    }

    pub async fn add_service(&self, service: NewService) -> SalonResult<Service> {
        if service.name.trim().is_empty() {
            return Err(SalonError::Validation("Service name cannot be empty".to_string()));
        }
        if service.duration_minutes <= 0 {
            return Err(SalonError::Validation(
                "Service duration must be positive".to_string(),
            ));
        }
        if service.price < Decimal::ZERO {
            return Err(SalonError::Validation(
                "Service price cannot be negative".to_string(),
            ));
        }

        let service = self.store.insert_service(service).await?;
        info!("Service added: id={}, name={}", service.id, service.name);
        Ok(service)
    }

    pub async fn list_services(&self) -> SalonResult<Vec<Service>> {
        Ok(self.store.list_services().await?)
    }

    pub async fn list_masters(&self) -> SalonResult<Vec<MasterProfile>> {
        Ok(self.store.list_masters().await?)
    }

    pub async fn master_for_user(&self, user_id: UserId) -> SalonResult<Option<Master>> {
        Ok(self.store.find_master_by_user(user_id).await?)
    }
}
