use async_trait::async_trait;
use mockall::mock;

use crate::models::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, Master, MasterId,
    MasterProfile, NewAppointment, NewMaster, NewService, NewUser, Service, ServiceId, User,
    UserId,
};
use crate::store::{EntityStore, StoreResult};

// Mock entity store for testing
mock! {
    pub EntityStore {}

    #[async_trait]
    impl EntityStore for EntityStore {
        async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
        async fn find_user(&self, id: UserId) -> StoreResult<Option<User>>;
        async fn insert_master(&self, master: NewMaster) -> StoreResult<Master>;
        async fn find_master(&self, id: MasterId) -> StoreResult<Option<Master>>;
        async fn find_master_by_user(&self, user_id: UserId) -> StoreResult<Option<Master>>;
        async fn list_masters(&self) -> StoreResult<Vec<MasterProfile>>;
        async fn insert_service(&self, service: NewService) -> StoreResult<Service>;
        async fn find_service(&self, id: ServiceId) -> StoreResult<Option<Service>>;
        async fn list_services(&self) -> StoreResult<Vec<Service>>;
        async fn insert_appointment(&self, appointment: NewAppointment) -> StoreResult<Appointment>;
        async fn find_appointment(&self, id: AppointmentId) -> StoreResult<Option<Appointment>>;
        async fn find_appointments(&self, filter: &AppointmentFilter) -> StoreResult<Vec<Appointment>>;
        async fn update_appointment(&self, appointment: &Appointment) -> StoreResult<bool>;
        async fn delete_appointment(&self, id: AppointmentId) -> StoreResult<bool>;
        async fn load_details(
            &self,
            appointments: Vec<Appointment>,
        ) -> StoreResult<Vec<AppointmentDetails>>;
    }
}
