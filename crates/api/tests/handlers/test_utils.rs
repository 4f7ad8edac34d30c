use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use salonbook_api::{ApiState, build_router};
use salonbook_core::models::{
    MasterId, NewMaster, NewService, NewUser, Role, ServiceId, UserId,
};
use salonbook_core::store::EntityStore;
use salonbook_db::InMemoryStore;

pub struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 31, 9, 0, 0).unwrap()
}

pub fn slot() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
    pub client: UserId,
    pub master_user: UserId,
    pub master: MasterId,
    pub service: ServiceId,
}

impl TestContext {
    /// An API over an in-memory store seeded with one client, one master and
    /// one service, with the clock fixed at [`now`].
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());

        let client = store
            .insert_user(NewUser {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                role: Role::Client,
                password_hash: String::new(),
            })
            .await
            .unwrap();
        let master_user = store
            .insert_user(NewUser {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                role: Role::Master,
                password_hash: String::new(),
            })
            .await
            .unwrap();
        let master = store
            .insert_master(NewMaster {
                user_id: master_user.id,
                specialization: "Hairdresser".to_string(),
            })
            .await
            .unwrap();
        let service = store
            .insert_service(NewService {
                name: "Haircut".to_string(),
                duration_minutes: 60,
                price: Decimal::new(5000, 2),
            })
            .await
            .unwrap();

        let state = Arc::new(ApiState::new(
            store.clone(),
            Arc::new(FixtureClock { utc_now: now() }),
        ));
        let server = TestServer::new(build_router(state)).unwrap();

        Self {
            server,
            store,
            client: client.id,
            master_user: master_user.id,
            master: master.id,
            service: service.id,
        }
    }
}
