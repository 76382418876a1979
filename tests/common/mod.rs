#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use memoryschool_backend::config::AppConfig;
use memoryschool_backend::entities::{
    class_entity as classes, contract_entity as contracts, contract_plan_entity as contract_plans,
    event_entity as events, plan_entity as plans, student_entity as students,
    subscription_entity as subscriptions, user_entity as users,
};
use memoryschool_backend::error::{AppError, AppResult};
use memoryschool_backend::external::{ContractDirectory, Notifier, ObjectStorage, RemoteContract};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, Set};
use std::collections::HashMap;
use std::sync::Mutex;

pub const FRONTEND: &str = "http://front.test";

/// One shared connection keeps the in-memory database alive for the whole test.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opts).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub fn app_config() -> AppConfig {
    AppConfig {
        frontend_base_url: FRONTEND.to_string(),
    }
}

#[derive(Default)]
pub struct InMemoryStorage {
    pub objects: Mutex<Vec<(String, String, usize)>>,
    /// 1-based index of the upload that fails
    pub fail_on_upload: Option<usize>,
    calls: Mutex<usize>,
}

impl InMemoryStorage {
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on_upload: Some(n),
            ..Default::default()
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _, _)| k.clone())
            .collect()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> AppResult<()> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if self.fail_on_upload == Some(call) {
            return Err(AppError::ExternalApiError("storage unavailable".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .push((key.to_string(), content_type.to_string(), bytes.len()));
        Ok(())
    }

    async fn public_url(&self, key: &str) -> AppResult<String> {
        Ok(format!("https://storage.test/public/event_photos/{key}"))
    }
}

#[derive(Default)]
pub struct StaticDirectory {
    pub contracts: HashMap<String, RemoteContract>,
    pub failing: bool,
}

impl StaticDirectory {
    pub fn with(contract: RemoteContract) -> Self {
        let mut contracts = HashMap::new();
        contracts.insert(contract.id.clone(), contract);
        Self {
            contracts,
            failing: false,
        }
    }
}

#[async_trait]
impl ContractDirectory for StaticDirectory {
    async fn fetch_contract(&self, contract_id: &str) -> AppResult<Option<RemoteContract>> {
        if self.failing {
            return Err(AppError::ExternalApiError("gallery store down".to_string()));
        }
        Ok(self.contracts.get(contract_id).cloned())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_welcome(&self, phone: &str, name: &str, dashboard_link: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push((
            phone.to_string(),
            name.to_string(),
            dashboard_link.to_string(),
        ));
        Ok(())
    }
}

/// Notifier whose every send fails
#[derive(Default)]
pub struct FailingNotifier {
    pub attempts: Mutex<usize>,
}

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send_welcome(&self, _phone: &str, _name: &str, _dashboard_link: &str) -> AppResult<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(AppError::ExternalApiError("whatsapp provider down".to_string()))
    }
}

pub async fn seed_plan(db: &DatabaseConnection, name: &str, price_cents: i64) -> plans::Model {
    plans::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        price_cents: Set(price_cents),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_contract(
    db: &DatabaseConnection,
    id: &str,
    invite_token: Option<&str>,
    plan_ids: &[i64],
) -> contracts::Model {
    let contract = contracts::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Contrato {id}")),
        description: Set(None),
        invite_token: Set(invite_token.map(str::to_string)),
    }
    .insert(db)
    .await
    .unwrap();

    for &plan_id in plan_ids {
        contract_plans::Entity::insert(contract_plans::ActiveModel {
            contract_id: Set(id.to_string()),
            plan_id: Set(plan_id),
        })
        .exec_without_returning(db)
        .await
        .unwrap();
    }

    contract
}

pub async fn seed_event(db: &DatabaseConnection, id: &str, contract_id: &str) -> events::Model {
    events::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Evento {id}")),
        date: Set(NaiveDate::from_ymd_opt(2025, 6, 1)),
        contract_id: Set(contract_id.to_string()),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_class(db: &DatabaseConnection, event_id: &str, name: &str) -> classes::Model {
    classes::ActiveModel {
        name: Set(name.to_string()),
        event_id: Set(event_id.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_user(db: &DatabaseConnection, email: &str, cpf: &str) -> users::Model {
    users::ActiveModel {
        name: Set("Maria Silva".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("not-a-real-hash".to_string()),
        cpf: Set(cpf.to_string()),
        phone: Set(Some("11987654321".to_string())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_student(
    db: &DatabaseConnection,
    user_id: i64,
    name: &str,
    class_id: Option<i64>,
) -> students::Model {
    students::ActiveModel {
        name: Set(name.to_string()),
        user_id: Set(user_id),
        birth_date: Set(None),
        shift: Set(Some("Manhã".to_string())),
        reference_photo_url: Set(None),
        school_course: Set(None),
        class_id: Set(class_id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_subscription(db: &DatabaseConnection, user_id: i64, plan_id: i64) {
    subscriptions::ActiveModel {
        user_id: Set(user_id),
        plan_id: Set(plan_id),
        subscribed_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn count<E: EntityTrait>(db: &DatabaseConnection) -> u64
where
    E::Model: Sync,
{
    use sea_orm::PaginatorTrait;
    E::find().count(db).await.unwrap()
}
