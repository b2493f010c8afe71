#![allow(dead_code)]

use std::{
    fs::File,
    net::SocketAddr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use anyhow::Context;
use async_trait::async_trait;
use planner::{
    config::AppConfig,
    db::{init_pool, run_migrations},
    error::AppError,
    services::mail::{DeliveryHandle, MailMessage, Mailer},
    state::AppState,
};
use tempfile::TempDir;

pub const WEB_BASE_URL: &str = "http://web.test";
pub const API_BASE_URL: &str = "http://api.test";

/// Keeps every message it is asked to send; can be switched to failing.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
    attempts: Mutex<usize>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("mailer lock").clone()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("mailer lock")
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.sent.lock().expect("mailer lock").clear();
        *self.attempts.lock().expect("mailer lock") = 0;
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<DeliveryHandle, AppError> {
        *self.attempts.lock().expect("mailer lock") += 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Mail(format!("refused {}", message.to.address)));
        }
        let handle = DeliveryHandle(format!("test-{}", message.to.address));
        self.sent.lock().expect("mailer lock").push(message);
        Ok(handle)
    }
}

pub struct TestApp {
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    _root: TempDir,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for test app")?;
        let db_path = root.path().join("planner.sqlite");
        File::create(&db_path)?;
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url: database_url.clone(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            web_base_url: WEB_BASE_URL.into(),
            api_base_url: API_BASE_URL.into(),
            smtp_url: None,
            mail_from_name: "Trip Planner".into(),
            mail_from_address: "contato@planner.com.br".into(),
        };

        let db = init_pool(&config.database_url).await?;
        run_migrations(&db).await?;

        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::new(config, db, mailer.clone());
        Ok(Self {
            state,
            mailer,
            _root: root,
        })
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.db)
            .await
            .expect("count rows")
    }
}
