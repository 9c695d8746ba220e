use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Duration, TimeZone, Utc};
use engine::{Clock, Engine, SequentialIds};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// Advances one second on every reading, so creation order is observable.
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .clock(Arc::new(SteppingClock::new()))
        .ids(Arc::new(SequentialIds::default()))
        .build();
    (engine, db)
}
