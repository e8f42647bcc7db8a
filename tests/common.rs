use chrono::{DateTime, FixedOffset};
use sqlx::PgPool;

/// 連接測試資料庫；未設定 DATABASE_URL 時回傳 None，測試將直接略過
#[allow(dead_code)]
pub async fn setup_test_db() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    match PgPool::connect(&database_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            eprintln!("Failed to connect to test database: {}", e);
            None
        }
    }
}

/// 解析 RFC 3339 字串，測試輔助用
#[allow(dead_code)]
pub fn rfc3339(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("invalid RFC 3339 literal in test")
}
