//! 完成账本服务 - 业务能力层
//!
//! 记录哪些 (文件, 模型, 源语言, 目标语言) 组合已经转换完成。
//! 只有所有分块都转换成功并写出文件后才会写入记录。

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::ConvertResult;

/// 内存数据库路径
pub const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS converted_files (
    file_name TEXT NOT NULL,
    model TEXT NOT NULL,
    from_lang TEXT NOT NULL,
    to_lang TEXT NOT NULL,
    completed_at TEXT NOT NULL,
    PRIMARY KEY (file_name, model, from_lang, to_lang)
)";

/// 完成账本
///
/// 内部是连接池，可以在多个会话之间共享（`Clone` 只复制句柄）。
#[derive(Debug, Clone)]
pub struct CompletionLedger {
    pool: SqlitePool,
}

impl CompletionLedger {
    /// 打开（或创建）账本
    ///
    /// `path` 为 `:memory:` 时使用内存数据库，只开一个连接，
    /// 保证所有查询看到同一份数据。
    pub async fn open(path: &str) -> ConvertResult<Self> {
        let pool = if path == IN_MEMORY {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
                .await?
        } else {
            let options = SqliteConnectOptions::new()
                .filename(Path::new(path))
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(10));
            SqlitePoolOptions::new()
                // SQLite 只有一个写者，读者可以有多个
                .max_connections(4)
                .acquire_timeout(Duration::from_secs(10))
                .connect_with(options)
                .await?
        };

        sqlx::query(SCHEMA).execute(&pool).await?;
        info!("✓ 账本已打开: {}", path);

        Ok(Self { pool })
    }

    /// 查询组合是否已完成
    pub async fn is_complete(
        &self,
        file_name: &str,
        model_id: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> ConvertResult<bool> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT file_name FROM converted_files
             WHERE file_name = $1 AND model = $2 AND from_lang = $3 AND to_lang = $4",
        )
        .bind(file_name)
        .bind(model_id)
        .bind(from_lang)
        .bind(to_lang)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    /// 标记组合已完成（幂等）
    pub async fn mark_complete(
        &self,
        file_name: &str,
        model_id: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> ConvertResult<()> {
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO converted_files (file_name, model, from_lang, to_lang, completed_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT(file_name, model, from_lang, to_lang) DO UPDATE SET
                 completed_at = excluded.completed_at",
        )
        .bind(file_name)
        .bind(model_id)
        .bind(from_lang)
        .bind(to_lang)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(
            "账本记录: {} | {} | {} → {}",
            file_name, model_id, from_lang, to_lang
        );

        Ok(())
    }

    /// 已完成的记录总数
    pub async fn completed_count(&self) -> ConvertResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM converted_files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_mark_complete_then_is_complete() {
        let ledger = CompletionLedger::open(IN_MEMORY).await.unwrap();
        assert!(!ledger.is_complete("a.java", "m", "java", "csharp").await.unwrap());

        ledger.mark_complete("a.java", "m", "java", "csharp").await.unwrap();

        assert!(ledger.is_complete("a.java", "m", "java", "csharp").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_complete_is_idempotent() {
        let ledger = CompletionLedger::open(IN_MEMORY).await.unwrap();
        assert_ok!(ledger.mark_complete("a.java", "m", "java", "csharp").await);
        assert_ok!(ledger.mark_complete("a.java", "m", "java", "csharp").await);

        assert!(ledger.is_complete("a.java", "m", "java", "csharp").await.unwrap());
        assert_eq!(ledger.completed_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_key_uses_all_four_fields() {
        let ledger = CompletionLedger::open(IN_MEMORY).await.unwrap();
        ledger.mark_complete("a.java", "m", "java", "csharp").await.unwrap();

        assert!(!ledger.is_complete("b.java", "m", "java", "csharp").await.unwrap());
        assert!(!ledger.is_complete("a.java", "n", "java", "csharp").await.unwrap());
        assert!(!ledger.is_complete("a.java", "m", "python", "csharp").await.unwrap());
        assert!(!ledger.is_complete("a.java", "m", "java", "python").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_ledger_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let path = path.to_str().unwrap();

        let ledger = CompletionLedger::open(path).await.unwrap();
        ledger.mark_complete("a.py", "m", "python", "cpp").await.unwrap();
        ledger.close().await;

        let reopened = CompletionLedger::open(path).await.unwrap();
        assert!(reopened.is_complete("a.py", "m", "python", "cpp").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_writers_do_not_lose_records() {
        let ledger = CompletionLedger::open(IN_MEMORY).await.unwrap();
        let models = ["m1", "m2", "m3", "m4", "m5"];

        let writes = models
            .iter()
            .map(|model| ledger.mark_complete("a.java", model, "java", "csharp"));
        for result in futures::future::join_all(writes).await {
            assert_ok!(result);
        }

        assert_eq!(ledger.completed_count().await.unwrap(), models.len() as i64);
    }
}
