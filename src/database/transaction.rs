use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::ApiError;

/// Run `body` inside a database transaction.
///
/// Commits when `body` returns `Ok`, rolls back when it returns `Err` and
/// propagates the error. Every multi-statement write sequence goes through
/// here, so no handler carries its own rollback branch and no partial write
/// is ever visible to other readers.
pub async fn with_transaction<T, F>(pool: &PgPool, body: F) -> Result<T, ApiError>
where
    F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> BoxFuture<'t, Result<T, ApiError>>,
{
    let mut tx = pool.begin().await?;

    match body(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!("transaction rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

/// Take a transaction-scoped advisory lock on `key`.
///
/// Serializes concurrent `MAX(position)+1` reads against sibling inserts
/// under the same parent. Released automatically at commit or rollback.
pub async fn lock_position_scope(
    tx: &mut Transaction<'static, Postgres>,
    key: i64,
) -> Result<(), ApiError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Next position under a parent scope: `COALESCE(MAX(position), 0) + 1`.
///
/// Must run inside the same transaction as the subsequent insert, after
/// `lock_position_scope`, or two concurrent requests can compute the same
/// value.
pub async fn next_position(
    tx: &mut Transaction<'static, Postgres>,
    sql: &str,
    parent_id: i64,
) -> Result<i32, ApiError> {
    let next: i32 = sqlx::query_scalar(sql)
        .bind(parent_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(next)
}
