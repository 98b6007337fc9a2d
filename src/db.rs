// src/db.rs

use std::{str::FromStr, time::Duration};

use sqlx::{
    Sqlite, SqlitePool, Transaction,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

use crate::{
    config::Config,
    error::AppError,
    models::user::{NewUser, User},
    utils::hash::{UNUSABLE_PASSWORD, hash_password},
};

const MAX_CONNECT_RETRIES: u32 = 5;

/// How long a connection waits for another writer to release the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a pool against `database_url`. Foreign keys are enforced on every connection.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Starts a transaction that holds the write lock from its first statement.
///
/// A deferred transaction that reads before writing cannot upgrade its lock
/// while another connection writes, and SQLite fails it with SQLITE_BUSY
/// instead of waiting. `BEGIN IMMEDIATE` queues on the busy timeout instead.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Like [`connect`], but waits for the database to come up.
pub async fn connect_with_retry(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let mut retry_count = 0;
    loop {
        match connect(database_url).await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > MAX_CONNECT_RETRIES {
                    return Err(e);
                }
                tracing::warn!(
                    "Database not ready, retrying in 2s... (Attempt {})",
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Applies the embedded schema migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Makes sure the default author account exists and returns its id.
///
/// Without a configured password the account gets an unusable hash.
/// With one, a stale hash is replaced so the configured password keeps working.
pub async fn seed_default_author(pool: &SqlitePool, config: &Config) -> Result<i64, AppError> {
    let username = &config.default_author;
    let password = config.default_author_password.as_deref();

    if let Some(mut user) = User::find_by_username(pool, username).await? {
        if let Some(password) = password {
            if !user.check_password(password) {
                tracing::info!("Updating password of default author: {}", username);
                user.set_password(password)?;
                user.save(pool).await?;
            }
        }
        return Ok(user.id);
    }

    tracing::info!("Seeding default author: {}", username);
    let password_hash = match password {
        Some(password) => hash_password(password)?,
        None => UNUSABLE_PASSWORD.to_string(),
    };

    let user = NewUser {
        username: username.clone(),
        email: format!("{username}@localhost"),
        password_hash,
        full_name: None,
        bio: None,
    }
    .insert(pool)
    .await?;

    Ok(user.id)
}
