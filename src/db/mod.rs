mod models;

pub use models::*;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Room number '{0}' already exists")]
    DuplicateKey(String),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Stored record could not be decoded: {0}")]
    CorruptRecord(String),
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

const SUBMISSION_COLUMNS: &str = "id, student_name, work_type, content, created_at";
const ROOM_COLUMNS: &str = "id, number, type, capacity, price, amenities, status, created_at";

/// Process-lifetime record store for submissions and rooms.
///
/// Backed by a single-connection SQLite pool, so each call completes before
/// the next one starts. With the default `sqlite::memory:` URL the data lives
/// exactly as long as the pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn open(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database disappears with its connection, so the one
        // connection must never be reaped.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!("Store opened at {}", database_url);
        Ok(Self { pool })
    }

    pub async fn in_memory() -> StoreResult<Self> {
        Self::open("sqlite::memory:").await
    }

    /// Closes the pool. In-memory contents are discarded.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Store closed");
    }

    /// Inserts the sample room catalog if no rooms exist yet.
    pub async fn seed_sample_rooms(&self) -> StoreResult<usize> {
        if self.count_rooms().await? > 0 {
            return Ok(0);
        }

        let rooms = sample_rooms();
        let count = rooms.len();
        for room in rooms {
            self.create_room(&room).await?;
        }

        tracing::info!("Seeded {} sample rooms", count);
        Ok(count)
    }

    pub async fn create_submission(&self, new: &NewSubmission) -> StoreResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(&format!(
            r#"
            INSERT INTO submissions (student_name, work_type, content, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING {SUBMISSION_COLUMNS}
            "#
        ))
        .bind(&new.student_name)
        .bind(new.work_type.as_str())
        .bind(&new.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            "Created submission {} ({}) for {}",
            submission.id,
            submission.work_type,
            submission.student_name
        );
        Ok(submission)
    }

    pub async fn list_submissions(&self) -> StoreResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, Submission>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_room(&self, new: &NewRoom) -> StoreResult<Room> {
        let result = sqlx::query_as::<_, Room>(&format!(
            r#"
            INSERT INTO rooms (number, type, capacity, price, amenities, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {ROOM_COLUMNS}
            "#
        ))
        .bind(&new.number)
        .bind(&new.room_type)
        .bind(new.capacity)
        .bind(new.price)
        .bind(encode_amenities(&new.amenities))
        .bind(&new.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(room) => {
                tracing::debug!("Created room {} (id {})", room.number, room.id);
                Ok(room)
            }
            Err(e) => Err(room_write_error(e, &new.number)),
        }
    }

    pub async fn list_rooms(&self) -> StoreResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY number ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_rooms(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Replaces every mutable field of the room with the given id.
    pub async fn update_room(&self, id: i64, fields: &NewRoom) -> StoreResult<Room> {
        let result = sqlx::query_as::<_, Room>(&format!(
            r#"
            UPDATE rooms
            SET number = ?, type = ?, capacity = ?, price = ?, amenities = ?, status = ?
            WHERE id = ?
            RETURNING {ROOM_COLUMNS}
            "#
        ))
        .bind(&fields.number)
        .bind(&fields.room_type)
        .bind(fields.capacity)
        .bind(fields.price)
        .bind(encode_amenities(&fields.amenities))
        .bind(&fields.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(room)) => {
                tracing::debug!("Updated room {} (id {})", room.number, room.id);
                Ok(room)
            }
            Ok(None) => Err(StoreError::NotFound { entity: "Room", id }),
            Err(e) => Err(room_write_error(e, &fields.number)),
        }
    }

    pub async fn delete_room(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "Room", id });
        }

        tracing::debug!("Deleted room id {}", id);
        Ok(())
    }
}

fn room_write_error(err: sqlx::Error, number: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateKey(number.to_string());
        }
    }
    StoreError::Sqlx(err)
}

fn sample_rooms() -> Vec<NewRoom> {
    fn room(
        number: &str,
        room_type: &str,
        capacity: i64,
        price: f64,
        amenities: &[&str],
        status: &str,
    ) -> NewRoom {
        NewRoom {
            number: number.to_string(),
            room_type: room_type.to_string(),
            capacity,
            price,
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            status: status.to_string(),
        }
    }

    vec![
        room("101", "Standard", 2, 99.0, &["WiFi", "TV"], "available"),
        room("102", "Standard", 2, 99.0, &["WiFi", "TV"], "occupied"),
        room("201", "Deluxe", 3, 149.0, &["WiFi", "TV", "Mini Bar"], "available"),
        room(
            "202",
            "Deluxe",
            3,
            149.0,
            &["WiFi", "TV", "Mini Bar", "Balcony"],
            "maintenance",
        ),
        room(
            "301",
            "Suite",
            4,
            249.0,
            &["WiFi", "TV", "Mini Bar", "Jacuzzi", "Lounge"],
            "available",
        ),
    ]
}
