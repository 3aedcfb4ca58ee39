//! Key-value operations on the `kv` table.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection};
use tracing::debug;

/// Reads the value stored under `key`.
///
/// Returns `Ok(None)` if the key has never been written.
pub fn get_value(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    debug!("Reading key {}", key);

    let result = conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
        row.get(0)
    });

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Writes `value` under `key`, replacing whatever was there.
pub fn put_value(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    debug!("Writing key {} ({} bytes)", key, value.len());

    conn.execute(
        r#"
        INSERT INTO kv (key, value, updated_at)
        VALUES (?1, ?2, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![key, value],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Deletes `key`. Returns whether a row was removed.
pub fn delete_value(conn: &Connection, key: &str) -> AppResult<bool> {
    debug!("Deleting key {}", key);

    let removed = conn
        .execute("DELETE FROM kv WHERE key = ?1", params![key])
        .map_err(DatabaseError::Sqlite)?;

    Ok(removed > 0)
}

/// Deletes every key in `keys` inside one transaction. Returns how many rows
/// were removed.
pub fn delete_values(conn: &mut Connection, keys: &[&str]) -> AppResult<usize> {
    debug!("Deleting {} keys", keys.len());

    let tx = conn.transaction().map_err(DatabaseError::Sqlite)?;
    let mut removed = 0;
    for key in keys {
        removed += tx
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(DatabaseError::Sqlite)?;
    }
    tx.commit().map_err(DatabaseError::Sqlite)?;

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_get_missing_key() {
        let conn = setup();
        assert_eq!(get_value(&conn, "nothing").unwrap(), None);
    }

    #[test]
    fn test_put_overwrites() {
        let conn = setup();
        put_value(&conn, "til-log-goals", "[]").unwrap();
        put_value(&conn, "til-log-goals", "[{}]").unwrap();
        assert_eq!(
            get_value(&conn, "til-log-goals").unwrap(),
            Some("[{}]".to_string())
        );
    }

    #[test]
    fn test_delete_reports_removal() {
        let conn = setup();
        put_value(&conn, "a", "1").unwrap();
        assert!(delete_value(&conn, "a").unwrap());
        assert!(!delete_value(&conn, "a").unwrap());
    }

    #[test]
    fn test_delete_values_in_one_transaction() {
        let mut conn = setup();
        put_value(&conn, "til-log-entries", "[]").unwrap();
        put_value(&conn, "til-log-goals", "[]").unwrap();
        put_value(&conn, "other", "1").unwrap();

        let removed = delete_values(&mut conn, &["til-log-entries", "til-log-goals", "absent"]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(get_value(&conn, "til-log-goals").unwrap(), None);
        assert_eq!(get_value(&conn, "other").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_delete_values_rolls_back_on_failure() {
        let mut conn = setup();
        put_value(&conn, "til-log-entries", "[]").unwrap();
        conn.execute_batch(
            "CREATE TRIGGER keep_goals BEFORE DELETE ON kv WHEN old.key = 'til-log-goals'
             BEGIN SELECT RAISE(ABORT, 'goals are locked'); END;",
        )
        .unwrap();
        put_value(&conn, "til-log-goals", "[]").unwrap();

        assert!(delete_values(&mut conn, &["til-log-entries", "til-log-goals"]).is_err());
        assert_eq!(get_value(&conn, "til-log-entries").unwrap(), Some("[]".to_string()));
    }
}
