//! Schema creation

use rusqlite::Connection;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL DEFAULT 'SUPER_ADMIN',
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS faculty (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    employee_id   TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'ACTIVE',
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS rooms (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL UNIQUE,
    building TEXT,
    floor    TEXT
);

CREATE TABLE IF NOT EXISTS equipment (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    serial_number  TEXT NOT NULL UNIQUE,
    name           TEXT NOT NULL,
    category_id    INTEGER NOT NULL REFERENCES categories(id),
    faculty_id     TEXT NOT NULL REFERENCES faculty(id),
    date_purchased TEXT NOT NULL,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS equipment_status_history (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    equipment_id  INTEGER NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
    status        TEXT NOT NULL,
    changed_by_id TEXT REFERENCES users(id),
    notes         TEXT,
    changed_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS equipment_location_history (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    equipment_id   INTEGER NOT NULL REFERENCES equipment(id) ON DELETE CASCADE,
    room_id        INTEGER NOT NULL REFERENCES rooms(id),
    assigned_by_id TEXT REFERENCES users(id),
    assigned_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS password_reset_requests (
    id           TEXT PRIMARY KEY,
    faculty_id   TEXT NOT NULL REFERENCES faculty(id) ON DELETE CASCADE,
    status       TEXT NOT NULL DEFAULT 'PENDING',
    requested_at TEXT NOT NULL,
    resolved_at  TEXT,
    resolved_by  TEXT REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_status_history_equipment
    ON equipment_status_history (equipment_id, changed_at DESC, id DESC);

CREATE INDEX IF NOT EXISTS idx_location_history_equipment
    ON equipment_location_history (equipment_id, assigned_at DESC, id DESC);

CREATE INDEX IF NOT EXISTS idx_password_requests_faculty
    ON password_reset_requests (faculty_id, status);
"#;

pub(crate) fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
