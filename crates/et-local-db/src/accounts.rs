//! User, faculty, and password-reset-request stores

use crate::records::{
    FacultyRecord, FacultyUpdate, PasswordRequestDetail, PasswordRequestRecord, UserRecord,
};
use crate::{opt_ts_column, ts_column, Database, Error, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

const PENDING: &str = "PENDING";
const COMPLETED: &str = "COMPLETED";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        role: row.get("role")?,
        created_at: ts_column(row, "created_at")?,
        updated_at: ts_column(row, "updated_at")?,
    })
}

fn faculty_from_row(row: &Row<'_>) -> rusqlite::Result<FacultyRecord> {
    Ok(FacultyRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        employee_id: row.get("employee_id")?,
        password_hash: row.get("password_hash")?,
        status: row.get("status")?,
        created_at: ts_column(row, "created_at")?,
        updated_at: ts_column(row, "updated_at")?,
    })
}

fn request_from_row(row: &Row<'_>) -> rusqlite::Result<PasswordRequestRecord> {
    Ok(PasswordRequestRecord {
        id: row.get("id")?,
        faculty_id: row.get("faculty_id")?,
        status: row.get("status")?,
        requested_at: ts_column(row, "requested_at")?,
        resolved_at: opt_ts_column(row, "resolved_at")?,
        resolved_by: row.get("resolved_by")?,
    })
}

impl Database {
    // -- users --------------------------------------------------------------

    pub fn insert_user(&self, name: &str, email: &str, password_hash: &str) -> Result<UserRecord> {
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: "SUPER_ADMIN".to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn();
        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.name,
                record.email,
                record.password_hash,
                record.role,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|err| Error::for_table(err, "users"))?;

        Ok(record)
    }

    pub fn user_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row("SELECT * FROM users WHERE id = ?1", params![id], user_from_row)
            .optional()?;
        Ok(record)
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM users WHERE email = ?1",
                params![email],
                user_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT * FROM users ORDER BY created_at ASC, id ASC")?;
        let rows = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // -- faculty ------------------------------------------------------------

    pub fn insert_faculty(
        &self,
        name: &str,
        employee_id: &str,
        password_hash: &str,
        status: &str,
    ) -> Result<FacultyRecord> {
        let now = Utc::now();
        let record = FacultyRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            employee_id: employee_id.to_string(),
            password_hash: password_hash.to_string(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn();
        conn.execute(
            "INSERT INTO faculty (id, name, employee_id, password_hash, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.name,
                record.employee_id,
                record.password_hash,
                record.status,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )
        .map_err(|err| Error::for_table(err, "faculty"))?;

        Ok(record)
    }

    pub fn faculty_by_id(&self, id: &str) -> Result<Option<FacultyRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM faculty WHERE id = ?1",
                params![id],
                faculty_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn faculty_by_employee_id(&self, employee_id: &str) -> Result<Option<FacultyRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM faculty WHERE employee_id = ?1",
                params![employee_id],
                faculty_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn list_faculty(&self) -> Result<Vec<FacultyRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT * FROM faculty ORDER BY created_at ASC, id ASC")?;
        let rows = stmt
            .query_map([], faculty_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update_faculty(&self, id: &str, update: &FacultyUpdate) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn();

        if let Some(name) = &update.name {
            conn.execute(
                "UPDATE faculty SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, now, id],
            )?;
        }
        if let Some(employee_id) = &update.employee_id {
            conn.execute(
                "UPDATE faculty SET employee_id = ?1, updated_at = ?2 WHERE id = ?3",
                params![employee_id, now, id],
            )
            .map_err(|err| Error::for_table(err, "faculty"))?;
        }
        if let Some(password_hash) = &update.password_hash {
            conn.execute(
                "UPDATE faculty SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
                params![password_hash, now, id],
            )?;
        }
        if let Some(status) = &update.status {
            conn.execute(
                "UPDATE faculty SET status = ?1, updated_at = ?2 WHERE id = ?3",
                params![status, now, id],
            )?;
        }
        Ok(())
    }

    pub fn delete_faculty(&self, id: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM faculty WHERE id = ?1", params![id])
            .map_err(|err| Error::for_table(err, "faculty"))?;
        Ok(())
    }

    // -- password reset requests --------------------------------------------

    pub fn pending_request_exists(&self, faculty_id: &str) -> Result<bool> {
        let conn = self.conn();
        let found: Option<String> = conn
            .query_row(
                "SELECT id FROM password_reset_requests WHERE faculty_id = ?1 AND status = ?2",
                params![faculty_id, PENDING],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn insert_password_request(&self, faculty_id: &str) -> Result<PasswordRequestRecord> {
        let record = PasswordRequestRecord {
            id: Uuid::new_v4().to_string(),
            faculty_id: faculty_id.to_string(),
            status: PENDING.to_string(),
            requested_at: Utc::now(),
            resolved_at: None,
            resolved_by: None,
        };

        let conn = self.conn();
        conn.execute(
            "INSERT INTO password_reset_requests (id, faculty_id, status, requested_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.id,
                record.faculty_id,
                record.status,
                record.requested_at.to_rfc3339(),
            ],
        )
        .map_err(|err| Error::for_table(err, "password_reset_requests"))?;

        Ok(record)
    }

    pub fn password_request_by_id(&self, id: &str) -> Result<Option<PasswordRequestRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM password_reset_requests WHERE id = ?1",
                params![id],
                request_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn list_password_requests(&self) -> Result<Vec<PasswordRequestDetail>> {
        let requests = {
            let conn = self.conn();
            let mut stmt = conn.prepare(
                "SELECT r.id, r.faculty_id, r.status, r.requested_at, r.resolved_at, r.resolved_by,
                        f.name AS faculty_name, f.employee_id AS faculty_employee_id
                 FROM password_reset_requests r
                 JOIN faculty f ON f.id = r.faculty_id
                 ORDER BY r.requested_at DESC, r.id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        request_from_row(row)?,
                        row.get::<_, String>("faculty_name")?,
                        row.get::<_, String>("faculty_employee_id")?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        requests
            .into_iter()
            .map(|(request, faculty_name, faculty_employee_id)| {
                let resolved_by_admin = match &request.resolved_by {
                    Some(admin_id) => self.user_by_id(admin_id)?,
                    None => None,
                };
                Ok(PasswordRequestDetail {
                    request,
                    faculty_name,
                    faculty_employee_id,
                    resolved_by_admin,
                })
            })
            .collect()
    }

    pub fn password_request_detail(&self, id: &str) -> Result<Option<PasswordRequestDetail>> {
        let row = {
            let conn = self.conn();
            conn.query_row(
                "SELECT r.id, r.faculty_id, r.status, r.requested_at, r.resolved_at, r.resolved_by,
                        f.name AS faculty_name, f.employee_id AS faculty_employee_id
                 FROM password_reset_requests r
                 JOIN faculty f ON f.id = r.faculty_id
                 WHERE r.id = ?1",
                params![id],
                |row| {
                    Ok((
                        request_from_row(row)?,
                        row.get::<_, String>("faculty_name")?,
                        row.get::<_, String>("faculty_employee_id")?,
                    ))
                },
            )
            .optional()?
        };

        match row {
            Some((request, faculty_name, faculty_employee_id)) => {
                let resolved_by_admin = match &request.resolved_by {
                    Some(admin_id) => self.user_by_id(admin_id)?,
                    None => None,
                };
                Ok(Some(PasswordRequestDetail {
                    request,
                    faculty_name,
                    faculty_employee_id,
                    resolved_by_admin,
                }))
            }
            None => Ok(None),
        }
    }

    /// Mark a request COMPLETED and swap in the new faculty password hash,
    /// atomically.
    pub fn resolve_password_request(
        &self,
        request_id: &str,
        faculty_id: &str,
        password_hash: &str,
        admin_id: &str,
    ) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE faculty SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
            params![password_hash, now, faculty_id],
        )?;
        tx.execute(
            "UPDATE password_reset_requests
             SET status = ?1, resolved_at = ?2, resolved_by = ?3
             WHERE id = ?4",
            params![COMPLETED, now, admin_id, request_id],
        )
        .map_err(|err| Error::for_table(err, "password_reset_requests"))?;

        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::records::FacultyUpdate;
    use crate::Database;

    #[test]
    fn duplicate_email_is_a_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        db.insert_user("Admin", "admin@lnu.local", "$argon2id$hash").unwrap();

        let err = db
            .insert_user("Other", "admin@lnu.local", "$argon2id$hash")
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn faculty_update_touches_only_requested_fields() {
        let db = Database::open_in_memory().unwrap();
        let faculty = db
            .insert_faculty("Dr. Santos", "FAC-0001", "$hash", "ACTIVE")
            .unwrap();

        db.update_faculty(
            &faculty.id,
            &FacultyUpdate {
                status: Some("INACTIVE".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let updated = db.faculty_by_id(&faculty.id).unwrap().unwrap();
        assert_eq!(updated.status, "INACTIVE");
        assert_eq!(updated.name, "Dr. Santos");
        assert_eq!(updated.employee_id, "FAC-0001");
        assert!(updated.updated_at >= faculty.updated_at);
    }

    #[test]
    fn resolve_marks_request_completed_and_rotates_hash() {
        let db = Database::open_in_memory().unwrap();
        let admin = db.insert_user("Admin", "admin@lnu.local", "$a").unwrap();
        let faculty = db
            .insert_faculty("Prof. Cruz", "FAC-0002", "$old", "ACTIVE")
            .unwrap();
        let request = db.insert_password_request(&faculty.id).unwrap();

        assert!(db.pending_request_exists(&faculty.id).unwrap());

        db.resolve_password_request(&request.id, &faculty.id, "$new", &admin.id)
            .unwrap();

        let resolved = db.password_request_by_id(&request.id).unwrap().unwrap();
        assert_eq!(resolved.status, "COMPLETED");
        assert_eq!(resolved.resolved_by.as_deref(), Some(admin.id.as_str()));
        assert!(resolved.resolved_at.is_some());
        assert!(!db.pending_request_exists(&faculty.id).unwrap());

        let faculty = db.faculty_by_id(&faculty.id).unwrap().unwrap();
        assert_eq!(faculty.password_hash, "$new");
    }

    #[test]
    fn request_detail_carries_faculty_and_resolver() {
        let db = Database::open_in_memory().unwrap();
        let admin = db.insert_user("Admin", "admin@lnu.local", "$a").unwrap();
        let faculty = db
            .insert_faculty("Prof. Cruz", "FAC-0002", "$old", "ACTIVE")
            .unwrap();
        let request = db.insert_password_request(&faculty.id).unwrap();
        db.resolve_password_request(&request.id, &faculty.id, "$new", &admin.id)
            .unwrap();

        let detail = db.password_request_detail(&request.id).unwrap().unwrap();
        assert_eq!(detail.faculty_employee_id, "FAC-0002");
        assert_eq!(
            detail.resolved_by_admin.map(|admin| admin.email),
            Some("admin@lnu.local".to_string())
        );
    }
}
