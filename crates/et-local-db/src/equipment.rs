//! Equipment store, including status/location history

use crate::records::{
    CategoryRecord, EquipmentDetail, EquipmentRecord, EquipmentUpdate, FacultyRecord,
    LocationActivity, LocationEvent, LocationHistoryRecord, RoomRecord, StatusActivity,
    StatusEvent, StatusHistoryRecord,
};
use crate::{ts_column, Database, Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

fn equipment_from_row(row: &Row<'_>) -> rusqlite::Result<EquipmentRecord> {
    Ok(EquipmentRecord {
        id: row.get("id")?,
        serial_number: row.get("serial_number")?,
        name: row.get("name")?,
        category_id: row.get("category_id")?,
        faculty_id: row.get("faculty_id")?,
        date_purchased: ts_column(row, "date_purchased")?,
        created_at: ts_column(row, "created_at")?,
    })
}

fn status_from_row(row: &Row<'_>) -> rusqlite::Result<StatusHistoryRecord> {
    Ok(StatusHistoryRecord {
        id: row.get("id")?,
        equipment_id: row.get("equipment_id")?,
        status: row.get("status")?,
        changed_by_id: row.get("changed_by_id")?,
        notes: row.get("notes")?,
        changed_at: ts_column(row, "changed_at")?,
    })
}

fn location_from_row(row: &Row<'_>) -> rusqlite::Result<LocationHistoryRecord> {
    Ok(LocationHistoryRecord {
        id: row.get("id")?,
        equipment_id: row.get("equipment_id")?,
        room_id: row.get("room_id")?,
        assigned_by_id: row.get("assigned_by_id")?,
        assigned_at: ts_column(row, "assigned_at")?,
    })
}

impl Database {
    pub fn insert_equipment(
        &self,
        serial_number: &str,
        name: &str,
        category_id: i64,
        faculty_id: &str,
        date_purchased: DateTime<Utc>,
    ) -> Result<EquipmentRecord> {
        let created_at = Utc::now();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO equipment (serial_number, name, category_id, faculty_id, date_purchased, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                serial_number,
                name,
                category_id,
                faculty_id,
                date_purchased.to_rfc3339(),
                created_at.to_rfc3339(),
            ],
        )
        .map_err(|err| Error::for_table(err, "equipment"))?;

        Ok(EquipmentRecord {
            id: conn.last_insert_rowid(),
            serial_number: serial_number.to_string(),
            name: name.to_string(),
            category_id,
            faculty_id: faculty_id.to_string(),
            date_purchased,
            created_at,
        })
    }

    pub fn equipment_by_id(&self, id: i64) -> Result<Option<EquipmentRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM equipment WHERE id = ?1",
                params![id],
                equipment_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn equipment_exists(&self, id: i64) -> Result<bool> {
        let conn = self.conn();
        let found: Option<i64> = conn
            .query_row("SELECT id FROM equipment WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    pub fn list_equipment(&self) -> Result<Vec<EquipmentRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT * FROM equipment ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], equipment_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update_equipment(&self, id: i64, update: &EquipmentUpdate) -> Result<()> {
        let conn = self.conn();
        if let Some(serial_number) = &update.serial_number {
            conn.execute(
                "UPDATE equipment SET serial_number = ?1 WHERE id = ?2",
                params![serial_number, id],
            )
            .map_err(|err| Error::for_table(err, "equipment"))?;
        }
        if let Some(name) = &update.name {
            conn.execute(
                "UPDATE equipment SET name = ?1 WHERE id = ?2",
                params![name, id],
            )?;
        }
        if let Some(category_id) = update.category_id {
            conn.execute(
                "UPDATE equipment SET category_id = ?1 WHERE id = ?2",
                params![category_id, id],
            )
            .map_err(|err| Error::for_table(err, "equipment"))?;
        }
        if let Some(faculty_id) = &update.faculty_id {
            conn.execute(
                "UPDATE equipment SET faculty_id = ?1 WHERE id = ?2",
                params![faculty_id, id],
            )
            .map_err(|err| Error::for_table(err, "equipment"))?;
        }
        if let Some(date_purchased) = update.date_purchased {
            conn.execute(
                "UPDATE equipment SET date_purchased = ?1 WHERE id = ?2",
                params![date_purchased.to_rfc3339(), id],
            )?;
        }
        Ok(())
    }

    pub fn delete_equipment(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM equipment WHERE id = ?1", params![id])
            .map_err(|err| Error::for_table(err, "equipment"))?;
        Ok(())
    }

    /// Latest status entry, newest by `changed_at` then row id.
    pub fn latest_status(&self, equipment_id: i64) -> Result<Option<StatusHistoryRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT * FROM equipment_status_history
                 WHERE equipment_id = ?1
                 ORDER BY changed_at DESC, id DESC
                 LIMIT 1",
                params![equipment_id],
                status_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Room of the latest location entry.
    pub fn latest_room(&self, equipment_id: i64) -> Result<Option<RoomRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT r.id, r.name, r.building, r.floor
                 FROM equipment_location_history h
                 JOIN rooms r ON r.id = h.room_id
                 WHERE h.equipment_id = ?1
                 ORDER BY h.assigned_at DESC, h.id DESC
                 LIMIT 1",
                params![equipment_id],
                |row| {
                    Ok(RoomRecord {
                        id: row.get("id")?,
                        name: row.get("name")?,
                        building: row.get("building")?,
                        floor: row.get("floor")?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    pub fn equipment_detail(&self, id: i64) -> Result<Option<EquipmentDetail>> {
        let base = {
            let conn = self.conn();
            conn.query_row(
                "SELECT e.id, e.serial_number, e.name, e.category_id, e.faculty_id,
                        e.date_purchased, e.created_at,
                        c.name AS category_name, c.description AS category_description,
                        f.name AS faculty_name, f.employee_id AS faculty_employee_id,
                        f.password_hash AS faculty_password_hash, f.status AS faculty_status,
                        f.created_at AS faculty_created_at, f.updated_at AS faculty_updated_at
                 FROM equipment e
                 JOIN categories c ON c.id = e.category_id
                 JOIN faculty f ON f.id = e.faculty_id
                 WHERE e.id = ?1",
                params![id],
                detail_base_from_row,
            )
            .optional()?
        };

        match base {
            Some((equipment, category, faculty)) => {
                let current_status = self.latest_status(equipment.id)?;
                let current_room = self.latest_room(equipment.id)?;
                Ok(Some(EquipmentDetail {
                    equipment,
                    category,
                    faculty,
                    current_status,
                    current_room,
                }))
            }
            None => Ok(None),
        }
    }

    /// All equipment with relations resolved, ordered by id ascending.
    pub fn list_equipment_detailed(&self) -> Result<Vec<EquipmentDetail>> {
        let bases = {
            let conn = self.conn();
            let mut stmt = conn.prepare(
                "SELECT e.id, e.serial_number, e.name, e.category_id, e.faculty_id,
                        e.date_purchased, e.created_at,
                        c.name AS category_name, c.description AS category_description,
                        f.name AS faculty_name, f.employee_id AS faculty_employee_id,
                        f.password_hash AS faculty_password_hash, f.status AS faculty_status,
                        f.created_at AS faculty_created_at, f.updated_at AS faculty_updated_at
                 FROM equipment e
                 JOIN categories c ON c.id = e.category_id
                 JOIN faculty f ON f.id = e.faculty_id
                 ORDER BY e.id ASC",
            )?;
            let rows = stmt
                .query_map([], detail_base_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        bases
            .into_iter()
            .map(|(equipment, category, faculty)| {
                let current_status = self.latest_status(equipment.id)?;
                let current_room = self.latest_room(equipment.id)?;
                Ok(EquipmentDetail {
                    equipment,
                    category,
                    faculty,
                    current_status,
                    current_room,
                })
            })
            .collect()
    }

    // -- status history -----------------------------------------------------

    pub fn insert_status_history(
        &self,
        equipment_id: i64,
        status: &str,
        changed_by_id: Option<&str>,
        notes: Option<&str>,
    ) -> Result<StatusHistoryRecord> {
        let changed_at = Utc::now();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO equipment_status_history (equipment_id, status, changed_by_id, notes, changed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![equipment_id, status, changed_by_id, notes, changed_at.to_rfc3339()],
        )
        .map_err(|err| Error::for_table(err, "equipment_status_history"))?;

        Ok(StatusHistoryRecord {
            id: conn.last_insert_rowid(),
            equipment_id,
            status: status.to_string(),
            changed_by_id: changed_by_id.map(str::to_string),
            notes: notes.map(str::to_string),
            changed_at,
        })
    }

    /// Status entries for one equipment item, newest first, with the acting
    /// user when one was recorded.
    pub fn status_history_for_equipment(&self, equipment_id: i64) -> Result<Vec<StatusEvent>> {
        let entries = {
            let conn = self.conn();
            let mut stmt = conn.prepare(
                "SELECT * FROM equipment_status_history
                 WHERE equipment_id = ?1
                 ORDER BY changed_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map(params![equipment_id], status_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        entries
            .into_iter()
            .map(|entry| {
                let changed_by = match &entry.changed_by_id {
                    Some(user_id) => self.user_by_id(user_id)?,
                    None => None,
                };
                Ok(StatusEvent { entry, changed_by })
            })
            .collect()
    }

    // -- location history ---------------------------------------------------

    pub fn insert_location_history(
        &self,
        equipment_id: i64,
        room_id: i64,
        assigned_by_id: Option<&str>,
    ) -> Result<LocationHistoryRecord> {
        let assigned_at = Utc::now();
        let conn = self.conn();
        conn.execute(
            "INSERT INTO equipment_location_history (equipment_id, room_id, assigned_by_id, assigned_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![equipment_id, room_id, assigned_by_id, assigned_at.to_rfc3339()],
        )
        .map_err(|err| Error::for_table(err, "equipment_location_history"))?;

        Ok(LocationHistoryRecord {
            id: conn.last_insert_rowid(),
            equipment_id,
            room_id,
            assigned_by_id: assigned_by_id.map(str::to_string),
            assigned_at,
        })
    }

    /// Location entries for one equipment item, newest first, with room and
    /// acting user resolved.
    pub fn location_history_for_equipment(&self, equipment_id: i64) -> Result<Vec<LocationEvent>> {
        let entries = {
            let conn = self.conn();
            let mut stmt = conn.prepare(
                "SELECT h.id, h.equipment_id, h.room_id, h.assigned_by_id, h.assigned_at,
                        r.name AS room_name, r.building AS room_building, r.floor AS room_floor
                 FROM equipment_location_history h
                 JOIN rooms r ON r.id = h.room_id
                 WHERE h.equipment_id = ?1
                 ORDER BY h.assigned_at DESC, h.id DESC",
            )?;
            let rows = stmt
                .query_map(params![equipment_id], |row| {
                    let entry = location_from_row(row)?;
                    let room = RoomRecord {
                        id: entry.room_id,
                        name: row.get("room_name")?,
                        building: row.get("room_building")?,
                        floor: row.get("room_floor")?,
                    };
                    Ok((entry, room))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        entries
            .into_iter()
            .map(|(entry, room)| {
                let assigned_by = match &entry.assigned_by_id {
                    Some(user_id) => self.user_by_id(user_id)?,
                    None => None,
                };
                Ok(LocationEvent {
                    entry,
                    room,
                    assigned_by,
                })
            })
            .collect()
    }

    // -- activity feed ------------------------------------------------------

    pub fn recent_status_activity(&self, limit: u32) -> Result<Vec<StatusActivity>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT h.id, h.status, h.changed_at, e.name AS equipment_name, e.serial_number
             FROM equipment_status_history h
             JOIN equipment e ON e.id = h.equipment_id
             ORDER BY h.changed_at DESC, h.id DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(StatusActivity {
                    id: row.get("id")?,
                    status: row.get("status")?,
                    changed_at: ts_column(row, "changed_at")?,
                    equipment_name: row.get("equipment_name")?,
                    serial_number: row.get("serial_number")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn recent_location_activity(&self, limit: u32) -> Result<Vec<LocationActivity>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT h.id, h.assigned_at, e.name AS equipment_name, e.serial_number,
                    r.name AS room_name
             FROM equipment_location_history h
             JOIN equipment e ON e.id = h.equipment_id
             JOIN rooms r ON r.id = h.room_id
             ORDER BY h.assigned_at DESC, h.id DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(LocationActivity {
                    id: row.get("id")?,
                    assigned_at: ts_column(row, "assigned_at")?,
                    equipment_name: row.get("equipment_name")?,
                    serial_number: row.get("serial_number")?,
                    room_name: row.get("room_name")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

fn detail_base_from_row(
    row: &Row<'_>,
) -> rusqlite::Result<(EquipmentRecord, CategoryRecord, FacultyRecord)> {
    let equipment = equipment_from_row(row)?;
    let category = CategoryRecord {
        id: equipment.category_id,
        name: row.get("category_name")?,
        description: row.get("category_description")?,
    };
    let faculty = FacultyRecord {
        id: equipment.faculty_id.clone(),
        name: row.get("faculty_name")?,
        employee_id: row.get("faculty_employee_id")?,
        password_hash: row.get("faculty_password_hash")?,
        status: row.get("faculty_status")?,
        created_at: ts_column(row, "faculty_created_at")?,
        updated_at: ts_column(row, "faculty_updated_at")?,
    };
    Ok((equipment, category, faculty))
}
