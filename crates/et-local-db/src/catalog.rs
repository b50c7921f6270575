//! Category and room stores

use crate::records::{CategoryRecord, RoomRecord};
use crate::{Database, Error, Result};
use rusqlite::{params, OptionalExtension, Row};

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<CategoryRecord> {
    Ok(CategoryRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn room_from_row(row: &Row<'_>) -> rusqlite::Result<RoomRecord> {
    Ok(RoomRecord {
        id: row.get("id")?,
        name: row.get("name")?,
        building: row.get("building")?,
        floor: row.get("floor")?,
    })
}

impl Database {
    pub fn insert_category(&self, name: &str, description: Option<&str>) -> Result<CategoryRecord> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO categories (name, description) VALUES (?1, ?2)",
            params![name, description],
        )
        .map_err(|err| Error::for_table(err, "categories"))?;

        let id = conn.last_insert_rowid();
        Ok(CategoryRecord {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
        })
    }

    pub fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, description FROM categories ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], category_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn category_by_id(&self, id: i64) -> Result<Option<CategoryRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT id, name, description FROM categories WHERE id = ?1",
                params![id],
                category_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn update_category(
        &self,
        id: i64,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let conn = self.conn();
        if let Some(name) = name {
            conn.execute(
                "UPDATE categories SET name = ?1 WHERE id = ?2",
                params![name, id],
            )
            .map_err(|err| Error::for_table(err, "categories"))?;
        }
        if let Some(description) = description {
            conn.execute(
                "UPDATE categories SET description = ?1 WHERE id = ?2",
                params![description, id],
            )?;
        }
        Ok(())
    }

    pub fn delete_category(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM categories WHERE id = ?1", params![id])
            .map_err(|err| Error::for_table(err, "categories"))?;
        Ok(())
    }

    pub fn insert_room(
        &self,
        name: &str,
        building: Option<&str>,
        floor: Option<&str>,
    ) -> Result<RoomRecord> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO rooms (name, building, floor) VALUES (?1, ?2, ?3)",
            params![name, building, floor],
        )
        .map_err(|err| Error::for_table(err, "rooms"))?;

        let id = conn.last_insert_rowid();
        Ok(RoomRecord {
            id,
            name: name.to_string(),
            building: building.map(str::to_string),
            floor: floor.map(str::to_string),
        })
    }

    pub fn list_rooms(&self) -> Result<Vec<RoomRecord>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, building, floor FROM rooms ORDER BY id ASC")?;
        let rows = stmt
            .query_map([], room_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn room_by_id(&self, id: i64) -> Result<Option<RoomRecord>> {
        let conn = self.conn();
        let record = conn
            .query_row(
                "SELECT id, name, building, floor FROM rooms WHERE id = ?1",
                params![id],
                room_from_row,
            )
            .optional()?;
        Ok(record)
    }

    pub fn update_room(
        &self,
        id: i64,
        name: Option<&str>,
        building: Option<&str>,
        floor: Option<&str>,
    ) -> Result<()> {
        let conn = self.conn();
        if let Some(name) = name {
            conn.execute("UPDATE rooms SET name = ?1 WHERE id = ?2", params![name, id])
                .map_err(|err| Error::for_table(err, "rooms"))?;
        }
        if let Some(building) = building {
            conn.execute(
                "UPDATE rooms SET building = ?1 WHERE id = ?2",
                params![building, id],
            )?;
        }
        if let Some(floor) = floor {
            conn.execute(
                "UPDATE rooms SET floor = ?1 WHERE id = ?2",
                params![floor, id],
            )?;
        }
        Ok(())
    }

    pub fn delete_room(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM rooms WHERE id = ?1", params![id])
            .map_err(|err| Error::for_table(err, "rooms"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn category_crud_round_trip() {
        let db = Database::open_in_memory().unwrap();

        let created = db.insert_category("Computer", Some("Desktops and laptops")).unwrap();
        assert_eq!(created.name, "Computer");

        db.update_category(created.id, Some("Computers"), None).unwrap();
        let fetched = db.category_by_id(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Computers");
        assert_eq!(fetched.description.as_deref(), Some("Desktops and laptops"));

        db.delete_category(created.id).unwrap();
        assert!(db.category_by_id(created.id).unwrap().is_none());
    }

    #[test]
    fn duplicate_category_name_is_a_unique_violation() {
        let db = Database::open_in_memory().unwrap();
        db.insert_category("Switch", None).unwrap();

        let err = db.insert_category("Switch", None).unwrap_err();
        assert!(err.is_unique_violation(), "got {err:?}");
    }

    #[test]
    fn rooms_are_listed_in_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        db.insert_room("ComLab 1", Some("Main"), Some("2")).unwrap();
        db.insert_room("ComLab 2", Some("Main"), None).unwrap();

        let rooms = db.list_rooms().unwrap();
        assert_eq!(
            rooms.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            vec!["ComLab 1", "ComLab 2"]
        );
    }
}
