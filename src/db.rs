//! SQLite store bootstrap and statement execution.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;

/// Rows shown per table by the schema tool.
pub const SAMPLE_ROW_LIMIT: usize = 3;

const SCHEMA_SQL: &str = r#"
CREATE TABLE products (
    product_id INTEGER PRIMARY KEY,
    product_name TEXT,
    price REAL,
    category TEXT,
    stock INTEGER
);

CREATE TABLE promotions (
    promo_id INTEGER PRIMARY KEY,
    product_id INTEGER,
    discount_percentage INTEGER,
    start_date TEXT,
    end_date TEXT
);

CREATE TABLE stores (
    store_id INTEGER PRIMARY KEY,
    store_name TEXT,
    address TEXT,
    opening_hours TEXT
);

INSERT INTO products VALUES (1, 'Gaming Mouse', 1500, 'Computer Peripherals', 25);
INSERT INTO products VALUES (2, 'Mechanical Keyboard', 3500, 'Computer Peripherals', 10);
INSERT INTO products VALUES (3, 'Laptop ASUS', 25000, 'Computer', 5);
INSERT INTO promotions VALUES (1, 1, 20, '2025-07-01', '2025-08-30');
INSERT INTO promotions VALUES (2, 3, 10, '2025-08-01', '2025-09-15');
INSERT INTO stores VALUES (1, 'Central Plaza Branch', 'Bangkok', '10:00 - 21:00');
INSERT INTO stores VALUES (2, 'The Mall Branch', 'Chiang Mai', '10:30 - 20:30');
"#;

/// Shared SQLite connection. Cloning hands out another handle to the
/// same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create the database at the given path, seeding the demo
    /// store data on first run.
    pub fn bootstrap(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database with the same seed data, for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        // An existing products table means the store is already seeded
        let seeded: bool = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='products'")
            .and_then(|mut stmt| stmt.exists([]))
            .unwrap_or(false);

        if seeded {
            return Ok(());
        }

        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Names of user tables, alphabetical.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// The stored CREATE TABLE statement for a table, if the table exists.
    pub fn table_ddl(&self, table: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let ddl = conn
            .query_row(
                "SELECT sql FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ddl)
    }

    /// First few rows of a table, one tuple per line.
    pub fn sample_rows(&self, table: &str) -> Result<String> {
        let conn = self.conn.lock().unwrap();
        let quoted = table.replace('"', "\"\"");
        let mut stmt = conn.prepare(&format!(
            "SELECT * FROM \"{}\" LIMIT {}",
            quoted, SAMPLE_ROW_LIMIT
        ))?;
        let tuples = rows_as_tuples(&mut stmt)?;
        Ok(tuples.join("\n"))
    }

    /// Execute a single SQL statement. Row-returning statements come back
    /// as a list of tuples, everything else as an affected-row count.
    pub fn execute_sql(&self, sql: &str) -> Result<String> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        if stmt.column_count() == 0 {
            let affected = stmt.execute([])?;
            return Ok(format!("{} row(s) affected.", affected));
        }
        let tuples = rows_as_tuples(&mut stmt)?;
        if tuples.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("[{}]", tuples.join(", ")))
        }
    }

    /// Compile a statement without running it.
    pub fn check_sql(&self, sql: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let _stmt = conn.prepare(sql)?;
        Ok(())
    }
}

fn rows_as_tuples(stmt: &mut rusqlite::Statement<'_>) -> Result<Vec<String>> {
    let columns = stmt.column_count();
    let mut rows = stmt.query([])?;
    let mut tuples = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns);
        for i in 0..columns {
            values.push(format_value(row.get_ref(i)?));
        }
        tuples.push(format!("({})", values.join(", ")));
    }
    Ok(tuples)
}

fn format_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => format!("'{}'", String::from_utf8_lossy(t).replace('\'', "''")),
        ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
    }
}
