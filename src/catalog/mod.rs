// Catalog module - the read-only parts dataset
// Row types for the three tables plus the connection handle that reads them
//
// The dataset is populated by an external importer; nothing in this crate
// ever writes to it.

pub mod database;

pub use database::Catalog;

use serde::Deserialize;

/// One row of the `categories` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub category: String,
    pub subcategory: String,
}

/// One row of the `manufacturers` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
}

/// One row of the `components` table, restricted to the columns we read
///
/// `price` is kept as the raw serialized text; decoding happens at render
/// time so that a broken payload only affects its own cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub lcsc: i64,
    pub category_id: i64,
    pub manufacturer_id: i64,
    pub mfr: String,
    pub basic: bool,
    pub preferred: bool,
    pub description: String,
    pub package: String,
    pub stock: i64,
    pub price: Option<String>,
}

/// A quantity range and its unit price, embedded as JSON in `components.price`
///
/// Open-ended ranges leave `qFrom` or `qTo` out (or set them to null).
/// `price` is required and kept as a JSON number so `1` and `0.5` print
/// exactly as stored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceTier {
    #[serde(rename = "qFrom", default)]
    pub q_from: Option<i64>,
    #[serde(rename = "qTo", default)]
    pub q_to: Option<i64>,
    pub price: serde_json::Number,
}

/// In-memory catalog used by the unit tests across the crate
#[cfg(test)]
pub(crate) mod fixtures {
    use super::Catalog;
    use rusqlite::Connection;

    pub const SCHEMA: &str = "
        CREATE TABLE categories (
            id INTEGER PRIMARY KEY NOT NULL,
            category TEXT NOT NULL,
            subcategory TEXT NOT NULL
        );
        CREATE TABLE manufacturers (
            id INTEGER PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );
        CREATE TABLE components (
            lcsc INTEGER PRIMARY KEY NOT NULL,
            category_id INTEGER NOT NULL,
            mfr TEXT NOT NULL,
            package TEXT NOT NULL,
            manufacturer_id INTEGER NOT NULL,
            basic INTEGER NOT NULL,
            preferred INTEGER NOT NULL DEFAULT 0,
            description TEXT NOT NULL,
            datasheet TEXT NOT NULL,
            stock INTEGER NOT NULL,
            price TEXT NOT NULL
        );
    ";

    pub const SEED: &str = r#"
        INSERT INTO categories VALUES (1, 'Resistors', 'Chip Resistor - Surface Mount');
        INSERT INTO categories VALUES (2, 'Capacitors', 'Multilayer Ceramic Capacitors MLCC - SMD/SMT');
        INSERT INTO categories VALUES (3, 'Diodes', 'Schottky Barrier Diodes (SBD)');

        INSERT INTO manufacturers VALUES (1, 'UNI-ROYAL(Uniroyal Elec)');
        INSERT INTO manufacturers VALUES (2, 'Samsung Electro-Mechanics');
        INSERT INTO manufacturers VALUES (3, 'YAGEO');

        INSERT INTO components VALUES (25744, 1, '0402WGF1002TCE', '0402', 1, 1, 0,
            '62.5mW Thick Film Resistors 50V ±1% 10kΩ 0402', 'https://example.com/ds/25744.pdf', 5000000,
            '[{"qFrom":1,"qTo":9,"price":0.5},{"qFrom":10,"qTo":null,"price":0.3}]');
        INSERT INTO components VALUES (25804, 1, '0603WAF1002T5E', '0603', 1, 1, 1,
            '100mW Thick Film Resistors 75V ±1% 10kΩ 0603', '', 3000000,
            '[{"qFrom":20,"qTo":199,"price":0.0012},{"qTo":null,"price":1}]');
        INSERT INTO components VALUES (58972, 1, 'RC0402FR-0710KL', '0402', 3, 0, 0,
            '62.5mW Thick Film Resistors 50V ±1% 10kΩ 0402', 'https://example.com/ds/58972.pdf', 12000,
            'not json');
        INSERT INTO components VALUES (15849, 2, 'CL10A106KP8NNNC', '0603', 2, 1, 1,
            '10uF ±10% 10V X5R 0603 Multilayer Ceramic Capacitors', 'https://example.com/ds/15849.pdf', 800000,
            '[{"qFrom":1,"qTo":null}]');
        INSERT INTO components VALUES (99999, 1, 'PIPE|TEST', '0805', 9, 0, 0,
            'dangling manufacturer', 'https://example.com/ds/99999.pdf', 0,
            '[]');
    "#;

    /// Catalog with the schema and seed rows loaded
    pub fn seeded() -> Catalog {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        conn.execute_batch(SCHEMA).expect("create schema");
        conn.execute_batch(SEED).expect("seed rows");
        Catalog::from_connection(conn)
    }

    /// Catalog with the schema but no rows
    pub fn empty() -> Catalog {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        conn.execute_batch(SCHEMA).expect("create schema");
        Catalog::from_connection(conn)
    }
}
