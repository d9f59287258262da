// Query service
// The catalog operations: each one builds a parameterized SELECT, runs it and
// renders the result as text (or None when a lookup finds nothing)

use super::filter::{contains_pattern, PartSearch};
use crate::catalog::{Catalog, Category, Component, Manufacturer};
use crate::error::CatalogResult;
use crate::render::{PriceCell, Table};
use rusqlite::{params_from_iter, Row};
use tracing::{debug, warn};

pub const CATEGORY_HEADER: &[&str] = &["カテゴリID", "カテゴリ名", "サブカテゴリ名"];
pub const MANUFACTURER_HEADER: &[&str] = &["メーカーID", "メーカー名"];
pub const SUBCATEGORY_HEADER: &[&str] = &["カテゴリID", "サブカテゴリ名"];

/// Column headers of `search_parts`, price column included
///
/// An older shape without the trailing price column is no longer served.
pub const PART_HEADER: &[&str] = &[
    "部品番号",
    "カテゴリID",
    "メーカーID",
    "メーカー品番",
    "Basic Partsか",
    "Preferred Partsか",
    "説明",
    "パッケージ",
    "在庫数",
    "価格",
];

const PART_COLUMNS: &str =
    "lcsc,category_id,manufacturer_id,mfr,basic,preferred,description,package,stock,price";

/// Read operations over the parts catalog
///
/// Listing operations always return a table, even an empty one. Pattern
/// searches return `None` when nothing matches. Row order is whatever
/// SQLite returns; nothing here sorts.
pub struct QueryService {
    catalog: Catalog,
}

impl QueryService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// All categories as a table
    pub fn list_categories(&self) -> CatalogResult<String> {
        let rows = self.catalog.query_rows(
            "SELECT id,category,subcategory FROM categories",
            [],
            category_from_row,
        )?;

        let mut table = Table::new(CATEGORY_HEADER);
        for c in rows {
            table.push_row(vec![c.id.to_string(), c.category, c.subcategory]);
        }
        Ok(table.render())
    }

    /// All manufacturers as a table
    pub fn list_manufacturers(&self) -> CatalogResult<String> {
        let rows = self.catalog.query_rows(
            "SELECT id,name FROM manufacturers",
            [],
            manufacturer_from_row,
        )?;
        Ok(manufacturer_table(rows).render())
    }

    /// Category and subcategory names of one category
    pub fn get_category(&self, category_id: i64) -> CatalogResult<Option<String>> {
        let category = self.catalog.query_optional(
            "SELECT id,category,subcategory FROM categories WHERE id=?",
            [category_id],
            category_from_row,
        )?;

        Ok(category.map(|c| format!("カテゴリ名：{}、サブカテゴリ名：{}", c.category, c.subcategory)))
    }

    /// Name of one manufacturer
    pub fn get_manufacturer(&self, manufacturer_id: i64) -> CatalogResult<Option<String>> {
        let manufacturer = self.catalog.query_optional(
            "SELECT id,name FROM manufacturers WHERE id=?",
            [manufacturer_id],
            manufacturer_from_row,
        )?;
        Ok(manufacturer.map(|m| m.name))
    }

    /// Manufacturers whose name contains `name`; `None` if there are none
    pub fn search_manufacturer(&self, name: &str) -> CatalogResult<Option<String>> {
        let rows = self.catalog.query_rows(
            "SELECT id,name FROM manufacturers WHERE name LIKE ?",
            [contains_pattern(name)],
            manufacturer_from_row,
        )?;

        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(manufacturer_table(rows).render()))
    }

    /// Categories whose subcategory name contains `name`; `None` if there are none
    pub fn search_subcategories(&self, name: &str) -> CatalogResult<Option<String>> {
        let rows = self.catalog.query_rows(
            "SELECT id,subcategory FROM categories WHERE subcategory LIKE ?",
            [contains_pattern(name)],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut table = Table::new(SUBCATEGORY_HEADER);
        for (id, subcategory) in rows {
            table.push_row(vec![id.to_string(), subcategory]);
        }
        Ok(Some(table.render()))
    }

    /// Datasheet URL of a part, which may be an empty string
    pub fn get_datasheet_url(&self, part_id: i64) -> CatalogResult<Option<String>> {
        self.catalog.query_optional(
            "SELECT datasheet FROM components WHERE lcsc=?",
            [part_id],
            |row| row.get::<_, String>(0),
        )
    }

    /// Parts matching every supplied filter field
    pub fn search_parts(&self, search: &PartSearch) -> CatalogResult<String> {
        search.validate()?;

        let predicates = search.predicates();
        let sql = format!(
            "SELECT {} FROM components WHERE {}",
            PART_COLUMNS,
            predicates.to_sql()
        );
        debug!(predicates = predicates.len(), "searching parts");

        let rows = self.catalog.query_rows(
            &sql,
            params_from_iter(predicates.params()),
            component_from_row,
        )?;

        let mut table = Table::new(PART_HEADER);
        for part in rows {
            let price = PriceCell::decode(part.price.as_deref());
            if let PriceCell::Unavailable { reason } = &price {
                warn!(lcsc = part.lcsc, %reason, "price tiers could not be decoded");
            }

            table.push_row(vec![
                part.lcsc.to_string(),
                part.category_id.to_string(),
                part.manufacturer_id.to_string(),
                part.mfr,
                flag(part.basic),
                flag(part.preferred),
                part.description,
                part.package,
                part.stock.to_string(),
                price.to_string(),
            ]);
        }
        Ok(table.render())
    }
}

fn manufacturer_table(rows: Vec<Manufacturer>) -> Table {
    let mut table = Table::new(MANUFACTURER_HEADER);
    for m in rows {
        table.push_row(vec![m.id.to_string(), m.name]);
    }
    table
}

/// Flags are stored as 0/1 and shown the same way
fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        category: row.get(1)?,
        subcategory: row.get(2)?,
    })
}

fn manufacturer_from_row(row: &Row<'_>) -> rusqlite::Result<Manufacturer> {
    Ok(Manufacturer {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn component_from_row(row: &Row<'_>) -> rusqlite::Result<Component> {
    Ok(Component {
        lcsc: row.get(0)?,
        category_id: row.get(1)?,
        manufacturer_id: row.get(2)?,
        mfr: row.get(3)?,
        basic: row.get(4)?,
        preferred: row.get(5)?,
        description: row.get(6)?,
        package: row.get(7)?,
        stock: row.get(8)?,
        price: row.get(9)?,
    })
}
