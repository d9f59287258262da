// Tool catalog
// The named operations an agent can call: their descriptions, input schemas,
// argument decoding and dispatch onto the query service

use crate::error::{CatalogError, CatalogResult};
use crate::query::{PartSearch, QueryService};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Every tool the server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListCategories,
    ListManufacturers,
    GetCategory,
    GetManufacturer,
    SearchManufacturer,
    SearchSubcategories,
    GetDatasheetUrl,
    SearchParts,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::ListCategories,
        Tool::ListManufacturers,
        Tool::GetCategory,
        Tool::GetManufacturer,
        Tool::SearchManufacturer,
        Tool::SearchSubcategories,
        Tool::GetDatasheetUrl,
        Tool::SearchParts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ListCategories => "list_categories",
            Tool::ListManufacturers => "list_manufacturers",
            Tool::GetCategory => "get_category",
            Tool::GetManufacturer => "get_manufacturer",
            Tool::SearchManufacturer => "search_manufacturer",
            Tool::SearchSubcategories => "search_subcategories",
            Tool::GetDatasheetUrl => "get_datasheet_url",
            Tool::SearchParts => "search_parts",
        }
    }

    pub fn from_name(name: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ListCategories => "JLCPCBの部品のカテゴリ一覧を取得する",
            Tool::ListManufacturers => "JLCPCBの部品のメーカー一覧を取得する",
            Tool::GetCategory => "カテゴリIDから、カテゴリ名とサブカテゴリ名を取得する",
            Tool::GetManufacturer => "メーカーIDから、メーカー名を取得する",
            Tool::SearchManufacturer => "メーカー名から検索を行い、メーカーIDを取得する",
            Tool::SearchSubcategories => {
                "サブカテゴリ名（英語表記）から検索を行い、カテゴリIDを取得する"
            }
            Tool::GetDatasheetUrl => {
                "JLCPCBの部品番号から、データシートのURLを取得する、数字の部分のみだけで良い"
            }
            Tool::SearchParts => "JLCPCBの部品を検索する",
        }
    }

    /// JSON Schema of the `arguments` object
    pub fn input_schema(self) -> Value {
        match self {
            Tool::ListCategories | Tool::ListManufacturers => json!({
                "type": "object",
                "properties": {}
            }),
            Tool::GetCategory => json!({
                "type": "object",
                "properties": {
                    "category_id": { "type": "integer" }
                },
                "required": ["category_id"]
            }),
            Tool::GetManufacturer => json!({
                "type": "object",
                "properties": {
                    "manufacturer_id": { "type": "integer" }
                },
                "required": ["manufacturer_id"]
            }),
            Tool::SearchManufacturer | Tool::SearchSubcategories => json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" }
                },
                "required": ["name"]
            }),
            Tool::GetDatasheetUrl => json!({
                "type": "object",
                "properties": {
                    "part_id": { "type": "integer" }
                },
                "required": ["part_id"]
            }),
            Tool::SearchParts => json!({
                "type": "object",
                "properties": {
                    "search_query": search_query_schema()
                },
                "required": ["search_query"]
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }

    /// Decode `arguments` and run the operation
    ///
    /// `Ok(None)` is a lookup or search that found nothing.
    pub fn call(self, service: &QueryService, arguments: Value) -> CatalogResult<Option<String>> {
        match self {
            Tool::ListCategories => service.list_categories().map(Some),
            Tool::ListManufacturers => service.list_manufacturers().map(Some),
            Tool::GetCategory => {
                let args: CategoryArgs = decode(arguments)?;
                service.get_category(args.category_id)
            }
            Tool::GetManufacturer => {
                let args: ManufacturerArgs = decode(arguments)?;
                service.get_manufacturer(args.manufacturer_id)
            }
            Tool::SearchManufacturer => {
                let args: NameArgs = decode(arguments)?;
                service.search_manufacturer(&args.name)
            }
            Tool::SearchSubcategories => {
                let args: NameArgs = decode(arguments)?;
                service.search_subcategories(&args.name)
            }
            Tool::GetDatasheetUrl => {
                let args: PartArgs = decode(arguments)?;
                service.get_datasheet_url(args.part_id)
            }
            Tool::SearchParts => {
                let args: SearchPartsArgs = decode(arguments)?;
                service.search_parts(&args.search_query).map(Some)
            }
        }
    }
}

/// Look a tool up by name and call it
pub fn call_tool(
    service: &QueryService,
    name: &str,
    arguments: Value,
) -> CatalogResult<Option<String>> {
    let tool = Tool::from_name(name).ok_or_else(|| CatalogError::UnknownTool(name.to_string()))?;
    tool.call(service, arguments)
}

/// What `tools/list` reports for one tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

fn search_query_schema() -> Value {
    json!({
        "title": "検索クエリ",
        "description": "検索クエリを表現するモデル、各フィールドのAND検索",
        "type": "object",
        "properties": {
            "category_id": {
                "type": "integer",
                "minimum": 1,
                "description": "有効なカテゴリID、list_categoriesツールで取得する"
            },
            "manufacturer_id": {
                "type": ["integer", "null"],
                "minimum": 1,
                "description": "有効なメーカーID、search_manufacturerやlist_manufacturersツールで取得する"
            },
            "manufacturer_pn": {
                "type": ["string", "null"],
                "description": "メーカー型番"
            },
            "description": {
                "type": ["string", "null"],
                "description": "型番以外の説明文、OR検索は不可、表記ゆれ（-の有無等）は別々に検索の必要あり"
            },
            "package": { "type": ["string", "null"] },
            "is_basic_parts": { "type": ["boolean", "null"] },
            "is_preferred_parts": { "type": ["boolean", "null"] }
        },
        "required": ["category_id"]
    })
}

#[derive(Deserialize)]
struct CategoryArgs {
    category_id: i64,
}

#[derive(Deserialize)]
struct ManufacturerArgs {
    manufacturer_id: i64,
}

#[derive(Deserialize)]
struct NameArgs {
    name: String,
}

#[derive(Deserialize)]
struct PartArgs {
    part_id: i64,
}

#[derive(Deserialize)]
struct SearchPartsArgs {
    search_query: PartSearch,
}

/// Missing arguments are treated as an empty object
fn decode<T: DeserializeOwned>(arguments: Value) -> CatalogResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| CatalogError::InvalidArgument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn service() -> QueryService {
        QueryService::new(fixtures::seeded())
    }

    #[test]
    fn test_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.name()), Some(tool));
        }
        assert_eq!(Tool::from_name("drop_tables"), None);
    }

    #[test]
    fn test_definitions_are_listed_in_order() {
        let names: Vec<&str> = definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "list_categories",
                "list_manufacturers",
                "get_category",
                "get_manufacturer",
                "search_manufacturer",
                "search_subcategories",
                "get_datasheet_url",
                "search_parts",
            ]
        );

        let json = serde_json::to_value(Tool::SearchParts.definition()).unwrap();
        assert_eq!(json["inputSchema"]["required"], json!(["search_query"]));
        assert_eq!(
            json["inputSchema"]["properties"]["search_query"]["required"],
            json!(["category_id"])
        );
    }

    #[test]
    fn test_call_dispatches_with_arguments() {
        let service = service();

        let out = call_tool(&service, "get_manufacturer", json!({ "manufacturer_id": 3 })).unwrap();
        assert_eq!(out.as_deref(), Some("YAGEO"));

        let out = call_tool(&service, "get_datasheet_url", json!({ "part_id": 404 })).unwrap();
        assert_eq!(out, None);

        let out = call_tool(&service, "list_manufacturers", Value::Null).unwrap();
        assert!(out.unwrap().starts_with("|メーカーID|メーカー名|\n"));
    }

    #[test]
    fn test_search_parts_takes_nested_query() {
        let out = call_tool(
            &service(),
            "search_parts",
            json!({ "search_query": { "category_id": 2, "is_basic_parts": true } }),
        )
        .unwrap()
        .unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("|15849|"));
    }

    #[test]
    fn test_bad_arguments_are_invalid_argument_errors() {
        let service = service();

        for (name, args) in [
            ("get_category", json!({})),
            ("get_category", json!({ "category_id": "three" })),
            ("search_manufacturer", Value::Null),
            ("search_parts", json!({ "search_query": { "package": "0402" } })),
            ("search_parts", json!({ "search_query": { "category_id": 0 } })),
        ] {
            let err = call_tool(&service, name, args).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidArgument(_)), "{name}");
        }
    }

    #[test]
    fn test_unknown_tool() {
        let err = call_tool(&service(), "search_subcategory", json!({})).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTool(name) if name == "search_subcategory"));
    }
}
