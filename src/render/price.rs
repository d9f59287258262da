// Price tier rendering
// Decodes the JSON price column of one component and formats it for a table
// cell. A payload that does not decode never fails the query; the cell just
// says there is no information.

use crate::catalog::PriceTier;
use std::fmt;

/// Shown instead of the tiers when the price column cannot be decoded
pub const PRICE_UNAVAILABLE: &str = "情報なし";

/// Decoded price column of a single component
#[derive(Debug, Clone, PartialEq)]
pub enum PriceCell {
    Tiers(Vec<PriceTier>),
    /// Missing or malformed payload; `reason` is for logs only
    Unavailable { reason: String },
}

impl PriceCell {
    /// Decode the raw column value
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return PriceCell::Unavailable {
                reason: "price column is NULL".to_string(),
            };
        };

        match serde_json::from_str::<Vec<PriceTier>>(raw) {
            Ok(tiers) => PriceCell::Tiers(tiers),
            Err(e) => PriceCell::Unavailable {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceCell::Tiers(_))
    }
}

impl fmt::Display for PriceCell {
    /// `{qFrom}～{qTo} {price}USD/個` per tier, joined with `、`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceCell::Unavailable { .. } => f.write_str(PRICE_UNAVAILABLE),
            PriceCell::Tiers(tiers) => {
                for (i, tier) in tiers.iter().enumerate() {
                    if i > 0 {
                        f.write_str("、")?;
                    }
                    write!(
                        f,
                        "{}～{} {}USD/個",
                        bound(tier.q_from),
                        bound(tier.q_to),
                        tier.price
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Open ends of a range print as nothing
fn bound(value: Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(raw: &str) -> String {
        PriceCell::decode(Some(raw)).to_string()
    }

    #[test]
    fn test_two_tiers_with_open_end() {
        assert_eq!(
            render(r#"[{"qFrom":1,"qTo":9,"price":0.5},{"qFrom":10,"qTo":null,"price":0.3}]"#),
            "1～9 0.5USD/個、10～ 0.3USD/個"
        );
    }

    #[test]
    fn test_missing_bounds_render_empty() {
        assert_eq!(render(r#"[{"qTo":100,"price":1}]"#), "～100 1USD/個");
        assert_eq!(render(r#"[{"qFrom":5,"price":0.0012}]"#), "5～ 0.0012USD/個");
    }

    #[test]
    fn test_empty_list_renders_empty_cell() {
        let cell = PriceCell::decode(Some("[]"));
        assert!(cell.is_available());
        assert_eq!(cell.to_string(), "");
    }

    #[test]
    fn test_malformed_payloads_fall_back() {
        for raw in [
            "not json",
            "",
            "{}",
            r#"{"qFrom":1,"qTo":2,"price":0.1}"#,
            r#"[{"qFrom":1,"qTo":9}]"#,
            r#"[{"qFrom":"one","qTo":9,"price":0.5}]"#,
            r#"[{"qFrom":1,"qTo":9,"price":"0.5"}]"#,
            "null",
        ] {
            let cell = PriceCell::decode(Some(raw));
            assert!(!cell.is_available(), "{raw}");
            assert_eq!(cell.to_string(), PRICE_UNAVAILABLE, "{raw}");
        }
    }

    #[test]
    fn test_null_column_falls_back() {
        assert_eq!(PriceCell::decode(None).to_string(), "情報なし");
    }
}
