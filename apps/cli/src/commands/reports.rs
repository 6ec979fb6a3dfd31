//! Read-only reports over the whole collection.

use std::io::{self, Write};

use serde::Serialize;
use shopkeep_core::{categories as distinct_categories, summarize, Item, Statistics};
use shopkeep_store::Inventory;

use super::Render;
use crate::config::CliConfig;
use crate::output::{write_item_table, write_table};

/// Output of `stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct StatsResponse {
    pub stats: Statistics,
}

impl Render for StatsResponse {
    fn write_text<W: Write>(&self, writer: &mut W, config: &CliConfig) -> io::Result<()> {
        let stats = &self.stats;
        writeln!(writer, "Total items:    {}", stats.total_count)?;
        writeln!(writer, "Total value:    {}", config.format_money(stats.total_value))?;
        writeln!(writer, "Total stock:    {}", stats.total_stock)?;
        writeln!(writer, "Average price:  {}", config.format_money(stats.average_price))?;

        writeln!(writer)?;
        writeln!(writer, "By category")?;
        let rows: Vec<Vec<String>> = stats
            .categories_sorted()
            .into_iter()
            .map(|(name, bucket)| {
                vec![
                    name.to_string(),
                    bucket.count.to_string(),
                    bucket.total_stock.to_string(),
                    config.format_money(bucket.total_value),
                ]
            })
            .collect();
        if rows.is_empty() {
            writeln!(writer, "(no items)")?;
        } else {
            write_table(
                writer,
                &["CATEGORY", "ITEMS", "STOCK", "VALUE"],
                &[false, true, true, true],
                &rows,
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "Low stock (< {})", shopkeep_core::LOW_STOCK_THRESHOLD)?;
        write_item_table(writer, &refs(&stats.low_stock), config)?;

        writeln!(writer)?;
        writeln!(writer, "Recently added")?;
        write_item_table(writer, &refs(&stats.recent), config)
    }
}

fn refs(items: &[Item]) -> Vec<&Item> {
    items.iter().collect()
}

/// Output of `categories`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

impl Render for CategoriesResponse {
    fn write_text<W: Write>(&self, writer: &mut W, _config: &CliConfig) -> io::Result<()> {
        for category in &self.categories {
            writeln!(writer, "{category}")?;
        }
        Ok(())
    }
}

/// Aggregate statistics over every item.
pub fn stats(inventory: &Inventory) -> StatsResponse {
    StatsResponse {
        stats: summarize(inventory.items()),
    }
}

/// Distinct categories in use, sorted.
pub fn categories(inventory: &Inventory) -> CategoriesResponse {
    CategoriesResponse {
        categories: distinct_categories(inventory.items()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::ItemFields;
    use shopkeep_store::StoreConfig;
    use tempfile::TempDir;

    fn seeded(dir: &TempDir) -> Inventory {
        let mut inv = Inventory::open(StoreConfig::new(dir.path()));
        inv.create(ItemFields::new("Laptop", 1_000_000.0, 5).with_category("전자제품"))
            .unwrap();
        inv.create(ItemFields::new("Mouse", 20_000.0, 50).with_category("전자제품"))
            .unwrap();
        inv.create(ItemFields::new("Socks", 3_000.0, 100).with_category("의류"))
            .unwrap();
        inv
    }

    fn text<T: Render>(response: &T) -> String {
        let mut buf = Vec::new();
        response.write_text(&mut buf, &CliConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_stats_text() {
        let dir = TempDir::new().unwrap();
        let out = text(&stats(&seeded(&dir)));

        assert!(out.contains("Total items:    3"));
        assert!(out.contains("Total value:    6,300,000원"));
        assert!(out.contains("Total stock:    155"));
        assert!(out.contains("Average price:  341,000원"));
        // Only the laptop is below the threshold.
        let low = out.split("Low stock").nth(1).unwrap();
        let low = low.split("Recently added").next().unwrap();
        assert!(low.contains("Laptop"));
        assert!(!low.contains("Mouse"));
    }

    #[test]
    fn test_stats_empty() {
        let dir = TempDir::new().unwrap();
        let out = text(&stats(&Inventory::open(StoreConfig::new(dir.path()))));
        assert!(out.contains("Average price:  0원"));
        assert!(out.contains("(no items)"));
    }

    #[test]
    fn test_stats_json() {
        let dir = TempDir::new().unwrap();
        let json = serde_json::to_value(stats(&seeded(&dir))).unwrap();
        assert_eq!(json["total_count"], 3);
        assert_eq!(json["by_category"]["전자제품"]["count"], 2);
        assert_eq!(json["recent"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let dir = TempDir::new().unwrap();
        let response = categories(&seeded(&dir));
        assert_eq!(response.categories, vec!["의류".to_string(), "전자제품".to_string()]);
        assert_eq!(text(&response), "의류\n전자제품\n");
    }
}
