//! # Seed Data Generator
//!
//! Populates an empty item file with sample inventory for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 items (default) into ./data/items.json
//! cargo run -p shopkeep-store --bin seed
//!
//! # Generate a custom amount
//! cargo run -p shopkeep-store --bin seed -- --count 200
//!
//! # Specify the data directory
//! cargo run -p shopkeep-store --bin seed -- --data-dir /tmp/shop
//! ```
//!
//! ## Generated Items
//! Items cycle through five categories (전자제품, 의류, 식품, 도서,
//! 생활용품). Price and stock are derived from the item index, so two runs
//! with the same count produce the same catalog apart from timestamps.
//! Every seventh item gets a stock below the low-stock threshold.

use std::env;
use std::time::Instant;

use shopkeep_core::ItemFields;
use shopkeep_store::{Inventory, ItemStore, StoreConfig, DEFAULT_DATA_DIR};

/// Categories with their sample product names and base price in won.
const CATALOG: &[(&str, u32, &[&str])] = &[
    (
        "전자제품",
        150_000,
        &["노트북", "무선 마우스", "기계식 키보드", "모니터", "USB 허브", "이어폰", "웹캠"],
    ),
    (
        "의류",
        30_000,
        &["반팔 티셔츠", "청바지", "후드티", "양말 세트", "바람막이", "니트"],
    ),
    (
        "식품",
        5_000,
        &["생수 2L", "라면 5입", "커피 원두", "견과류", "초콜릿", "녹차 티백"],
    ),
    (
        "도서",
        15_000,
        &["러스트 프로그래밍", "알고리즘 입문", "여행 에세이", "요리책", "만화 전집"],
    ),
    (
        "생활용품",
        8_000,
        &["주방 세제", "수건 세트", "칫솔", "텀블러", "우산", "휴지"],
    ),
];

/// Editions appended to names once a category runs out of base names.
const EDITIONS: &[&str] = &["", " 프로", " 라이트", " 미니", " 플러스"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut data_dir = String::from(DEFAULT_DATA_DIR);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shopkeep Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of items to generate (default: 50)");
                println!("  -d, --data-dir <PATH>  Data directory (default: {DEFAULT_DATA_DIR})");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    // A corrupt file must not be silently replaced with sample data.
    let store = ItemStore::new(StoreConfig::new(&data_dir));
    let existing = store.try_load()?;
    let mut inventory = Inventory::with_items(store, existing);

    println!("Shopkeep Seed Data Generator");
    println!("============================");
    println!("File:  {}", inventory.store().path().display());
    println!("Items: {}", count);
    println!();

    if !inventory.items().is_empty() {
        println!("Item file already has {} items", inventory.items().len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the file to regenerate.");
        return Ok(());
    }

    let start = Instant::now();
    for index in 0..count {
        inventory.create(sample_fields(index))?;
    }

    let elapsed = start.elapsed();
    println!("Generated {} items in {:?}", count, elapsed);
    Ok(())
}

/// Builds the `index`-th sample item.
fn sample_fields(index: usize) -> ItemFields {
    let (category, base_price, names) = CATALOG[index % CATALOG.len()];
    let round = index / CATALOG.len();
    let name = names[round % names.len()];
    let edition = EDITIONS[(round / names.len()) % EDITIONS.len()];

    // Prices land on whole 1,000-won steps.
    let price = base_price + ((index * 37) % 50) as u32 * 1_000;
    let stock = if index % 7 == 3 {
        (index % 10) as i64
    } else {
        10 + ((index * 13) % 90) as i64
    };

    ItemFields::new(format!("{name}{edition}"), f64::from(price), stock)
        .with_category(category)
        .with_description(format!("{category} 샘플 상품 #{}", index + 1))
}
