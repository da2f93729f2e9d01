//! # Cart Demo
//!
//! Exercises the cart manager against a SQLite store. Run it twice with
//! the same database file to see the cart hydrate across "restarts".
//!
//! ## Usage
//! ```bash
//! cargo run -p marketcart-manager --bin demo
//! cargo run -p marketcart-manager --bin demo -- ./data/cart.db
//! ```

use std::env;
use std::sync::Arc;

use marketcart_core::NewItem;
use marketcart_manager::{CartManager, ManagerConfig};
use marketcart_store::{SqliteConfig, SqliteStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "./marketcart.db".to_string());

    let store = Arc::new(SqliteStore::new(SqliteConfig::new(&path)).await?);
    let manager = CartManager::open(store, ManagerConfig::default()).await?;

    println!("cart after load:");
    print_items(&manager)?;

    manager.add_to_cart(NewItem::new(
        "demo-shirt",
        "Linen Shirt",
        "https://cdn.example.com/shirt.png",
        4990,
    )?)?;
    manager.add_to_cart(NewItem::new(
        "demo-mug",
        "Stoneware Mug",
        "https://cdn.example.com/mug.png",
        1250,
    )?)?;
    manager.increment("demo-mug")?;

    println!("cart after mutations:");
    print_items(&manager)?;

    manager.close().await?;
    println!("snapshot flushed to {path}");

    Ok(())
}

fn print_items(manager: &CartManager) -> Result<(), Box<dyn std::error::Error>> {
    let items = manager.items()?;
    if items.is_empty() {
        println!("  (empty)");
    }
    for item in items {
        println!(
            "  {:>3} x {} @ {} cents [{}]",
            item.quantity, item.title, item.price_cents, item.id
        );
    }
    Ok(())
}
