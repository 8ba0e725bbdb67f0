//! Category and currency listings

use anyhow::Result;

use tally_core::{Category, Currency};

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🏷️  Categories");
    for category in Category::all() {
        println!(
            "   {} {:<15} {}",
            category.emoji(),
            category.as_str(),
            category.label()
        );
    }

    println!();
    println!("💱 Currencies");
    for currency in Currency::all() {
        println!(
            "   {:<4} {:<3} {}",
            currency.as_str(),
            currency.symbol(),
            currency.label()
        );
    }

    Ok(())
}
