//! Option listings for expense forms

use axum::Json;

use tally_core::{Category, CategoryOption, Currency, CurrencyOption};

/// GET /api/categories - List all spending categories
pub async fn list_categories() -> Json<Vec<CategoryOption>> {
    Json(Category::all().iter().copied().map(CategoryOption::from).collect())
}

/// GET /api/currencies - List supported currencies
pub async fn list_currencies() -> Json<Vec<CurrencyOption>> {
    Json(Currency::all().iter().copied().map(CurrencyOption::from).collect())
}
