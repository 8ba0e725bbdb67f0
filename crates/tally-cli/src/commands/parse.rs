//! Parse and classify command implementations

use std::path::Path;

use anyhow::{Context, Result};

use tally_core::ParsedSpending;

use super::{load_parser, processing_time};

pub fn cmd_parse(
    config_path: Option<&Path>,
    text: &str,
    json: bool,
    date: Option<&str>,
) -> Result<()> {
    let parser = load_parser(config_path)?;
    let now = processing_time(date)?;
    let parsed = parser
        .parse_at(text, now)
        .context("Failed to parse utterance")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print!("{}", format_spending(&parsed));
    }

    Ok(())
}

/// Human-readable summary of a parsed record
pub fn format_spending(parsed: &ParsedSpending) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "{} {} {}\n",
        parsed.category.emoji(),
        parsed.category.label(),
        format_amount(parsed)
    ));
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!("   Description: {}\n", parsed.description));
    if !parsed.location.is_empty() {
        out.push_str(&format!("   Location:    {}\n", parsed.location));
    }
    out.push_str(&format!("   Date:        {}\n", parsed.date));
    out.push_str(&format!(
        "   Confidence:  {:.0}%{}\n",
        parsed.confidence * 100.0,
        if parsed.confidence < 0.5 {
            "  ⚠️  please review"
        } else {
            ""
        }
    ));
    out
}

/// Amount with currency symbol; yen and rupiah have no minor unit
fn format_amount(parsed: &ParsedSpending) -> String {
    match parsed.currency {
        tally_core::Currency::Usd => format!("{}{:.2}", parsed.currency.symbol(), parsed.amount),
        _ => format!("{}{:.0}", parsed.currency.symbol(), parsed.amount),
    }
}

pub fn cmd_classify(config_path: Option<&Path>, text: &str, top: usize) -> Result<()> {
    let parser = load_parser(config_path)?;
    let ranked = parser.model().classify(text);
    let floor = parser.config().min_confidence;

    println!();
    println!("🏷️  Category probabilities for {:?}", text);
    for classification in ranked.iter().take(top.max(1)) {
        let category = classification.category;
        println!(
            "   {} {:<15} {:>5.1}%",
            category.emoji(),
            category.label(),
            classification.confidence * 100.0
        );
    }

    match ranked.first() {
        Some(best) if best.confidence >= floor => {
            println!("   → {}", best.category);
        }
        _ => println!("   → other (below {:.0}% floor)", floor * 100.0),
    }

    Ok(())
}
