//! Key/value tables and JSON documents for command results.

use crate::config::OutputFormat;
use anyhow::Result;
use clmm_positions_engine::prelude::*;
use prettytable::{Table, format, row};
use rust_decimal::Decimal;
use serde_json::{Value, json};

/// A rendered command result, printable as a table or as JSON.
#[derive(Debug, Clone)]
pub struct Report {
    table: Table,
    json: Value,
}

impl Report {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => {
                self.table.printstd();
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&self.json)?);
            }
        }
        Ok(())
    }
}

/// Converts a raw amount into whole tokens.
pub fn ui_amount(raw: u64, token: &TokenInfo) -> Result<Decimal> {
    Ok(TokenAmount::new(raw, token.decimals)?.to_decimal()?)
}

fn key_value_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    for (key, value) in rows {
        table.add_row(row![key, value]);
    }
    table
}

fn amount_rows(
    pair: &Pair,
    labels: (&'static str, &'static str),
    amounts: &AmountPair,
) -> Result<[(&'static str, String); 2]> {
    Ok([
        (labels.0, ui_amount(amounts.amount_a, &pair.token_a())?.to_string()),
        (labels.1, ui_amount(amounts.amount_b, &pair.token_b())?.to_string()),
    ])
}

/// Result of `mint` or `increase`.
pub fn deposit_report(
    pair: &Pair,
    position: Option<&Address>,
    quote: &DepositQuote,
) -> Result<Report> {
    let mut rows = vec![("pair", pair.address().to_string())];
    if let Some(id) = position {
        rows.push(("position", id.to_string()));
    }
    rows.extend([
        ("current price", pair.current_price()?.to_string()),
        ("lower price", pair.price_at_tick(quote.range.lower_tick)?.to_string()),
        ("upper price", pair.price_at_tick(quote.range.upper_tick)?.to_string()),
        ("lower tick", quote.range.lower_tick.to_string()),
        ("upper tick", quote.range.upper_tick.to_string()),
        ("liquidity", quote.liquidity.to_string()),
    ]);
    rows.extend(amount_rows(pair, ("amount A", "amount B"), &quote.amounts)?);
    rows.extend(amount_rows(
        pair,
        ("maximum amount A", "maximum amount B"),
        &quote.max_amounts,
    )?);
    rows.extend(amount_rows(
        pair,
        ("minimum amount A", "minimum amount B"),
        &quote.min_amounts,
    )?);

    Ok(Report {
        table: key_value_table(rows),
        json: json!({
            "pair": pair.address(),
            "position": position,
            "quote": quote,
        }),
    })
}

/// Result of `decrease`.
pub fn withdrawal_report(pair: &Pair, quote: &WithdrawalQuote) -> Result<Report> {
    let mut rows = vec![
        ("pair", pair.address().to_string()),
        ("position", quote.position_id.to_string()),
        ("current price", pair.current_price()?.to_string()),
        ("liquidity to remove", quote.liquidity_to_remove.to_string()),
    ];
    rows.extend(amount_rows(pair, ("amount A", "amount B"), &quote.amounts)?);
    rows.extend(amount_rows(
        pair,
        ("minimum amount A", "minimum amount B"),
        &quote.min_amounts,
    )?);
    rows.extend(amount_rows(
        pair,
        ("maximum amount A", "maximum amount B"),
        &quote.max_amounts,
    )?);

    Ok(Report {
        table: key_value_table(rows),
        json: json!({ "pair": pair.address(), "quote": quote }),
    })
}

/// Result of `position`.
pub fn details_report(pair: &Pair, details: &PositionDetails) -> Result<Report> {
    let position = &details.position;
    let mut rows = vec![
        ("pair", pair.address().to_string()),
        ("position", position.id().to_string()),
        ("owner", position.owner().to_string()),
        ("status", format!("{:?}", details.status)),
        ("fee rate", pair.fee_rate().to_string()),
        ("current price", details.current_price.to_string()),
        ("lower price", details.lower_price.to_string()),
        ("upper price", details.upper_price.to_string()),
        ("liquidity", position.liquidity().to_string()),
    ];
    rows.extend(amount_rows(pair, ("amount A", "amount B"), &details.amounts)?);
    rows.extend(amount_rows(pair, ("fee A", "fee B"), &details.pending_fees)?);

    Ok(Report {
        table: key_value_table(rows),
        json: serde_json::to_value(details)?,
    })
}

/// Result of `claim`.
pub fn fees_report(pair: &Pair, position: &Position, fees: &AmountPair) -> Result<Report> {
    let mut rows = vec![
        ("pair", pair.address().to_string()),
        ("position", position.id().to_string()),
    ];
    rows.extend(amount_rows(pair, ("fee A", "fee B"), fees)?);

    Ok(Report {
        table: key_value_table(rows),
        json: json!({
            "pair": pair.address(),
            "position": position.id(),
            "fee_a": fees.amount_a,
            "fee_b": fees.amount_b,
        }),
    })
}

/// Result of `positions`: one row per position.
pub fn positions_report(valuation: &PositionValuation<'_>, positions: &[&Position]) -> Result<Report> {
    let pair = valuation.pair();
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row![
        "position",
        "owner",
        "lower price",
        "upper price",
        "liquidity",
        "status",
        "amount A",
        "amount B"
    ]);

    let mut entries = Vec::with_capacity(positions.len());
    for position in positions {
        let status = pair.status_of(position)?;
        let amounts = valuation.position_amounts(position)?;
        let lower_price = pair.price_at_tick(position.lower_tick())?;
        let upper_price = pair.price_at_tick(position.upper_tick())?;
        table.add_row(row![
            position.id(),
            position.owner(),
            lower_price,
            upper_price,
            position.liquidity(),
            format!("{status:?}"),
            ui_amount(amounts.amount_a, &pair.token_a())?,
            ui_amount(amounts.amount_b, &pair.token_b())?
        ]);
        entries.push(json!({
            "position": position,
            "status": status,
            "lower_price": lower_price,
            "upper_price": upper_price,
            "amounts": amounts,
        }));
    }

    Ok(Report {
        table,
        json: json!({ "pair": pair.address(), "positions": entries }),
    })
}
