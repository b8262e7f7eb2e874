use std::io::{self, Write};

use stockboard_core::format::{
    axis_currency, compact_currency, decimal, grouped_integer, percent, signed_percent,
    NOT_AVAILABLE,
};

use crate::cli::OutputFormat;
use crate::commands::{
    CommandData, CredentialView, DashboardView, KeyAction, SeriesPoints, SeriesView,
};
use crate::error::CliError;
use crate::metadata::Envelope;

pub fn render(
    envelope: &Envelope<CommandData>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(&mut out, envelope)?,
    }
    out.flush()?;
    Ok(())
}

pub fn write_table(out: &mut impl Write, envelope: &Envelope<CommandData>) -> io::Result<()> {
    match &envelope.data {
        CommandData::Dashboard(view) => write_dashboard(out, view)?,
        CommandData::Credential(view) => write_credential(out, view)?,
        CommandData::None => {}
    }

    for error in &envelope.errors {
        writeln!(out, "error: {} ({})", error.message, error.code)?;
    }
    Ok(())
}

fn write_dashboard(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    let summary = &view.summary;
    let name = summary.name.as_deref().unwrap_or(&summary.symbol);
    let exchange = summary.exchange.as_deref().unwrap_or(NOT_AVAILABLE);
    writeln!(out, "{name}")?;
    writeln!(out, "{} | {exchange}", summary.symbol)?;
    writeln!(
        out,
        "${:.2}  {}{:.2} ({})",
        summary.latest_price,
        if summary.price_change >= 0.0 { "+" } else { "" },
        summary.price_change,
        signed_percent(summary.price_change_percent),
    )?;

    write_group(
        out,
        "Valuation",
        &[
            ("Market Cap", compact_currency(summary.market_cap)),
            ("P/E Ratio (TTM)", decimal(summary.pe_ratio)),
            ("Price to Sales (TTM)", decimal(summary.price_to_sales)),
            ("EV to EBITDA", decimal(summary.ev_to_ebitda)),
            ("Price to Book", decimal(summary.price_to_book)),
        ],
    )?;
    write_group(
        out,
        "Margins & Growth",
        &[
            ("Profit Margin", percent(summary.profit_margin)),
            ("Operating Margin (TTM)", percent(summary.operating_margin)),
            ("Quarterly Revenue (YoY)", percent(summary.quarterly_revenue_growth)),
        ],
    )?;
    write_group(
        out,
        "Balance & Dividend",
        &[
            ("Cash", compact_currency(summary.cash)),
            ("Debt", compact_currency(summary.debt)),
            ("Net", compact_currency(summary.net_cash)),
            ("Dividend Yield", percent(summary.dividend_yield)),
            ("Payout Ratio", percent(summary.payout_ratio)),
            (
                "Dividend Date",
                summary
                    .dividend_date
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            ),
        ],
    )?;

    for series in &view.series {
        write_series(out, view, series)?;
    }

    write_insider_table(out, view)
}

fn write_group(out: &mut impl Write, title: &str, rows: &[(&str, String)]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    for (label, value) in rows {
        writeln!(out, "  {label:<26}{value:>14}")?;
    }
    Ok(())
}

fn write_series(out: &mut impl Write, view: &DashboardView, series: &SeriesView) -> io::Result<()> {
    writeln!(out)?;
    match &series.points {
        SeriesPoints::Price(points) => {
            writeln!(
                out,
                "{} ({})  {}",
                series.title,
                view.range,
                signed_percent(view.range_price_change_percent)
            )?;
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return writeln!(out, "  no data");
            };
            let low = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
            let high = points.iter().map(|p| p.price).fold(f64::NEG_INFINITY, f64::max);
            writeln!(out, "  {} closes, {} to {}", points.len(), first.date, last.date)?;
            writeln!(
                out,
                "  first ${:.2}  last ${:.2}  low ${low:.2}  high ${high:.2}",
                first.price, last.price
            )?;
        }
        SeriesPoints::Financial(points) => {
            writeln!(out, "{} ({})", series.title, view.range)?;
            if points.is_empty() {
                writeln!(out, "  no data")?;
            }
            for point in points {
                let value = match (point.value, series.key) {
                    (None, _) => NOT_AVAILABLE.to_owned(),
                    (Some(value), "net_margin") => format!("{value:.2}%"),
                    (Some(value), "eps" | "dividends_per_share") => format!("${value:.2}"),
                    (Some(value), "shares_outstanding") => grouped_integer(value),
                    (Some(value), _) => axis_currency(value),
                };
                writeln!(out, "  {:<9}{value:>16}", point.date.to_string())?;
            }
        }
        SeriesPoints::CashAndDebt(points) => {
            writeln!(out, "{} ({})", series.title, view.range)?;
            writeln!(out, "  {:<9}{:>16}{:>16}", "", "cash", "debt")?;
            for point in points {
                writeln!(
                    out,
                    "  {:<9}{:>16}{:>16}",
                    point.date.to_string(),
                    axis_currency(point.cash),
                    axis_currency(point.debt)
                )?;
            }
        }
        SeriesPoints::ReturnOfCapital(points) => {
            writeln!(out, "{} ({})", series.title, view.range)?;
            writeln!(out, "  {:<9}{:>16}{:>16}", "", "buybacks", "dividends")?;
            for point in points {
                writeln!(
                    out,
                    "  {:<9}{:>16}{:>16}",
                    point.date.to_string(),
                    axis_currency(point.buybacks),
                    axis_currency(point.dividends)
                )?;
            }
        }
    }
    Ok(())
}

fn write_insider_table(out: &mut impl Write, view: &DashboardView) -> io::Result<()> {
    let insider = &view.insider;
    writeln!(out)?;
    writeln!(out, "Recent Insider Buys")?;
    if insider.total_items == 0 {
        return writeln!(out, "  No recent insider market buys reported for this stock.");
    }

    writeln!(
        out,
        "  {:<28}{:<28}{:<12}{:>14}{:>16}",
        "Insider Name", "Title", "Date", "Shares", "Value"
    )?;
    for transaction in &insider.transactions {
        writeln!(
            out,
            "  {:<28}{:<28}{:<12}{:>14}{:>16}",
            truncate(&transaction.name, 27),
            truncate(&transaction.title, 27),
            transaction.date.to_string(),
            grouped_integer(transaction.shares as f64),
            format!("${}", grouped_integer(transaction.value)),
        )?;
    }
    writeln!(
        out,
        "  Page {} of {} ({} buys)",
        insider.page, insider.total_pages, insider.total_items
    )
}

fn write_credential(out: &mut impl Write, view: &CredentialView) -> io::Result<()> {
    match view.action {
        KeyAction::Set => writeln!(out, "API key saved to {}", view.store_path)?,
        KeyAction::Clear => writeln!(out, "API key removed from {}", view.store_path)?,
        KeyAction::Show => {}
    }
    match (&view.masked_key, view.source) {
        (Some(masked), Some(source)) => {
            let source = serde_json::to_value(source)
                .ok()
                .and_then(|value| value.as_str().map(str::to_owned))
                .unwrap_or_default();
            writeln!(out, "key: {masked} (from {source})")
        }
        _ if view.action == KeyAction::Show => writeln!(out, "no API key configured"),
        _ => Ok(()),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut shortened: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
