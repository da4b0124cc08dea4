//! Plain-text views of planning results.

use crate::calendar::WeekBucket;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{
    CategorySpend, PriceChangeAlert, RequirementSummary, SpendSummary, SubscriptionStatistics,
    UpcomingRenewal,
};
use crate::currency::{format_currency, CurrencyCode};

const CURRENT_MARKER: &str = " *";

pub fn week_table(weeks: &[WeekBucket], code: &CurrencyCode) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Pay period"),
        TableColumn::left("Dates"),
        TableColumn::right("Due"),
        TableColumn::right("Required"),
    ]);
    for week in weeks {
        let mut label = week.label();
        if week.is_current_week {
            label.push_str(CURRENT_MARKER);
        }
        table.push_row(vec![
            label,
            format!(
                "{} - {}",
                week.start_date.format("%b %d"),
                week.end_date.format("%b %d")
            ),
            week.subscriptions.len().to_string(),
            format_currency(week.required_amount, code),
        ]);
    }
    table.render()
}

/// Lists what is due in each non-empty week.
pub fn week_details(weeks: &[WeekBucket], code: &CurrencyCode) -> String {
    weeks
        .iter()
        .filter(|week| !week.is_empty())
        .map(|week| {
            let items: Vec<String> = week
                .subscriptions
                .iter()
                .map(|sub| {
                    format!(
                        "  {} {} ({})",
                        sub.next_payment_date,
                        sub.name,
                        format_currency(sub.cost, code)
                    )
                })
                .collect();
            format!("{}\n{}", week.label(), items.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn plan_summary(
    summary: &RequirementSummary,
    weeks: &[WeekBucket],
    code: &CurrencyCode,
) -> String {
    let mut lines = vec![
        format!("Total required: {}", format_currency(summary.total_required, code)),
        format!("Average per week: {}", format_currency(summary.average_weekly, code)),
        format!("Weeks with nothing due: {}", summary.empty_weeks),
    ];
    if let Some(week) = summary.highest_week.and_then(|idx| weeks.get(idx)) {
        lines.push(format!(
            "Highest week: {} ({})",
            week.label(),
            format_currency(week.required_amount, code)
        ));
    }
    lines.join("\n")
}

pub fn statistics_report(
    stats: &SubscriptionStatistics,
    spend: &SpendSummary,
    breakdown: &[CategorySpend],
    code: &CurrencyCode,
) -> String {
    let mut out = format!(
        "Subscriptions: {} total, {} active, {} cancelled, {} watchlist\n\
         Spend: {} / month, {} / week, {} / year",
        stats.total,
        stats.active,
        stats.cancelled,
        stats.watchlist,
        format_currency(spend.monthly, code),
        format_currency(spend.weekly, code),
        format_currency(spend.yearly, code),
    );
    if !breakdown.is_empty() {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Count"),
            TableColumn::right("Monthly"),
        ]);
        for entry in breakdown {
            table.push_row(vec![
                entry.category.clone(),
                entry.count.to_string(),
                format_currency(entry.monthly, code),
            ]);
        }
        out.push_str("\n\n");
        out.push_str(&table.render());
    }
    out
}

pub fn alert_report(
    alerts: &[PriceChangeAlert],
    renewals: &[UpcomingRenewal],
    code: &CurrencyCode,
) -> String {
    let mut lines = Vec::new();
    if alerts.is_empty() {
        lines.push("No recent price changes.".to_string());
    }
    for alert in alerts {
        let direction = if alert.is_increase() { "up" } else { "down" };
        let percent = alert
            .percent_change
            .map(|pct| format!(" ({pct:+.1}%)"))
            .unwrap_or_default();
        lines.push(format!(
            "{} went {} on {}: {} -> {}{}",
            alert.name,
            direction,
            alert.changed_on,
            format_currency(alert.previous_cost, code),
            format_currency(alert.new_cost, code),
            percent
        ));
    }
    if renewals.is_empty() {
        lines.push("No renewals due soon.".to_string());
    }
    for renewal in renewals {
        let when = match renewal.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        lines.push(format!(
            "{} renews {} ({}, {})",
            renewal.name,
            when,
            renewal.due,
            format_currency(renewal.cost, code)
        ));
    }
    lines.join("\n")
}
