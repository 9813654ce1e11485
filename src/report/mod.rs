//! Text rendering of the aggregate views. Purely a consumer of computed data.

pub mod table;

use colored::Colorize;

use crate::core::services::{AggregateViews, CategorySummary, MonthlyEvolution, MonthlyTotals};
use crate::currency::MoneyFormatter;
use crate::domain::{CategoryRegistry, Purchase};

use table::{Table, TableColumn};

const NAME_WIDTH: usize = 28;

/// Category name prefixed with its icon and tinted with its color.
pub fn category_label(registry: &CategoryRegistry, category: &str) -> String {
    let style = registry.style_of(category);
    let label = format!("{} {}", style.icon, category);
    match style.rgb() {
        Some((r, g, b)) => label.truecolor(r, g, b).to_string(),
        None => label,
    }
}

pub fn render_purchases(
    purchases: &[&Purchase],
    registry: &CategoryRegistry,
    money: &MoneyFormatter,
) -> String {
    if purchases.is_empty() {
        return "No purchases recorded.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Purchase").max_width(NAME_WIDTH),
        TableColumn::right("Price"),
        TableColumn::right("Installments"),
        TableColumn::right("Monthly"),
        TableColumn::left("Category"),
        TableColumn::left("Start"),
        TableColumn::left("End"),
    ]);
    for purchase in purchases {
        table.push_row(vec![
            purchase.name.clone(),
            money.amount(purchase.price),
            purchase.installments.to_string(),
            money.amount(purchase.monthly_payment()),
            category_label(registry, &purchase.category),
            money.date(purchase.start_date),
            money.date(purchase.end_date()),
        ]);
    }
    table.render()
}

pub fn render_monthly(
    monthly: &MonthlyTotals,
    registry: &CategoryRegistry,
    money: &MoneyFormatter,
) -> String {
    if monthly.is_empty() {
        return "No installments scheduled.".to_string();
    }
    let mut sections = Vec::new();
    for (month, detail) in monthly.iter() {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::left("Purchase").max_width(NAME_WIDTH),
            TableColumn::right("Installment"),
            TableColumn::right("Amount"),
        ]);
        for group in &detail.categories {
            for entry in &group.entries {
                table.push_row(vec![
                    category_label(registry, &group.category),
                    entry.purchase_name.clone(),
                    format!("{}/{}", entry.installment_index, entry.installment_count),
                    money.amount(entry.amount),
                ]);
            }
            if group.entries.len() > 1 {
                table.push_row(vec![
                    String::new(),
                    "subtotal".to_string(),
                    String::new(),
                    money.amount(group.total),
                ]);
            }
        }
        let noun = if detail.event_count == 1 {
            "installment"
        } else {
            "installments"
        };
        sections.push(format!(
            "{}: {} ({} {})\n{}",
            money.month(*month).bold(),
            money.amount(detail.total),
            detail.event_count,
            noun,
            table.render()
        ));
    }
    sections.join("\n\n")
}

pub fn render_category_summary(
    summary: &CategorySummary,
    registry: &CategoryRegistry,
    money: &MoneyFormatter,
) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total"),
        TableColumn::right("Share"),
        TableColumn::right("Purchases"),
    ]);
    for row in &summary.rows {
        table.push_row(vec![
            category_label(registry, &row.category),
            money.amount(row.total),
            money.percentage(row.percentage),
            row.purchase_count.to_string(),
        ]);
    }
    let share = if summary.grand_total > 0.0 { 100.0 } else { 0.0 };
    table.push_row(vec![
        "Total".to_string(),
        money.amount(summary.grand_total),
        money.percentage(share),
        summary
            .rows
            .iter()
            .map(|row| row.purchase_count)
            .sum::<usize>()
            .to_string(),
    ]);
    table.render()
}

/// Month-by-category grid; categories that never carry an amount are omitted.
pub fn render_evolution(
    evolution: &MonthlyEvolution,
    registry: &CategoryRegistry,
    money: &MoneyFormatter,
) -> String {
    let active: Vec<&String> = evolution
        .categories
        .iter()
        .filter(|category| {
            evolution
                .series(category)
                .iter()
                .any(|(_, amount)| *amount != 0.0)
        })
        .collect();

    let mut columns = vec![TableColumn::left("Month")];
    columns.extend(
        active
            .iter()
            .map(|category| TableColumn::right(category_label(registry, category))),
    );
    columns.push(TableColumn::right("Total"));

    let mut table = Table::new(columns);
    for (month, total) in evolution.month_totals() {
        let mut row = vec![money.month(month)];
        row.extend(
            active
                .iter()
                .map(|category| money.amount(evolution.amount(month, category))),
        );
        row.push(money.amount(total));
        table.push_row(row);
    }
    table.render()
}

/// Full report: purchase list in display order followed by the three views.
pub fn render_report(
    purchases: &[&Purchase],
    views: &AggregateViews,
    registry: &CategoryRegistry,
    money: &MoneyFormatter,
) -> String {
    [
        ("Purchases", render_purchases(purchases, registry, money)),
        ("Monthly payments", render_monthly(&views.monthly, registry, money)),
        (
            "Debt by category",
            render_category_summary(&views.categories, registry, money),
        ),
        (
            "Monthly evolution",
            render_evolution(&views.evolution, registry, money),
        ),
    ]
    .into_iter()
    .map(|(title, body)| format!("=== {title} ===\n{body}"))
    .collect::<Vec<_>>()
    .join("\n\n")
}
