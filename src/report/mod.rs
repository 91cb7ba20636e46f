//! Plain-text rendering of a projection: lifetime tax summary and the
//! year-by-year table. Currency is always whole dollars with en-US grouping.

use crate::core::{ProjectionInput, ProjectionResult};

/// `$1,234,568` style formatting. Rounds half away from zero.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$∞" } else { "-$∞" }.to_string();
    }

    let digits = format!("{:.0}", value.abs().round());
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_summary(input: &ProjectionInput, result: &ProjectionResult) -> String {
    let keep = &result.keep_qualified;
    let roth = &result.convert_to_roth;
    let mut out = String::new();

    out.push_str("=== RMD vs Roth Conversion ===\n");
    out.push_str(&format!(
        "Age: {} (born {}) | Qualified balance: {} | Tax bracket: {}% | Growth: {}%\n",
        input.current_age,
        input.birth_year,
        format_currency(input.qualified_balance),
        input.tax_bracket_percent,
        input.growth_rate_percent,
    ));

    out.push_str("\nKeep qualified account:\n");
    push_line(&mut out, "RMD taxes", keep.rmd_taxes);
    push_line(&mut out, "Taxes on reinvested RMD growth", keep.reinvested_rmd_taxes);
    push_line(&mut out, "Remaining balance taxes", keep.remaining_balance_taxes);
    push_line(&mut out, "Total retirement tax bill", keep.current_retirement_tax_bill);

    out.push_str("\nConvert to Roth:\n");
    push_line(&mut out, "Conversion taxes", roth.conversion_taxes);
    push_line(&mut out, "Future growth taxes", roth.future_growth_taxes);
    push_line(&mut out, "Remaining balance taxes", roth.remaining_balance_taxes);
    push_line(&mut out, "Total tax savings", roth.total_tax_savings);

    out
}

fn push_line(out: &mut String, label: &str, value: f64) {
    out.push_str(&format!("  {label:<32}{:>16}\n", format_currency(value)));
}

const TABLE_HEADERS: [&str; 8] = [
    "Year",
    "Age",
    "RMD Factor",
    "RMD Amount",
    "After-Tax RMD",
    "Qualified Value",
    "Reinvested RMDs",
    "Roth Value",
];

pub fn render_year_table(result: &ProjectionResult) -> String {
    let rows = result
        .years()
        .map(|(qualified, roth)| {
            [
                qualified.year.to_string(),
                qualified.age.to_string(),
                format!("{:.1}", qualified.rmd_factor),
                format_currency(qualified.rmd_amount),
                format_currency(qualified.after_tax_rmd),
                format_currency(qualified.ira_value),
                format_currency(qualified.reinvested_rmds),
                format_currency(roth.roth_value),
            ]
        })
        .collect::<Vec<_>>();

    let mut widths = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, TABLE_HEADERS.iter().copied(), &widths);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:>width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project;

    fn sample_input() -> ProjectionInput {
        ProjectionInput {
            current_age: 65,
            birth_year: 1958,
            qualified_balance: 500_000.0,
            tax_bracket_percent: 24.0,
            growth_rate_percent: 5.0,
            start_year: 2023,
        }
    }

    #[test]
    fn format_currency_groups_and_rounds() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(120_000.0), "$120,000");
        assert_eq!(format_currency(1_234_567.89), "$1,234,568");
        assert_eq!(format_currency(-2_500.5), "-$2,501");
    }

    #[test]
    fn format_currency_handles_non_finite_values() {
        assert_eq!(format_currency(f64::NAN), "$NaN");
        assert_eq!(format_currency(f64::INFINITY), "$∞");
        assert_eq!(format_currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn summary_lists_both_strategies() {
        let input = sample_input();
        let summary = render_summary(&input, &project(&input));

        assert!(summary.contains("Keep qualified account:"));
        assert!(summary.contains("Convert to Roth:"));
        assert!(summary.contains("$500,000"));
        assert!(summary.contains("$120,000"));
        assert!(summary.contains("Total tax savings"));
    }

    #[test]
    fn year_table_has_header_rule_and_one_line_per_year() {
        let input = sample_input();
        let table = render_year_table(&project(&input));
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2 + 26);
        assert!(lines[0].contains("RMD Factor"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].trim_start().starts_with("2023"));
        assert!(lines[2].contains(" 0.0 "));
        assert!(lines[10].contains("26.5"));
    }
}
