use super::rmd::{projection_years, rmd_factor, rmd_start_age};
use super::types::{
    ConvertToRothSummary, KeepQualifiedSummary, ProjectionInput, ProjectionResult, QualifiedYear,
    RothYear,
};

#[derive(Debug)]
struct Balances {
    ira: f64,
    reinvested_rmds: f64,
    roth: f64,
}

impl Balances {
    fn apply_growth(&mut self, growth_rate: f64) {
        self.ira *= 1.0 + growth_rate;
        self.reinvested_rmds *= 1.0 + growth_rate;
        self.roth *= 1.0 + growth_rate;
    }
}

#[derive(Debug, Default)]
struct TaxTotals {
    rmd_taxes: f64,
    reinvested_rmd_taxes: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct RmdOutcome {
    factor: f64,
    amount: f64,
    tax: f64,
    after_tax: f64,
}

/// Projects the keep-qualified and convert-to-Roth strategies year by year.
///
/// No input is validated: negative balances, zero or negative growth and ages
/// past the factor table all flow straight through the arithmetic.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    let growth_rate = input.growth_rate_percent / 100.0;
    let tax_rate = input.tax_bracket_percent / 100.0;
    let years = projection_years(input.current_age);
    let start_age = rmd_start_age(input.birth_year);

    let conversion_tax = input.qualified_balance * tax_rate;
    let mut balances = Balances {
        ira: input.qualified_balance,
        reinvested_rmds: 0.0,
        roth: input.qualified_balance - conversion_tax,
    };
    let mut totals = TaxTotals::default();

    let mut qualified_years = Vec::with_capacity(years as usize + 1);
    let mut roth_years = Vec::with_capacity(years as usize + 1);

    for year_offset in 0..=years {
        let age = input.current_age + year_offset;
        let year = input.start_year.saturating_add(year_offset as i32);

        balances.apply_growth(growth_rate);

        let rmd = if age >= start_age {
            take_rmd(&mut balances, age, tax_rate)
        } else {
            RmdOutcome::default()
        };
        totals.rmd_taxes += rmd.tax;

        let reinvested_growth = balances.reinvested_rmds * growth_rate;
        let reinvested_tax = reinvested_growth * (tax_rate / 2.0);
        totals.reinvested_rmd_taxes += reinvested_tax;

        qualified_years.push(QualifiedYear {
            year,
            age,
            rmd_factor: rmd.factor,
            rmd_amount: rmd.amount,
            after_tax_rmd: rmd.after_tax,
            ira_value: balances.ira,
            reinvested_rmds: balances.reinvested_rmds,
            taxable_account: balances.reinvested_rmds,
            taxes: rmd.tax + reinvested_tax,
        });

        roth_years.push(RothYear {
            year,
            age,
            roth_value: balances.roth,
            taxes: if year_offset == 0 { conversion_tax } else { 0.0 },
        });
    }

    let remaining_account_taxes = balances.ira * tax_rate;
    let remaining_reinvested_taxes = balances.reinvested_rmds * (tax_rate / 2.0);
    let current_retirement_tax_bill = totals.rmd_taxes
        + totals.reinvested_rmd_taxes
        + remaining_account_taxes
        + remaining_reinvested_taxes;

    ProjectionResult {
        keep_qualified: KeepQualifiedSummary {
            rmd_taxes: totals.rmd_taxes,
            reinvested_rmd_taxes: totals.reinvested_rmd_taxes,
            remaining_account_taxes,
            remaining_reinvested_taxes,
            remaining_balance_taxes: remaining_account_taxes + remaining_reinvested_taxes,
            current_retirement_tax_bill,
            year_by_year: qualified_years,
        },
        convert_to_roth: ConvertToRothSummary {
            conversion_taxes: conversion_tax,
            future_growth_taxes: 0.0,
            remaining_balance_taxes: 0.0,
            total_tax_savings: current_retirement_tax_bill - conversion_tax,
            year_by_year: roth_years,
        },
    }
}

fn take_rmd(balances: &mut Balances, age: u32, tax_rate: f64) -> RmdOutcome {
    let factor = rmd_factor(age);
    let amount = balances.ira / factor;
    let tax = amount * tax_rate;
    let after_tax = amount - tax;

    balances.ira -= amount;
    balances.reinvested_rmds += after_tax;

    RmdOutcome {
        factor,
        amount,
        tax,
        after_tax,
    }
}
