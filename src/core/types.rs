use serde::Serialize;

pub const DEFAULT_GROWTH_RATE_PERCENT: f64 = 5.0;

/// Scalar inputs for one projection. Percentages are whole numbers (`24.0` is 24%).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub current_age: u32,
    pub birth_year: i32,
    pub qualified_balance: f64,
    pub tax_bracket_percent: f64,
    pub growth_rate_percent: f64,
    /// Calendar year of year offset 0.
    pub start_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualifiedYear {
    pub year: i32,
    pub age: u32,
    pub rmd_factor: f64,
    pub rmd_amount: f64,
    pub after_tax_rmd: f64,
    pub ira_value: f64,
    pub reinvested_rmds: f64,
    /// Same balance as `reinvested_rmds`, under the name web clients read.
    pub taxable_account: f64,
    pub taxes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RothYear {
    pub year: i32,
    pub age: u32,
    pub roth_value: f64,
    pub taxes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepQualifiedSummary {
    pub rmd_taxes: f64,
    pub reinvested_rmd_taxes: f64,
    pub remaining_account_taxes: f64,
    pub remaining_reinvested_taxes: f64,
    pub remaining_balance_taxes: f64,
    pub current_retirement_tax_bill: f64,
    pub year_by_year: Vec<QualifiedYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToRothSummary {
    pub conversion_taxes: f64,
    pub future_growth_taxes: f64,
    pub remaining_balance_taxes: f64,
    pub total_tax_savings: f64,
    pub year_by_year: Vec<RothYear>,
}

/// Both strategies side by side. The two `year_by_year` vectors are index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub keep_qualified: KeepQualifiedSummary,
    pub convert_to_roth: ConvertToRothSummary,
}

impl ProjectionResult {
    pub fn years(&self) -> impl Iterator<Item = (&QualifiedYear, &RothYear)> {
        self.keep_qualified
            .year_by_year
            .iter()
            .zip(self.convert_to_roth.year_by_year.iter())
    }
}
