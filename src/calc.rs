// Copyright (c) TMT Labs.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Closed-form financial calculators. Pure `f64` math, no store access:
//! the compounding formulas here have no business touching the ledger's
//! decimal arithmetic.

use serde::Serialize;

/// Standard fixed-rate amortization: `M = P·i·(1+i)^n / ((1+i)^n − 1)`.
/// A zero rate degenerates to straight-line `P/n`.
pub fn mortgage_payment(principal: f64, monthly_rate: f64, num_payments: u32) -> f64 {
    if monthly_rate == 0.0 {
        return principal / f64::from(num_payments);
    }
    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    principal * (monthly_rate * growth) / (growth - 1.0)
}

#[derive(Debug, Clone)]
pub struct RefinanceInputs {
    pub current_balance: f64,
    pub original_term_years: u32,
    pub original_rate_pct: f64,
    pub new_rate_pct: f64,
    pub new_term_years: u32,
    pub refinance_costs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefinanceComparison {
    pub original_payment: f64,
    pub new_payment: f64,
    pub monthly_savings: f64,
    pub total_interest_saved: f64,
    /// `f64::INFINITY` when there are no monthly savings to recoup the
    /// closing costs.
    pub breakeven_months: f64,
}

/// Compare keeping the current loan against refinancing it. Closing
/// costs are rolled into the refinanced principal. The interest-saved
/// figure is an estimate that treats the current balance as the
/// remaining principal on both sides.
pub fn compare_refinance(inputs: &RefinanceInputs) -> RefinanceComparison {
    let original_n = inputs.original_term_years * 12;
    let new_n = inputs.new_term_years * 12;

    let original_payment = mortgage_payment(
        inputs.current_balance,
        inputs.original_rate_pct / 100.0 / 12.0,
        original_n,
    );
    let new_payment = mortgage_payment(
        inputs.current_balance + inputs.refinance_costs,
        inputs.new_rate_pct / 100.0 / 12.0,
        new_n,
    );
    let monthly_savings = original_payment - new_payment;

    let total_interest_new =
        new_payment * f64::from(new_n) - inputs.current_balance - inputs.refinance_costs;
    let total_interest_original =
        original_payment * f64::from(original_n) - inputs.current_balance;
    let total_interest_saved = total_interest_original - total_interest_new;

    let breakeven_months = if monthly_savings > 0.0 {
        inputs.refinance_costs / monthly_savings
    } else {
        f64::INFINITY
    };

    RefinanceComparison {
        original_payment,
        new_payment,
        monthly_savings,
        total_interest_saved,
        breakeven_months,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IraProjection {
    pub projected_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}

/// Year-by-year compounding: grow the balance at the annual rate, then
/// add twelve monthly contributions compounded to year end.
pub fn project_ira(
    current_balance: f64,
    annual_contribution: f64,
    annual_rate_pct: f64,
    years: u32,
) -> IraProjection {
    let annual_rate = annual_rate_pct / 100.0;
    let monthly_rate = annual_rate / 12.0;
    let monthly_contribution = annual_contribution / 12.0;

    let mut balance = current_balance;
    let mut total_contributions = 0.0;
    for _ in 0..years {
        balance *= 1.0 + annual_rate;
        let contributions_fv = if monthly_rate == 0.0 {
            annual_contribution
        } else {
            monthly_contribution * (((1.0 + monthly_rate).powi(12) - 1.0) / monthly_rate)
        };
        balance += contributions_fv;
        total_contributions += annual_contribution;
    }

    IraProjection {
        projected_balance: balance,
        total_contributions,
        total_interest: balance - current_balance - total_contributions,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RetirementScenario {
    pub annual_rate_pct: f64,
    pub nominal_balance: f64,
    /// Nominal balance deflated to today's dollars.
    pub real_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetirementProjection {
    pub years: u32,
    pub inflation_rate_pct: f64,
    pub scenarios: Vec<RetirementScenario>,
}

/// Three-point sensitivity sweep around the expected return (−1 %, base,
/// +1 %, floored at zero), each deflated by a fixed annual inflation
/// rate.
pub fn project_retirement(
    current_balance: f64,
    annual_contribution: f64,
    annual_rate_pct: f64,
    inflation_rate_pct: f64,
    years: u32,
) -> RetirementProjection {
    let deflator = (1.0 + inflation_rate_pct / 100.0).powi(years as i32);
    let scenarios = [annual_rate_pct - 1.0, annual_rate_pct, annual_rate_pct + 1.0]
        .into_iter()
        .map(|rate| {
            let rate = rate.max(0.0);
            let nominal =
                project_ira(current_balance, annual_contribution, rate, years).projected_balance;
            RetirementScenario {
                annual_rate_pct: rate,
                nominal_balance: nominal,
                real_balance: nominal / deflator,
            }
        })
        .collect();

    RetirementProjection {
        years,
        inflation_rate_pct,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mortgage_payment_reference_point() {
        // 200k at 6% over 30 years.
        let payment = mortgage_payment(200_000.0, 0.06 / 12.0, 360);
        assert!((payment - 1199.10).abs() < 0.01, "got {payment}");
    }

    #[test]
    fn mortgage_payment_zero_rate_is_straight_line() {
        assert_eq!(mortgage_payment(120_000.0, 0.0, 120), 1000.0);
    }

    #[test]
    fn refinance_breakeven_is_costs_over_savings() {
        let cmp = compare_refinance(&RefinanceInputs {
            current_balance: 200_000.0,
            original_term_years: 30,
            original_rate_pct: 6.0,
            new_rate_pct: 4.0,
            new_term_years: 30,
            refinance_costs: 4000.0,
        });
        assert!(cmp.monthly_savings > 0.0);
        assert!(cmp.breakeven_months.is_finite());
        assert!((cmp.breakeven_months * cmp.monthly_savings - 4000.0).abs() < 1e-6);
    }

    #[test]
    fn refinance_breakeven_never_when_rate_goes_up() {
        let cmp = compare_refinance(&RefinanceInputs {
            current_balance: 200_000.0,
            original_term_years: 30,
            original_rate_pct: 4.0,
            new_rate_pct: 8.0,
            new_term_years: 30,
            refinance_costs: 4000.0,
        });
        assert!(cmp.monthly_savings < 0.0);
        assert!(cmp.breakeven_months.is_infinite());
    }

    #[test]
    fn ira_zero_rate_is_plain_accumulation() {
        let p = project_ira(1000.0, 6000.0, 0.0, 10);
        assert!((p.projected_balance - 61_000.0).abs() < 1e-9);
        assert_eq!(p.total_contributions, 60_000.0);
        assert!(p.total_interest.abs() < 1e-9);
    }

    #[test]
    fn ira_one_year_growth_matches_hand_calc() {
        // 1000 * 1.07 plus 500/month compounded at 7%/12 for a year.
        let p = project_ira(1000.0, 6000.0, 7.0, 1);
        let monthly = 0.07 / 12.0;
        let fv = 500.0 * (((1.0f64 + monthly).powi(12) - 1.0) / monthly);
        assert!((p.projected_balance - (1070.0 + fv)).abs() < 1e-9);
    }

    #[test]
    fn retirement_sweep_orders_scenarios_and_deflates() {
        let p = project_retirement(50_000.0, 6000.0, 7.0, 3.0, 20);
        assert_eq!(p.scenarios.len(), 3);
        assert_eq!(p.scenarios[0].annual_rate_pct, 6.0);
        assert_eq!(p.scenarios[1].annual_rate_pct, 7.0);
        assert_eq!(p.scenarios[2].annual_rate_pct, 8.0);
        assert!(p.scenarios[0].nominal_balance < p.scenarios[1].nominal_balance);
        assert!(p.scenarios[1].nominal_balance < p.scenarios[2].nominal_balance);
        for s in &p.scenarios {
            assert!(s.real_balance < s.nominal_balance);
        }
    }

    #[test]
    fn retirement_sweep_floors_negative_rates() {
        let p = project_retirement(50_000.0, 6000.0, 0.5, 3.0, 20);
        assert_eq!(p.scenarios[0].annual_rate_pct, 0.0);
    }
}
