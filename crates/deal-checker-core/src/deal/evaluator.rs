use crate::deal::types::{BreakEven, ComparisonMetrics, DealInput, DealResult, RentFrequency};
use crate::types::Percent;

/// Minimum gross yield for a deal to stack, percent.
const MIN_GROSS_YIELD: Percent = 6.0;

/// Minimum net yield for a deal to stack, percent.
const MIN_NET_YIELD: Percent = 4.0;

/// Lender convention: rent must cover at least 145% of the finance cost.
const LENDER_COVERAGE_THRESHOLD: f64 = 1.45;

/// External benchmark: annual return on an ordinary savings account, percent.
const SAVINGS_ACCOUNT_RETURN: Percent = 2.0;

const WEEKS_PER_YEAR: f64 = 52.0;
const MONTHS_PER_YEAR: f64 = 12.0;

/// Round half away from zero to 2 decimal places on the scaled integer.
fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Evaluate a deal: transform the input record into the full set of computed
/// metrics and the stacks/doesn't-stack verdict.
///
/// Pure and total: no I/O, no error path, bit-identical output for identical
/// input. Out-of-range figures (negative amounts, zero purchase price) are
/// not rejected here; yields degrade to IEEE infinities on a zero purchase
/// price and the validator is responsible for keeping such inputs out of
/// production use. Cash and crowdfunding deals conventionally carry a zero
/// monthly finance cost; whatever value is supplied is used as-is.
pub fn evaluate_deal(input: &DealInput) -> DealResult {
    // --- Normalise rent to monthly ---
    let monthly_rent = match input.rent_frequency {
        RentFrequency::Weekly => input.expected_rent * WEEKS_PER_YEAR / MONTHS_PER_YEAR,
        RentFrequency::Monthly => input.expected_rent,
    };

    // --- Upfront costs ---
    // The detailed breakdown is the sole source of the startup-cost figure;
    // the deposit is equity, not a cost, and is never added here.
    let detailed_upfront =
        input.stamp_duty + input.legal_fees + input.refurb_costs + input.other_upfront_costs;
    let total_startup_costs = detailed_upfront;

    // --- Cash invested ---
    // Self-funded deals put the whole price in; financed deals only the
    // equity slice. The financed balance is not cash invested.
    let cash_invested = if input.financing_method.is_self_funded() {
        input.purchase_price + detailed_upfront
    } else {
        input.deposit + detailed_upfront
    };

    // --- Monthly and annual profit ---
    let net_monthly_profit =
        monthly_rent - input.monthly_finance_cost - input.monthly_operating_costs;
    let annual_rent = monthly_rent * MONTHS_PER_YEAR;
    let annual_profit = net_monthly_profit * MONTHS_PER_YEAR;

    // --- Appreciation ---
    let annual_appreciation_value = input.purchase_price * (input.annual_appreciation / 100.0);
    let total_annual_return = annual_profit + annual_appreciation_value;

    // --- Yields ---
    // Raw IEEE division: a zero purchase price yields ±infinity (or NaN),
    // an accepted degenerate output rather than an error.
    let gross_yield = (annual_rent / input.purchase_price) * 100.0;
    let net_yield = (annual_profit / input.purchase_price) * 100.0;

    // --- Returns on cash ---
    // Zero cash invested would read as infinite ROI; suppressed to 0 so the
    // degenerate case cannot corrupt the verdict.
    let return_on_cash = if cash_invested > 0.0 {
        (total_annual_return / cash_invested) * 100.0
    } else {
        0.0
    };
    let monthly_roi = if cash_invested > 0.0 {
        (net_monthly_profit / cash_invested) * 100.0
    } else {
        0.0
    };

    // --- Lender coverage ---
    // Not applicable to self-funded deals or a zero finance cost; those
    // auto-pass the check.
    let lender_coverage_ratio =
        if input.financing_method.is_self_funded() || input.monthly_finance_cost == 0.0 {
            None
        } else {
            Some(monthly_rent / input.monthly_finance_cost)
        };
    let passes_lender_check = match lender_coverage_ratio {
        None => true,
        Some(ratio) => ratio >= LENDER_COVERAGE_THRESHOLD,
    };

    // --- Break-even ---
    let break_even_months = if net_monthly_profit > 0.0 {
        BreakEven::Months(cash_invested / net_monthly_profit)
    } else {
        BreakEven::Never
    };

    // --- Savings comparison ---
    let property_vs_savings = return_on_cash - SAVINGS_ACCOUNT_RETURN;

    // --- Verdict ---
    // Every threshold is hard; one failing condition fails the deal.
    let deal_stacks = input.purchase_price > 0.0
        && net_monthly_profit > 0.0
        && gross_yield >= MIN_GROSS_YIELD
        && net_yield >= MIN_NET_YIELD
        && passes_lender_check;

    DealResult {
        monthly_rent: round2(monthly_rent),
        net_monthly_profit: round2(net_monthly_profit),
        return_on_cash: round2(return_on_cash),
        gross_yield: round2(gross_yield),
        net_yield: round2(net_yield),
        deal_stacks,
        cash_invested,
        lender_coverage_ratio,
        passes_lender_check,
        annual_profit,
        annual_appreciation_value,
        total_annual_return,
        break_even_months,
        total_startup_costs: round2(total_startup_costs),
        monthly_roi: round2(monthly_roi),
        comparison_metrics: ComparisonMetrics {
            savings_account_return: SAVINGS_ACCOUNT_RETURN,
            property_vs_savings: round2(property_vs_savings),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
