use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DealCheckerError;
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// How the expected rent figure is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentFrequency {
    Weekly,
    #[default]
    Monthly,
}

impl FromStr for RentFrequency {
    type Err = DealCheckerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(RentFrequency::Weekly),
            "monthly" => Ok(RentFrequency::Monthly),
            other => Err(DealCheckerError::InvalidInput {
                field: "rentFrequency".into(),
                reason: format!("expected 'weekly' or 'monthly', got '{other}'"),
            }),
        }
    }
}

/// Sharia-compliant financing method selector.
///
/// The form layer supplies this as an open string; the five recognised
/// literals drive the special-case logic, and anything else (including the
/// empty "not yet selected" label) lands in `OtherFinanced` and behaves as a
/// generic financed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinancingMethod {
    /// Partnership-based co-ownership with profit/loss sharing by equity share
    Musharakah,
    /// Lease-to-own: the financier owns the asset and leases it to the investor
    Ijara,
    /// Cost-plus sale: the financier buys and resells at a fixed markup
    Murabaha,
    /// Pooled-investor variant of Musharakah with no institutional financier
    Crowdfunding,
    /// Full cash purchase, no financing
    Cash,
    /// Any unrecognised label; treated as a generic financed method
    OtherFinanced(String),
}

impl FinancingMethod {
    fn from_label(label: &str) -> Self {
        match label {
            "musharakah" => FinancingMethod::Musharakah,
            "ijara" => FinancingMethod::Ijara,
            "murabaha" => FinancingMethod::Murabaha,
            "crowdfunding" => FinancingMethod::Crowdfunding,
            "cash" => FinancingMethod::Cash,
            other => FinancingMethod::OtherFinanced(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FinancingMethod::Musharakah => "musharakah",
            FinancingMethod::Ijara => "ijara",
            FinancingMethod::Murabaha => "murabaha",
            FinancingMethod::Crowdfunding => "crowdfunding",
            FinancingMethod::Cash => "cash",
            FinancingMethod::OtherFinanced(label) => label,
        }
    }

    /// True when the investor funds the full purchase price themselves and no
    /// periodic finance cost applies (cash and equity crowdfunding).
    pub fn is_self_funded(&self) -> bool {
        matches!(self, FinancingMethod::Cash | FinancingMethod::Crowdfunding)
    }

    /// Plain-language explanation of the financing structure, as shown in the
    /// form's help panel.
    pub fn explanation(&self) -> &'static str {
        match self {
            FinancingMethod::Musharakah => {
                "Traditional bank partnership where you and the bank jointly own \
                 the property. You share profits and losses according to ownership \
                 percentage. The bank typically provides 70-80% of the property value."
            }
            FinancingMethod::Ijara => {
                "Islamic lease-to-own arrangement where the bank owns and leases \
                 the property to you"
            }
            FinancingMethod::Murabaha => {
                "Cost-plus financing where the bank purchases and sells the \
                 property to you at an agreed markup"
            }
            FinancingMethod::Crowdfunding => {
                "A form of Musharakah where multiple investors pool funds to \
                 collectively buy a property. Each investor owns a share \
                 proportional to their investment. No bank involvement."
            }
            FinancingMethod::Cash => "Full cash purchase with no financing required",
            FinancingMethod::OtherFinanced(_) => {
                "Select a financing method for more information"
            }
        }
    }
}

impl fmt::Display for FinancingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for FinancingMethod {
    fn from(label: &str) -> Self {
        FinancingMethod::from_label(label)
    }
}

impl FromStr for FinancingMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FinancingMethod::from_label(s))
    }
}

impl Serialize for FinancingMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FinancingMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(FinancingMethod::from_label(&label))
    }
}

// ---------------------------------------------------------------------------
// Deal input
// ---------------------------------------------------------------------------

/// Caller-supplied deal parameters, immutable per evaluation.
///
/// Wire names are camelCase because the form and report layers own that
/// format. The deposit and monthly finance cost are meaningful only for
/// financed methods; for cash/crowdfunding the evaluator ignores the deposit
/// and the caller conventionally supplies a zero finance cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealInput {
    /// Property purchase price
    pub purchase_price: Money,
    /// Expected rent, quoted per `rent_frequency`
    pub expected_rent: Money,
    #[serde(default)]
    pub rent_frequency: RentFrequency,
    /// Upfront equity contribution (financed methods only)
    pub deposit: Money,
    pub financing_method: FinancingMethod,
    /// Periodic payment to the financier
    pub monthly_finance_cost: Money,
    /// Insurance, management, maintenance and similar running costs
    pub monthly_operating_costs: Money,
    /// Expected annual appreciation; zero disables appreciation modelling
    #[serde(default)]
    pub annual_appreciation: Percent,
    // One-off upfront cost breakdown. Their sum is the sole source of the
    // startup-cost figure; there is deliberately no lump-sum field to
    // double-count against.
    #[serde(default)]
    pub stamp_duty: Money,
    #[serde(default)]
    pub legal_fees: Money,
    #[serde(default)]
    pub refurb_costs: Money,
    #[serde(default)]
    pub other_upfront_costs: Money,
}

// ---------------------------------------------------------------------------
// Deal result
// ---------------------------------------------------------------------------

/// Months until the cash invested is recovered from monthly profit.
///
/// `Never` means monthly profit is non-positive and the capital is never
/// recovered. On the wire this is the legacy `-1` sentinel; in Rust it is a
/// tagged value so callers cannot do arithmetic on "never" by mistake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreakEven {
    Never,
    Months(f64),
}

impl BreakEven {
    pub fn is_never(self) -> bool {
        matches!(self, BreakEven::Never)
    }

    pub fn months(self) -> Option<f64> {
        match self {
            BreakEven::Never => None,
            BreakEven::Months(m) => Some(m),
        }
    }
}

impl Serialize for BreakEven {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BreakEven::Never => serializer.serialize_f64(-1.0),
            BreakEven::Months(m) => serializer.serialize_f64(*m),
        }
    }
}

impl<'de> Deserialize<'de> for BreakEven {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        if raw < 0.0 {
            Ok(BreakEven::Never)
        } else {
            Ok(BreakEven::Months(raw))
        }
    }
}

/// Benchmark comparison against leaving the cash in a savings account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    /// Fixed external benchmark, percent per annum
    pub savings_account_return: Percent,
    /// Return on cash minus the savings benchmark
    pub property_vs_savings: Percent,
}

/// Computed deal metrics and the pass/fail verdict.
///
/// Rounding is split by design: the figures the form renders directly are
/// rounded to 2dp here; the rest stay full precision and callers round them
/// for display if desired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealResult {
    /// Rent normalised to monthly regardless of input frequency (2dp)
    pub monthly_rent: Money,
    /// Monthly rent minus finance and operating costs (2dp)
    pub net_monthly_profit: Money,
    /// Total annual return over cash invested, percent (2dp)
    pub return_on_cash: Percent,
    /// Annual rent over purchase price, percent (2dp)
    pub gross_yield: Percent,
    /// Annual profit over purchase price, percent (2dp)
    pub net_yield: Percent,
    /// The investment verdict
    pub deal_stacks: bool,
    /// Method-dependent cash actually invested (full precision)
    pub cash_invested: Money,
    /// Monthly rent over monthly finance cost; None for self-funded deals
    /// and zero finance cost (full precision)
    pub lender_coverage_ratio: Option<f64>,
    pub passes_lender_check: bool,
    /// Net monthly profit annualised (full precision)
    pub annual_profit: Money,
    /// Purchase price times the appreciation percentage (full precision)
    pub annual_appreciation_value: Money,
    /// Annual profit plus appreciation (full precision)
    pub total_annual_return: Money,
    /// Months to recoup the cash invested (full precision)
    pub break_even_months: BreakEven,
    /// Sum of the four detailed upfront costs, deposit excluded (2dp)
    pub total_startup_costs: Money,
    /// Net monthly profit over cash invested, percent (2dp)
    #[serde(rename = "monthlyROI")]
    pub monthly_roi: Percent,
    pub comparison_metrics: ComparisonMetrics,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_financing_method_round_trip() {
        for label in ["musharakah", "ijara", "murabaha", "crowdfunding", "cash"] {
            let method: FinancingMethod = serde_json::from_value(json!(label)).unwrap();
            assert_eq!(serde_json::to_value(&method).unwrap(), json!(label));
            assert!(!matches!(method, FinancingMethod::OtherFinanced(_)));
        }
    }

    #[test]
    fn test_unknown_financing_method_preserves_label() {
        let method: FinancingMethod = serde_json::from_value(json!("helptobuy")).unwrap();
        assert_eq!(method, FinancingMethod::OtherFinanced("helptobuy".into()));
        assert_eq!(serde_json::to_value(&method).unwrap(), json!("helptobuy"));
        assert!(!method.is_self_funded());
    }

    #[test]
    fn test_self_funded_methods() {
        assert!(FinancingMethod::Cash.is_self_funded());
        assert!(FinancingMethod::Crowdfunding.is_self_funded());
        assert!(!FinancingMethod::Musharakah.is_self_funded());
        assert!(!FinancingMethod::Ijara.is_self_funded());
        assert!(!FinancingMethod::Murabaha.is_self_funded());
    }

    #[test]
    fn test_explanation_fallback_for_unrecognised_method() {
        let method = FinancingMethod::OtherFinanced(String::new());
        assert_eq!(
            method.explanation(),
            "Select a financing method for more information"
        );
    }

    #[test]
    fn test_break_even_wire_sentinel() {
        assert_eq!(serde_json::to_value(BreakEven::Never).unwrap(), json!(-1.0));
        assert_eq!(
            serde_json::to_value(BreakEven::Months(256.0)).unwrap(),
            json!(256.0)
        );

        let never: BreakEven = serde_json::from_value(json!(-1.0)).unwrap();
        assert!(never.is_never());
        assert_eq!(never.months(), None);

        let months: BreakEven = serde_json::from_value(json!(36.5)).unwrap();
        assert_eq!(months.months(), Some(36.5));
    }

    #[test]
    fn test_rent_frequency_parsing() {
        assert_eq!("weekly".parse::<RentFrequency>().unwrap(), RentFrequency::Weekly);
        assert_eq!("monthly".parse::<RentFrequency>().unwrap(), RentFrequency::Monthly);
        assert!("fortnightly".parse::<RentFrequency>().is_err());
    }

    #[test]
    fn test_deal_input_wire_names() {
        let input: DealInput = serde_json::from_value(json!({
            "purchasePrice": 200000.0,
            "expectedRent": 1200.0,
            "rentFrequency": "monthly",
            "deposit": 50000.0,
            "financingMethod": "musharakah",
            "monthlyFinanceCost": 800.0,
            "monthlyOperatingCosts": 150.0,
            "annualAppreciation": 3.0,
            "stampDuty": 6000.0,
            "legalFees": 2000.0,
            "refurbCosts": 5000.0,
            "otherUpfrontCosts": 1000.0
        }))
        .unwrap();

        assert_eq!(input.purchase_price, 200000.0);
        assert_eq!(input.financing_method, FinancingMethod::Musharakah);
        assert_eq!(input.rent_frequency, RentFrequency::Monthly);
    }

    #[test]
    fn test_deal_input_optional_breakdown_defaults() {
        // The form omits the advanced breakdown until the user opens it
        let input: DealInput = serde_json::from_value(json!({
            "purchasePrice": 150000.0,
            "expectedRent": 900.0,
            "deposit": 30000.0,
            "financingMethod": "ijara",
            "monthlyFinanceCost": 500.0,
            "monthlyOperatingCosts": 100.0
        }))
        .unwrap();

        assert_eq!(input.rent_frequency, RentFrequency::Monthly);
        assert_eq!(input.annual_appreciation, 0.0);
        assert_eq!(input.stamp_duty, 0.0);
        assert_eq!(input.other_upfront_costs, 0.0);
    }
}
