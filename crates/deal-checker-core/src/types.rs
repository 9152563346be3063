/// All monetary amounts, in a single unstated currency unit. The evaluation
/// contract requires IEEE-754 division semantics (a zero purchase price
/// yields infinite gross yield rather than an error), so money is plain f64.
pub type Money = f64;

/// Percentages expressed as 0–100 figures (6.0 = 6%), never as fractions.
/// This matches the figures the form layer supplies and renders.
pub type Percent = f64;
