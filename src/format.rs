use crate::constants::MISSING_VALUE;

/// `NT$12,345`, or `—` when the amount is unknown. Halves round to even.
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(n) if n.is_finite() => format!("NT${}", group_thousands(n.round_ties_even() as i64)),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Fraction rendered as a whole percentage, or `—`.
pub fn percent(ratio: Option<f64>) -> String {
    match ratio {
        Some(p) if p.is_finite() => format!("{}%", (p * 100.0).round_ties_even() as i64),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Whole years print without a fraction (`5 年`), others as given (`2.5 年`).
pub fn years(value: Option<f64>) -> String {
    match value {
        Some(n) if n.is_finite() => format!("{} 年", n),
        _ => MISSING_VALUE.to_string(),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
