//! Currency formatting
//!
//! Amounts are shown the Brazilian way: thousands separated by `.`, cents by
//! `,`, symbol in front ("R$ 1.234,56").

/// Format `amount` with `symbol`, rounded to cents
pub fn format_currency(amount: f64, symbol: &str) -> String {
    if !amount.is_finite() {
        return format!("{} --", symbol);
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let units = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{}{} {},{:02}", sign, symbol, units, cents % 100)
}

/// Format an amount that may not be readable
pub fn format_optional(amount: Option<f64>, symbol: &str) -> String {
    match amount {
        Some(value) => format_currency(value, symbol),
        None => "(inválido)".to_string(),
    }
}

fn group_thousands(mut units: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = units % 1000;
        units /= 1000;
        if units == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(".")
}

/// Wrap an amount in ANSI color by sign
pub fn colored(text: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("\x1b[31m{}\x1b[0m", text)
    } else if amount > 0.0 {
        format!("\x1b[32m{}\x1b[0m", text)
    } else {
        text.to_string()
    }
}
