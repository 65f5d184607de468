use rust_decimal::{Decimal, RoundingStrategy};

const COLONES_SYMBOL: char = '₡';

/// Format an amount in Costa Rican colones, without decimals: `₡15 000`.
pub fn format_colones(amount: &Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{COLONES_SYMBOL}{grouped}")
    } else {
        format!("{COLONES_SYMBOL}{grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}
