use engine::PercentageSeries;

/// Keeps amounts exactly representable as `f64`
pub const MAX_AMOUNT_DIGITS: usize = 15;

/// Day index on the x axis, aggregate percentage on the y axis
pub fn cast_as_dataset(series: &PercentageSeries) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .map(|(idx, (_, pct))| (idx as f64, pct))
        .collect()
}

pub fn format_pct(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Two decimal places with `,` thousands separators
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_at(formatted.len() - 3);

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, c) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };

    format!("{}{}{}", sign, grouped, frac_part)
}
