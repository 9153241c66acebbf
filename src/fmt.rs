use chrono::NaiveDate;

/// Format a float with thousands separators and two decimals: 1,234.56
pub fn amount(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Amount followed by the configured currency unit, e.g. `1,234.56 Rs.`
pub fn money(val: f64, unit: &str) -> String {
    if unit.is_empty() {
        amount(val)
    } else {
        format!("{} {unit}", amount(val))
    }
}

pub fn date(val: Option<NaiveDate>) -> String {
    val.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Horizontal bar scaled so that `max` fills `width` cells.
pub fn bar(val: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || val <= 0.0 {
        return String::new();
    }
    let cells = ((val / max) * width as f64).round() as usize;
    "\u{2588}".repeat(cells.clamp(1, width))
}
