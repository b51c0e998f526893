//! Display formatting for currency, counts and areas

/// Scale a rupee amount to crore / lakh / thousand with one decimal;
/// amounts under a thousand are shown whole.
pub fn format_currency_scale(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1e7 {
        format!("{}₹{:.1}Cr", sign, magnitude / 1e7)
    } else if magnitude >= 1e5 {
        format!("{}₹{:.1}L", sign, magnitude / 1e5)
    } else if magnitude >= 1e3 {
        format!("{}₹{:.1}K", sign, magnitude / 1e3)
    } else {
        format!("{}₹{:.0}", sign, magnitude)
    }
}

/// Round to an integer and group digits the Indian way (`12,34,567`)
pub fn format_indian_number(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}{},{}", sign, groups.join(","), tail)
}

pub fn format_area(area: f64) -> String {
    if area >= 1000.0 {
        format!("{:.1}K sq yd", area / 1000.0)
    } else {
        format!("{} sq yd", format_indian_number(area))
    }
}

/// One decimal with an explicit sign; `None` renders as `n/a`
pub fn format_percent(change: Option<f64>) -> String {
    match change {
        Some(value) if value >= 0.0 => format!("+{:.1}%", value),
        Some(value) => format!("{:.1}%", value),
        None => "n/a".to_string(),
    }
}
