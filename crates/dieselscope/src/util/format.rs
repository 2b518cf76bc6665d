/// Insert thousands separators into a whole number
pub fn format_thousands(value: f64) -> String {
    let abs_value = value.abs().round() as u64;

    let digits = abs_value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted: String = result.chars().rev().collect();

    if value < 0.0 && abs_value > 0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Format billions of litres, e.g. `4.23`
pub fn format_billions(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a fraction as a signed whole percentage, e.g. `-40%`
pub fn format_change(fraction: f64) -> String {
    format!("{:+.0}%", fraction * 100.0)
}

/// Format a percent value with one decimal, e.g. `3.9%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a percent value with sign and one decimal, e.g. `+2.4%`
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

/// Format a signed integer percentage parameter, e.g. `+5%`
pub fn format_param(percent: i32) -> String {
    format!("{:+}%", percent)
}
