/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use tracker_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a point total with thousands separators.
///
/// # Examples
///
/// ```
/// use tracker_core::formatting::format_points;
///
/// assert_eq!(format_points(0), "0");
/// assert_eq!(format_points(12_345), "12,345");
/// ```
pub fn format_points(points: u64) -> String {
    group_thousands(&points.to_string())
}

/// Format an average score with two decimal places.
///
/// # Examples
///
/// ```
/// use tracker_core::formatting::format_average;
///
/// assert_eq!(format_average(4.5), "4.50");
/// assert_eq!(format_average(4.876), "4.88");
/// ```
pub fn format_average(average: f64) -> String {
    format_number(average, 2)
}

/// Format an optional rank as `"#N"`, or a dash when the snapshot predates
/// rank lines.
///
/// # Examples
///
/// ```
/// use tracker_core::formatting::format_rank;
///
/// assert_eq!(format_rank(Some(1)), "#1");
/// assert_eq!(format_rank(None), "—");
/// ```
pub fn format_rank(rank: Option<u32>) -> String {
    match rank {
        Some(r) => format!("#{}", r),
        None => "—".to_string(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
