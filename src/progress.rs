/// Prints a percent-complete line to the console. Kept off the tracing
/// pipeline so a human watching the run sees a bare number.
pub fn report(current: usize, total: usize) {
    println!("{}%", format_percent(current, total));
}

/// `current/total*100` with two decimals and thousands grouping.
pub fn format_percent(current: usize, total: usize) -> String {
    let percent = current as f64 / total as f64 * 100.0;
    let rendered = format!("{:.2}", percent);
    let (whole, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}.{}", grouped, frac)
}
