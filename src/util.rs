// Display formatting and console helpers shared by the game and idle views.

/// Compact number used across the game page (`1500` -> `1.50K`, `12.5` -> `12.5`).
pub fn format_number(value: f64) -> String {
    if value >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.1}", value)
    }
}

/// Idle demo variant: no trillions, two decimals below a thousand.
pub fn format_idle_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_cost_value(value: f64) -> String {
    if value >= 1000.0 {
        return format_number(value);
    }
    if (value - value.round()).abs() < 0.01 {
        return format!("{}", value.round() as i64);
    }
    format!("{:.2}", value)
}

/// Item prices: grouped whole numbers from ten thousand, compact from a million.
pub fn format_item_value(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value >= 1e6 {
        return format_number(value);
    }
    if value >= 10_000.0 {
        let digits = format!("{}", value.round() as i64);
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        return grouped;
    }
    format!("{:.2}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_rate(rate: f64) -> String {
    let sign = if rate >= 0.0 { "+" } else { "" };
    format!("{}{:.2}/s", sign, rate)
}

pub fn format_cooldown(secs: u64) -> String {
    if secs == 0 {
        return "Ready".to_string();
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cerror(msg: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(msg));
}

// Native builds (tests) have no console to write to.
#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    let _ = msg;
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    let _ = msg;
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cerror(msg: &str) {
    let _ = msg;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_thousands_with_suffix() {
        assert_eq!(format_number(1500.0), "1.50K");
        assert_eq!(format_number(2_500_000.0), "2.50M");
        assert_eq!(format_number(3.2e9), "3.20B");
        assert_eq!(format_number(4e12), "4.00T");
    }

    #[test]
    fn small_values_keep_one_decimal() {
        assert_eq!(format_number(12.46), "12.5");
        assert_eq!(format_number(0.0), "0.0");
    }

    #[test]
    fn idle_numbers_use_two_decimals() {
        assert_eq!(format_idle_number(1500.0), "1.50K");
        assert_eq!(format_idle_number(3.0), "3.00");
        // no trillion suffix in the idle demo
        assert_eq!(format_idle_number(2e12), "2000.00B");
    }

    #[test]
    fn cost_values_drop_needless_decimals() {
        assert_eq!(format_cost_value(15.0), "15");
        assert_eq!(format_cost_value(15.004), "15");
        assert_eq!(format_cost_value(22.5), "22.50");
        assert_eq!(format_cost_value(1500.0), "1.50K");
    }

    #[test]
    fn item_values_group_thousands() {
        assert_eq!(format_item_value(96.0), "96.00");
        assert_eq!(format_item_value(12_345.6), "12 346");
        assert_eq!(format_item_value(987_654.0), "987 654");
        assert_eq!(format_item_value(2_500_000.0), "2.50M");
        assert_eq!(format_item_value(f64::NAN), "0");
    }

    #[test]
    fn rate_percent_and_cooldown() {
        assert_eq!(format_rate(0.1), "+0.10/s");
        assert_eq!(format_rate(-0.25), "-0.25/s");
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_cooldown(0), "Ready");
        assert_eq!(format_cooldown(65), "1:05");
    }
}
