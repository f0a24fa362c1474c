pub const COUNTRY_DIGIT: char = '7';

pub const PREFIX: &str = "+7 ";

pub fn format_phone(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return String::new();
    }
    if !digits.starts_with(COUNTRY_DIGIT) {
        digits.insert(0, COUNTRY_DIGIT);
    }

    let len = digits.len();
    let mut formatted = String::from("+7");
    if len > 1 {
        formatted.push_str(" (");
        formatted.push_str(group(&digits, 1, 4));
    }
    if len >= 5 {
        formatted.push_str(") ");
        formatted.push_str(group(&digits, 4, 7));
    }
    if len >= 8 {
        formatted.push('-');
        formatted.push_str(group(&digits, 7, 9));
    }
    if len >= 10 {
        formatted.push('-');
        formatted.push_str(group(&digits, 9, 11));
    }
    formatted
}

fn group(digits: &str, start: usize, end: usize) -> &str {
    let end = end.min(digits.len());
    &digits[start.min(end)..end]
}

pub fn on_focus(value: &str) -> Option<String> {
    value.is_empty().then(|| PREFIX.to_string())
}

pub fn on_backspace(value: &str) -> Option<String> {
    (value == PREFIX).then(String::new)
}
