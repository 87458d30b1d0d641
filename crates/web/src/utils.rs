// =============================================================================
// Storedesk Web - Utility Functions
// =============================================================================
// Table of Contents:
// 1. DOM Utilities
// 2. Format Utilities
// 3. Validation Utilities
// =============================================================================

// -----------------------------------------------------------------------------
// 1. DOM Utilities
// -----------------------------------------------------------------------------

/// Get the current URL pathname.
pub fn get_pathname() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

// -----------------------------------------------------------------------------
// 2. Format Utilities
// -----------------------------------------------------------------------------

/// Format an amount of won with thousands separators, e.g. `12,000원`.
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}원", sign, grouped)
}

// -----------------------------------------------------------------------------
// 3. Validation Utilities
// -----------------------------------------------------------------------------

/// Validate an email address (basic check).
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validate password strength (min 8 chars).
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// Business registration number: ten digits, dashes optional.
pub fn is_valid_business_number(number: &str) -> bool {
    let digits: Vec<char> = number.chars().filter(|c| *c != '-').collect();
    digits.len() == 10 && digits.iter().all(char::is_ascii_digit)
}

/// Mobile number: 10 or 11 digits starting with `01`, dashes optional.
pub fn is_valid_phone(number: &str) -> bool {
    let digits: String = number.chars().filter(|c| *c != '-').collect();
    (10..=11).contains(&digits.len())
        && digits.starts_with("01")
        && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn won_grouping() {
        assert_eq!(format_won(0), "0원");
        assert_eq!(format_won(950), "950원");
        assert_eq!(format_won(12000), "12,000원");
        assert_eq!(format_won(-1234567), "-1,234,567원");
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("owner@cafe.kr"));
        assert!(!is_valid_email("owner@cafe"));
        assert!(!is_valid_email("@cafe.kr"));
        assert!(!is_valid_email("a@b@c.kr"));
    }

    #[test]
    fn korean_numbers() {
        assert!(is_valid_business_number("123-45-67890"));
        assert!(!is_valid_business_number("123-45-6789"));
        assert!(is_valid_phone("010-1234-5678"));
        assert!(!is_valid_phone("02-123-4567"));
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(is_valid_password("비밀번호입니다다"));
        assert!(!is_valid_password("short"));
    }
}
