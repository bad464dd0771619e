//! Form validation for credentials and registration input, applied by the
//! shell before anything reaches the gateway. Limits mirror what the
//! backend enforces, so a rejected form never costs a round trip.

use regex::Regex;

#[must_use]
pub fn valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=50).contains(&len)
}

#[must_use]
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 6
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

#[must_use]
pub fn valid_phone(phone: &str) -> bool {
    Regex::new(r"^[0-9+\-]{1,15}$").is_ok_and(|re| re.is_match(phone))
}

#[must_use]
pub fn valid_merchant_name(name: &str) -> bool {
    let len = name.chars().count();
    (1..=100).contains(&len)
}
