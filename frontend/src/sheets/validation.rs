use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::models::DemoBooking;

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone pattern"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Clone, Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("Name is required.")]
    Name,
    #[error("Enter valid 10-digit phone number.")]
    Phone,
    #[error("Enter valid email address.")]
    Email,
    #[error("Please describe your request in more detail (min 10 chars).")]
    Message,
}

/// Checks a contact form submission, reporting the first problem found.
pub fn validate_booking(booking: &DemoBooking) -> Result<(), BookingError> {
    if booking.name.chars().count() < 2 {
        return Err(BookingError::Name);
    }
    if !PHONE.is_match(&booking.phone) {
        return Err(BookingError::Phone);
    }
    if !EMAIL.is_match(&booking.email) {
        return Err(BookingError::Email);
    }
    if booking.message.chars().count() < 10 {
        return Err(BookingError::Message);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> DemoBooking {
        DemoBooking {
            name: "Meera".to_string(),
            phone: "9876543210".to_string(),
            email: "meera@store.in".to_string(),
            message: "Need a WhatsApp bot for orders".to_string(),
        }
    }

    #[test]
    fn complete_booking_passes() {
        assert_eq!(validate_booking(&valid()), Ok(()));
    }

    #[test]
    fn first_failure_is_reported() {
        let booking = DemoBooking {
            name: "M".to_string(),
            phone: "123".to_string(),
            ..valid()
        };
        assert_eq!(validate_booking(&booking), Err(BookingError::Name));
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        for phone in ["98765 43210", "+919876543210", "987654321", "98765432100", "98765abcde"] {
            let booking = DemoBooking { phone: phone.to_string(), ..valid() };
            assert_eq!(validate_booking(&booking), Err(BookingError::Phone), "{}", phone);
        }
    }

    #[test]
    fn email_needs_user_domain_and_dot() {
        for email in ["meera", "meera@store", "@store.in", "me era@store.in"] {
            let booking = DemoBooking { email: email.to_string(), ..valid() };
            assert_eq!(validate_booking(&booking), Err(BookingError::Email), "{}", email);
        }
    }

    #[test]
    fn short_message_is_rejected() {
        let booking = DemoBooking { message: "help me".to_string(), ..valid() };
        assert_eq!(validate_booking(&booking), Err(BookingError::Message));
    }
}
