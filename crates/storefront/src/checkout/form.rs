//! The typed checkout form and its validation rules.
//!
//! One explicit record with one rule per field, replacing the loose
//! key/value form state of the original client. Input formatters mirror
//! what the payment page did as the user typed: card numbers grouped in
//! blocks of four, expiry auto-slotted to `MM/YY`, PIN codes digits-only.

use std::sync::LazyLock;

use regex::Regex;

use dessert_lab_core::Email;

use super::postal::Locality;

static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{16}$").expect("valid card number regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("valid expiry regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("valid cvv regex"));

/// Length of an Indian postal PIN code.
const PIN_LENGTH: usize = 6;

/// A checkout form field, for inline error display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    CardNumber,
    CardHolder,
    ExpiryDate,
    Cvv,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
}

impl Field {
    /// Stable name for templating / logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardHolder => "cardHolder",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Which field failed.
    pub field: Field,
    /// The inline message shown next to it.
    pub message: String,
}

/// The collected field-level failures of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    /// Whether the pass found no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The message for a specific field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterate the failures in field order of the form.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FormErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The checkout form: card details plus contact information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            card_number: String::new(),
            card_holder: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "India".to_string(),
        }
    }
}

impl PaymentForm {
    /// A fresh form, optionally prefilled with the session user's email.
    #[must_use]
    pub fn prefilled(email: Option<&Email>) -> Self {
        Self {
            email: email.map(ToString::to_string).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Store a card number keystroke, reformatting into blocks of four.
    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number = format_card_number(raw);
    }

    /// Store an expiry keystroke, auto-slotting into `MM/YY`.
    pub fn set_expiry_date(&mut self, raw: &str) {
        self.expiry_date = format_expiry_date(raw);
    }

    /// Store a PIN-code keystroke (digits only, at most six).
    ///
    /// Returns `true` when the code just reached six digits and a postal
    /// lookup should be fired.
    pub fn set_zip_code(&mut self, raw: &str) -> bool {
        self.zip_code = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(PIN_LENGTH)
            .collect();
        self.zip_code.len() == PIN_LENGTH
    }

    /// Fill city and state from a postal lookup result.
    pub fn apply_locality(&mut self, locality: &Locality) {
        self.city = locality.district.clone();
        self.state = locality.state.clone();
    }

    /// Validate the full card payment form: card fields plus contact
    /// fields. An empty result permits submission.
    #[must_use]
    pub fn validate_card(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        let digits: String = self
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !CARD_NUMBER_RE.is_match(&digits) {
            errors.push(Field::CardNumber, "Please enter a valid 16-digit card number");
        }

        if self.card_holder.trim().is_empty() {
            errors.push(Field::CardHolder, "Card holder name is required");
        }

        if !EXPIRY_RE.is_match(&self.expiry_date) {
            errors.push(Field::ExpiryDate, "Please use MM/YY format");
        }

        if !CVV_RE.is_match(&self.cvv) {
            errors.push(Field::Cvv, "CVV must be 3-4 digits");
        }

        self.validate_contact_into(&mut errors);
        errors
    }

    /// Validate only the contact fields (cash-on-delivery path).
    #[must_use]
    pub fn validate_contact(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        self.validate_contact_into(&mut errors);
        errors
    }

    fn validate_contact_into(&self, errors: &mut FormErrors) {
        if Email::parse(self.email.trim()).is_err() {
            errors.push(Field::Email, "Please enter a valid email");
        }

        if self.phone.trim().is_empty() {
            errors.push(Field::Phone, "Phone number is required");
        }

        if self.address.trim().is_empty() {
            errors.push(Field::Address, "Delivery address is required");
        }

        if self.city.trim().is_empty() {
            errors.push(Field::City, "City is required");
        }

        if self.state.trim().is_empty() {
            errors.push(Field::State, "State is required");
        }

        if self.zip_code.len() != PIN_LENGTH || !self.zip_code.chars().all(|c| c.is_ascii_digit()) {
            errors.push(Field::ZipCode, "Valid 6-digit PIN is required");
        }
    }
}

/// Reformat a card number into space-separated blocks of four digits.
///
/// Keeps at most 16 digits; fewer than four digits come back unchanged.
#[must_use]
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(16).collect();
    if digits.len() < 4 {
        return digits;
    }
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reformat an expiry input into `MM/YY`.
#[must_use]
pub fn format_expiry_date(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() >= 2 {
        let (month, year) = digits.split_at(2);
        if year.is_empty() {
            format!("{month}/")
        } else {
            format!("{month}/{year}")
        }
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PaymentForm {
        PaymentForm {
            card_number: "4111 1111 1111 1111".to_string(),
            card_holder: "Jane Doe".to_string(),
            expiry_date: "09/27".to_string(),
            cvv: "123".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            address: "12 Baker Street".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            zip_code: "400001".to_string(),
            country: "India".to_string(),
        }
    }

    #[test]
    fn test_card_number_formatter() {
        assert_eq!(
            format_card_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
        assert_eq!(format_card_number("4111"), "4111");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number("411"), "411");
        // Non-digits are stripped before grouping
        assert_eq!(format_card_number("4111-1111"), "4111 1111");
        // Excess digits are dropped at 16
        assert_eq!(
            format_card_number("41111111111111112222"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_expiry_formatter() {
        assert_eq!(format_expiry_date("0927"), "09/27");
        assert_eq!(format_expiry_date("09"), "09/");
        assert_eq!(format_expiry_date("0"), "0");
        assert_eq!(format_expiry_date("09/27"), "09/27");
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate_card().is_empty());
    }

    #[test]
    fn test_formatted_card_number_accepted_after_stripping() {
        let mut form = valid_form();
        form.set_card_number("4111111111111111");
        assert_eq!(form.card_number, "4111 1111 1111 1111");
        assert!(form.validate_card().get(Field::CardNumber).is_none());
    }

    #[test]
    fn test_fifteen_digit_card_rejected() {
        let mut form = valid_form();
        form.card_number = "4111-1111-1111-111".to_string();
        assert_eq!(
            form.validate_card().get(Field::CardNumber),
            Some("Please enter a valid 16-digit card number")
        );
    }

    #[test]
    fn test_expiry_month_bounds() {
        let mut form = valid_form();
        for bad in ["13/25", "00/25", "9/25", "09-25", "09/2025"] {
            form.expiry_date = bad.to_string();
            assert!(
                form.validate_card().get(Field::ExpiryDate).is_some(),
                "expected {bad} to be rejected"
            );
        }
        for good in ["01/25", "12/99"] {
            form.expiry_date = good.to_string();
            assert!(
                form.validate_card().get(Field::ExpiryDate).is_none(),
                "expected {good} to be accepted"
            );
        }
    }

    #[test]
    fn test_cvv_three_or_four_digits() {
        let mut form = valid_form();
        form.cvv = "12".to_string();
        assert!(form.validate_card().get(Field::Cvv).is_some());
        form.cvv = "1234".to_string();
        assert!(form.validate_card().get(Field::Cvv).is_none());
        form.cvv = "12345".to_string();
        assert!(form.validate_card().get(Field::Cvv).is_some());
    }

    #[test]
    fn test_contact_subset_skips_card_fields() {
        let form = PaymentForm {
            card_number: String::new(),
            card_holder: String::new(),
            expiry_date: String::new(),
            cvv: String::new(),
            ..valid_form()
        };
        assert!(form.validate_contact().is_empty());
        assert!(!form.validate_card().is_empty());
    }

    #[test]
    fn test_zip_keystrokes_and_lookup_trigger() {
        let mut form = PaymentForm::default();
        assert!(!form.set_zip_code("4000"));
        assert_eq!(form.zip_code, "4000");
        assert!(form.set_zip_code("400a001"));
        assert_eq!(form.zip_code, "400001");
    }

    #[test]
    fn test_invalid_email_flagged() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert_eq!(
            form.validate_card().get(Field::Email),
            Some("Please enter a valid email")
        );
    }

    #[test]
    fn test_apply_locality_fills_city_and_state() {
        let mut form = PaymentForm::default();
        form.apply_locality(&Locality {
            district: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
        });
        assert_eq!(form.city, "Mumbai");
        assert_eq!(form.state, "Maharashtra");
    }
}
