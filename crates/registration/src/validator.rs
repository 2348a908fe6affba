use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use customerhub_core::{FormField, RegistrationForm};

// Structural check only: something@something.something
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

const MIN_PASSWORD_LEN: usize = 6;

/// Length in UTF-16 code units, the unit browsers count form input in
pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Field → message. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub(crate) fn remove(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in self.iter() {
            writeln!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

/// Check every rule; all failures are reported together.
pub fn validate(form: &RegistrationForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.full_name.trim().is_empty() {
        errors.insert(FormField::FullName, "Full name is required");
    }

    if form.email.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required");
    } else if !EMAIL_RE.is_match(&form.email) {
        errors.insert(FormField::Email, "Email is invalid");
    }

    if form.phone_number.trim().is_empty() {
        errors.insert(FormField::PhoneNumber, "Phone number is required");
    } else if !PHONE_RE.is_match(&form.phone_number) {
        errors.insert(FormField::PhoneNumber, "Phone number must be 10 digits");
    }

    if form.gender.is_empty() {
        errors.insert(FormField::Gender, "Gender is required");
    }

    if form.date_of_birth.is_empty() {
        errors.insert(FormField::DateOfBirth, "Date of birth is required");
    }

    if form.address.trim().is_empty() {
        errors.insert(FormField::Address, "Address is required");
    }

    if form.password.is_empty() {
        errors.insert(FormField::Password, "Password is required");
    } else if utf16_len(&form.password) < MIN_PASSWORD_LEN {
        errors.insert(FormField::Password, "Password must be at least 6 characters");
    }

    if form.password != form.confirm_password {
        errors.insert(FormField::ConfirmPassword, "Passwords do not match");
    }

    if form.latitude.is_empty() || form.longitude.is_empty() {
        errors.insert(
            FormField::Location,
            "Location is required. Please click 'Get Location'",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Asha Rao".into(),
            email: "asha@example.com".into(),
            phone_number: "9876543210".into(),
            gender: "female".into(),
            date_of_birth: "1990-05-15".into(),
            address: "12 MG Road, Bengaluru".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            latitude: "12.97160000".into(),
            longitude: "77.59460000".into(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate(&RegistrationForm::default());
        // confirmPassword matches the (empty) password, so it is the only
        // field without an error.
        for field in FormField::ALL {
            assert_eq!(
                errors.contains(field),
                field != FormField::ConfirmPassword,
                "{}",
                field
            );
        }
        assert_eq!(errors.get(FormField::FullName), Some("Full name is required"));
        assert_eq!(errors.get(FormField::Password), Some("Password is required"));
        assert_eq!(
            errors.get(FormField::Location),
            Some("Location is required. Please click 'Get Location'")
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let mut form = valid_form();
        form.full_name = "   ".into();
        form.address = "\t\n".into();
        form.email = "  ".into();
        form.phone_number = " ".into();
        let errors = validate(&form);
        assert_eq!(errors.get(FormField::FullName), Some("Full name is required"));
        assert_eq!(errors.get(FormField::Address), Some("Address is required"));
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert_eq!(errors.get(FormField::PhoneNumber), Some("Phone number is required"));
    }

    #[test]
    fn test_email_shape() {
        let mut form = valid_form();
        for bad in ["asha", "asha@example", "@example.com", "asha@.com", "a sha@example com"] {
            form.email = bad.into();
            assert_eq!(
                validate(&form).get(FormField::Email),
                Some("Email is invalid"),
                "{}",
                bad
            );
        }
        for good in ["a@b.c", "first.last+tag@mail.example.org"] {
            form.email = good.into();
            assert!(!validate(&form).contains(FormField::Email), "{}", good);
        }
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        let mut form = valid_form();
        for bad in ["12345", "98765432101", "98765-43210", "+919876543210", "987654321a"] {
            form.phone_number = bad.into();
            assert_eq!(
                validate(&form).get(FormField::PhoneNumber),
                Some("Phone number must be 10 digits"),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_short_password() {
        let mut form = valid_form();
        form.password = "abc12".into();
        form.confirm_password = "abc12".into();
        let errors = validate(&form);
        assert_eq!(
            errors.get(FormField::Password),
            Some("Password must be at least 6 characters")
        );
        assert!(!errors.contains(FormField::ConfirmPassword));
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        let mut form = valid_form();
        // Each emoji is a surrogate pair: 2 + 2 * 2 = 6 units.
        form.password = "ab😀😀".into();
        form.confirm_password = "ab😀😀".into();
        assert!(validate(&form).is_empty());

        form.password = "abc😀".into();
        form.confirm_password = "abc😀".into();
        assert!(validate(&form).contains(FormField::Password));
    }

    #[test]
    fn test_confirm_mismatch_always_reported() {
        let mut form = valid_form();
        form.confirm_password = "secret2".into();
        assert_eq!(
            validate(&form).get(FormField::ConfirmPassword),
            Some("Passwords do not match")
        );

        // Still reported when the password itself is invalid.
        form.password = "abc".into();
        form.confirm_password = "abd".into();
        let errors = validate(&form);
        assert!(errors.contains(FormField::Password));
        assert!(errors.contains(FormField::ConfirmPassword));

        form.password.clear();
        form.confirm_password = "x".into();
        let errors = validate(&form);
        assert!(errors.contains(FormField::Password));
        assert!(errors.contains(FormField::ConfirmPassword));
    }

    #[test]
    fn test_location_needs_both_coordinates() {
        let mut form = valid_form();
        form.longitude.clear();
        assert!(validate(&form).contains(FormField::Location));

        let mut form = valid_form();
        form.latitude.clear();
        assert!(validate(&form).contains(FormField::Location));
    }

    #[test]
    fn test_display_lists_fields() {
        let mut form = valid_form();
        form.gender.clear();
        form.date_of_birth.clear();
        assert_eq!(
            validate(&form).to_string(),
            "gender: Gender is required\ndateOfBirth: Date of birth is required\n"
        );
    }
}
