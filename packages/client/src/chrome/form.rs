//! Form validation and the phone number input mask.

/// Digits kept by the phone mask
const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub valid: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, valid: bool) -> Self {
        Self {
            name: name.into(),
            valid,
        }
    }
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidation {
    /// `false` suppresses both the submission and event propagation
    pub submit: bool,
    /// Field that receives focus
    pub focus: Option<String>,
    /// The form always gains the validated class
    pub validated: bool,
}

pub fn validate_form(fields: &[FormField]) -> FormValidation {
    let first_invalid = fields.iter().find(|f| !f.valid);
    FormValidation {
        submit: first_invalid.is_none(),
        focus: first_invalid.map(|f| f.name.clone()),
        validated: true,
    }
}

/// Render typed input as `XXX-XXX-XXXX`.
///
/// Non-digits are dropped and at most ten digits are kept. Dashes appear only
/// once a digit follows them: `"123"` stays `"123"`, `"1234"` becomes `"123-4"`.
pub fn mask_phone_input(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect();

    let mut masked = String::with_capacity(PHONE_DIGITS + 2);
    for (i, digit) in digits.iter().enumerate() {
        if i == 3 || i == 6 {
            masked.push('-');
        }
        masked.push(*digit);
    }
    masked
}
