use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

use super::domain::{
    ApplicationPayload, CollegeMajor, Division, Field, InternCategory, RegistrationInput,
};

pub const PHONE_MIN_LENGTH: usize = 10;
pub const PHONE_MAX_LENGTH: usize = 15;
pub const MAX_INTERNSHIP_MONTHS: u32 = 6;

/// Per-field messages collected from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.messages.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.messages.contains_key(&field)
    }

    pub fn fields(&self) -> Vec<Field> {
        self.messages.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.messages
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Declarative rule set for the internship registration form.
///
/// Each field is checked independently: required first, then type, then range or format, and
/// only the first failing rule per field is reported.
#[derive(Debug, Clone, Default)]
pub struct RegistrationSchema;

impl RegistrationSchema {
    pub fn new() -> Self {
        Self
    }

    /// Validate the whole form, producing the payload or every failing field.
    pub fn validate(
        &self,
        input: &RegistrationInput,
    ) -> Result<ApplicationPayload, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let full_name = required_text(
            input,
            Field::FullName,
            "Nama lengkap wajib diisi",
            &mut errors,
        );
        let university = required_text(
            input,
            Field::University,
            "Asal Universitas wajib diisi",
            &mut errors,
        );
        let email = check_email(input, &mut errors);
        let phone = check_phone(input, &mut errors);
        let intern_category = one_of(
            input,
            Field::InternCategory,
            InternCategory::from_label,
            ("Tipe magang wajib diisi", "Tipe magang tidak valid"),
            &mut errors,
        );
        let krs_remaining = whole_number(input, Field::KrsRemaining, "Sisa SKS", &mut errors);
        let semester = whole_number(input, Field::Semester, "Semester", &mut errors);
        let division_request = one_of(
            input,
            Field::DivisionRequest,
            Division::from_label,
            ("Bidang Peminatan wajib diisi", "Bidang Peminatan tidak valid"),
            &mut errors,
        );
        let ipk = check_ipk(input, &mut errors);
        let college_major = one_of(
            input,
            Field::CollegeMajor,
            CollegeMajor::from_label,
            ("Jurusan wajib diisi", "Jurusan tidak valid"),
            &mut errors,
        );
        let start_month = date_value(
            input,
            Field::StartMonth,
            (
                "Tanggal rencana mulai wajib diisi",
                "Tanggal rencana mulai tidak valid",
            ),
            &mut errors,
        );
        let end_month = check_end_month(input, start_month, &mut errors);
        let google_drive_link = check_link(input, &mut errors);

        match (
            full_name,
            university,
            email,
            phone,
            intern_category,
            krs_remaining,
            semester,
            division_request,
            ipk,
            college_major,
            start_month,
            end_month,
            google_drive_link,
        ) {
            (
                Some(full_name),
                Some(university),
                Some(email),
                Some(phone),
                Some(intern_category),
                Some(krs_remaining),
                Some(semester),
                Some(division_request),
                Some(ipk),
                Some(college_major),
                Some(start_month),
                Some(end_month),
                Some(google_drive_link),
            ) if errors.is_empty() => Ok(ApplicationPayload {
                full_name,
                university,
                email,
                phone,
                intern_category,
                krs_remaining,
                semester,
                division_request,
                ipk,
                college_major,
                start_month,
                end_month,
                google_drive_link,
            }),
            _ => Err(errors),
        }
    }
}

/// Surrounding whitespace is never part of a value, so a blank input counts as missing.
fn present(input: &RegistrationInput, field: Field) -> Option<&str> {
    let value = input.get(field).trim();
    (!value.is_empty()).then_some(value)
}

fn required_text(
    input: &RegistrationInput,
    field: Field,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match present(input, field) {
        Some(value) => Some(value.to_string()),
        None => {
            errors.insert(field, message);
            None
        }
    }
}

fn check_email(input: &RegistrationInput, errors: &mut ValidationErrors) -> Option<String> {
    let value = required_text(input, Field::Email, "Email wajib diisi", errors)?;
    if value.validate_email() {
        Some(value)
    } else {
        errors.insert(Field::Email, "Email tidak valid");
        None
    }
}

fn check_phone(input: &RegistrationInput, errors: &mut ValidationErrors) -> Option<String> {
    let value = required_text(input, Field::Phone, "No. Telepon wajib diisi", errors)?;
    let length = value.chars().count();
    if length < PHONE_MIN_LENGTH {
        errors.insert(
            Field::Phone,
            format!("No. Telepon tidak boleh kurang dari {PHONE_MIN_LENGTH} angka"),
        );
        None
    } else if length > PHONE_MAX_LENGTH {
        errors.insert(
            Field::Phone,
            format!("No. Telepon tidak boleh lebih dari {PHONE_MAX_LENGTH} angka"),
        );
        None
    } else {
        Some(value)
    }
}

fn one_of<T>(
    input: &RegistrationInput,
    field: Field,
    parse: fn(&str) -> Option<T>,
    (required, invalid): (&str, &str),
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = required_text(input, field, required, errors)?;
    let parsed = parse(&value);
    if parsed.is_none() {
        errors.insert(field, invalid);
    }
    parsed
}

fn number_value(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn whole_number(
    input: &RegistrationInput,
    field: Field,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<u32> {
    let value = required_text(input, field, &format!("{label} wajib diisi"), errors)?;
    let Some(number) = number_value(&value) else {
        errors.insert(field, format!("{label} harus berupa angka"));
        return None;
    };
    if number < 1.0 {
        errors.insert(field, format!("{label} tidak boleh kurang dari 1"));
        return None;
    }
    if number.fract() != 0.0 || number > u32::MAX as f64 {
        errors.insert(field, format!("{label} harus berupa bilangan bulat"));
        return None;
    }
    Some(number as u32)
}

fn check_ipk(input: &RegistrationInput, errors: &mut ValidationErrors) -> Option<f64> {
    let value = required_text(input, Field::Ipk, "IPK wajib diisi", errors)?;
    match number_value(&value) {
        None => {
            errors.insert(Field::Ipk, "IPK harus berupa angka");
            None
        }
        Some(number) if number < 1.0 => {
            errors.insert(Field::Ipk, "IPK tidak boleh kurang dari 1");
            None
        }
        Some(number) => Some(number),
    }
}

/// Accepts `YYYY-MM-DD` as sent by date inputs, or an RFC 3339 timestamp.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
}

fn date_value(
    input: &RegistrationInput,
    field: Field,
    (required, invalid): (&str, &str),
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let value = required_text(input, field, required, errors)?;
    let parsed = parse_form_date(&value);
    if parsed.is_none() {
        errors.insert(field, invalid);
    }
    parsed
}

/// Latest end date allowed for a start date: six is added to the month component and days past
/// the end of the target month roll into the next one (Aug 31 -> Mar 3 in a non-leap year).
pub fn latest_end_month(start: NaiveDate) -> Option<NaiveDate> {
    start
        .with_day(1)?
        .checked_add_months(Months::new(MAX_INTERNSHIP_MONTHS))?
        .checked_add_days(Days::new(u64::from(start.day0())))
}

fn check_end_month(
    input: &RegistrationInput,
    start_month: Option<NaiveDate>,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    let end = date_value(
        input,
        Field::EndMonth,
        (
            "Tanggal rencana selesai wajib diisi",
            "Tanggal rencana selesai tidak valid",
        ),
        errors,
    )?;

    // Without a usable start date only required-ness applies.
    let Some(start) = start_month else {
        return Some(end);
    };

    if end < start {
        errors.insert(Field::EndMonth, "Tanggal selesai harus setelah tanggal mulai");
        return None;
    }

    match latest_end_month(start) {
        Some(latest) if end > latest => {
            errors.insert(
                Field::EndMonth,
                "Tanggal selesai tidak boleh lebih dari 6 bulan dari tanggal mulai",
            );
            None
        }
        _ => Some(end),
    }
}

fn check_link(input: &RegistrationInput, errors: &mut ValidationErrors) -> Option<String> {
    let value = required_text(
        input,
        Field::GoogleDriveLink,
        "Link pemberkasan wajib diisi",
        errors,
    )?;
    let lowered = value.to_ascii_lowercase();
    let http_scheme = lowered.starts_with("http://") || lowered.starts_with("https://");
    if http_scheme && value.validate_url() {
        Some(value)
    } else {
        errors.insert(Field::GoogleDriveLink, "Harus berupa link valid");
        None
    }
}
