use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the remote registration service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every input on the registration form, in the order it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "full_name")]
    FullName,
    #[serde(rename = "university")]
    University,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "intern_category")]
    InternCategory,
    #[serde(rename = "KRS_remaining")]
    KrsRemaining,
    #[serde(rename = "semester")]
    Semester,
    #[serde(rename = "division_request")]
    DivisionRequest,
    #[serde(rename = "IPK")]
    Ipk,
    #[serde(rename = "college_major")]
    CollegeMajor,
    #[serde(rename = "start_month")]
    StartMonth,
    #[serde(rename = "end_month")]
    EndMonth,
    #[serde(rename = "google_drive_link")]
    GoogleDriveLink,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::FullName,
        Field::University,
        Field::Email,
        Field::Phone,
        Field::InternCategory,
        Field::KrsRemaining,
        Field::Semester,
        Field::DivisionRequest,
        Field::Ipk,
        Field::CollegeMajor,
        Field::StartMonth,
        Field::EndMonth,
        Field::GoogleDriveLink,
    ];

    /// Key used on the wire and in error maps.
    pub const fn name(self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::University => "university",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::InternCategory => "intern_category",
            Field::KrsRemaining => "KRS_remaining",
            Field::Semester => "semester",
            Field::DivisionRequest => "division_request",
            Field::Ipk => "IPK",
            Field::CollegeMajor => "college_major",
            Field::StartMonth => "start_month",
            Field::EndMonth => "end_month",
            Field::GoogleDriveLink => "google_drive_link",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Internship track offered by the office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternCategory {
    #[serde(rename = "Magang KRS")]
    Krs,
    #[serde(rename = "Magang Mandiri")]
    Mandiri,
}

impl InternCategory {
    pub const ALL: [InternCategory; 2] = [InternCategory::Krs, InternCategory::Mandiri];

    pub const fn label(self) -> &'static str {
        match self {
            InternCategory::Krs => "Magang KRS",
            InternCategory::Mandiri => "Magang Mandiri",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.label() == value)
    }
}

/// Division an applicant asks to be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "Moneter")]
    Moneter,
    #[serde(rename = "Makroprudensial")]
    Makroprudensial,
    #[serde(rename = "Sistem Pembayaran")]
    SistemPembayaran,
    #[serde(rename = "Pengelolaan Uang Rupiah")]
    PengelolaanUangRupiah,
    #[serde(rename = "Humas")]
    Humas,
    #[serde(rename = "Internal")]
    Internal,
}

impl Division {
    pub const ALL: [Division; 6] = [
        Division::Moneter,
        Division::Makroprudensial,
        Division::SistemPembayaran,
        Division::PengelolaanUangRupiah,
        Division::Humas,
        Division::Internal,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Division::Moneter => "Moneter",
            Division::Makroprudensial => "Makroprudensial",
            Division::SistemPembayaran => "Sistem Pembayaran",
            Division::PengelolaanUangRupiah => "Pengelolaan Uang Rupiah",
            Division::Humas => "Humas",
            Division::Internal => "Internal",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.label() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollegeMajor {
    #[serde(rename = "Ekonomi")]
    Ekonomi,
    #[serde(rename = "Akuntansi")]
    Akuntansi,
    #[serde(rename = "Manajemen")]
    Manajemen,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "Hukum")]
    Hukum,
    #[serde(rename = "Statistika")]
    Statistika,
    #[serde(rename = "Ilmu Sosial")]
    IlmuSosial,
}

impl CollegeMajor {
    pub const ALL: [CollegeMajor; 7] = [
        CollegeMajor::Ekonomi,
        CollegeMajor::Akuntansi,
        CollegeMajor::Manajemen,
        CollegeMajor::It,
        CollegeMajor::Hukum,
        CollegeMajor::Statistika,
        CollegeMajor::IlmuSosial,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CollegeMajor::Ekonomi => "Ekonomi",
            CollegeMajor::Akuntansi => "Akuntansi",
            CollegeMajor::Manajemen => "Manajemen",
            CollegeMajor::It => "IT",
            CollegeMajor::Hukum => "Hukum",
            CollegeMajor::Statistika => "Statistika",
            CollegeMajor::IlmuSosial => "Ilmu Sosial",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.label() == value)
    }
}

/// Raw form state exactly as typed. Empty text means the applicant left the input blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationInput {
    #[serde(deserialize_with = "deserialize_text")]
    pub full_name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub university: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub phone: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub intern_category: String,
    #[serde(rename = "KRS_remaining", deserialize_with = "deserialize_text")]
    pub krs_remaining: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub semester: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub division_request: String,
    #[serde(rename = "IPK", deserialize_with = "deserialize_text")]
    pub ipk: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub college_major: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub start_month: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub end_month: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub google_drive_link: String,
}

impl RegistrationInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::University => &self.university,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::InternCategory => &self.intern_category,
            Field::KrsRemaining => &self.krs_remaining,
            Field::Semester => &self.semester,
            Field::DivisionRequest => &self.division_request,
            Field::Ipk => &self.ipk,
            Field::CollegeMajor => &self.college_major,
            Field::StartMonth => &self.start_month,
            Field::EndMonth => &self.end_month,
            Field::GoogleDriveLink => &self.google_drive_link,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::University => &mut self.university,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::InternCategory => &mut self.intern_category,
            Field::KrsRemaining => &mut self.krs_remaining,
            Field::Semester => &mut self.semester,
            Field::DivisionRequest => &mut self.division_request,
            Field::Ipk => &mut self.ipk,
            Field::CollegeMajor => &mut self.college_major,
            Field::StartMonth => &mut self.start_month,
            Field::EndMonth => &mut self.end_month,
            Field::GoogleDriveLink => &mut self.google_drive_link,
        };
        *slot = value.into();
    }
}

/// Accepts strings, numbers, booleans, or null so JSON fixtures can mirror what a form posts.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar form value, found {other}"
        ))),
    }
}

/// Validated application handed to the dispatcher. Only the schema builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationPayload {
    pub(crate) full_name: String,
    pub(crate) university: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) intern_category: InternCategory,
    #[serde(rename = "KRS_remaining")]
    pub(crate) krs_remaining: u32,
    pub(crate) semester: u32,
    pub(crate) division_request: Division,
    #[serde(rename = "IPK")]
    pub(crate) ipk: f64,
    pub(crate) college_major: CollegeMajor,
    pub(crate) start_month: NaiveDate,
    pub(crate) end_month: NaiveDate,
    pub(crate) google_drive_link: String,
}

impl ApplicationPayload {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn university(&self) -> &str {
        &self.university
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn intern_category(&self) -> InternCategory {
        self.intern_category
    }

    pub fn krs_remaining(&self) -> u32 {
        self.krs_remaining
    }

    pub fn semester(&self) -> u32 {
        self.semester
    }

    pub fn division_request(&self) -> Division {
        self.division_request
    }

    pub fn ipk(&self) -> f64 {
        self.ipk
    }

    pub fn college_major(&self) -> CollegeMajor {
        self.college_major
    }

    pub fn start_month(&self) -> NaiveDate {
        self.start_month
    }

    pub fn end_month(&self) -> NaiveDate {
        self.end_month
    }

    pub fn google_drive_link(&self) -> &str {
        &self.google_drive_link
    }
}

/// Session details returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
