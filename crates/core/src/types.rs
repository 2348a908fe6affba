use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::ClientError;

/// Backend the client registers customers against
#[async_trait]
pub trait CustomerApi: Send + Sync {
    fn base_url(&self) -> &Url;

    /// `GET /`; only HTTP 200 within `timeout` counts as alive
    async fn liveness(&self, timeout: Duration) -> Result<(), ClientError>;

    /// `POST /api/register`
    async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError>;

    /// `GET /api/allcustomer`, in server order
    async fn all_customers(&self) -> Result<Vec<Customer>, ClientError>;
}

/// Field keys of the registration form, as reported in validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Email,
    PhoneNumber,
    Gender,
    DateOfBirth,
    Address,
    Password,
    ConfirmPassword,
    /// Compound key covering latitude and longitude
    Location,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::FullName,
        FormField::Email,
        FormField::PhoneNumber,
        FormField::Gender,
        FormField::DateOfBirth,
        FormField::Address,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::Location,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Gender => "gender",
            FormField::DateOfBirth => "dateOfBirth",
            FormField::Address => "address",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Location => "location",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
    pub latitude: String,
    pub longitude: String,
}

impl RegistrationForm {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set a text field. Returns false for `Location`, which only
    /// [`Self::set_location`] can write.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            FormField::FullName => self.full_name = value,
            FormField::Email => self.email = value,
            FormField::PhoneNumber => self.phone_number = value,
            FormField::Gender => self.gender = value,
            FormField::DateOfBirth => self.date_of_birth = value,
            FormField::Address => self.address = value,
            FormField::Password => self.password = value,
            FormField::ConfirmPassword => self.confirm_password = value,
            FormField::Location => return false,
        }
        true
    }

    /// Store coordinates with 8 fractional digits
    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.latitude = format!("{:.8}", latitude);
        self.longitude = format!("{:.8}", longitude);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Tablet => "Tablet",
            DeviceType::Desktop => "Desktop",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
    Unknown,
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperatingSystem::Windows => "Windows",
            OperatingSystem::MacOs => "MacOS",
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Android => "Android",
            OperatingSystem::Ios => "iOS",
            OperatingSystem::Unknown => "Unknown",
        })
    }
}

/// Descriptive metadata derived from a user-agent string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "DeviceInfoPayload")]
pub struct DeviceInfo {
    pub browser_name: String,
    pub browser_version: String,
    pub device_type: DeviceType,
    pub os: OperatingSystem,
    pub raw_user_agent: String,
}

impl DeviceInfo {
    /// "Chrome 115.0"
    pub fn browser_label(&self) -> String {
        format!("{} {}", self.browser_name, self.browser_version)
    }
}

/// Shape the backend expects under `deviceInfo`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeviceInfoPayload {
    browser: String,
    device: String,
    os: String,
    user_agent: String,
}

impl From<DeviceInfo> for DeviceInfoPayload {
    fn from(info: DeviceInfo) -> Self {
        Self {
            browser: info.browser_label(),
            device: info.device_type.to_string(),
            os: info.os.to_string(),
            user_agent: info.raw_user_agent,
        }
    }
}

/// Body of `POST /api/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(flatten)]
    pub form: RegistrationForm,
    pub device_info: DeviceInfo,
}

/// A registered customer as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub device_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub browser: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub os: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub latitude: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub longitude: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

// Backends differ on whether ids and coordinates are numbers or strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Backend availability as seen by the prober
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Checking,
    Ready,
    Sleeping,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ServerStatus::Checking => "checking",
            ServerStatus::Ready => "ready",
            ServerStatus::Sleeping => "sleeping",
        })
    }
}
