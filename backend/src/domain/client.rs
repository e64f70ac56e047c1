//! Client (pet owner) payload validation.

use serde::{Deserialize, Serialize};

use super::validation::{is_email, non_blank};

/// Client form input as submitted by the UI. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
}

/// First rule a client payload broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientValidationError {
    #[error("First name is required")]
    MissingFirstName,
    #[error("Last name is required")]
    MissingLastName,
    #[error("Phone number is required")]
    MissingPhone,
    #[error("Email address is not valid")]
    InvalidEmail,
}

/// Validate a client payload.
///
/// # Examples
/// ```
/// use pawdesk::domain::client::{ClientPayload, validate_client_payload};
///
/// let payload = ClientPayload {
///     first_name: Some("Ada".into()),
///     last_name: Some("Byron".into()),
///     phone: Some("555-0100".into()),
///     ..ClientPayload::default()
/// };
/// assert!(validate_client_payload(&payload).is_ok());
/// ```
pub fn validate_client_payload(payload: &ClientPayload) -> Result<(), ClientValidationError> {
    if non_blank(payload.first_name.as_deref()).is_none() {
        return Err(ClientValidationError::MissingFirstName);
    }
    if non_blank(payload.last_name.as_deref()).is_none() {
        return Err(ClientValidationError::MissingLastName);
    }
    if non_blank(payload.phone.as_deref()).is_none() {
        return Err(ClientValidationError::MissingPhone);
    }
    if let Some(email) = non_blank(payload.email.as_deref())
        && !is_email(email)
    {
        return Err(ClientValidationError::InvalidEmail);
    }
    Ok(())
}

/// Client ready to be written to storage; fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<ClientPayload> for NewClient {
    type Error = ClientValidationError;

    fn try_from(value: ClientPayload) -> Result<Self, Self::Error> {
        validate_client_payload(&value)?;
        let trimmed = |field: Option<String>| non_blank(field.as_deref()).map(str::to_owned);
        Ok(Self {
            first_name: trimmed(value.first_name).unwrap_or_default(),
            last_name: trimmed(value.last_name).unwrap_or_default(),
            phone: trimmed(value.phone).unwrap_or_default(),
            email: trimmed(value.email),
            address: trimmed(value.address),
            city: trimmed(value.city),
            state: trimmed(value.state),
            zip: trimmed(value.zip),
            notes: trimmed(value.notes),
        })
    }
}
