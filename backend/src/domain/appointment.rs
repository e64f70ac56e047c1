//! Appointment payload validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AppointmentStatus;
use super::validation::{is_date, is_time, is_uuid, non_blank};

/// Appointment form input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub client_id: Option<String>,
    pub pet_id: Option<String>,
    pub service_id: Option<String>,
    pub appointment_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub total_price: Option<f64>,
    pub notes: Option<String>,
}

/// First rule an appointment payload broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentValidationError {
    #[error("A valid client is required")]
    InvalidClientId,
    #[error("A valid pet is required")]
    InvalidPetId,
    #[error("A valid service is required")]
    InvalidServiceId,
    #[error("Appointment date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Start time is required")]
    MissingStartTime,
    #[error("Start time must be in HH:MM format")]
    InvalidStartTime,
    #[error("End time must be in HH:MM format")]
    InvalidEndTime,
    #[error("Status must be one of: scheduled, confirmed, in_progress, completed, canceled, no_show")]
    InvalidStatus,
    #[error("Total price must be a non-negative number")]
    InvalidTotalPrice,
}

fn required_uuid(
    value: Option<&String>,
    error: AppointmentValidationError,
) -> Result<Uuid, AppointmentValidationError> {
    non_blank(value.map(String::as_str))
        .filter(|raw| is_uuid(raw))
        .and_then(|raw| Uuid::try_parse(raw).ok())
        .ok_or(error)
}

/// Validate an appointment payload.
///
/// # Examples
/// ```
/// use pawdesk::domain::appointment::{AppointmentPayload, validate_appointment_payload};
///
/// let id = "3fa85f64-5717-4562-b3fc-2c963f66afa6".to_owned();
/// let payload = AppointmentPayload {
///     client_id: Some(id.clone()),
///     pet_id: Some(id.clone()),
///     service_id: Some(id),
///     appointment_date: Some("2026-03-14".into()),
///     start_time: Some("9:00:00".into()),
///     ..AppointmentPayload::default()
/// };
/// assert!(validate_appointment_payload(&payload).is_ok());
/// ```
pub fn validate_appointment_payload(
    payload: &AppointmentPayload,
) -> Result<(), AppointmentValidationError> {
    required_uuid(
        payload.client_id.as_ref(),
        AppointmentValidationError::InvalidClientId,
    )?;
    required_uuid(payload.pet_id.as_ref(), AppointmentValidationError::InvalidPetId)?;
    required_uuid(
        payload.service_id.as_ref(),
        AppointmentValidationError::InvalidServiceId,
    )?;
    if !non_blank(payload.appointment_date.as_deref()).is_some_and(is_date) {
        return Err(AppointmentValidationError::InvalidDate);
    }
    let start = non_blank(payload.start_time.as_deref())
        .ok_or(AppointmentValidationError::MissingStartTime)?;
    if !is_time(start) {
        return Err(AppointmentValidationError::InvalidStartTime);
    }
    if let Some(end) = non_blank(payload.end_time.as_deref())
        && !is_time(end)
    {
        return Err(AppointmentValidationError::InvalidEndTime);
    }
    if let Some(status) = non_blank(payload.status.as_deref())
        && status.parse::<AppointmentStatus>().is_err()
    {
        return Err(AppointmentValidationError::InvalidStatus);
    }
    if payload
        .total_price
        .is_some_and(|price| !price.is_finite() || price < 0.0)
    {
        return Err(AppointmentValidationError::InvalidTotalPrice);
    }
    Ok(())
}

/// Appointment ready for storage. Missing status means `scheduled`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub pet_id: Uuid,
    pub service_id: Uuid,
    pub appointment_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub status: AppointmentStatus,
    pub total_price: Option<f64>,
    pub notes: Option<String>,
}

impl TryFrom<AppointmentPayload> for NewAppointment {
    type Error = AppointmentValidationError;

    fn try_from(value: AppointmentPayload) -> Result<Self, Self::Error> {
        validate_appointment_payload(&value)?;
        let text = |field: &Option<String>| non_blank(field.as_deref()).map(str::to_owned);
        Ok(Self {
            client_id: required_uuid(
                value.client_id.as_ref(),
                AppointmentValidationError::InvalidClientId,
            )?,
            pet_id: required_uuid(value.pet_id.as_ref(), AppointmentValidationError::InvalidPetId)?,
            service_id: required_uuid(
                value.service_id.as_ref(),
                AppointmentValidationError::InvalidServiceId,
            )?,
            appointment_date: text(&value.appointment_date).unwrap_or_default(),
            start_time: text(&value.start_time).unwrap_or_default(),
            end_time: text(&value.end_time),
            status: non_blank(value.status.as_deref())
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(AppointmentStatus::Scheduled),
            total_price: value.total_price,
            notes: text(&value.notes),
        })
    }
}
