//! Pet payload validation.
//!
//! Birth-year bounds depend on the current year. [`validate_pet_payload`]
//! reads the system clock; [`validate_pet_payload_at`] is the deterministic
//! core used by tests and by callers that already hold a clock.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Species, VaccinationStatus};
use super::validation::{is_uuid, non_blank};

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Pet form input. `client_id: None` means the pet is unassigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetPayload {
    pub client_id: Option<String>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_month: Option<i64>,
    pub birth_year: Option<i64>,
    pub weight: Option<f64>,
    pub vaccination_status: Option<String>,
    pub photo_url: Option<String>,
}

/// First rule a pet payload broke.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PetValidationError {
    #[error("Client id must be a valid UUID")]
    InvalidClientId,
    #[error("Pet name is required")]
    MissingName,
    #[error("Species is required")]
    MissingSpecies,
    #[error("Species must be one of: dog, cat, other")]
    InvalidSpecies,
    #[error("Birth month must be between 1 and 12")]
    InvalidBirthMonth,
    #[error("Birth year must be between 1900 and {current_year}")]
    InvalidBirthYear { current_year: i32 },
    #[error("Weight must be a non-negative number")]
    InvalidWeight,
    #[error("Vaccination status must be one of: up_to_date, due_soon, overdue, unknown")]
    InvalidVaccinationStatus,
}

/// Validate a pet payload against the current UTC year.
pub fn validate_pet_payload(payload: &PetPayload) -> Result<(), PetValidationError> {
    validate_pet_payload_at(payload, Utc::now().year())
}

/// Validate a pet payload against an explicit current year.
pub fn validate_pet_payload_at(
    payload: &PetPayload,
    current_year: i32,
) -> Result<(), PetValidationError> {
    if let Some(client_id) = non_blank(payload.client_id.as_deref())
        && !is_uuid(client_id)
    {
        return Err(PetValidationError::InvalidClientId);
    }
    if non_blank(payload.name.as_deref()).is_none() {
        return Err(PetValidationError::MissingName);
    }
    let species =
        non_blank(payload.species.as_deref()).ok_or(PetValidationError::MissingSpecies)?;
    if species.parse::<Species>().is_err() {
        return Err(PetValidationError::InvalidSpecies);
    }
    if payload
        .birth_month
        .is_some_and(|month| !(1..=12).contains(&month))
    {
        return Err(PetValidationError::InvalidBirthMonth);
    }
    let year_range = i64::from(MIN_BIRTH_YEAR)..=i64::from(current_year);
    if payload
        .birth_year
        .is_some_and(|year| !year_range.contains(&year))
    {
        return Err(PetValidationError::InvalidBirthYear { current_year });
    }
    if payload
        .weight
        .is_some_and(|weight| !weight.is_finite() || weight < 0.0)
    {
        return Err(PetValidationError::InvalidWeight);
    }
    if let Some(status) = non_blank(payload.vaccination_status.as_deref())
        && status.parse::<VaccinationStatus>().is_err()
    {
        return Err(PetValidationError::InvalidVaccinationStatus);
    }
    Ok(())
}

/// Pet ready for storage with parsed enums and ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPet {
    pub client_id: Option<Uuid>,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_month: Option<u8>,
    pub birth_year: Option<i32>,
    pub weight: Option<f64>,
    pub vaccination_status: Option<VaccinationStatus>,
    pub photo_url: Option<String>,
}

impl NewPet {
    /// Validate `payload` against `current_year` and build the typed pet.
    pub fn try_from_payload(
        payload: PetPayload,
        current_year: i32,
    ) -> Result<Self, PetValidationError> {
        validate_pet_payload_at(&payload, current_year)?;
        let text = |field: &Option<String>| non_blank(field.as_deref()).map(str::to_owned);
        Ok(Self {
            client_id: non_blank(payload.client_id.as_deref())
                .and_then(|id| Uuid::try_parse(id).ok()),
            name: text(&payload.name).unwrap_or_default(),
            species: non_blank(payload.species.as_deref())
                .and_then(|raw| raw.parse().ok())
                .ok_or(PetValidationError::MissingSpecies)?,
            breed: text(&payload.breed),
            birth_month: payload.birth_month.and_then(|month| u8::try_from(month).ok()),
            birth_year: payload.birth_year.and_then(|year| i32::try_from(year).ok()),
            weight: payload.weight,
            vaccination_status: non_blank(payload.vaccination_status.as_deref())
                .and_then(|raw| raw.parse().ok()),
            photo_url: text(&payload.photo_url),
        })
    }
}

impl TryFrom<PetPayload> for NewPet {
    type Error = PetValidationError;

    fn try_from(value: PetPayload) -> Result<Self, Self::Error> {
        Self::try_from_payload(value, Utc::now().year())
    }
}
