//! Grooming/daycare service catalogue validation.

use serde::{Deserialize, Serialize};

use super::money::{Cents, to_cents};
use super::validation::non_blank;

/// Service form input. Prices arrive as decimal dollars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub active: Option<bool>,
}

/// First rule a service payload broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceValidationError {
    #[error("Service name is required")]
    MissingName,
    #[error("Price is required")]
    MissingPrice,
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Duration is required")]
    MissingDuration,
    #[error("Duration must be at least 1 minute")]
    InvalidDuration,
}

/// Validate a service payload.
pub fn validate_service_payload(payload: &ServicePayload) -> Result<(), ServiceValidationError> {
    if non_blank(payload.name.as_deref()).is_none() {
        return Err(ServiceValidationError::MissingName);
    }
    let price = payload.price.ok_or(ServiceValidationError::MissingPrice)?;
    if !price.is_finite() || price < 0.0 {
        return Err(ServiceValidationError::InvalidPrice);
    }
    let duration = payload
        .duration_minutes
        .ok_or(ServiceValidationError::MissingDuration)?;
    if duration < 1 {
        return Err(ServiceValidationError::InvalidDuration);
    }
    Ok(())
}

/// Service ready for storage. New services default to active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: Cents,
    pub duration_minutes: u32,
    pub active: bool,
}

impl TryFrom<ServicePayload> for NewService {
    type Error = ServiceValidationError;

    fn try_from(value: ServicePayload) -> Result<Self, Self::Error> {
        validate_service_payload(&value)?;
        let duration_minutes = value
            .duration_minutes
            .and_then(|minutes| u32::try_from(minutes).ok())
            .ok_or(ServiceValidationError::InvalidDuration)?;
        Ok(Self {
            name: non_blank(value.name.as_deref())
                .map(str::to_owned)
                .unwrap_or_default(),
            description: non_blank(value.description.as_deref()).map(str::to_owned),
            price: to_cents(value.price.unwrap_or_default()),
            duration_minutes,
            active: value.active.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn payload() -> ServicePayload {
        ServicePayload {
            name: Some("Full groom".to_owned()),
            description: None,
            price: Some(65.0),
            duration_minutes: Some(90),
            active: None,
        }
    }

    #[rstest]
    fn accepts_free_service(mut payload: ServicePayload) {
        payload.price = Some(0.0);
        assert_eq!(validate_service_payload(&payload), Ok(()));
    }

    #[rstest]
    #[case::name(|p: &mut ServicePayload| p.name = Some(String::new()), ServiceValidationError::MissingName)]
    #[case::price_missing(|p: &mut ServicePayload| p.price = None, ServiceValidationError::MissingPrice)]
    #[case::price_negative(|p: &mut ServicePayload| p.price = Some(-1.0), ServiceValidationError::InvalidPrice)]
    #[case::price_infinite(|p: &mut ServicePayload| p.price = Some(f64::INFINITY), ServiceValidationError::InvalidPrice)]
    #[case::duration_missing(|p: &mut ServicePayload| p.duration_minutes = None, ServiceValidationError::MissingDuration)]
    #[case::duration_zero(|p: &mut ServicePayload| p.duration_minutes = Some(0), ServiceValidationError::InvalidDuration)]
    fn rejects_broken_payloads(
        mut payload: ServicePayload,
        #[case] mutate: fn(&mut ServicePayload),
        #[case] expected: ServiceValidationError,
    ) {
        mutate(&mut payload);
        assert_eq!(validate_service_payload(&payload), Err(expected));
    }

    #[rstest]
    fn converts_price_to_cents(mut payload: ServicePayload) {
        payload.price = Some(42.5);
        let service = NewService::try_from(payload).expect("valid service");
        assert_eq!(service.price, Cents::new(4250));
        assert_eq!(service.duration_minutes, 90);
        assert!(service.active);
    }
}
