//! Day-view calendar layout.
//!
//! Times map linearly onto a vertical grid of one row per hour. Positions are
//! not clamped to the rendered range and overlapping appointments are not
//! separated; the view draws them on top of each other.

use serde::Serialize;

use super::records::AppointmentRecord;
use super::validation::parse_time_of_day;

/// Height of one hour row in pixels.
pub const ROW_HEIGHT_PX: f64 = 60.0;

/// Length assumed for appointments with no end time and no joined service.
pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 60;

/// Vertical placement of an appointment block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppointmentPosition {
    pub top: f64,
    pub height: f64,
}

/// A time string could not be read as `H:MM[:SS]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {input}")]
pub struct InvalidTimeOfDay {
    pub input: String,
}

fn minutes_of(value: &str) -> Result<u32, InvalidTimeOfDay> {
    parse_time_of_day(value).ok_or_else(|| InvalidTimeOfDay {
        input: value.to_owned(),
    })
}

fn place(start: u32, end: u32, day_start_hour: u32, hour_height_px: f64) -> AppointmentPosition {
    let offset = f64::from(start) - f64::from(day_start_hour) * 60.0;
    let span = f64::from(end) - f64::from(start);
    AppointmentPosition {
        top: offset / 60.0 * hour_height_px,
        height: span / 60.0 * hour_height_px,
    }
}

/// Place an appointment on a grid whose first row starts at `day_start_hour`.
///
/// Times before the day start produce a negative `top`; an end before the
/// start produces a negative `height`.
///
/// # Examples
/// ```
/// use pawdesk::domain::calendar::calculate_appointment_position;
///
/// let position = calculate_appointment_position("9:30", "11:00", 8).expect("valid times");
/// assert_eq!(position.top, 90.0);
/// assert_eq!(position.height, 90.0);
/// ```
pub fn calculate_appointment_position(
    start_time: &str,
    end_time: &str,
    day_start_hour: u32,
) -> Result<AppointmentPosition, InvalidTimeOfDay> {
    let start = minutes_of(start_time)?;
    let end = minutes_of(end_time)?;
    Ok(place(start, end, day_start_hour, ROW_HEIGHT_PX))
}

/// Hour grid configuration for the day view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayViewLayout {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub hour_height_px: f64,
}

impl Default for DayViewLayout {
    fn default() -> Self {
        Self {
            day_start_hour: 7,
            day_end_hour: 19,
            hour_height_px: ROW_HEIGHT_PX,
        }
    }
}

impl DayViewLayout {
    /// Labels for each hour row, e.g. `7 AM` ... `6 PM`.
    #[must_use]
    pub fn hour_slots(&self) -> Vec<String> {
        (self.day_start_hour..self.day_end_hour)
            .map(|hour| {
                let meridiem = if hour % 24 < 12 { "AM" } else { "PM" };
                let display = match hour % 12 {
                    0 => 12,
                    other => other,
                };
                format!("{display} {meridiem}")
            })
            .collect()
    }

    /// Total grid height in pixels.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        f64::from(self.day_end_hour.saturating_sub(self.day_start_hour)) * self.hour_height_px
    }

    /// Place a stored appointment.
    ///
    /// Without an end time the block spans the joined service's duration, or
    /// [`DEFAULT_APPOINTMENT_MINUTES`] when the service was not selected.
    pub fn position_for(
        &self,
        appointment: &AppointmentRecord,
    ) -> Result<AppointmentPosition, InvalidTimeOfDay> {
        let start = minutes_of(&appointment.start_time)?;
        let end = match appointment.end_time.as_deref() {
            Some(end) => minutes_of(end)?,
            None => {
                let duration = appointment
                    .service
                    .as_ref()
                    .map_or(DEFAULT_APPOINTMENT_MINUTES, |service| service.duration_minutes);
                start.saturating_add(duration)
            }
        };
        Ok(place(start, end, self.day_start_hour, self.hour_height_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::{AppointmentStatus, Species};
    use crate::domain::records::{PetSummary, ServiceSummary};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[rstest]
    #[case("08:00", "09:00", 8, 0.0, 60.0)]
    #[case("9:15", "10:00", 8, 75.0, 45.0)]
    #[case("13:00:00", "13:30:00", 9, 240.0, 30.0)]
    #[case("06:00", "07:00", 8, -120.0, 60.0)]
    #[case("10:00", "09:30", 8, 120.0, -30.0)]
    fn places_linearly_without_clamping(
        #[case] start: &str,
        #[case] end: &str,
        #[case] day_start: u32,
        #[case] top: f64,
        #[case] height: f64,
    ) {
        let position = calculate_appointment_position(start, end, day_start).expect("valid times");
        assert_eq!(position, AppointmentPosition { top, height });
    }

    #[rstest]
    fn rejects_unreadable_time() {
        let error = calculate_appointment_position("9am", "10:00", 8).expect_err("bad start");
        assert_eq!(error.input, "9am");
    }

    #[fixture]
    fn appointment() -> AppointmentRecord {
        AppointmentRecord {
            id: Uuid::nil(),
            business_id: Uuid::nil(),
            client_id: Uuid::nil(),
            pet_id: Uuid::nil(),
            service_id: Uuid::nil(),
            appointment_date: NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"),
            start_time: "10:00:00".to_owned(),
            end_time: None,
            status: AppointmentStatus::Scheduled,
            total_price: None,
            notes: None,
            client: None,
            pet: Some(PetSummary {
                id: Uuid::nil(),
                name: "Biscuit".to_owned(),
                species: Species::Dog,
            }),
            service: None,
        }
    }

    #[rstest]
    fn open_ended_appointment_uses_default_length(appointment: AppointmentRecord) {
        let layout = DayViewLayout::default();
        let position = layout.position_for(&appointment).expect("valid times");
        assert_eq!(position, AppointmentPosition { top: 180.0, height: 60.0 });
    }

    #[rstest]
    fn open_ended_appointment_uses_service_duration(mut appointment: AppointmentRecord) {
        appointment.service = Some(ServiceSummary {
            id: Uuid::nil(),
            name: "Full groom".to_owned(),
            duration_minutes: 90,
        });
        let layout = DayViewLayout {
            hour_height_px: 80.0,
            ..DayViewLayout::default()
        };
        let position = layout.position_for(&appointment).expect("valid times");
        assert_eq!(position, AppointmentPosition { top: 240.0, height: 120.0 });
    }

    #[rstest]
    fn explicit_end_time_wins(mut appointment: AppointmentRecord) {
        appointment.end_time = Some("10:45".to_owned());
        let position = DayViewLayout::default()
            .position_for(&appointment)
            .expect("valid times");
        assert_eq!(position.height, 45.0);
    }

    #[rstest]
    fn grid_covers_configured_hours() {
        let layout = DayViewLayout {
            day_start_hour: 11,
            day_end_hour: 14,
            hour_height_px: 50.0,
        };
        assert_eq!(layout.hour_slots(), vec!["11 AM", "12 PM", "1 PM"]);
        assert_eq!(layout.total_height(), 150.0);
    }
}
