//! Fractional schedules used as the operating-hours proxy for zone
//! classification.

pub const HOURS_PER_YEAR: usize = 8760;

/// A time-varying fractional schedule (lighting, occupancy, equipment).
///
/// Provides hourly values that repeat on a daily, weekly, or annual basis.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub name: String,
    /// Hourly values for the schedule period.
    /// If 24 values: repeats daily.
    /// If 168 values: repeats weekly (Mon-Sun, 24h each).
    /// If 8760 values: annual (no repeat).
    values: Vec<f64>,
}

impl Schedule {
    /// Creates a schedule from a list of hourly values.
    pub fn new(name: &str, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// Creates a constant schedule.
    pub fn constant(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            values: vec![value],
        }
    }

    /// Creates a typical office lighting schedule (8am-6pm weekdays).
    pub fn office_lighting() -> Self {
        let mut values = Vec::with_capacity(168);
        for day in 0..7 {
            for hour in 0..24 {
                let is_weekday = day < 5;
                let is_working_hour = (8..18).contains(&hour);
                let val = if is_weekday && is_working_hour {
                    1.0
                } else {
                    0.0
                };
                values.push(val);
            }
        }
        Self::new("office_lighting", values)
    }

    /// Creates an always-on lighting schedule (data centers, corridors).
    pub fn continuous_lighting() -> Self {
        Self::constant("continuous_lighting", 1.0)
    }

    /// Gets the schedule value for a given hour of the year (0-8759).
    pub fn value_at(&self, hour_of_year: usize) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        if self.values.len() == 1 {
            return self.values[0];
        }
        let idx = hour_of_year % self.values.len();
        self.values[idx]
    }

    /// Annual equivalent full-load hours: the integral of the fractional
    /// profile over one year.
    ///
    /// A schedule that is 1.0 for 50 hours each week yields ~2600 hours.
    pub fn annual_equivalent_full_load_hours(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        (0..HOURS_PER_YEAR).map(|h| self.value_at(h)).sum()
    }

    /// Weekly equivalent full-load hours (annual hours / 52).
    pub fn weekly_equivalent_full_load_hours(&self) -> f64 {
        self.annual_equivalent_full_load_hours() / 52.0
    }
}
