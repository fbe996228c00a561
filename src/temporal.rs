use crate::config::SwatConfig;
use crate::error::{IngestError, Result};
use chrono::{Datelike, NaiveDate};

/// Temporal fields of one OutputHru record. Exactly one temporal mode is
/// populated per reporting granularity; the other fields stay zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalFields {
    pub month: u32,
    pub day: u32,
    pub year: i32,
    /// Multi-year aggregate marker for post-simulation summary rows.
    pub year_span: f64,
}

impl TemporalFields {
    fn date(month: u32, day: u32, year: i32) -> Self {
        TemporalFields {
            month,
            day,
            year,
            year_span: 0.0,
        }
    }

    fn span(year_span: f64) -> Self {
        TemporalFields {
            month: 0,
            day: 0,
            year: 0,
            year_span,
        }
    }
}

/// Raw temporal value(s) pulled from one data line. Which variant applies
/// is decided by the configured print mode and calendar flag.
#[derive(Debug, Clone, Copy)]
pub enum TemporalInput {
    /// Daily row with explicit month/day/year fields (calendar format).
    CalendarDay { month: u32, day: u32, year: i32 },
    /// Daily row carrying a 1-based day-of-year.
    JulianDay(u32),
    /// Monthly row: a month number (< 13) or a year-aggregate code (>= 13).
    MonthCode(f64),
    /// Yearly row: a year, or a span count outside the simulated range.
    YearValue(f64),
}

/// Reconstruction state threaded across the data lines of one file.
/// Scoped to a single ingestion run, never shared between files.
#[derive(Debug, Clone, Copy)]
pub struct TemporalState {
    pub current_year: i32,
    at_end_of_year: bool,
    marked_year: bool,
}

impl TemporalState {
    pub fn new(config: &SwatConfig) -> Self {
        TemporalState {
            current_year: config.first_reported_year(),
            at_end_of_year: false,
            marked_year: false,
        }
    }

    /// Derive the four temporal fields for one row, advancing the running
    /// year counter where the row demands it.
    pub fn reconstruct(
        &mut self,
        input: TemporalInput,
        config: &SwatConfig,
    ) -> Result<TemporalFields> {
        match input {
            TemporalInput::CalendarDay { month, day, year } => {
                Ok(TemporalFields::date(month, day, year))
            }
            TemporalInput::JulianDay(julian_day) => self.reconstruct_julian(julian_day),
            TemporalInput::MonthCode(code) => Ok(self.reconstruct_monthly(code, config)),
            TemporalInput::YearValue(year) => Ok(reconstruct_yearly(year, config)),
        }
    }

    fn reconstruct_julian(&mut self, julian_day: u32) -> Result<TemporalFields> {
        // The file restarts the day counter at 1 each year without printing
        // the year, so the rollover has to be inferred from the previous row.
        if self.at_end_of_year && julian_day == 1 {
            self.current_year += 1;
        }

        let date = NaiveDate::from_yo_opt(self.current_year, julian_day).ok_or(
            IngestError::InvalidJulianDay {
                day: julian_day,
                year: self.current_year,
            },
        )?;

        self.at_end_of_year =
            julian_day == 365 || (is_leap_year(self.current_year) && julian_day == 366);

        Ok(TemporalFields::date(date.month(), date.day(), date.year()))
    }

    fn reconstruct_monthly(&mut self, code: f64, config: &SwatConfig) -> TemporalFields {
        let end_year = config.simulation_end.year();

        if self.current_year <= end_year {
            if code < 13.0 {
                self.marked_year = false;
                return TemporalFields::date(code as u32, 0, self.current_year);
            }
            // Year-aggregate row. swat.exe repeats the aggregate code for
            // every HRU, so advance the running year exactly once.
            let fields = TemporalFields::date(0, 0, code as i32);
            if !self.marked_year {
                self.current_year += 1;
                self.marked_year = true;
            }
            return fields;
        }

        // Past the simulated range: post-simulation summary rows.
        if code == f64::from(end_year) {
            TemporalFields::date(0, 0, code as i32)
        } else {
            TemporalFields::span(code)
        }
    }
}

fn reconstruct_yearly(year: f64, config: &SwatConfig) -> TemporalFields {
    let start = f64::from(config.simulation_start.year());
    let end = f64::from(config.simulation_end.year());
    if year >= start && year <= end {
        TemporalFields::date(0, 0, year as i32)
    } else {
        TemporalFields::span(year)
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
