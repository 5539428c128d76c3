use chrono::{Datelike, Month, NaiveDate};
use std::fmt;

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// The reporting period a run is keyed by: a month and a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: Month,
    pub year: i32,
}

impl Period {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    /// The month after `today`, rolling the year over in December.
    pub fn upcoming(today: NaiveDate) -> Self {
        let month0 = today.month0() as usize;
        let year = if month0 == 11 {
            today.year() + 1
        } else {
            today.year()
        };
        Self {
            month: MONTHS[(month0 + 1) % 12],
            year,
        }
    }

    /// Three-letter abbreviation used on the wire and in file names.
    pub fn month_abbrev(&self) -> &'static str {
        month_abbrev(self.month)
    }

    pub fn archive_name(&self) -> String {
        format!("{}_{}_UVR_Output.zip", self.month_abbrev(), self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_abbrev(), self.year)
    }
}

pub fn month_abbrev(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Selectable years: one either side of the reporting year of `today`.
pub fn year_options(today: NaiveDate) -> [i32; 3] {
    let year = Period::upcoming(today).year;
    [year - 1, year, year + 1]
}

pub fn parse_month(raw: &str) -> Result<Month, String> {
    raw.trim()
        .parse::<Month>()
        .map_err(|_| format!("`{raw}` is not a month name or abbreviation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn upcoming_is_next_month_of_same_year() {
        let period = Period::upcoming(date(2024, 3, 15));
        assert_eq!(period, Period::new(Month::April, 2024));
        assert_eq!(period.to_string(), "Apr 2024");
    }

    #[test]
    fn december_rolls_into_january_of_next_year() {
        let period = Period::upcoming(date(2024, 12, 31));
        assert_eq!(period, Period::new(Month::January, 2025));
        assert_eq!(year_options(date(2024, 12, 1)), [2024, 2025, 2026]);
    }

    #[test]
    fn year_options_surround_current_year() {
        assert_eq!(year_options(date(2024, 6, 1)), [2023, 2024, 2025]);
    }

    #[test]
    fn abbreviations_and_archive_name() {
        let abbrevs: Vec<_> = MONTHS.iter().map(|m| month_abbrev(*m)).collect();
        assert_eq!(
            abbrevs,
            ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert_eq!(
            Period::new(Month::September, 2023).archive_name(),
            "Sep_2023_UVR_Output.zip"
        );
    }

    #[test]
    fn parses_short_and_long_month_names() {
        assert_eq!(parse_month("Feb"), Ok(Month::February));
        assert_eq!(parse_month("february"), Ok(Month::February));
        assert!(parse_month("Febtember").is_err());
    }
}
