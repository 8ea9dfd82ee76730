// src/core/calendar.rs
//! Season/week and age arithmetic. Both roll over every `weeks_per_season`
//! weeks; ages and dates are always carried as two integers, never as a
//! combined "23.07" display value.

use std::fmt;

/// In-universe calendar date of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeasonWeek {
    pub season: u32,
    pub week: u32,
}

impl SeasonWeek {
    pub fn new(season: u32, week: u32) -> Self {
        Self { season, week }
    }

    /// Absolute week number since season 0, week 0.
    pub fn ordinal(self, weeks_per_season: u32) -> i64 {
        self.season as i64 * weeks_per_season as i64 + self.week as i64
    }

    /// Elapsed periods from `earlier` to `self`.
    pub fn periods_since(self, earlier: SeasonWeek, weeks_per_season: u32) -> i64 {
        self.ordinal(weeks_per_season) - earlier.ordinal(weeks_per_season)
    }

    pub fn next(self, weeks_per_season: u32) -> SeasonWeek {
        if self.week + 1 >= weeks_per_season {
            SeasonWeek { season: self.season + 1, week: 0 }
        } else {
            SeasonWeek { season: self.season, week: self.week + 1 }
        }
    }
}

impl fmt::Display for SeasonWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}W{}", self.season, self.week)
    }
}

/// Player age: whole years plus weeks into the current year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Age {
    pub year: u32,
    pub week: u32,
}

impl Age {
    pub fn new(year: u32, week: u32) -> Self {
        Self { year, week }
    }

    pub fn total_weeks(self, weeks_per_season: u32) -> i64 {
        self.year as i64 * weeks_per_season as i64 + self.week as i64
    }

    /// Age after `weeks` more weeks. Negative input is treated as zero.
    pub fn advanced(self, weeks: i64, weeks_per_season: u32) -> Age {
        let wps = weeks_per_season.max(1) as i64;
        let total = self.total_weeks(weeks_per_season) + weeks.max(0);
        Age { year: (total / wps) as u32, week: (total % wps) as u32 }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y{}w", self.year, self.week)
    }
}

/// Season/week at which a player of `age` (seen at `seen`) was at the
/// youngest recruitable age with zero elapsed weeks.
pub fn birth_week(seen: SeasonWeek, age: Age, origin_age_year: u32, weeks_per_season: u32) -> SeasonWeek {
    let wps = weeks_per_season.max(1) as i64;
    let weeks_since_birth = (age.year as i64 - origin_age_year as i64) * wps + age.week as i64;
    let seasons_since_birth = weeks_since_birth.div_euclid(wps);
    let extra_weeks = weeks_since_birth.rem_euclid(wps);

    let mut season = seen.season as i64 - seasons_since_birth;
    if extra_weeks > seen.week as i64 {
        season -= 1;
    }
    let week = (seen.week as i64 - extra_weeks).rem_euclid(wps);

    SeasonWeek { season: season.max(0) as u32, week: week as u32 }
}
