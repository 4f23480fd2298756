//! Four-pillar (bazi) chart calculator.
//!
//! # Responsibility
//! - Map a birth timestamp to year/month/day/hour pillars.
//! - Parse the `YYYY-MM-DD HH:MM:SS` birth-time format.
//!
//! # Invariants
//! - Pure and total: every `NaiveDateTime` yields a chart.
//! - Year stem/branch are periodic in 10 and 12 years.
//! - The day pillar is `day_of_year mod 10/12`, an approximation of the
//!   sexagenary day count kept on purpose.
//! - The element distribution is the fixed five-element set.

use crate::model::bazi::{BaziChart, BaziReading, Branch, Element, Pillar, Stem};
use chrono::{Datelike, NaiveDateTime, ParseResult, Timelike};

/// Accepted birth-time layout.
pub const BIRTH_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Year stems indexed by `year mod 10`; index 0 is 癸.
const YEAR_STEMS: [Stem; 10] = [
    Stem::Gui,
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
];

/// Year branches indexed by `year mod 12`; index 0 is 亥.
const YEAR_BRANCHES: [Branch; 12] = [
    Branch::Hai,
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
];

/// Month branches indexed by `month - 1`; month 1 is 寅.
const MONTH_BRANCHES: [Branch; 12] = [
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
    Branch::Zi,
    Branch::Chou,
];

/// Parses a birth time in [`BIRTH_TIME_FORMAT`].
pub fn parse_birth_time(value: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, BIRTH_TIME_FORMAT)
}

/// Computes the full reading for one birth timestamp.
pub fn calculate_reading(birth: NaiveDateTime) -> BaziReading {
    let chart = calculate_chart(birth);
    BaziReading {
        chart,
        day_master: chart.day.stem,
        elements: element_distribution(&chart),
    }
}

/// Computes the four pillars for one birth timestamp.
pub fn calculate_chart(birth: NaiveDateTime) -> BaziChart {
    let year_stem = year_stem(birth.year());
    let day_stem = day_stem(birth.ordinal());

    BaziChart {
        year: Pillar::new(year_stem, year_branch(birth.year())),
        month: Pillar::new(
            month_stem(year_stem, birth.month()),
            month_branch(birth.month()),
        ),
        day: Pillar::new(day_stem, day_branch(birth.ordinal())),
        hour: Pillar::new(hour_stem(day_stem, birth.hour()), hour_branch(birth.hour())),
    }
}

pub fn year_stem(year: i32) -> Stem {
    YEAR_STEMS[year.rem_euclid(10) as usize]
}

pub fn year_branch(year: i32) -> Branch {
    YEAR_BRANCHES[year.rem_euclid(12) as usize]
}

/// Month stem derived from the year stem; `month` is `1..=12`.
pub fn month_stem(year_stem: Stem, month: u32) -> Stem {
    Stem::ALL[(stem_start_offset(year_stem) + month_offset(month)) % 10]
}

/// Month branch for `month` in `1..=12`.
pub fn month_branch(month: u32) -> Branch {
    MONTH_BRANCHES[month_offset(month)]
}

/// Day stem from the 1-based day of year.
pub fn day_stem(day_of_year: u32) -> Stem {
    Stem::ALL[(day_of_year % 10) as usize]
}

/// Day branch from the 1-based day of year.
pub fn day_branch(day_of_year: u32) -> Branch {
    Branch::ALL[(day_of_year % 12) as usize]
}

/// Hour stem derived from the day stem and the shichen index `hour / 2`.
pub fn hour_stem(day_stem: Stem, hour: u32) -> Stem {
    Stem::ALL[(stem_start_offset(day_stem) + shichen(hour)) % 10]
}

pub fn hour_branch(hour: u32) -> Branch {
    Branch::ALL[shichen(hour) % 12]
}

/// Always the five elements, independent of the chart.
pub fn element_distribution(_chart: &BaziChart) -> Vec<Element> {
    Element::ALL.to_vec()
}

/// Start offset into the stem cycle for month and hour stems.
fn stem_start_offset(stem: Stem) -> usize {
    match stem {
        Stem::Jia | Stem::Ji => 0,
        Stem::Yi | Stem::Geng => 2,
        Stem::Bing | Stem::Xin => 4,
        Stem::Ding | Stem::Ren => 6,
        Stem::Wu | Stem::Gui => 8,
    }
}

/// `month - 1` for `1..=12`; wraps instead of underflowing.
fn month_offset(month: u32) -> usize {
    ((month as usize) + 11) % 12
}

fn shichen(hour: u32) -> usize {
    (hour / 2) as usize
}

#[cfg(test)]
mod tests {
    use super::{
        calculate_chart, hour_branch, month_branch, month_stem, parse_birth_time, year_branch,
        year_stem,
    };
    use crate::model::bazi::{Branch, Stem};

    #[test]
    fn anchors_match_reference_tables() {
        assert_eq!(year_stem(2020), Stem::Gui);
        assert_eq!(year_stem(2024), Stem::Ding);
        assert_eq!(year_branch(2016), Branch::Hai);
        assert_eq!(month_branch(1), Branch::Yin);
        assert_eq!(month_branch(12), Branch::Chou);
        assert_eq!(month_stem(Stem::Jia, 1), Stem::Jia);
        assert_eq!(month_stem(Stem::Gui, 3), Stem::Jia);
        assert_eq!(hour_branch(0), Branch::Zi);
        assert_eq!(hour_branch(23), Branch::Hai);
    }

    #[test]
    fn negative_years_do_not_panic() {
        assert_eq!(year_stem(-1), year_stem(9));
        assert_eq!(year_branch(-1), year_branch(11));
    }

    #[test]
    fn parse_rejects_other_layouts() {
        assert!(parse_birth_time("1990-05-15 14:30:00").is_ok());
        assert!(parse_birth_time("1990-05-15").is_err());
        assert!(parse_birth_time("1990/05/15 14:30:00").is_err());
        assert!(parse_birth_time("1990-05-15T14:30:00").is_err());
    }

    #[test]
    fn midnight_uses_first_shichen() {
        let birth = parse_birth_time("2000-01-01 00:00:00").unwrap();
        let chart = calculate_chart(birth);
        assert_eq!(chart.hour.branch, Branch::Zi);
        // 2000 mod 10 = 0 -> 癸; month 1 from 癸 starts at offset 8 -> 壬.
        assert_eq!(chart.year.stem, Stem::Gui);
        assert_eq!(chart.month.stem, Stem::Ren);
    }
}
