//! Property tests for the four-pillar chart calculator.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use yijing_core::chart::{
    calculate_chart, calculate_reading, hour_branch, hour_stem, parse_birth_time, year_branch,
    year_stem,
};
use yijing_core::model::bazi::{Branch, Element, Stem};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn year_stem_repeats_every_ten_years(year in -10_000i32..10_000) {
        prop_assert_eq!(year_stem(year), year_stem(year + 10));
    }

    #[test]
    fn year_branch_repeats_every_twelve_years(year in -10_000i32..10_000) {
        prop_assert_eq!(year_branch(year), year_branch(year + 12));
    }

    #[test]
    fn hour_branch_depends_only_on_shichen(hour in 0u32..24) {
        prop_assert_eq!(hour_branch(hour), Branch::ALL[((hour / 2) % 12) as usize]);
        prop_assert_eq!(hour_branch(hour), hour_branch(hour - hour % 2));
    }

    #[test]
    fn hour_stem_depends_only_on_day_stem_and_shichen(stem_index in 0usize..10, hour in 0u32..24) {
        let stem = Stem::ALL[stem_index];
        prop_assert_eq!(hour_stem(stem, hour), hour_stem(stem, hour - hour % 2));
    }

    #[test]
    fn every_timestamp_yields_a_consistent_reading(
        days in 0i64..200_000,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let date = NaiveDate::from_ymd_opt(1500, 1, 1).unwrap() + chrono::Duration::days(days);
        let birth = date.and_hms_opt(hour, minute, 0).unwrap();
        let reading = calculate_reading(birth);

        prop_assert_eq!(reading.day_master, reading.chart.day.stem);
        prop_assert_eq!(reading.chart.year.stem, year_stem(date.year()));
        prop_assert_eq!(reading.chart.hour.branch, hour_branch(hour));
        prop_assert_eq!(reading.elements, Element::ALL.to_vec());
    }
}

#[test]
fn reference_birth_time_produces_expected_chart() {
    let birth = parse_birth_time("1990-05-15 14:30:00").unwrap();
    let chart = calculate_chart(birth);

    // 1990 mod 10 = 0 and 1990 mod 12 = 10.
    assert_eq!(chart.year.stem, Stem::Gui);
    assert_eq!(chart.year.branch, Branch::You);
    // From 癸 the month cycle starts at 戊's offset 8; May adds 4.
    assert_eq!(chart.month.stem, Stem::Bing);
    assert_eq!(chart.month.branch, Branch::Wu);
    // Day 135 of the year: 135 mod 10 = 5, 135 mod 12 = 3.
    assert_eq!(chart.day.stem, Stem::Ji);
    assert_eq!(chart.day.branch, Branch::Mao);
    // hour / 2 = 7.
    assert_eq!(chart.hour.stem, Stem::Xin);
    assert_eq!(chart.hour.branch, Branch::Wei);

    assert_eq!(chart.year.to_string(), "癸酉");
    assert_eq!(chart.hour.to_string(), "辛未");
}

#[test]
fn reading_serializes_with_character_names() {
    let birth = parse_birth_time("1990-05-15 14:30:00").unwrap();
    let json = serde_json::to_value(calculate_reading(birth)).unwrap();

    assert_eq!(json["chart"]["year"]["stem"], "癸");
    assert_eq!(json["chart"]["year"]["branch"], "酉");
    assert_eq!(json["chart"]["day"]["branch"], "卯");
    assert_eq!(json["dayMaster"], "己");
    assert_eq!(
        json["elements"],
        serde_json::json!(["木", "火", "土", "金", "水"])
    );
}

#[test]
fn day_pillar_uses_day_of_year_not_calendar_epoch() {
    // Same day-of-year in different years gives the same day pillar.
    let a = calculate_chart(parse_birth_time("2001-03-01 08:00:00").unwrap());
    let b = calculate_chart(parse_birth_time("2011-03-01 08:00:00").unwrap());
    assert_eq!(a.day, b.day);
}
