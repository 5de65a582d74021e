/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs of the eligibility engine
use chrono::{Datelike, Months, NaiveDate};
use proptest::prelude::*;
use zns_leads_api::contact::normalize_br_phone;
use zns_leads_api::eligibility::{
    age_in_months, calculate_benefit_date, calculate_score, parse_birth_date,
    parse_contribution_time, parse_contribution_years, EligibilityScore,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

const BUCKETS: &[&str] = &[
    "entre 5 e 10 anos",
    "entre 10 e 15 anos",
    "entre 15 e 20 anos",
    "entre 15 e 25 anos",
    "entre 20 e 25 anos",
    "entre 25 e 30 anos",
    "entre 25 e 35 anos",
    "entre 30 e 35 anos",
    "mais de 35 anos",
    "menos de 15 anos",
];

// Property: Parsers should never panic
proptest! {
    #[test]
    fn contribution_parsers_never_panic(input in "\\PC*") {
        let _ = parse_contribution_time(Some(&input));
        let _ = parse_contribution_years(&input);
    }

    #[test]
    fn birth_date_parser_never_panics(input in "\\PC*") {
        let _ = parse_birth_date(&input);
    }

    #[test]
    fn phone_normalization_never_panics(phone in "\\PC*") {
        let _ = normalize_br_phone(&phone);
    }

    #[test]
    fn leading_integer_is_read(n in 0i64..1_000_000, suffix in "[ a-wyz]{0,10}") {
        let input = format!("{}{}", n, suffix);
        prop_assert_eq!(parse_contribution_years(&input), Some(n));
    }
}

// Property: Bucket matching is case and padding insensitive
proptest! {
    #[test]
    fn buckets_ignore_case_and_padding(
        idx in 0usize..10,
        upper in any::<bool>(),
        pad in "[ ]{0,3}"
    ) {
        let bucket = BUCKETS[idx];
        let styled = if upper { bucket.to_uppercase() } else { bucket.to_string() };
        let input = format!("{pad}{styled}{pad}");

        prop_assert_eq!(
            parse_contribution_time(Some(&input)),
            parse_contribution_time(Some(bucket))
        );
        prop_assert!(parse_contribution_time(Some(bucket)).is_some());
    }
}

// Property: Score routing invariants
proptest! {
    #[test]
    fn under_696_months_always_scores_80(
        months in 0u32..696,
        gender in "[fmFMx]?",
        idx in 0usize..10
    ) {
        let birth = today().checked_sub_months(Months::new(months)).unwrap();
        prop_assert_eq!(age_in_months(birth, today()), months as i32);
        prop_assert_eq!(
            calculate_score(&gender, birth, Some(BUCKETS[idx]), today()),
            EligibilityScore::Young
        );
    }

    #[test]
    fn score_is_always_a_known_code(
        months in 0u32..1500,
        gender in "\\PC{0,3}",
        contribution in proptest::option::of("\\PC{0,20}")
    ) {
        let birth = today().checked_sub_months(Months::new(months)).unwrap();
        let code = calculate_score(&gender, birth, contribution.as_deref(), today()).code();
        prop_assert!([80, 85, 90, 91, 92, 96, 97, 98, 50].contains(&code));
    }

    #[test]
    fn male_scores_never_fall_back(months in 696u32..1500, idx in 0usize..10) {
        let birth = today().checked_sub_months(Months::new(months)).unwrap();
        let code = calculate_score("m", birth, Some(BUCKETS[idx]), today()).code();
        prop_assert!([96, 97, 98].contains(&code));
    }
}

// Property: Benefit date never panics and never lands in the past
proptest! {
    #[test]
    fn benefit_date_never_panics(
        year in -200_000i32..200_000,
        contribution in "\\PC*",
        feminino in any::<bool>()
    ) {
        let gender = if feminino { "feminino" } else { "masculino" };
        if let Some(birth) = NaiveDate::from_ymd_opt(year, 1, 1) {
            let _ = calculate_benefit_date(gender, birth, &contribution, today());
        }
    }

    #[test]
    fn benefit_date_is_never_before_today(
        age in 0i32..120,
        years in -50i64..60,
        feminino in any::<bool>()
    ) {
        let gender = if feminino { "feminino" } else { "masculino" };
        let birth = NaiveDate::from_ymd_opt(today().year() - age, 3, 1).unwrap();
        let date = calculate_benefit_date(gender, birth, &years.to_string(), today());

        prop_assert!(date.is_some());
        prop_assert!(date.unwrap() >= today());
    }

    #[test]
    fn extreme_year_counts_do_not_panic(years in any::<i64>()) {
        let birth = NaiveDate::from_ymd_opt(1980, 5, 20).unwrap();
        let _ = calculate_benefit_date("masculino", birth, &years.to_string(), today());
    }
}
