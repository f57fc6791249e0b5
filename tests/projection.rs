//! 연도별 Fio B 표 회귀 테스트. 기본 입력값(0,90 / 3.397,00 / 254,1366387) 기준.
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solar_wire_calculator::tariff::{
    availability_value, build_projection, effective_wire_b_ratio, price_per_kwh,
    year_percent_factor, yearly_value, InputField, ProjectionCache, ProjectionParams,
    TariffError, TariffInputs,
};

fn params() -> ProjectionParams {
    ProjectionParams::default()
}

#[test]
fn percent_factor_grows_by_fifteen_points() {
    let p = params();
    assert_eq!(year_percent_factor(&p, 2023), dec!(0.15));
    assert_eq!(year_percent_factor(&p, 2028), dec!(0.90));
    for year in 2023..2028 {
        assert_eq!(
            year_percent_factor(&p, year + 1),
            year_percent_factor(&p, year) + dec!(0.15)
        );
    }
}

#[test]
fn percent_factor_is_uncapped_outside_the_window() {
    let p = params();
    assert_eq!(year_percent_factor(&p, 2030), dec!(1.20));
    assert_eq!(year_percent_factor(&p, 2022), Decimal::ZERO);
}

#[test]
fn first_year_matches_reference_values() {
    let inputs = TariffInputs::default();
    let rows = build_projection(&params(), &inputs, 2023).expect("projection");
    let first = &rows[0];
    assert_eq!(first.year, 2023);
    assert_eq!(first.percent, dec!(15));
    assert_eq!(effective_wire_b_ratio(&inputs).unwrap(), dec!(0.282374043));
    assert_eq!(first.percent_gain, Some(dec!(4.235610645)));
    assert_eq!(first.consumption, dec!(3397));
    assert_eq!(first.computed_value, Some(dec!(129.495324249585)));
    assert_eq!(first.availability_value, dec!(90));
    assert_eq!(first.billed_value, first.computed_value);
}

#[test]
fn sixth_year_matches_reference_values() {
    let inputs = TariffInputs::default();
    let rows = build_projection(&params(), &inputs, 2023).expect("projection");
    let last = rows.last().expect("six rows");
    assert_eq!(last.year, 2028);
    assert_eq!(last.percent, dec!(90));
    assert_eq!(last.computed_value, Some(dec!(776.97194549751)));
    assert_eq!(last.billed_value, last.computed_value);
}

#[test]
fn price_per_kwh_uses_start_year_factor() {
    let inputs = TariffInputs::default();
    assert_eq!(price_per_kwh(&params(), &inputs).unwrap(), dec!(0.038120495805));
}

#[test]
fn rows_before_current_year_are_dropped() {
    let inputs = TariffInputs::default();
    let p = params();

    let all = build_projection(&p, &inputs, 2000).unwrap();
    assert_eq!(
        all.iter().map(|r| r.year).collect::<Vec<_>>(),
        vec![2023, 2024, 2025, 2026, 2027, 2028]
    );

    let rolling = build_projection(&p, &inputs, 2026).unwrap();
    assert_eq!(
        rolling.iter().map(|r| r.year).collect::<Vec<_>>(),
        vec![2026, 2027, 2028]
    );
    assert_eq!(rolling[0], all[3]);

    let last_year = build_projection(&p, &inputs, 2028).unwrap();
    assert_eq!(last_year.len(), 1);
    assert_eq!(last_year[0], all[5]);

    assert!(build_projection(&p, &inputs, 2029).unwrap().is_empty());
}

#[test]
fn availability_is_a_floor() {
    // 소비량이 작으면 가용성 요금이 청구된다.
    let inputs = TariffInputs {
        tariff_per_kwh: dec!(0.90),
        consumption_kwh: dec!(100),
        wire_b_reference: dec!(254.1366387),
    };
    let rows = build_projection(&params(), &inputs, 2023).unwrap();
    for row in &rows {
        let computed = row.computed_value.expect("computed");
        assert_eq!(row.billed_value, Some(computed.max(row.availability_value)));
    }
    assert_eq!(rows[0].billed_value, Some(dec!(90)));
    assert!(rows[0].computed_value < Some(dec!(90)));
}

#[test]
fn yearly_value_scales_with_consumption() {
    let p = params();
    let base = TariffInputs::default();
    let doubled = TariffInputs {
        consumption_kwh: base.consumption_kwh * dec!(2),
        ..base
    };
    for year in 2023..=2028 {
        assert_eq!(
            yearly_value(&p, &doubled, year).unwrap(),
            yearly_value(&p, &base, year).unwrap() * dec!(2)
        );
    }
}

#[test]
fn projection_is_deterministic() {
    let inputs = TariffInputs::default();
    let a = build_projection(&params(), &inputs, 2024).unwrap();
    let b = build_projection(&params(), &inputs, 2024).unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_tariff_only_fails_dependent_fields() {
    let inputs = TariffInputs {
        tariff_per_kwh: Decimal::ZERO,
        ..TariffInputs::default()
    };
    assert!(matches!(
        effective_wire_b_ratio(&inputs),
        Err(TariffError::DivisionByZero { .. })
    ));
    assert_eq!(availability_value(&inputs).unwrap(), Decimal::ZERO);

    let rows = build_projection(&params(), &inputs, 2023).expect("rows still computed");
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.percent_gain.is_none()));
    assert_eq!(rows[0].computed_value, Some(dec!(129.495324249585)));
    assert_eq!(rows[0].billed_value, rows[0].computed_value);
}

#[test]
fn zero_consumption_fails_price_per_kwh() {
    let inputs = TariffInputs {
        consumption_kwh: Decimal::ZERO,
        ..TariffInputs::default()
    };
    assert!(matches!(
        price_per_kwh(&params(), &inputs),
        Err(TariffError::DivisionByZero { operation: "price_per_kwh" })
    ));
    let rows = build_projection(&params(), &inputs, 2023).unwrap();
    assert!(rows.iter().all(|r| r.billed_value == Some(dec!(90))));
}

#[test]
fn custom_window_is_respected() {
    let p = ProjectionParams {
        start_year: 2025,
        schedule_length: 2,
    };
    let rows = build_projection(&p, &TariffInputs::default(), 2020).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].percent, dec!(15));
    assert_eq!(rows[1].year, 2026);
}

#[test]
fn cache_recomputes_only_on_key_change() {
    let p = params();
    let inputs = TariffInputs::default();
    let mut cache = ProjectionCache::new();

    let first = cache.get_or_build(&p, &inputs, 2023).unwrap().to_vec();
    let again = cache.get_or_build(&p, &inputs, 2023).unwrap().to_vec();
    assert_eq!(first, again);
    assert_eq!(cache.computations(), 1);

    cache.get_or_build(&p, &inputs, 2025).unwrap();
    assert_eq!(cache.computations(), 2);

    let edited = TariffInputs {
        tariff_per_kwh: dec!(0.95),
        ..inputs
    };
    let rows = cache.get_or_build(&p, &edited, 2025).unwrap();
    assert_eq!(rows[0].availability_value, dec!(95));
    assert_eq!(cache.computations(), 3);

    cache.invalidate();
    cache.get_or_build(&p, &edited, 2025).unwrap();
    assert_eq!(cache.computations(), 4);
}

#[test]
fn overflow_blanks_only_the_affected_cells() {
    let inputs = TariffInputs {
        consumption_kwh: InputField::Consume
            .parse("79228162514264337593543950335")
            .unwrap(),
        wire_b_reference: InputField::BWire.parse("99999999999999999999").unwrap(),
        ..TariffInputs::default()
    };
    assert!(matches!(
        yearly_value(&params(), &inputs, 2023),
        Err(TariffError::Overflow { operation: "yearly_value" })
    ));
    let rows = build_projection(&params(), &inputs, 2023).expect("rows still built");
    assert_eq!(rows.len(), 6);
    for row in &rows {
        assert_eq!(row.computed_value, None);
        assert_eq!(row.billed_value, None);
        assert_eq!(row.availability_value, dec!(90));
    }
}
