//! 마스킹/표시 형식 회귀 테스트.
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use solar_wire_calculator::i18n::Translator;
use solar_wire_calculator::mask::{self, MaskError, MaskOptions};
use solar_wire_calculator::render::{self, DisplayRow, Summary, PLACEHOLDER};
use solar_wire_calculator::tariff::{build_projection, InputField, ProjectionParams, TariffInputs};

#[test]
fn raw_strings_scale_by_field_precision() {
    assert_eq!(InputField::Tariff.parse("90").unwrap(), dec!(0.90));
    assert_eq!(InputField::Consume.parse("339700").unwrap(), dec!(3397.00));
    assert_eq!(InputField::BWire.parse("2541366387").unwrap(), dec!(254.1366387));
    assert_eq!(InputField::Tariff.parse("").unwrap(), Decimal::ZERO);
    assert_eq!(InputField::Tariff.parse("0095").unwrap(), dec!(0.95));
}

#[test]
fn non_digit_raw_strings_are_rejected() {
    assert_eq!(
        mask::raw_to_decimal("9,0", 2),
        Err(MaskError::NotDigits("9,0".to_string()))
    );
    assert!(matches!(
        mask::raw_to_decimal("-90", 2),
        Err(MaskError::NotDigits(_))
    ));
    let huge = "9".repeat(40);
    assert!(matches!(
        mask::raw_to_decimal(&huge, 2),
        Err(MaskError::TooLarge(_))
    ));
}

#[test]
fn formats_brazilian_currency() {
    assert_eq!(mask::format(dec!(129.495324249585), &MaskOptions::currency()), "R$ 129,50");
    assert_eq!(mask::format(dec!(1234567.891), &MaskOptions::currency()), "R$ 1.234.567,89");
    assert_eq!(mask::format(dec!(90), &MaskOptions::currency()), "R$ 90,00");
    assert_eq!(mask::format(dec!(0.0381204958), &MaskOptions::price_per_kwh()), "R$ 0,0381");
}

#[test]
fn formats_percent_and_energy() {
    assert_eq!(mask::format(dec!(4.235610645), &MaskOptions::percent()), "4,24 %");
    assert_eq!(mask::format(dec!(15), &MaskOptions::percent()), "15,00 %");
    assert_eq!(mask::format(dec!(3397), &MaskOptions::energy()), "3.397,00 KWh");
}

#[test]
fn rounds_half_away_from_zero() {
    assert_eq!(mask::format(dec!(0.005), &MaskOptions::plain(2)), "0,01");
    assert_eq!(mask::format(dec!(-0.005), &MaskOptions::plain(2)), "-0,01");
    assert_eq!(mask::format(dec!(-0.004), &MaskOptions::plain(2)), "0,00");
}

#[test]
fn masks_raw_input_for_display() {
    assert_eq!(
        mask::mask_raw("2541366387", &MaskOptions::for_field(InputField::BWire)).unwrap(),
        "254,1366387"
    );
    assert_eq!(
        mask::mask_raw("90", &MaskOptions::for_field(InputField::Tariff)).unwrap(),
        "R$ 0,90"
    );
    // 입력 중: 마지막에 숫자를 하나 더 치면 자릿수가 왼쪽으로 밀린다.
    let typed = mask::raw_digits("R$ 0,901");
    assert_eq!(
        mask::mask_raw(&typed, &MaskOptions::for_field(InputField::Tariff)).unwrap(),
        "R$ 9,01"
    );
}

#[test]
fn display_row_matches_table_columns() {
    let rows =
        build_projection(&ProjectionParams::default(), &TariffInputs::default(), 2023).unwrap();
    let first = DisplayRow::from_row(&rows[0]);
    assert_eq!(
        first.cells(),
        ["2023", "15,00 %", "4,24 %", "3.397,00 KWh", "R$ 129,50", "R$ 90,00", "R$ 129,50"]
    );
}

#[test]
fn failed_fields_render_placeholder() {
    let inputs = TariffInputs {
        tariff_per_kwh: Decimal::ZERO,
        ..TariffInputs::default()
    };
    let params = ProjectionParams::default();
    let rows = build_projection(&params, &inputs, 2023).unwrap();
    assert_eq!(DisplayRow::from_row(&rows[0]).percent_gain, PLACEHOLDER);

    let summary = Summary::compute(&params, &inputs);
    assert_eq!(summary.wire_b_weight_text(), PLACEHOLDER);
    assert_eq!(summary.price_per_kwh_text(), "R$ 0,0381");
}

#[test]
fn summary_for_default_inputs() {
    let summary = Summary::compute(&ProjectionParams::default(), &TariffInputs::default());
    assert_eq!(summary.wire_b_weight, Some(dec!(28.2374043)));
    assert_eq!(summary.wire_b_weight_text(), "28,24 %");
    assert_eq!(summary.price_per_kwh_text(), "R$ 0,0381");
}

#[test]
fn table_headers_follow_language() {
    let pt = render::column_headers(&Translator::new("pt-br"));
    assert_eq!(
        pt,
        ["Ano", "Cobrança", "Aumento", "Consumo", "Fio B", "Disponibilidade", "Tarifa"]
    );
    let en = render::column_headers(&Translator::new("en-us"));
    assert_eq!(en[0], "Year");

    let table = render::projection_table(
        &build_projection(&ProjectionParams::default(), &TariffInputs::default(), 2027).unwrap(),
        &Translator::new("pt-br"),
    )
    .to_string();
    assert!(table.contains("Disponibilidade"));
    assert!(table.contains("R$ 776,97"));
    assert!(!table.contains("2026"));
}
