//! 입력값 저장소/설정 파일 회귀 테스트.
use std::fs;

use rust_decimal_macros::dec;
use solar_wire_calculator::config::{self, Config};
use solar_wire_calculator::i18n::Translator;
use solar_wire_calculator::render::{DisplayRow, Summary, PLACEHOLDER};
use solar_wire_calculator::storage::{storage_key, InputStore};
use solar_wire_calculator::tariff::{build_projection, InputField, ProjectionParams, TariffInputs};
use solar_wire_calculator::ui_cli;
use tempfile::tempdir;

#[test]
fn missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let store = InputStore::load(dir.path().join("missing.toml"));
    assert_eq!(store.inputs(), TariffInputs::default());
    assert_eq!(store.raw(InputField::Consume), "339700");
}

#[test]
fn values_survive_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reload.toml");
    let mut store = InputStore::load(&path);
    store.set(InputField::Tariff, "95").expect("valid raw");
    store.set(InputField::Consume, "").expect("empty is zero");

    let reloaded = InputStore::load(&path);
    assert_eq!(reloaded.raw(InputField::Tariff), "95");
    assert_eq!(reloaded.inputs().tariff_per_kwh, dec!(0.95));
    assert_eq!(reloaded.inputs().consumption_kwh, dec!(0));
    assert_eq!(reloaded.raw(InputField::BWire), "2541366387");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains(&storage_key(InputField::Tariff)));
    assert_eq!(storage_key(InputField::Tariff), "solar-wire@tariff");
}

#[test]
fn rejected_value_keeps_last_known_good() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rejected.toml");
    let mut store = InputStore::load(&path);
    store.set(InputField::Tariff, "120").unwrap();
    assert!(store.set(InputField::Tariff, "1,20").is_err());
    assert_eq!(store.raw(InputField::Tariff), "120");
    assert_eq!(store.inputs().tariff_per_kwh, dec!(1.20));
}

#[test]
fn reset_restores_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reset.toml");
    let mut store = InputStore::load(&path);
    store.set(InputField::Consume, "100").unwrap();
    store.reset(InputField::Consume);
    assert_eq!(store.raw(InputField::Consume), "339700");
    assert_eq!(InputStore::load(&path).inputs(), TariffInputs::default());
}

#[test]
fn unparseable_stored_value_falls_back_per_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corrupt-key.toml");
    fs::write(
        &path,
        "\"solar-wire@tariff\" = \"abc\"\n\"solar-wire@consume\" = \"100000\"\n",
    )
    .unwrap();
    let store = InputStore::load(&path);
    assert_eq!(store.raw(InputField::Tariff), "90");
    assert_eq!(store.inputs().consumption_kwh, dec!(1000));
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("malformed.toml");
    fs::write(&path, "this is = not [toml").unwrap();
    let store = InputStore::load(&path);
    assert_eq!(store.inputs(), TariffInputs::default());
}

#[test]
fn failed_write_keeps_value_in_memory() {
    let dir = tempdir().unwrap();
    let missing_parent = dir.path().join("not-a-dir").join("nested");
    let mut store = InputStore::load(missing_parent.join("store.toml"));
    store.set(InputField::Tariff, "77").expect("write failure is not an input error");
    assert_eq!(store.inputs().tariff_per_kwh, dec!(0.77));
}

#[test]
fn config_is_created_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_default_at(&path).expect("config");
    assert!(path.exists());
    assert_eq!(cfg.projection, ProjectionParams::default());
    assert_eq!(cfg.language, "auto");

    let custom = Config {
        language: "en-us".into(),
        projection: ProjectionParams {
            start_year: 2024,
            schedule_length: 4,
        },
        ..Config::default()
    };
    custom.save_at(&path).unwrap();
    let reloaded = config::load_or_default_at(&path).unwrap();
    assert_eq!(reloaded.language, "en-us");
    assert_eq!(reloaded.projection.start_year, 2024);
    assert_eq!(reloaded.storage_path, "solar-wire.toml");
}

#[test]
fn overflowing_inputs_only_blank_dependent_cells() {
    let dir = tempdir().unwrap();
    let mut store = InputStore::load(dir.path().join("huge.toml"));
    store.set(InputField::Consume, "79228162514264337593543950335").unwrap();
    store.set(InputField::BWire, "99999999999999999999").unwrap();

    let params = ProjectionParams::default();
    let inputs = store.inputs();
    let rows = build_projection(&params, &inputs, 2023).expect("overflow stays per cell");
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.computed_value.is_none() && r.billed_value.is_none()));
    assert_eq!(rows[0].availability_value, dec!(90));
    assert!(rows[0].percent_gain.is_some());

    let cells = DisplayRow::from_row(&rows[0]);
    assert_eq!(cells.computed_value, PLACEHOLDER);
    assert_eq!(cells.billed_value, PLACEHOLDER);
    assert_eq!(cells.availability_value, "R$ 90,00");
    assert_eq!(Summary::compute(&params, &inputs).price_per_kwh_text(), PLACEHOLDER);

    // 다음 실행(--print)도 계속 진행된다.
    let reloaded = InputStore::load(dir.path().join("huge.toml"));
    ui_cli::print_projection(&Translator::new("pt-br"), &params, &reloaded, 2023)
        .expect("printing does not abort");
}
