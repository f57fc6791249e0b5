use std::io::{self, Write};

use log::warn;

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::mask::{self, MaskOptions};
use crate::render::{self, Summary};
use crate::storage::InputStore;
use crate::tariff::{build_projection, InputField, ProjectionParams};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowProjection,
    Edit(InputField),
    Reset(InputField),
    Settings,
    Exit,
}

/// 메뉴 번호를 선택지로 바꾼다.
pub fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::ShowProjection),
        "2" => Some(MenuChoice::Edit(InputField::Tariff)),
        "3" => Some(MenuChoice::Edit(InputField::Consume)),
        "4" => Some(MenuChoice::Edit(InputField::BWire)),
        "5" => Some(MenuChoice::Reset(InputField::Tariff)),
        "6" => Some(MenuChoice::Reset(InputField::Consume)),
        "7" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면(EOF) 종료를 선택한 것으로 본다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SHOW,
        keys::MAIN_MENU_EDIT_TARIFF,
        keys::MAIN_MENU_EDIT_CONSUME,
        keys::MAIN_MENU_EDIT_BWIRE,
        keys::MAIN_MENU_RESET_TARIFF,
        keys::MAIN_MENU_RESET_CONSUME,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line(&tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(MenuChoice::Exit)
            }
            Err(e) => return Err(e),
        };
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn field_label_key(field: InputField) -> &'static str {
    match field {
        InputField::Tariff => keys::FIELD_TARIFF,
        InputField::Consume => keys::FIELD_CONSUME,
        InputField::BWire => keys::FIELD_BWIRE,
    }
}

fn masked_value(store: &InputStore, field: InputField) -> String {
    mask::format(store.inputs().get(field), &MaskOptions::for_field(field))
}

/// 입력값, 요약 지표, 연도별 표를 출력한다.
pub fn print_projection(
    tr: &Translator,
    params: &ProjectionParams,
    store: &InputStore,
    current_year: i32,
) -> Result<(), AppError> {
    let inputs = store.inputs();
    println!();
    for field in InputField::ALL {
        println!("{} {}", tr.t(field_label_key(field)), masked_value(store, field));
    }
    let summary = Summary::compute(params, &inputs);
    println!(
        "{} {}",
        tr.t(keys::FIELD_WIRE_B_WEIGHT),
        summary.wire_b_weight_text()
    );
    println!(
        "{} {}",
        tr.t(keys::FIELD_PRICE_PER_KWH),
        summary.price_per_kwh_text()
    );

    match build_projection(params, &inputs, current_year) {
        Ok(rows) if rows.is_empty() => println!("{}", tr.t(keys::TABLE_EMPTY)),
        Ok(rows) => println!("{}", render::projection_table(&rows, tr)),
        Err(e) => {
            warn!("{e}");
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
        }
    }
    Ok(())
}

/// 필드 값을 입력받아 저장한다. 마스크 문자(R$, 구분자 등)는 무시한다.
pub fn handle_edit(
    tr: &Translator,
    store: &mut InputStore,
    field: InputField,
) -> Result<(), AppError> {
    println!("\n{}: {}", tr.t(field_label_key(field)), masked_value(store, field));
    let text = read_optional_line(&tr.t(keys::PROMPT_NEW_VALUE))?;
    if text.trim().is_empty() {
        return Ok(());
    }
    match store.set(field, mask::raw_digits(&text)) {
        Ok(()) => println!("{} {}", tr.t(keys::VALUE_SAVED), masked_value(store, field)),
        Err(e) => {
            warn!("{e}");
            println!("{}", tr.t(keys::VALUE_REJECTED));
        }
    }
    Ok(())
}

/// 필드를 기본값으로 되돌린다.
pub fn handle_reset(tr: &Translator, store: &mut InputStore, field: InputField) {
    store.reset(field);
    println!(
        "{} {} {}",
        tr.t(keys::VALUE_RESET),
        tr.t(field_label_key(field)),
        masked_value(store, field)
    );
}

/// 언어 설정 메뉴를 처리한다. 언어가 바뀌면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), tr.language_code());
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_optional_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let code = match sel.trim() {
        "" => return Ok(false),
        "1" => "pt-br",
        "2" => "en-us",
        "3" => "ko-kr",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = code.to_string();
    println!("{} {code}", tr.t(keys::SETTINGS_SAVED));
    Ok(true)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

/// EOF를 빈 입력(취소)으로 취급한다.
fn read_optional_line(prompt: &str) -> Result<String, AppError> {
    match read_line(prompt) {
        Err(AppError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(String::new()),
        other => other,
    }
}
