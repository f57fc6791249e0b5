use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SHOW: &str = "main_menu.show";
    pub const MAIN_MENU_EDIT_TARIFF: &str = "main_menu.edit_tariff";
    pub const MAIN_MENU_EDIT_CONSUME: &str = "main_menu.edit_consume";
    pub const MAIN_MENU_EDIT_BWIRE: &str = "main_menu.edit_bwire";
    pub const MAIN_MENU_RESET_TARIFF: &str = "main_menu.reset_tariff";
    pub const MAIN_MENU_RESET_CONSUME: &str = "main_menu.reset_consume";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FIELD_TARIFF: &str = "field.tariff";
    pub const FIELD_CONSUME: &str = "field.consume";
    pub const FIELD_BWIRE: &str = "field.bwire";
    pub const FIELD_WIRE_B_WEIGHT: &str = "field.wire_b_weight";
    pub const FIELD_PRICE_PER_KWH: &str = "field.price_per_kwh";

    pub const PROMPT_NEW_VALUE: &str = "prompt.new_value";
    pub const VALUE_SAVED: &str = "result.value_saved";
    pub const VALUE_RESET: &str = "result.value_reset";
    pub const VALUE_REJECTED: &str = "error.value_rejected";

    pub const TABLE_YEAR: &str = "table.year";
    pub const TABLE_CHARGE: &str = "table.charge";
    pub const TABLE_INCREASE: &str = "table.increase";
    pub const TABLE_CONSUMPTION: &str = "table.consumption";
    pub const TABLE_WIRE_B: &str = "table.wire_b";
    pub const TABLE_AVAILABILITY: &str = "table.availability";
    pub const TABLE_TARIFF: &str = "table.tariff";
    pub const TABLE_EMPTY: &str = "table.empty";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_RESET_TIP: &str = "gui.reset_tip";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_ALPHA: &str = "gui.alpha";
    pub const GUI_SAVE: &str = "gui.save";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Pt,
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::Pt
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Pt => "pt-br",
            Language::En => "en-us",
            Language::Ko => "ko-kr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(pt/en/ko)에 따라 번역기를 생성한다. 알 수 없는 코드는 pt로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        debug!(
            "language {lang_code}, pack overrides loaded: {}",
            overrides.is_some()
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 포르투갈어 순으로 찾는다.
    pub fn t(&self, key: &str) -> Cow<'static, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Owned(v.clone());
        }
        let builtin = match self.lang {
            Language::Pt => pt(key),
            Language::En => en(key).or_else(|| pt(key)),
            Language::Ko => ko(key).or_else(|| pt(key)),
        };
        Cow::Borrowed(builtin.unwrap_or(""))
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "pt-br".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("pt") => Some("pt-br".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., pt-br)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., pt)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 언어팩 TOML을 `섹션.키` 형태의 평탄한 표로 펼친다. 문자열이 아닌 값은 버린다.
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = toml::from_str(src).ok()?;
    let mut pending: Vec<(String, toml::Value)> = root.into_iter().collect();
    let mut map = HashMap::new();
    while let Some((key, value)) = pending.pop() {
        match value {
            toml::Value::String(text) => {
                map.insert(key, text);
            }
            toml::Value::Table(section) => {
                pending.extend(section.into_iter().map(|(k, v)| (format!("{key}.{k}"), v)));
            }
            _ => {}
        }
    }
    (!map.is_empty()).then_some(map)
}

fn pt(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Calculadora Fio B",
        ERROR_PREFIX => "Erro",
        APP_EXIT => "Encerrando.",
        MAIN_MENU_TITLE => "\n=== Calculadora Fio B ===",
        MAIN_MENU_SHOW => "1) Ver projeção",
        MAIN_MENU_EDIT_TARIFF => "2) Alterar valor tarifário",
        MAIN_MENU_EDIT_CONSUME => "3) Alterar consumo",
        MAIN_MENU_EDIT_BWIRE => "4) Alterar referência do fio B",
        MAIN_MENU_RESET_TARIFF => "5) Restaurar valor tarifário",
        MAIN_MENU_RESET_CONSUME => "6) Restaurar consumo",
        MAIN_MENU_SETTINGS => "7) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Escolha: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        FIELD_TARIFF => "Valor tarifário por KWh",
        FIELD_CONSUME => "Consumo da geração em KWh",
        FIELD_BWIRE => "Referência do fio B (R$/MWh)",
        FIELD_WIRE_B_WEIGHT => "Peso fio B na tarifa",
        FIELD_PRICE_PER_KWH => "Preço por cada KW consumido",
        PROMPT_NEW_VALUE => "Novo valor (vazio cancela): ",
        VALUE_SAVED => "Valor salvo:",
        VALUE_RESET => "Valor restaurado:",
        VALUE_REJECTED => "Valor não aceito, mantendo o anterior.",
        TABLE_YEAR => "Ano",
        TABLE_CHARGE => "Cobrança",
        TABLE_INCREASE => "Aumento",
        TABLE_CONSUMPTION => "Consumo",
        TABLE_WIRE_B => "Fio B",
        TABLE_AVAILABILITY => "Disponibilidade",
        TABLE_TARIFF => "Tarifa",
        TABLE_EMPTY => "Nenhum ano restante no período de projeção.",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual:",
        SETTINGS_OPTIONS => "1) Português  2) English  3) 한국어",
        SETTINGS_PROMPT_CHANGE => "Número do idioma (enter cancela): ",
        SETTINGS_INVALID => "Entrada inválida; idioma mantido.",
        SETTINGS_SAVED => "Idioma alterado para:",
        GUI_RESET_TIP => "Restaurar valor padrão",
        GUI_SETTINGS => "Configurações",
        GUI_LANGUAGE => "Idioma",
        GUI_LANGUAGE_AUTO => "Sistema",
        GUI_ALPHA => "Transparência da janela",
        GUI_SAVE => "Salvar configurações",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Wire-B Calculator",
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Wire-B Calculator ===",
        MAIN_MENU_SHOW => "1) Show projection",
        MAIN_MENU_EDIT_TARIFF => "2) Edit tariff",
        MAIN_MENU_EDIT_CONSUME => "3) Edit consumption",
        MAIN_MENU_EDIT_BWIRE => "4) Edit wire-B reference",
        MAIN_MENU_RESET_TARIFF => "5) Reset tariff",
        MAIN_MENU_RESET_CONSUME => "6) Reset consumption",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FIELD_TARIFF => "Tariff per KWh",
        FIELD_CONSUME => "Generated consumption in KWh",
        FIELD_BWIRE => "Wire-B reference (R$/MWh)",
        FIELD_WIRE_B_WEIGHT => "Wire-B weight in tariff",
        FIELD_PRICE_PER_KWH => "Price per consumed KWh",
        PROMPT_NEW_VALUE => "New value (empty cancels): ",
        VALUE_SAVED => "Saved:",
        VALUE_RESET => "Reset to:",
        VALUE_REJECTED => "Value rejected, keeping the previous one.",
        TABLE_YEAR => "Year",
        TABLE_CHARGE => "Charge",
        TABLE_INCREASE => "Increase",
        TABLE_CONSUMPTION => "Consumption",
        TABLE_WIRE_B => "Wire B",
        TABLE_AVAILABILITY => "Availability",
        TABLE_TARIFF => "Tariff",
        TABLE_EMPTY => "No years left in the projection window.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_CHANGE => "Language number (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        GUI_RESET_TIP => "Reset to default",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_LANGUAGE_AUTO => "System",
        GUI_ALPHA => "Window transparency",
        GUI_SAVE => "Save settings",
        _ => return None,
    })
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Fio B 계산기",
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Fio B 계산기 ===",
        MAIN_MENU_SHOW => "1) 연도별 표 보기",
        MAIN_MENU_EDIT_TARIFF => "2) 단가 변경",
        MAIN_MENU_EDIT_CONSUME => "3) 소비량 변경",
        MAIN_MENU_EDIT_BWIRE => "4) Fio B 기준값 변경",
        MAIN_MENU_RESET_TARIFF => "5) 단가 초기화",
        MAIN_MENU_RESET_CONSUME => "6) 소비량 초기화",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FIELD_TARIFF => "KWh당 단가",
        FIELD_CONSUME => "발전 소비량 [KWh]",
        FIELD_BWIRE => "Fio B 기준값 [R$/MWh]",
        FIELD_WIRE_B_WEIGHT => "단가 중 Fio B 비중",
        FIELD_PRICE_PER_KWH => "소비 KWh당 가격",
        PROMPT_NEW_VALUE => "새 값 (엔터 시 취소): ",
        VALUE_SAVED => "저장됨:",
        VALUE_RESET => "초기화됨:",
        VALUE_REJECTED => "허용되지 않는 값이므로 이전 값을 유지합니다.",
        TABLE_YEAR => "연도",
        TABLE_CHARGE => "부과율",
        TABLE_INCREASE => "증가율",
        TABLE_CONSUMPTION => "소비량",
        TABLE_WIRE_B => "Fio B",
        TABLE_AVAILABILITY => "가용성 요금",
        TABLE_TARIFF => "청구액",
        TABLE_EMPTY => "남은 연도가 없습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_CHANGE => "언어 번호 (취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        GUI_RESET_TIP => "기본값으로 되돌리기",
        GUI_SETTINGS => "설정",
        GUI_LANGUAGE => "언어",
        GUI_LANGUAGE_AUTO => "시스템",
        GUI_ALPHA => "창 투명도",
        GUI_SAVE => "설정 저장",
        _ => return None,
    })
}
