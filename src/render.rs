//! 엔진 결과를 화면 문자열로 바꾼다. 숫자 표기는 언어와 관계없이 브라질 형식이다.

use comfy_table::{presets, Cell, CellAlignment, Table};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::i18n::{keys, Translator};
use crate::mask::{self, MaskOptions};
use crate::tariff::{
    effective_wire_b_ratio, price_per_kwh, ProjectionParams, ProjectionRow, TariffInputs,
};

/// 계산에 실패한 칸에 표시하는 값.
pub const PLACEHOLDER: &str = "-";

/// 표 헤더 키 (열 순서대로).
pub const COLUMN_KEYS: [&str; 7] = [
    keys::TABLE_YEAR,
    keys::TABLE_CHARGE,
    keys::TABLE_INCREASE,
    keys::TABLE_CONSUMPTION,
    keys::TABLE_WIRE_B,
    keys::TABLE_AVAILABILITY,
    keys::TABLE_TARIFF,
];

fn or_placeholder(value: Option<Decimal>, opts: &MaskOptions) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| mask::format(v, opts))
}

/// 표 한 줄의 표시 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub year: String,
    pub percent: String,
    pub percent_gain: String,
    pub consumption: String,
    pub computed_value: String,
    pub availability_value: String,
    pub billed_value: String,
}

impl DisplayRow {
    pub fn from_row(row: &ProjectionRow) -> Self {
        Self {
            year: row.year.to_string(),
            percent: mask::format(row.percent, &MaskOptions::percent()),
            percent_gain: or_placeholder(row.percent_gain, &MaskOptions::percent()),
            consumption: mask::format(row.consumption, &MaskOptions::energy()),
            computed_value: or_placeholder(row.computed_value, &MaskOptions::currency()),
            availability_value: mask::format(row.availability_value, &MaskOptions::currency()),
            billed_value: or_placeholder(row.billed_value, &MaskOptions::currency()),
        }
    }

    /// 헤더와 같은 순서의 칸들.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.year,
            &self.percent,
            &self.percent_gain,
            &self.consumption,
            &self.computed_value,
            &self.availability_value,
            &self.billed_value,
        ]
    }
}

/// 표 위에 표시하는 읽기 전용 지표.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// 단가 중 Fio B 비중 [%]
    pub wire_b_weight: Option<Decimal>,
    /// 소비 KWh당 가격 [R$]
    pub price_per_kwh: Option<Decimal>,
}

impl Summary {
    pub fn compute(params: &ProjectionParams, inputs: &TariffInputs) -> Self {
        Self {
            wire_b_weight: effective_wire_b_ratio(inputs)
                .map_err(|e| debug!("Fio B 비중 생략: {e}"))
                .ok()
                .and_then(|ratio| {
                    let weight = ratio.checked_mul(dec!(100));
                    if weight.is_none() {
                        debug!("Fio B 비중 생략: 소수 연산 범위 초과");
                    }
                    weight
                }),
            price_per_kwh: price_per_kwh(params, inputs)
                .map_err(|e| debug!("KWh당 가격 생략: {e}"))
                .ok(),
        }
    }

    pub fn wire_b_weight_text(&self) -> String {
        or_placeholder(self.wire_b_weight, &MaskOptions::percent())
    }

    pub fn price_per_kwh_text(&self) -> String {
        or_placeholder(self.price_per_kwh, &MaskOptions::price_per_kwh())
    }
}

/// 번역된 헤더.
pub fn column_headers(tr: &Translator) -> Vec<String> {
    COLUMN_KEYS.iter().map(|key| tr.t(key).into_owned()).collect()
}

/// 터미널 출력용 표를 만든다.
pub fn projection_table(rows: &[ProjectionRow], tr: &Translator) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(column_headers(tr));
    for row in rows.iter().map(DisplayRow::from_row) {
        table.add_row(row.cells().into_iter().enumerate().map(|(i, text)| {
            let cell = Cell::new(text);
            if i == 0 {
                cell.set_alignment(CellAlignment::Center)
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }
    table
}
