use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::mask::MaskError;

use super::inputs::{InputField, TariffInputs};

/// 단계적 부과가 시작되는 연도.
pub const DEFAULT_START_YEAR: i32 = 2023;
/// 표에 포함되는 연도 수.
pub const DEFAULT_SCHEDULE_LENGTH: u32 = 6;

/// 해마다 더해지는 Fio B 부과 비율.
const YEAR_STEP: Decimal = dec!(0.15);
/// Fio B 기준값은 MWh 단위로 주어지므로 KWh로 환산한다.
const WIRE_B_SCALE: Decimal = dec!(1000);
/// 가용성(최소 청구) 요금 = 단가 × 100 KWh.
const AVAILABILITY_KWH: Decimal = dec!(100);
const PERCENT: Decimal = dec!(100);

/// 엔진 계산 오류를 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TariffError {
    /// 저장된 문자열을 소수로 해석할 수 없는 경우
    #[error("{field} 입력값 '{raw}'을(를) 해석할 수 없음: {source}")]
    Parse {
        field: InputField,
        raw: String,
        #[source]
        source: MaskError,
    },
    /// 제수가 0인 경우 (단가 또는 소비량)
    #[error("0으로 나눌 수 없음: {operation}")]
    DivisionByZero { operation: &'static str },
    /// Decimal 표현 범위를 넘는 경우
    #[error("소수 연산 범위 초과: {operation}")]
    Overflow { operation: &'static str },
}

/// 표의 기간을 정하는 고정 파라미터. 설정 파일에서 덮어쓸 수 있다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub start_year: i32,
    pub schedule_length: u32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            schedule_length: DEFAULT_SCHEDULE_LENGTH,
        }
    }
}

impl ProjectionParams {
    /// 기간에 속하는 연도를 오름차순으로 돌려준다.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        let start = self.start_year;
        (0..self.schedule_length).map(move |offset| start.saturating_add_unsigned(offset))
    }

    /// 기간의 마지막 연도. 길이가 0이면 None.
    pub fn last_year(&self) -> Option<i32> {
        self.years().last()
    }
}

/// 화면 표의 한 줄. 모든 값은 반올림 전의 정확한 소수다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectionRow {
    pub year: i32,
    /// 해당 연도의 부과 비율 [%]
    pub percent: Decimal,
    /// 단가 대비 증가율 [%]. 단가가 0이면 계산할 수 없어 None.
    pub percent_gain: Option<Decimal>,
    /// 소비량 [KWh]
    pub consumption: Decimal,
    /// Fio B 부과액 [R$]. 범위를 넘으면 None.
    pub computed_value: Option<Decimal>,
    /// 가용성 요금 [R$]
    pub availability_value: Decimal,
    /// 실제 청구액 [R$]. 부과액을 모르면 None.
    pub billed_value: Option<Decimal>,
}

fn divide(
    dividend: Decimal,
    divisor: Decimal,
    operation: &'static str,
) -> Result<Decimal, TariffError> {
    if divisor.is_zero() {
        return Err(TariffError::DivisionByZero { operation });
    }
    dividend
        .checked_div(divisor)
        .ok_or(TariffError::Overflow { operation })
}

fn multiply(lhs: Decimal, rhs: Decimal, operation: &'static str) -> Result<Decimal, TariffError> {
    lhs.checked_mul(rhs).ok_or(TariffError::Overflow { operation })
}

fn wire_b_per_kwh(inputs: &TariffInputs) -> Decimal {
    inputs.wire_b_reference / WIRE_B_SCALE
}

/// 연도별 부과 비율: `0.15 × (year − start_year + 1)`.
///
/// 상한을 두지 않는다. 기간이 6년이면 마지막 해가 0.90이다.
pub fn year_percent_factor(params: &ProjectionParams, year: i32) -> Decimal {
    let ordinal = i64::from(year) - i64::from(params.start_year) + 1;
    YEAR_STEP * Decimal::from(ordinal)
}

/// 단가 중 Fio B가 차지하는 비율: `wire_b / 1000 / tariff`.
pub fn effective_wire_b_ratio(inputs: &TariffInputs) -> Result<Decimal, TariffError> {
    divide(
        wire_b_per_kwh(inputs),
        inputs.tariff_per_kwh,
        "effective_wire_b_ratio",
    )
}

/// 연도별 Fio B 부과액: `(wire_b / 1000) × consumption × factor(year)`.
pub fn yearly_value(
    params: &ProjectionParams,
    inputs: &TariffInputs,
    year: i32,
) -> Result<Decimal, TariffError> {
    const OP: &str = "yearly_value";
    let scaled = multiply(wire_b_per_kwh(inputs), inputs.consumption_kwh, OP)?;
    multiply(scaled, year_percent_factor(params, year), OP)
}

/// 소비 KWh당 가격. 항상 시작 연도의 비율로 계산하는 기준 지표다.
pub fn price_per_kwh(
    params: &ProjectionParams,
    inputs: &TariffInputs,
) -> Result<Decimal, TariffError> {
    let value = yearly_value(params, inputs, params.start_year)?;
    divide(value, inputs.consumption_kwh, "price_per_kwh")
}

/// 가용성(최소 청구) 요금: `tariff × 100`. 모든 연도에서 같다.
pub fn availability_value(inputs: &TariffInputs) -> Result<Decimal, TariffError> {
    multiply(inputs.tariff_per_kwh, AVAILABILITY_KWH, "availability_value")
}

/// 청구액은 가용성 요금을 하한으로 한다. 같으면 계산값을 쓴다.
pub fn billed_value(computed: Decimal, availability: Decimal) -> Decimal {
    if computed < availability {
        availability
    } else {
        computed
    }
}

/// 현재 연도 이후(포함)의 연도만 남긴 표를 만든다.
///
/// 단가가 0이면 증가율만 비워두고 나머지 열은 그대로 계산한다.
/// 한 칸의 계산이 범위를 넘어도 그 칸(과 그에 의존하는 칸)만 None이 된다.
pub fn build_projection(
    params: &ProjectionParams,
    inputs: &TariffInputs,
    current_year: i32,
) -> Result<Vec<ProjectionRow>, TariffError> {
    let ratio = match effective_wire_b_ratio(inputs) {
        Ok(ratio) => Some(ratio),
        Err(err) => {
            debug!("증가율 열 생략: {err}");
            None
        }
    };
    let availability = availability_value(inputs)?;

    let rows = params
        .years()
        .filter(|&year| year >= current_year)
        .map(|year| {
            let percent = year_percent_factor(params, year) * PERCENT;
            let percent_gain = ratio.and_then(|r| {
                let gain = percent.checked_mul(r);
                if gain.is_none() {
                    debug!("{year} 증가율 생략: 소수 연산 범위 초과");
                }
                gain
            });
            let computed = match yearly_value(params, inputs, year) {
                Ok(value) => Some(value),
                Err(err) => {
                    debug!("{year} 부과액 생략: {err}");
                    None
                }
            };
            ProjectionRow {
                year,
                percent,
                percent_gain,
                consumption: inputs.consumption_kwh,
                computed_value: computed,
                availability_value: availability,
                billed_value: computed.map(|c| billed_value(c, availability)),
            }
        })
        .collect();
    Ok(rows)
}
