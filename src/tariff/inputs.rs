use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::mask;

use super::engine::TariffError;

/// 계산기의 세 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    /// KWh당 단가 [R$]
    Tariff,
    /// 발전 소비량 [KWh]
    Consume,
    /// Fio B 기준값 [R$/MWh]
    BWire,
}

impl InputField {
    pub const ALL: [InputField; 3] = [InputField::Tariff, InputField::Consume, InputField::BWire];

    /// 저장소 키.
    pub fn key(self) -> &'static str {
        match self {
            InputField::Tariff => "tariff",
            InputField::Consume => "consume",
            InputField::BWire => "bwire",
        }
    }

    /// 마스킹된 정수 문자열 형태의 기본값.
    pub fn default_raw(self) -> &'static str {
        match self {
            InputField::Tariff => "90",
            InputField::Consume => "339700",
            InputField::BWire => "2541366387",
        }
    }

    /// 원시 문자열의 소수 자릿수.
    pub fn precision(self) -> u32 {
        match self {
            InputField::Tariff | InputField::Consume => 2,
            InputField::BWire => 7,
        }
    }

    /// 원시 문자열을 이 필드의 소수 값으로 바꾼다.
    pub fn parse(self, raw: &str) -> Result<Decimal, TariffError> {
        mask::raw_to_decimal(raw, self.precision()).map_err(|source| TariffError::Parse {
            field: self,
            raw: raw.to_string(),
            source,
        })
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 엔진 입력값. 모두 음이 아닌 소수이며, 단가는 나눗셈의 제수로 쓰인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TariffInputs {
    pub tariff_per_kwh: Decimal,
    pub consumption_kwh: Decimal,
    pub wire_b_reference: Decimal,
}

impl Default for TariffInputs {
    /// [`InputField::default_raw`]를 해석한 값과 같다.
    fn default() -> Self {
        Self {
            tariff_per_kwh: dec!(0.90),
            consumption_kwh: dec!(3397.00),
            wire_b_reference: dec!(254.1366387),
        }
    }
}

impl TariffInputs {
    /// 세 원시 문자열을 해석한다.
    pub fn from_raw(tariff: &str, consume: &str, bwire: &str) -> Result<Self, TariffError> {
        Ok(Self {
            tariff_per_kwh: InputField::Tariff.parse(tariff)?,
            consumption_kwh: InputField::Consume.parse(consume)?,
            wire_b_reference: InputField::BWire.parse(bwire)?,
        })
    }

    pub fn get(&self, field: InputField) -> Decimal {
        match field {
            InputField::Tariff => self.tariff_per_kwh,
            InputField::Consume => self.consumption_kwh,
            InputField::BWire => self.wire_b_reference,
        }
    }

    pub fn set(&mut self, field: InputField, value: Decimal) {
        match field {
            InputField::Tariff => self.tariff_per_kwh = value,
            InputField::Consume => self.consumption_kwh = value,
            InputField::BWire => self.wire_b_reference = value,
        }
    }
}

/// 저장소에 보관되는 원시(마스킹된 정수) 문자열 묶음.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputs {
    pub tariff: String,
    pub consume: String,
    pub bwire: String,
}

impl Default for RawInputs {
    fn default() -> Self {
        Self {
            tariff: InputField::Tariff.default_raw().to_string(),
            consume: InputField::Consume.default_raw().to_string(),
            bwire: InputField::BWire.default_raw().to_string(),
        }
    }
}

impl RawInputs {
    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Tariff => &self.tariff,
            InputField::Consume => &self.consume,
            InputField::BWire => &self.bwire,
        }
    }

    pub fn set(&mut self, field: InputField, raw: String) {
        match field {
            InputField::Tariff => self.tariff = raw,
            InputField::Consume => self.consume = raw,
            InputField::BWire => self.bwire = raw,
        }
    }

    pub fn parse(&self) -> Result<TariffInputs, TariffError> {
        TariffInputs::from_raw(&self.tariff, &self.consume, &self.bwire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_raw_strings_match_default_inputs() {
        assert_eq!(RawInputs::default().parse().unwrap(), TariffInputs::default());
    }

    #[test]
    fn parse_error_names_the_field() {
        let err = InputField::Consume.parse("12a").unwrap_err();
        match err {
            TariffError::Parse { field, raw, .. } => {
                assert_eq!(field, InputField::Consume);
                assert_eq!(raw, "12a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn set_and_get_address_the_same_field() {
        let mut inputs = TariffInputs::default();
        inputs.set(InputField::BWire, dec!(1.5));
        assert_eq!(inputs.get(InputField::BWire), dec!(1.5));
        assert_eq!(inputs.get(InputField::Tariff), dec!(0.90));
    }
}
