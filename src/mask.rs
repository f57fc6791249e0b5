//! 마스킹된 통화 문자열 처리.
//!
//! 입력 필드는 소수점 없는 정수 문자열(예: "90" → 0,90)을 원시값으로 보관하고,
//! 화면에는 브라질 표기(천 단위 `.`, 소수점 `,`)로 보여준다.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::tariff::InputField;

/// 원시 문자열 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    /// 숫자 이외의 문자가 섞인 경우
    #[error("숫자가 아닌 문자가 포함됨: '{0}'")]
    NotDigits(String),
    /// Decimal로 표현할 수 없을 만큼 긴 경우
    #[error("자릿수가 너무 큼: '{0}'")]
    TooLarge(String),
}

/// 표시 형식 옵션.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
    pub precision: u32,
}

impl MaskOptions {
    /// 접두/접미사 없는 숫자.
    pub const fn plain(precision: u32) -> Self {
        Self {
            prefix: "",
            suffix: "",
            group_separator: '.',
            decimal_separator: ',',
            precision,
        }
    }

    /// `R$ 1.234,56`
    pub const fn currency() -> Self {
        Self {
            prefix: "R$ ",
            ..Self::plain(2)
        }
    }

    /// `15,00 %`
    pub const fn percent() -> Self {
        Self {
            suffix: " %",
            ..Self::plain(2)
        }
    }

    /// `3.397,00 KWh`
    pub const fn energy() -> Self {
        Self {
            suffix: " KWh",
            ..Self::plain(2)
        }
    }

    /// `R$ 0,0381`
    pub const fn price_per_kwh() -> Self {
        Self {
            prefix: "R$ ",
            ..Self::plain(4)
        }
    }

    /// 입력 필드별 마스크. 소수 자릿수는 필드의 원시값 자릿수와 같다.
    pub const fn for_field(field: InputField) -> Self {
        match field {
            InputField::Tariff => Self::currency(),
            InputField::Consume => Self::plain(2),
            InputField::BWire => Self::plain(7),
        }
    }
}

/// 사용자가 입력한 문자열에서 숫자만 남긴다. 입력 중 마스킹에 쓰인다.
pub fn raw_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// 원시 정수 문자열을 `10^precision`으로 나눈 소수로 바꾼다. 빈 문자열은 0이다.
pub fn raw_to_decimal(raw: &str, precision: u32) -> Result<Decimal, MaskError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MaskError::NotDigits(raw.to_string()));
    }
    let units: i128 = raw
        .parse()
        .map_err(|_| MaskError::TooLarge(raw.to_string()))?;
    Decimal::try_from_i128_with_scale(units, precision)
        .map_err(|_| MaskError::TooLarge(raw.to_string()))
}

/// 원시 문자열을 바로 표시 문자열로 만든다.
pub fn mask_raw(raw: &str, opts: &MaskOptions) -> Result<String, MaskError> {
    raw_to_decimal(raw, opts.precision).map(|value| format(value, opts))
}

/// 소수를 표시 문자열로 만든다. 자릿수 반올림은 0.5에서 올림(절댓값 기준)이다.
pub fn format(value: Decimal, opts: &MaskOptions) -> String {
    let rounded =
        value.round_dp_with_strategy(opts.precision, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.*}", opts.precision as usize, rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::with_capacity(fixed.len() + opts.prefix.len() + opts.suffix.len() + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(opts.prefix);
    out.push_str(&group_thousands(int_part, opts.group_separator));
    if !frac_part.is_empty() {
        out.push(opts.decimal_separator);
        out.push_str(frac_part);
    }
    out.push_str(opts.suffix);
    out
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
