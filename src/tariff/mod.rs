//! 분산형 태양광 발전의 Fio B(배전망 사용료) 단계적 부과 계산 모듈 모음.
//!
//! 엔진은 상태가 없으며, 입력값 세 개와 [`ProjectionParams`]만으로 연도별 표를 만든다.

pub mod cache;
pub mod engine;
pub mod inputs;

use chrono::Datelike;

pub use cache::ProjectionCache;
pub use engine::{
    availability_value, billed_value, build_projection, effective_wire_b_ratio, price_per_kwh,
    year_percent_factor, yearly_value, ProjectionParams, ProjectionRow, TariffError,
    DEFAULT_SCHEDULE_LENGTH, DEFAULT_START_YEAR,
};
pub use inputs::{InputField, RawInputs, TariffInputs};

/// 로컬 시간대 기준 현재 연도.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
