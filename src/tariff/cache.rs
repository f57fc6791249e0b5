use log::debug;

use super::engine::{build_projection, ProjectionParams, ProjectionRow, TariffError};
use super::inputs::TariffInputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    params: ProjectionParams,
    inputs: TariffInputs,
    current_year: i32,
}

/// 마지막 입력 조합의 표를 기억한다. 입력이 바뀔 때만 다시 계산한다.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entry: Option<(CacheKey, Result<Vec<ProjectionRow>, TariffError>)>,
    computations: u64,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 키가 같으면 저장된 표를, 다르면 새로 계산한 표를 돌려준다.
    pub fn get_or_build(
        &mut self,
        params: &ProjectionParams,
        inputs: &TariffInputs,
        current_year: i32,
    ) -> Result<&[ProjectionRow], TariffError> {
        let key = CacheKey {
            params: *params,
            inputs: *inputs,
            current_year,
        };
        if self.entry.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.entry = None;
        }
        let computations = &mut self.computations;
        let (_, rows) = self.entry.get_or_insert_with(|| {
            *computations += 1;
            debug!("projection recomputed for {current_year} ({inputs:?})");
            (key, build_projection(params, inputs, current_year))
        });
        rows.as_deref().map_err(Clone::clone)
    }

    /// 지금까지 실제로 계산한 횟수.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}
