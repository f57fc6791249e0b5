//! 세 입력값의 원시 문자열을 보관하는 키-값 저장소.
//!
//! 읽기는 시작 시 한 번, 키마다 기본값으로 폴백한다. 쓰기는 실패해도 호출자에게
//! 오류를 돌려주지 않으며 메모리의 값이 항상 마지막 값이 된다.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::tariff::{InputField, RawInputs, TariffError, TariffInputs};

/// 저장 키의 네임스페이스 접두사.
pub const NAMESPACE: &str = "solar-wire";
/// 기본 저장 파일 이름.
pub const DEFAULT_STORAGE_FILE: &str = "solar-wire.toml";

/// 저장 파일 읽기/쓰기 오류.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("저장 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("저장 파일 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 필드의 네임스페이스 포함 키. 예: `solar-wire@tariff`
pub fn storage_key(field: InputField) -> String {
    format!("{NAMESPACE}@{}", field.key())
}

/// 파일 기반 입력값 저장소.
#[derive(Debug, Clone)]
pub struct InputStore {
    path: PathBuf,
    raw: RawInputs,
    inputs: TariffInputs,
}

impl InputStore {
    /// 저장 파일을 읽는다. 파일이 없거나 깨졌으면 기본값을 쓴다.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("저장 파일 없음, 기본값 사용: {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("저장 파일을 읽지 못해 기본값 사용 ({}): {e}", path.display());
                BTreeMap::new()
            }
        };

        let mut raw = RawInputs::default();
        let mut inputs = TariffInputs::default();
        for field in InputField::ALL {
            let Some(stored) = entries.get(&storage_key(field)) else {
                continue;
            };
            match field.parse(stored) {
                Ok(value) => {
                    raw.set(field, stored.clone());
                    inputs.set(field, value);
                }
                Err(e) => warn!("{e}; 기본값 '{}' 사용", field.default_raw()),
            }
        }
        Self { path, raw, inputs }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 필드의 원시 문자열.
    pub fn raw(&self, field: InputField) -> &str {
        self.raw.get(field)
    }

    pub fn raw_inputs(&self) -> &RawInputs {
        &self.raw
    }

    /// 해석된 입력값. 저장소에는 해석 가능한 값만 들어가므로 항상 유효하다.
    pub fn inputs(&self) -> TariffInputs {
        self.inputs
    }

    /// 값을 바꾸고 파일에 기록한다. 해석할 수 없는 값이면 기존 값을 유지한다.
    pub fn set(&mut self, field: InputField, raw: impl Into<String>) -> Result<(), TariffError> {
        let raw = raw.into();
        let value = field.parse(&raw)?;
        self.raw.set(field, raw);
        self.inputs.set(field, value);
        self.persist();
        Ok(())
    }

    /// 필드를 기본값으로 되돌린다.
    pub fn reset(&mut self, field: InputField) {
        self.raw.set(field, field.default_raw().to_string());
        self.inputs.set(field, TariffInputs::default().get(field));
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = write_entries(&self.path, &self.raw) {
            error!("입력값 저장 실패 ({}): {e}", self.path.display());
        }
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn write_entries(path: &Path, raw: &RawInputs) -> Result<(), StorageError> {
    let entries: BTreeMap<String, String> = InputField::ALL
        .into_iter()
        .map(|field| (storage_key(field), raw.get(field).to_string()))
        .collect();
    let content = toml::to_string(&entries)?;
    fs::write(path, content)?;
    Ok(())
}
