use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::storage::InputStore;
use crate::tariff::TariffError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/터미널 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 엔진 계산 오류
    #[error("계산 오류: {0}")]
    Tariff(#[from] TariffError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(
    config: &mut Config,
    store: &mut InputStore,
    tr: &mut Translator,
    current_year: i32,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::ShowProjection => {
                ui_cli::print_projection(tr, &config.projection, store, current_year)?
            }
            MenuChoice::Edit(field) => ui_cli::handle_edit(tr, store, field)?,
            MenuChoice::Reset(field) => ui_cli::handle_reset(tr, store, field),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    *tr = Translator::new_with_pack(
                        &config.language,
                        config.language_pack_dir.as_deref(),
                    );
                    config.save()?;
                }
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
