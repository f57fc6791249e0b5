use clap::{Parser, ValueEnum};
use solar_wire_calculator::app::{self, AppError};
use solar_wire_calculator::i18n::{self, Translator};
use solar_wire_calculator::storage::InputStore;
use solar_wire_calculator::tariff::{self, InputField};
use solar_wire_calculator::{config, mask, ui_cli};

/// 터미널용 Fio B 단계적 부과 계산기.
#[derive(Debug, Parser)]
#[command(name = "solar_wire_calculator_cli", version, about)]
struct Cli {
    /// 언어 (auto/pt-br/en-us/ko-kr)
    #[arg(short = 'L', long)]
    lang: Option<String>,
    /// KWh당 단가 (예: "R$ 0,95" 또는 "095")
    #[arg(long)]
    tariff: Option<String>,
    /// 발전 소비량 (예: "3.397,00")
    #[arg(long)]
    consume: Option<String>,
    /// Fio B 기준값 (소수 7자리)
    #[arg(long)]
    bwire: Option<String>,
    /// 기본값으로 되돌릴 필드
    #[arg(long, value_enum)]
    reset: Vec<FieldArg>,
    /// 현재 연도 대신 사용할 연도
    #[arg(long)]
    year: Option<i32>,
    /// 표를 한 번 출력하고 종료
    #[arg(long)]
    print: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldArg {
    Tariff,
    Consume,
    Bwire,
}

impl From<FieldArg> for InputField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Tariff => InputField::Tariff,
            FieldArg::Consume => InputField::Consume,
            FieldArg::Bwire => InputField::BWire,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정과 저장된 입력값을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    env_logger::init();
    if let Err(err) = try_run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(cli.lang.as_deref().unwrap_or("auto"), Some(&cfg.language));
    let mut tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let mut store = InputStore::load(&cfg.storage_path);

    for field in cli.reset {
        store.reset(field.into());
    }
    for (field, text) in [
        (InputField::Tariff, cli.tariff),
        (InputField::Consume, cli.consume),
        (InputField::BWire, cli.bwire),
    ] {
        if let Some(text) = text {
            store.set(field, mask::raw_digits(&text))?;
        }
    }

    let current_year = cli.year.unwrap_or_else(tariff::current_year);
    if cli.print {
        return ui_cli::print_projection(&tr, &cfg.projection, &store, current_year);
    }
    app::run(&mut cfg, &mut store, &mut tr, current_year)
}
