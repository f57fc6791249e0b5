#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 단일 화면 계산기 진입점.

use std::{env, fs, path::Path};

use eframe::{egui, App, Frame};
use image::GenericImageView;
use log::{debug, info, warn};
use solar_wire_calculator::{
    config,
    i18n::{self, keys},
    mask::{self, MaskOptions},
    render::{self, DisplayRow, Summary},
    storage::InputStore,
    tariff::{self, InputField, ProjectionCache},
};

/// 표 열 너비 (연도, 부과율, 증가율, 소비량, Fio B, 가용성, 청구액).
const COLUMN_WIDTHS: [f32; 7] = [80.0, 80.0, 80.0, 120.0, 120.0, 120.0, 120.0];

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/pt-br/en-us/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(COLUMN_WIDTHS.iter().sum::<f32>() + 80.0, 640.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!("설정을 읽지 못해 기본 설정 사용: {e}");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    let title = i18n::Translator::new(&i18n::resolve_language("auto", Some(&app_cfg.language)))
        .t(keys::APP_TITLE)
        .into_owned();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                debug!("{e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (width, height) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width,
        height,
    })
}

/// 바이너리 폰트 바이트를 egui의 기본 글꼴 뒤에 대체 글꼴로 등록한다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(name.to_string());
    }
    ctx.set_fonts(fonts);
}

/// 한글 메뉴를 표시할 수 있도록 CJK 글꼴을 찾아 등록한다.
/// 1) assets/fonts/ 아래 글꼴
/// 2) Windows 시스템 폰트(맑은 고딕 등)
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/NotoSansKR-Regular.ttf").to_path_buf(),
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].map(|f| fonts.join(f)));
    }
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "CJK font not found; Korean labels may not render.".to_string())?;
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "cjk_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    store: InputStore,
    cache: ProjectionCache,
    current_year: i32,
    show_settings: bool,
    lang_input: String,
    window_alpha: f32,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!("GUI language resolved: {lang_code}");
        let store = InputStore::load(&config.storage_path);
        Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            store,
            cache: ProjectionCache::new(),
            current_year: tariff::current_year(),
            show_settings: false,
            status: None,
        }
    }

    /// 마스크 입력 필드. 입력할 때마다 숫자만 추려 저장하고 다시 마스킹한다.
    fn masked_input(
        &mut self,
        ui: &mut egui::Ui,
        field: InputField,
        label_key: &str,
        resettable: bool,
    ) {
        ui.label(self.tr.t(label_key).into_owned());
        ui.horizontal(|ui| {
            let opts = MaskOptions::for_field(field);
            let mut text = mask::format(self.store.inputs().get(field), &opts);
            let width = ui.available_width() - if resettable { 40.0 } else { 0.0 };
            let resp = ui.add(egui::TextEdit::singleline(&mut text).desired_width(width));
            if resp.changed() {
                if let Err(e) = self.store.set(field, mask::raw_digits(&text)) {
                    warn!("{e}");
                }
            }
            if resettable
                && ui
                    .button("🔄")
                    .on_hover_text(self.tr.t(keys::GUI_RESET_TIP).into_owned())
                    .clicked()
            {
                self.store.reset(field);
            }
        });
    }

    fn read_only(ui: &mut egui::Ui, label: &str, mut value: String) {
        ui.label(label);
        ui.add_enabled(
            false,
            egui::TextEdit::singleline(&mut value).desired_width(f32::INFINITY),
        );
    }

    fn ui_table(&mut self, ui: &mut egui::Ui) {
        let inputs = self.store.inputs();
        let rows = match self
            .cache
            .get_or_build(&self.config.projection, &inputs, self.current_year)
        {
            Ok(rows) => rows.iter().map(DisplayRow::from_row).collect::<Vec<_>>(),
            Err(e) => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX).into_owned()),
                );
                return;
            }
        };
        if rows.is_empty() {
            ui.label(self.tr.t(keys::TABLE_EMPTY).into_owned());
            return;
        }
        egui::ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("projection_grid")
                .num_columns(COLUMN_WIDTHS.len())
                .striped(true)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    let headers = render::column_headers(&self.tr);
                    for (header, width) in headers.iter().zip(COLUMN_WIDTHS) {
                        let label = egui::Label::new(egui::RichText::new(header).strong());
                        ui.add_sized([width, 28.0], label);
                    }
                    ui.end_row();
                    for row in &rows {
                        for (cell, width) in row.cells().into_iter().zip(COLUMN_WIDTHS) {
                            ui.add_sized([width, 22.0], egui::Label::new(cell));
                        }
                        ui.end_row();
                    }
                });
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut open = self.show_settings;
        let mut save_clicked = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS).into_owned())
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_LANGUAGE).into_owned());
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::GUI_LANGUAGE_AUTO).into_owned(),
                        );
                        ui.selectable_value(&mut self.lang_input, "pt-br".into(), "Português (BR)");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.label(tr.t(keys::GUI_ALPHA).into_owned());
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0));
                ui.separator();
                save_clicked = ui.button(tr.t(keys::GUI_SAVE).into_owned()).clicked();
                if let Some(msg) = &self.status {
                    ui.label(msg);
                }
            });
        self.show_settings = open;

        if save_clicked {
            self.config.language = self.lang_input.clone();
            self.config.window_alpha = self.window_alpha;
            let resolved = i18n::resolve_language("auto", Some(&self.config.language));
            self.tr = i18n::Translator::new_with_pack(
                &resolved,
                self.config.language_pack_dir.as_deref(),
            );
            self.status = Some(match self.config.save() {
                Ok(()) => "OK".to_string(),
                Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX).into_owned()),
            });
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE).into_owned());
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_SETTINGS).into_owned()).clicked() {
                    self.show_settings = true;
                }
            });
        });

        if self.show_settings {
            self.ui_settings(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.set_max_width(COLUMN_WIDTHS.iter().sum::<f32>() + 60.0);
                    self.masked_input(ui, InputField::Tariff, keys::FIELD_TARIFF, true);
                    ui.add_space(4.0);
                    self.masked_input(ui, InputField::Consume, keys::FIELD_CONSUME, true);
                    ui.add_space(4.0);

                    let summary = Summary::compute(&self.config.projection, &self.store.inputs());
                    let label = self.tr.t(keys::FIELD_WIRE_B_WEIGHT);
                    Self::read_only(ui, &label, summary.wire_b_weight_text());
                    ui.add_space(4.0);
                    let label = self.tr.t(keys::FIELD_PRICE_PER_KWH);
                    Self::read_only(ui, &label, summary.price_per_kwh_text());
                    ui.add_space(8.0);

                    self.ui_table(ui);
                });
        });
    }
}
