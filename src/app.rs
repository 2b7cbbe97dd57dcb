use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::file_handler::FileHandler;
use crate::panels::{CanvasView, PropertyEdits, ToolbarAction, central_panel, layers_panel, properties_panel, tools_panel};
use crate::persistence::{DocumentId, DocumentStore};
use crate::util::time::current_time_secs;

/// What survives a restart. Designs themselves live in the document store.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub config: EditorConfig,
    pub last_document: Option<DocumentId>,
}

pub struct CreatorApp {
    settings: AppSettings,
    editor: Editor,
    canvas: CanvasView,
    files: FileHandler,
    property_edits: PropertyEdits,
    status: Option<String>,
}

impl CreatorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: AppSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings)
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let store = default_store(&settings.config);
        let mut editor = Editor::new(settings.config.clone(), store);

        let mut status = None;
        if let Some(id) = settings.last_document {
            if let Err(err) = editor.open(id) {
                log::warn!("Could not reopen design {id}: {err}");
                status = Some(format!("Could not reopen last design: {err}"));
            }
        }

        Self {
            settings,
            editor,
            canvas: CanvasView::default(),
            files: FileHandler::new(),
            property_edits: PropertyEdits::default(),
            status,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    fn handle_toolbar(&mut self, action: ToolbarAction, now: f64) {
        match action {
            ToolbarAction::NewDesign => {
                if self.editor.autosave().is_dirty() {
                    self.save(now);
                }
                self.editor.new_design();
                self.status = None;
            }
            ToolbarAction::SaveNow => self.save(now),
            ToolbarAction::ExportPng => self.export(),
        }
    }

    fn save(&mut self, now: f64) {
        self.status = Some(match self.editor.save_now(now) {
            Ok(id) => format!("Saved {id}"),
            Err(err) => format!("Save failed: {err}"),
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export(&mut self) {
        let name = self
            .editor
            .document_id()
            .map_or_else(|| "design".to_owned(), |id| id.to_string());
        let path = std::path::Path::new(&self.settings.config.storage_dir).join(format!("{name}.png"));
        let result = std::fs::create_dir_all(&self.settings.config.storage_dir)
            .map_err(crate::error::ExportError::from)
            .and_then(|()| crate::export::save_png(self.editor.state().document(), &path));
        self.status = Some(match result {
            Ok(()) => format!("Exported {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }

    #[cfg(target_arch = "wasm32")]
    fn export(&mut self) {
        self.status = Some(match crate::export::encode_png(self.editor.state().document()) {
            Ok(bytes) => {
                log::info!("exported {} bytes", bytes.len());
                format!("Exported {} bytes", bytes.len())
            }
            Err(err) => {
                log::error!("Export failed: {err}");
                format!("Export failed: {err}")
            }
        });
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store(config: &EditorConfig) -> Box<dyn DocumentStore> {
    Box::new(crate::persistence::JsonFileStore::new(&config.storage_dir))
}

#[cfg(target_arch = "wasm32")]
fn default_store(_config: &EditorConfig) -> Box<dyn DocumentStore> {
    Box::new(crate::persistence::MemoryStore::new())
}

impl eframe::App for CreatorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.last_document = self.editor.document_id();
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.editor.autosave().is_dirty() {
            if let Err(err) = self.editor.save_now(current_time_secs()) {
                log::error!("Final save failed: {err}");
            }
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = current_time_secs();

        if let Some(action) = tools_panel(ctx, &mut self.editor, now) {
            self.handle_toolbar(action, now);
        }

        egui::SidePanel::right("inspector_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    properties_panel(ui, &mut self.editor, &mut self.property_edits, now);
                    ui.separator();
                    layers_panel(ui, &mut self.editor, now);
                });
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let doc = self.editor.state().document();
                ui.label(format!(
                    "{}×{}  ·  {:.0}%  ·  {} layers",
                    doc.canvas_size().width,
                    doc.canvas_size().height,
                    doc.zoom() * 100.0,
                    doc.layers().len()
                ));
                if self.editor.autosave().is_dirty() {
                    ui.weak("unsaved changes");
                }
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        central_panel(ctx, &mut self.editor, &mut self.canvas, now);

        self.files.preview_files_being_dropped(ctx);
        if self.files.check_for_dropped_files(ctx) {
            let size = self.editor.state().document().canvas_size();
            let center = (size.to_vec2() * 0.5).to_pos2();
            let commands = self
                .files
                .process_dropped_files(ctx, &mut self.canvas.textures, size, center);
            self.editor.dispatch_all(commands, now);
        }

        self.property_edits.settle(ctx, &mut self.editor, now);

        if let Some(Err(err)) = self.editor.tick(now) {
            self.status = Some(format!("Auto-save failed: {err}"));
        }

        // Wake up for a pending auto-save even when the user is idle
        if let Some(deadline) = self.editor.autosave().deadline() {
            let wait = (deadline - now).max(0.0);
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(wait));
        }
    }
}
