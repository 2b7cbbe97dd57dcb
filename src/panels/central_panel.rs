use crate::command::Command;
use crate::editor::Editor;
use crate::geometry::Handle;
use crate::gizmo::SelectionOverlay;
use crate::input::InputHandler;
use crate::interaction::GestureState;
use crate::renderer::paint_layers;
use crate::texture_manager::TextureManager;
use crate::viewport::Viewport;
use egui::{Color32, CursorIcon, Rect, Sense, Stroke};

const BACKDROP: Color32 = Color32::from_gray(48);
const PAGE_SHADOW: Color32 = Color32::from_black_alpha(60);

/// Per-frame canvas plumbing that lives outside the editor core
#[derive(Debug)]
pub struct CanvasView {
    input: InputHandler,
    pub textures: TextureManager,
    viewport: Viewport,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            input: InputHandler::new(Rect::NOTHING),
            textures: TextureManager::new(64),
            viewport: Viewport::default(),
        }
    }
}

pub fn central_panel(ctx: &egui::Context, editor: &mut Editor, canvas: &mut CanvasView, now: f64) {
    canvas.textures.begin_frame();

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(BACKDROP))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;

            // Pointer presses only count when nothing floats above the canvas
            canvas
                .input
                .set_canvas_rect(if response.hovered() { rect } else { Rect::NOTHING });

            if response.hovered() {
                let zoom_delta = ctx.input(|i| i.zoom_delta());
                if zoom_delta != 1.0 {
                    let zoom = editor.state().document().zoom() * zoom_delta;
                    editor.dispatch(Command::SetZoom(zoom), now);
                }
            }

            let doc = editor.state().document();
            canvas.viewport = Viewport::centered(rect, doc.canvas_size().to_vec2(), doc.zoom());

            for event in canvas.input.process_input(ctx) {
                editor.handle_event(&event, &canvas.viewport, now);
            }

            let view = canvas.viewport;
            let doc = editor.state().document();
            let page = view.rect_to_screen(Rect::from_min_size(egui::Pos2::ZERO, doc.canvas_size().to_vec2()));
            painter.rect_filled(page.translate(egui::vec2(4.0, 4.0)), 0.0, PAGE_SHADOW);
            painter.rect_filled(page, 0.0, Color32::WHITE);

            let page_painter = painter.with_clip_rect(page.intersect(rect));
            paint_layers(&page_painter, doc.layers(), &view, &mut canvas.textures);

            let pointer = ctx.pointer_hover_pos();
            let hovered_handle = pointer
                .filter(|_| editor.interaction().is_idle())
                .and_then(|pos| editor.interaction().handle_under(pos, editor.state(), &view));
            SelectionOverlay::new(hovered_handle).paint(&painter, editor.state(), &view);
            painter.rect_stroke(page, 0.0, Stroke::new(1.0, Color32::from_gray(90)));

            if response.hovered() {
                ctx.set_cursor_icon(cursor_for(editor, hovered_handle));
            }
        });
}

fn cursor_for(editor: &Editor, hovered: Option<Handle>) -> CursorIcon {
    match editor.interaction().state() {
        GestureState::Dragging(_) => return CursorIcon::Grabbing,
        GestureState::Resizing(resize) => return resize.handle().cursor_icon(),
        GestureState::Rotating(_) => return CursorIcon::Grabbing,
        GestureState::Idle => {}
    }
    match hovered {
        Some(Handle::Resize(handle)) => handle.cursor_icon(),
        Some(Handle::Rotate) => CursorIcon::Grab,
        None if editor.state().document().tool().creates_layers() => CursorIcon::Crosshair,
        None => CursorIcon::Default,
    }
}
