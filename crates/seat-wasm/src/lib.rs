//! WASM bridge for Seatplan. Exposes the seating editor to the browser page.
//!
//! Compiled via `wasm-pack build --target web`. Commands return JSON strings:
//! `{"ok":true,...}` on success or `{"ok":false,"error":"..."}` on rejection.

mod storage;

use seat_core::{DeskId, DeskKind, EntityStore, SeatConfig, SeatError};
use seat_editor::Editor;
use serde_json::{Value, json};
use storage::LocalStorage;
use wasm_bindgen::prelude::*;

/// The WASM-facing seating canvas controller.
///
/// All interaction from the page goes through this struct; it owns the
/// editor, which owns the entity store.
#[wasm_bindgen]
pub struct SeatCanvas {
    editor: Editor,
}

#[wasm_bindgen]
impl SeatCanvas {
    /// Create a controller with default settings, reading saved layouts
    /// from `localStorage`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::open(SeatConfig::default())
    }

    /// Create a controller from a JSON `SeatConfig` document.
    pub fn with_config(config_json: &str) -> Result<SeatCanvas, JsValue> {
        let config = SeatConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::open(config))
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Update the canvas container's on-screen top-left.
    pub fn set_canvas_origin(&mut self, left: f32, top: f32) {
        self.editor.set_canvas_origin(left, top);
    }

    /// Handle pointer down in client coordinates. Returns true if a
    /// re-render is needed.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> bool {
        changed(self.editor.pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> bool {
        changed(self.editor.pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> bool {
        changed(self.editor.pointer_up(x, y))
    }

    /// Pointer capture was lost mid-gesture.
    pub fn handle_pointer_cancel(&mut self) -> bool {
        changed(self.editor.pointer_cancel())
    }

    /// Click on empty canvas. Returns true if the selection was cleared.
    pub fn background_click(&mut self) -> bool {
        self.editor.background_click()
    }

    /// Call once per animation frame.
    pub fn tick(&mut self) {
        self.editor.tick();
    }

    pub fn click_desk(&mut self, id: &str) -> String {
        result_json(self.editor.click_desk(DeskId::intern(id)).map(|()| json!({})))
    }

    pub fn double_click_desk(&mut self, id: &str) -> String {
        result_json(
            self.editor
                .double_click_desk(DeskId::intern(id))
                .map(|()| json!({})),
        )
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Add a `"student"` or `"teacher"` desk. Returns `{"ok":true,"id":..}`.
    pub fn add_desk(&mut self, kind: &str) -> String {
        let result = DeskKind::from_name(kind)
            .ok_or_else(|| SeatError::invalid(format!("unknown desk kind \"{kind}\"")))
            .map(|kind| json!({ "id": self.editor.add_desk(kind) }));
        result_json(result)
    }

    /// Onboarding: add `count` student desks. Returns the new ids.
    pub fn add_desks(&mut self, count: u32) -> String {
        let ids = self.editor.add_desks(count as usize);
        result_json(Ok(json!({ "ids": ids })))
    }

    pub fn remove_selected(&mut self) -> String {
        result_json(self.editor.remove_selected().map(|n| json!({ "removed": n })))
    }

    pub fn rotate_selected(&mut self) -> String {
        result_json(self.editor.rotate_selected().map(|n| json!({ "rotated": n })))
    }

    pub fn group_selected(&mut self, label: &str) -> String {
        result_json(self.editor.group_selected(label).map(|id| json!({ "groupId": id })))
    }

    // ─── Layouts & roster ────────────────────────────────────────────────

    /// Save the current desks under `name`. A storage failure is reported
    /// but the layout stays available for this session.
    pub fn save_layout(&mut self, name: &str) -> String {
        result_json(self.editor.save_layout(name).map(|()| json!({})))
    }

    pub fn load_layout(&mut self, name: &str) -> String {
        result_json(self.editor.load_layout(name).map(|()| json!({})))
    }

    /// Saved layout names, sorted.
    pub fn layout_names(&self) -> js_sys::Array {
        self.editor
            .store()
            .layout_names()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    pub fn current_layout(&self) -> String {
        self.editor.store().current_layout().to_string()
    }

    /// Seat a JSON array of names at random student desks.
    pub fn assign_students(&mut self, names_json: &str) -> String {
        let result = serde_json::from_str::<Vec<String>>(names_json)
            .map_err(|e| SeatError::invalid(format!("roster must be a JSON array of names: {e}")))
            .map(|names| json!({ "assigned": self.editor.assign_students(&names) }));
        result_json(result)
    }

    // ─── Read accessors ──────────────────────────────────────────────────

    pub fn desks_json(&self) -> String {
        serde_json::to_string(self.editor.store().desks()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn groups_json(&self) -> String {
        serde_json::to_string(self.editor.store().groups()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn selected_ids_json(&self) -> String {
        serde_json::to_string(self.editor.store().selection()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Live marquee as `{"x","y","width","height"}`, or `null` when idle.
    pub fn marquee_json(&self) -> String {
        match self.editor.marquee_rect() {
            Some(rect) => json!({
                "x": rect.left,
                "y": rect.top,
                "width": rect.width(),
                "height": rect.height(),
            })
            .to_string(),
            None => "null".to_string(),
        }
    }
}

impl Default for SeatCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatCanvas {
    fn open(config: SeatConfig) -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();
        let storage = LocalStorage::open(&config.storage_key);
        if !storage.is_available() {
            log::warn!("localStorage unavailable; layouts will not persist");
        }
        Self {
            editor: Editor::new(EntityStore::open(config, storage)),
        }
    }
}

fn changed(result: seat_core::Result<bool>) -> bool {
    result.unwrap_or_else(|e| {
        log::warn!("gesture rejected: {e}");
        false
    })
}

fn result_json(result: seat_core::Result<Value>) -> String {
    let body = match result {
        Ok(Value::Object(mut fields)) => {
            fields.insert("ok".into(), Value::Bool(true));
            Value::Object(fields)
        }
        Ok(other) => json!({ "ok": true, "value": other }),
        Err(e) => json!({ "ok": false, "error": e.to_string() }),
    };
    body.to_string()
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Seatplan WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// Route `log` records to the browser console.
fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}

#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            _ => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}
