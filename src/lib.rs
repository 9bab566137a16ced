#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geo;
pub mod path;
pub mod session;

use std::fmt;

use geo::LatLng;
use session::MeasurementSession;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

pub use path::PathError;
pub use session::{EdgeSegment, SavePayload, Snapshot};

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Public entry point for consumers: één teken-/meetsessie op de kaart.
#[wasm_bindgen]
pub struct MeasureSession {
    initialized: bool,
    inner: MeasurementSession,
}

#[wasm_bindgen]
impl MeasureSession {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> MeasureSession {
        MeasureSession {
            initialized: true,
            inner: MeasurementSession::new(),
        }
    }

    /// Geeft terug of de sessie de minimale initialisatie heeft doorlopen.
    #[wasm_bindgen]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Voeg een punt toe aan het einde van het pad.
    #[wasm_bindgen]
    pub fn add_point(&mut self, lat: f64, lng: f64) -> Result<(), JsValue> {
        self.inner
            .add_point(LatLng::new(lat, lng))
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Start het slepen van een bestaand hoekpunt. Geeft terug of de
    /// sleepactie gestart is.
    #[wasm_bindgen]
    pub fn begin_vertex_drag(&mut self, index: usize) -> bool {
        self.inner.begin_vertex_drag(index)
    }

    /// Start het slepen van een middelpunt-handle op een segment.
    #[wasm_bindgen]
    pub fn begin_edge_drag(&mut self, edge: usize) -> bool {
        self.inner.begin_edge_drag(edge)
    }

    /// Verwerk één muisbeweging binnen de actieve sleepactie.
    #[wasm_bindgen]
    pub fn drag_move(&mut self, lat: f64, lng: f64) -> Result<(), JsValue> {
        self.inner
            .drag_move(LatLng::new(lat, lng))
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Rond de actieve sleepactie af.
    #[wasm_bindgen]
    pub fn drag_release(&mut self) {
        self.inner.drag_release();
    }

    /// Sluit het pad tot een polygoon; stilzwijgende no-op bij minder dan
    /// drie punten of een al gesloten pad.
    #[wasm_bindgen]
    pub fn close_path(&mut self) {
        self.inner.close_path();
    }

    /// Maak de laatste bewerking ongedaan; no-op bij een lege geschiedenis.
    #[wasm_bindgen]
    pub fn undo(&mut self) {
        self.inner.undo();
    }

    /// Voer de laatst ongedaan gemaakte bewerking opnieuw uit.
    #[wasm_bindgen]
    pub fn redo(&mut self) {
        self.inner.redo();
    }

    /// Gooi pad, geschiedenis en actieve sleepactie weg.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Stel het actuele zoomniveau van de kaartweergave in.
    #[wasm_bindgen]
    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Haal de volledige render-snapshot op van de laatste opdracht.
    #[wasm_bindgen]
    pub fn get_snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.snapshot())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Bouw de overdrachtsstructuur voor de opslag-laag.
    #[wasm_bindgen]
    pub fn get_save_payload(&self, name: &str) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.save_payload(name))
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Default for MeasureSession {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_wrapper_initializes() {
        let session = MeasureSession::new();
        assert!(session.is_initialized());
    }

    #[test]
    fn wrapper_commands_drive_the_inner_session() {
        let mut session = MeasureSession::new();
        session.add_point(0.0, 0.0).unwrap();
        session.add_point(0.0, 0.001).unwrap();
        session.add_point(0.001, 0.0).unwrap();
        session.close_path();

        assert!(session.inner.snapshot().is_closed);
        assert!(session.can_undo());

        session.undo();
        assert!(!session.inner.snapshot().is_closed);
        assert!(session.can_redo());
    }
}
