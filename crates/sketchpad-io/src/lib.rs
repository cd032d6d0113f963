//! # Sketchpad I/O
//!
//! Loading and saving sketches as JSON shape lists, plus the canvas settings
//! file that picks viewport size and render algorithms.

pub mod json;
pub mod settings;

pub use json::{load_into, shapes_from_json, shapes_to_json, shapes_to_json_pretty, LoadError};
pub use settings::{CanvasSettings, SettingsError};
