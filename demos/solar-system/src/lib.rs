use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod camera_rig;
pub mod clock;
pub mod config;
pub mod game;
pub mod i18n;
pub mod orbit;

use bodies::CelestialBody;
use game::SolarSystem;
use i18n::{Language, UiKey};

orrery_web::export_game!(SolarSystem, "solar-system");

// ── Overlay strings ──────────────────────────────────────────────────

fn body_text(index: u32, f: impl FnOnce(&CelestialBody) -> String) -> String {
    with_runner(|r| r.game().registry().get(index as usize).map(f).unwrap_or_default())
}

#[wasm_bindgen]
pub fn body_count() -> u32 {
    with_runner(|r| r.game().registry().len() as u32)
}

#[wasm_bindgen]
pub fn body_key(index: u32) -> String {
    body_text(index, |b| b.key.clone())
}

#[wasm_bindgen]
pub fn body_name(index: u32, lang: u32) -> String {
    body_text(index, |b| b.name(Language::from_index(lang)).to_owned())
}

#[wasm_bindgen]
pub fn body_type(index: u32, lang: u32) -> String {
    body_text(index, |b| b.details.kind.get(Language::from_index(lang)).to_owned())
}

#[wasm_bindgen]
pub fn body_description(index: u32, lang: u32) -> String {
    body_text(index, |b| b.details.description.get(Language::from_index(lang)).to_owned())
}

#[wasm_bindgen]
pub fn body_temperature(index: u32) -> String {
    body_text(index, |b| b.details.temperature.clone())
}

#[wasm_bindgen]
pub fn body_gravity(index: u32) -> String {
    body_text(index, |b| b.details.gravity.clone())
}

#[wasm_bindgen]
pub fn body_color(index: u32) -> String {
    body_text(index, |b| b.color.clone())
}

#[wasm_bindgen]
pub fn body_velocity(index: u32) -> f64 {
    with_runner(|r| r.game().registry().get(index as usize).map_or(0.0, |b| b.velocity_km_s))
}

/// Unknown keys echo back so a missing label is visible rather than blank.
#[wasm_bindgen]
pub fn ui_text(key: &str, lang: u32) -> String {
    UiKey::from_name(key)
        .map(|k| k.text(Language::from_index(lang)).to_owned())
        .unwrap_or_else(|| key.to_owned())
}

#[wasm_bindgen]
pub fn format_distance_km(km: f64, lang: u32) -> String {
    i18n::format_distance(km, Language::from_index(lang))
}

#[wasm_bindgen]
pub fn current_language() -> u32 {
    with_runner(|r| match r.game().language() {
        Language::En => 0,
        Language::Mn => 1,
    })
}

/// Focus a body by key, or the overview for an empty key. Resolved on the
/// next frame, after any body set staged by `game_load_bodies`.
#[wasm_bindgen]
pub fn game_select_body(key: &str) {
    with_runner(|r| r.game_mut().select_key(key));
}

/// Replace the body set with a JSON array. Applied on the next frame.
#[wasm_bindgen]
pub fn game_load_bodies(json: &str) -> bool {
    with_runner(|r| r.game_mut().load_bodies(json))
}
