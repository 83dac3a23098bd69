//! Golden Output Tests
//!
//! Exact bytes for `"test-seed"` at 64px with default options. A change to
//! hashing, colour conversion or number formatting shows up here.

use forgeavatars_core::{
    engines::{BauhausEngine, GradientEngine, InitialsEngine, MultiColorPixelEngine, PixelEngine},
    Engine, EngineOptions, GenerationRequest,
};

fn render(engine: &dyn Engine) -> String {
    let options = EngineOptions::default();
    engine
        .generate(&GenerationRequest::new("test-seed", None, 64, &options))
        .unwrap()
        .into_content()
        .unwrap()
}

#[test]
fn golden_pixel() {
    assert_eq!(
        render(&PixelEngine),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><rect x="0" y="0" width="64" height="64" style="fill: #f2fad1"/><rect x="0" y="0" width="12.8" height="12.8" style="fill: #bee718"/><rect x="12" y="0" width="12.8" height="12.8" style="fill: #bee718"/><rect x="25" y="0" width="12.8" height="12.8" style="fill: #bee718"/><rect x="38" y="0" width="12.8" height="12.8" style="fill: #bee718"/><rect x="51" y="0" width="12.8" height="12.8" style="fill: #bee718"/><rect x="0" y="12" width="12.8" height="12.8" style="fill: #bee718"/><rect x="12" y="12" width="12.8" height="12.8" style="fill: #bee718"/><rect x="25" y="12" width="12.8" height="12.8" style="fill: #bee718"/><rect x="38" y="12" width="12.8" height="12.8" style="fill: #bee718"/><rect x="51" y="12" width="12.8" height="12.8" style="fill: #bee718"/><rect x="0" y="25" width="12.8" height="12.8" style="fill: #bee718"/><rect x="12" y="25" width="12.8" height="12.8" style="fill: #bee718"/><rect x="25" y="25" width="12.8" height="12.8" style="fill: #bee718"/><rect x="38" y="25" width="12.8" height="12.8" style="fill: #bee718"/><rect x="51" y="25" width="12.8" height="12.8" style="fill: #bee718"/><rect x="12" y="38" width="12.8" height="12.8" style="fill: #bee718"/><rect x="38" y="38" width="12.8" height="12.8" style="fill: #bee718"/><rect x="12" y="51" width="12.8" height="12.8" style="fill: #bee718"/><rect x="25" y="51" width="12.8" height="12.8" style="fill: #bee718"/><rect x="38" y="51" width="12.8" height="12.8" style="fill: #bee718"/></svg>"##
    );
}

#[test]
fn golden_multicolor_pixel() {
    assert_eq!(
        render(&MultiColorPixelEngine),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><rect x="0" y="0" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="12" y="0" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="25" y="0" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="38" y="0" width="12.8" height="12.8" style="fill: #a2e085"/><rect x="51" y="0" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="0" y="12" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="12" y="12" width="12.8" height="12.8" style="fill: #a2e085"/><rect x="25" y="12" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="38" y="12" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="51" y="12" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="0" y="25" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="12" y="25" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="25" y="25" width="12.8" height="12.8" style="fill: #c2b71d"/><rect x="38" y="25" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="51" y="25" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="0" y="38" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="12" y="38" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="25" y="38" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="38" y="38" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="51" y="38" width="12.8" height="12.8" style="fill: #8f6d24"/><rect x="0" y="51" width="12.8" height="12.8" style="fill: #c3e725"/><rect x="12" y="51" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="25" y="51" width="12.8" height="12.8" style="fill: #a6e553"/><rect x="38" y="51" width="12.8" height="12.8" style="fill: #a2e085"/><rect x="51" y="51" width="12.8" height="12.8" style="fill: #c3e725"/></svg>"##
    );
}

#[test]
fn golden_bauhaus() {
    assert_eq!(
        render(&BauhausEngine),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><g><rect x="0" y="0" width="64" height="64" style="fill: #eff2e3"/><rect x="7.71" y="25.72" width="48.58" height="12.57" transform="translate(2.31 -3.36) rotate(344.59 32 32)" style="fill: #606c38"/><circle cx="32" cy="32" r="7.86" transform="translate(-8.63 -2.18) rotate(20.77 32 32)" style="fill: #283618"/><line x1="-10.3" y1="32" x2="74.3" y2="32" transform="translate(-11.32 -2.18) rotate(39.77 32 32)" style="stroke: #dda15e; stroke-width: 4.62; stroke-linecap: round"/></g></svg>"##
    );
}

#[test]
fn golden_gradient() {
    assert_eq!(
        render(&GradientEngine),
        r##"<?xml version="1.0" encoding="UTF-8"?><svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><defs><linearGradient id="gradient-33601d4a" x1="0%" y1="0%" x2="100%" y2="0%"><stop offset="0%" stop-color="#7a5d1f"/><stop offset="50%" stop-color="#c3e236"/><stop offset="100%" stop-color="#bbfa9e"/></linearGradient></defs><circle cx="32" cy="32" r="32" fill="url(#gradient-33601d4a)"/></svg>"##
    );
}

#[test]
fn golden_initials() {
    assert_eq!(
        render(&InitialsEngine),
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64"><circle cx="32" cy="32" r="32" style="fill: #e5f5a3"/><text x="50%" y="55%" style="fill: #85a211; text-anchor: middle; dominant-baseline: middle; font-weight: normal; font-family: Segoe UI, Helvetica, sans-serif; font-size: 38px">T</text></svg>"##
    );
}
