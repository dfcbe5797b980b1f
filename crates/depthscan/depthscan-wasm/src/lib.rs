use js_sys::Float32Array;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use depthscan_core::{
    DeviceCapability, EffectParams, PointerSample, ScanConfig, ScanEffect, ScanError,
};

#[wasm_bindgen]
pub struct DepthScan {
    core: ScanEffect,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn scan_error(context: &str, e: ScanError) -> JsError {
    JsError::new(&format!("{context} ({}): {e}", e.category()))
}

/// Parse an optional JS object, falling back to the type's default.
fn from_js_or_default<T>(value: JsValue, context: &str) -> Result<T, JsError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if jsvalue_is_undefined_or_null(&value) {
        return Ok(T::default());
    }
    swb::from_value(value).map_err(|e| JsError::new(&format!("{context} error: {e}")))
}

#[wasm_bindgen]
impl DepthScan {
    /// Create a scan effect. Both arguments are optional JS objects.
    /// Example:
    ///   new DepthScan({ loop: { enabled: true, mode: "mirror", durationSeconds: 3 } },
    ///                 { style: { type: "gradient", width: 0, intensity: 0.4 } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, params: JsValue) -> Result<DepthScan, JsError> {
        console_error_panic_hook::set_once();

        let cfg: ScanConfig = from_js_or_default(config, "config")?;
        let params: EffectParams = from_js_or_default(params, "params")?;
        let core = ScanEffect::new(cfg, params).map_err(|e| scan_error("config", e))?;
        Ok(DepthScan { core })
    }

    /// Create from a JSON config string (same shape as the constructor's first argument).
    #[wasm_bindgen(js_name = from_json)]
    pub fn from_json(config_json: &str) -> Result<DepthScan, JsError> {
        console_error_panic_hook::set_once();
        let cfg = ScanConfig::from_json(config_json).map_err(|e| scan_error("from_json", e))?;
        let core =
            ScanEffect::new(cfg, EffectParams::default()).map_err(|e| scan_error("config", e))?;
        Ok(DepthScan { core })
    }

    /// Advance by dt (seconds). Returns the uniform block as an object
    /// (`{ uProgress, uColor, uEffectType, ... }`).
    #[wasm_bindgen]
    pub fn frame(&mut self, dt: f32) -> Result<JsValue, JsError> {
        let uniforms = self.core.frame(dt);
        swb::to_value(uniforms).map_err(|e| JsError::new(&format!("uniforms error: {e}")))
    }

    /// Advance by dt and return the uniforms flattened into a Float32Array.
    #[wasm_bindgen(js_name = frame_packed)]
    pub fn frame_packed(&mut self, dt: f32) -> Float32Array {
        let flat = self.core.frame(dt).to_array();
        Float32Array::from(&flat[..])
    }

    /// Events raised during the most recent frame.
    #[wasm_bindgen]
    pub fn events(&self) -> Result<JsValue, JsError> {
        let out = self.core.controller().last_output();
        swb::to_value(&out.events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    #[wasm_bindgen(js_name = pointer_enter)]
    pub fn pointer_enter(&mut self) {
        self.core.pointer_enter();
    }

    /// Pointer position relative to the container's top-left corner, plus
    /// the container's current size.
    #[wasm_bindgen(js_name = pointer_move)]
    pub fn pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.core
            .pointer_move(PointerSample::new(x, y, width, height));
    }

    #[wasm_bindgen(js_name = pointer_leave)]
    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    /// Replace the controller configuration. The previous config stays on error.
    #[wasm_bindgen(js_name = set_config)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let cfg: ScanConfig = from_js_or_default(config, "config")?;
        self.core
            .controller_mut()
            .set_config(cfg)
            .map_err(|e| scan_error("set_config", e))
    }

    #[wasm_bindgen(js_name = set_params)]
    pub fn set_params(&mut self, params: JsValue) -> Result<(), JsError> {
        let params: EffectParams = from_js_or_default(params, "params")?;
        self.core.set_params(params);
        Ok(())
    }

    #[wasm_bindgen(js_name = set_pointer_capable)]
    pub fn set_pointer_capable(&mut self, capable: bool) {
        self.core.controller_mut().set_pointer_capable(capable);
    }

    #[wasm_bindgen(js_name = set_device_capability)]
    pub fn set_device_capability(&mut self, has_touch: bool, viewport_width: f32) {
        self.core
            .controller_mut()
            .set_device_capability(DeviceCapability {
                has_touch,
                viewport_width,
            });
    }

    #[wasm_bindgen]
    pub fn progress(&self) -> f32 {
        self.core.controller().value()
    }

    /// "loop" | "transitioningToPointer" | "pointer"
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.core.controller().state().as_str().to_string()
    }

    /// Current config as a JSON string.
    #[wasm_bindgen(js_name = config_json)]
    pub fn config_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.core.controller().config())
            .map_err(|e| JsError::new(&format!("config error: {e}")))
    }

    #[wasm_bindgen(js_name = textures_loaded)]
    pub fn textures_loaded(&mut self) {
        self.core.mark_textures_loaded();
    }

    #[wasm_bindgen(js_name = texture_failed)]
    pub fn texture_failed(&mut self, reason: String) {
        self.core.mark_texture_failed(&reason);
    }

    #[wasm_bindgen(js_name = is_loading)]
    pub fn is_loading(&self) -> bool {
        self.core.is_loading()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
