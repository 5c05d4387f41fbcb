//! WebAssembly bindings for the register inspector.
//!
//! This module provides JavaScript-friendly wrappers around [`Session`].
//! Bit index errors surface as thrown `Error`s rather than being clamped.

use wasm_bindgen::prelude::*;
use crate::session::Session;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly register wrapper.
#[wasm_bindgen]
pub struct WasmRegister {
    session: Session,
}

#[wasm_bindgen]
impl WasmRegister {
    /// Create a register holding zero.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { session: Session::new() }
    }

    /// Current value. JavaScript receives a `BigInt`.
    #[wasm_bindgen]
    pub fn get(&self) -> u64 {
        self.session.register().get()
    }

    #[wasm_bindgen]
    pub fn set(&mut self, value: u64) {
        self.session.register_mut().set(value);
    }

    #[wasm_bindgen]
    pub fn get_bit(&self, index: u32) -> Result<bool, JsError> {
        self.session.register().get_bit(index).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn set_bit(&mut self, index: u32, on: bool) -> Result<(), JsError> {
        self.session.register_mut().set_bit(index, on).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn extract_range(&mut self, low: u32, high: u32) -> Result<(), JsError> {
        self.session.register_mut().extract_range(low, high).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn zero_range(&mut self, low: u32, high: u32) -> Result<(), JsError> {
        self.session.register_mut().zero_range(low, high).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn one_range(&mut self, low: u32, high: u32) -> Result<(), JsError> {
        self.session.register_mut().one_range(low, high).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn toggle_range(&mut self, low: u32, high: u32) -> Result<(), JsError> {
        self.session.register_mut().toggle_range(low, high).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn shift_left(&mut self, n: u32) {
        self.session.register_mut().shift_left(n);
    }

    #[wasm_bindgen]
    pub fn shift_right(&mut self, n: u32) {
        self.session.register_mut().shift_right(n);
    }

    /// Evaluate an expression, store it, and return the raw result as text.
    #[wasm_bindgen]
    pub fn calculate(&mut self, input: &str) -> Result<String, JsError> {
        self.session
            .calculate(input)
            .map(|result| result.to_string())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Run one session command line (see the session module docs).
    #[wasm_bindgen]
    pub fn execute(&mut self, line: &str) -> Result<(), JsError> {
        self.session
            .execute(line)
            .map(|_| ())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Transcript lines, oldest first.
    #[wasm_bindgen]
    pub fn transcript(&self) -> js_sys::Array {
        self.session
            .transcript()
            .iter()
            .map(|e| JsValue::from_str(&e.to_string()))
            .collect()
    }

    /// Value and all four renderings as JSON.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsError::new(&e.to_string()))
    }
}

impl Default for WasmRegister {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate an expression without touching any register.
#[wasm_bindgen]
pub fn wasm_evaluate(input: &str) -> Result<u64, JsError> {
    crate::expr::evaluate(input).map_err(|e| JsError::new(&e.to_string()))
}
