//! WASM bindings for OCR field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use std::sync::Arc;

use js_sys::Array;
use wasm_bindgen::prelude::*;

use fieldex_core::FieldExtractor as _;
use fieldex_core::models::config::ExtractionConfig;
use fieldex_core::{FieldMiner, MappingTable, TypedValue};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract fields from text with the built-in mapping table.
///
/// Returns the full extraction report as a plain JS object.
#[wasm_bindgen]
pub fn extract_fields(text: &str, document_type: Option<String>) -> Result<JsValue, JsValue> {
    let report = FieldMiner::builtin().extract_with_context(text, document_type.as_deref());
    to_js(&report)
}

/// Snake_case field name for a label (`"Stop-Loss Deductible"` to `"stop_loss_deductible"`).
#[wasm_bindgen]
pub fn normalize_label(label: &str) -> String {
    fieldex_core::normalize_field_name(label)
}

/// Typed interpretation of a value: `{ type, value }`.
#[wasm_bindgen]
pub fn interpret_value(value: &str) -> Result<JsValue, JsValue> {
    to_js(&TypedValue::interpret(value))
}

/// Field extractor class for browser use.
#[wasm_bindgen]
pub struct FieldExtractor {
    miner: FieldMiner,
}

#[wasm_bindgen]
impl FieldExtractor {
    /// Create an extractor. `mapping_json` is a JSON object of
    /// `label: field` strings, optionally under a `"mappings"` key; the
    /// built-in table is used when omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(mapping_json: Option<String>) -> Result<FieldExtractor, JsValue> {
        let mapping = match mapping_json {
            Some(json) => {
                MappingTable::from_json_str(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => MappingTable::builtin(),
        };

        Ok(Self {
            miner: FieldMiner::new(Arc::new(mapping)),
        })
    }

    /// Apply the false-positive filter to every strategy.
    #[wasm_bindgen]
    pub fn set_uniform_false_positive_filter(&mut self, enabled: bool) {
        let config = ExtractionConfig {
            uniform_false_positive_filter: enabled,
            ..self.miner.config().clone()
        };
        self.miner = self.miner.clone().with_config(config);
    }

    /// Extract candidates only, highest confidence first.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.miner.extract_fields(text))
    }

    /// Extract candidates plus categories, quality and summary.
    #[wasm_bindgen]
    pub fn extract_with_context(
        &self,
        text: &str,
        document_type: Option<String>,
    ) -> Result<JsValue, JsValue> {
        to_js(&self.miner.extract_with_context(text, document_type.as_deref()))
    }

    /// Canonical field a label maps to, if any.
    #[wasm_bindgen]
    pub fn lookup(&self, label: &str) -> Option<String> {
        self.miner.mapping().lookup(label).map(str::to_string)
    }

    /// Canonical field names of the mapping table.
    #[wasm_bindgen]
    pub fn targets(&self) -> Array {
        self.miner
            .mapping()
            .targets()
            .map(JsValue::from_str)
            .collect()
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self {
            miner: FieldMiner::builtin(),
        }
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
