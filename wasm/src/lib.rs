//! WebAssembly module for the SmartYield workspace
//!
//! Provides client-side computation for:
//! - Field form validation
//! - Offline yield estimates and canned advice
//! - Summary and advice panel view-models
//! - The `localStorage`-backed session token
//!
//! Every exported function takes and returns JSON strings; the `*_json`
//! helpers hold the logic so it can be tested off-browser.

use wasm_bindgen::prelude::*;

use shared::estimator::{generate_offline_advice, generate_offline_prediction};
use shared::models::{AdviceResponse, FarmerForm, FarmerInput, ReferenceOptions, YieldPrediction};
use shared::presentation::{build_view, headline};
use shared::session::{Session, TokenStore};
use shared::types::FieldLocation;

/// `localStorage` key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

fn parse<T: serde::de::DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn validated(form_json: &str) -> Result<FarmerInput, String> {
    let form: FarmerForm = parse("form", form_json)?;
    FarmerInput::try_from(form).map_err(|e| {
        serde_json::json!({ "field": e.field, "message": e.message }).to_string()
    })
}

pub fn validate_form_json(form_json: &str) -> Result<String, String> {
    to_json(&validated(form_json)?.into_form())
}

pub fn offline_prediction_json(form_json: &str) -> Result<String, String> {
    to_json(&generate_offline_prediction(&validated(form_json)?))
}

pub fn offline_advice_json(prediction_json: &str, form_json: &str) -> Result<String, String> {
    let prediction: YieldPrediction = parse("prediction", prediction_json)?;
    to_json(&generate_offline_advice(&prediction, &validated(form_json)?))
}

pub fn workspace_view_json(
    prediction_json: Option<&str>,
    advice_json: Option<&str>,
    advisory: Option<&str>,
) -> Result<String, String> {
    let prediction: Option<YieldPrediction> = prediction_json
        .map(|json| parse("prediction", json))
        .transpose()?;
    let advice: Option<AdviceResponse> = advice_json.map(|json| parse("advice", json)).transpose()?;
    to_json(&build_view(prediction.as_ref(), advice.as_ref(), advisory))
}

pub fn apply_location_json(form_json: &str, location_json: &str) -> Result<String, String> {
    let form: FarmerForm = parse("form", form_json)?;
    let location: FieldLocation = parse("location", location_json)?;
    to_json(&form.with_location(location))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("SmartYield WASM module loaded"));
}

/// Form pre-filled with the workspace defaults
#[wasm_bindgen]
pub fn default_form() -> Result<String, JsValue> {
    to_json(&FarmerForm::default()).map_err(|e| JsValue::from_str(&e))
}

/// Bundled crop, soil and irrigation options
#[wasm_bindgen]
pub fn default_reference_options() -> Result<String, JsValue> {
    to_json(&ReferenceOptions::default()).map_err(|e| JsValue::from_str(&e))
}

/// Validate a form; the error is a `{field, message}` JSON string
#[wasm_bindgen]
pub fn validate_form(form_json: &str) -> Result<String, JsValue> {
    validate_form_json(form_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn offline_prediction(form_json: &str) -> Result<String, JsValue> {
    offline_prediction_json(form_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn offline_advice(prediction_json: &str, form_json: &str) -> Result<String, JsValue> {
    offline_advice_json(prediction_json, form_json).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn prediction_headline(prediction_json: Option<String>) -> Result<String, JsValue> {
    let prediction: Option<YieldPrediction> = prediction_json
        .as_deref()
        .map(|json| parse("prediction", json))
        .transpose()
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(headline(prediction.as_ref()))
}

#[wasm_bindgen]
pub fn workspace_view(
    prediction_json: Option<String>,
    advice_json: Option<String>,
    advisory: Option<String>,
) -> Result<String, JsValue> {
    workspace_view_json(
        prediction_json.as_deref(),
        advice_json.as_deref(),
        advisory.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Merge a map-picked location into the form
#[wasm_bindgen]
pub fn apply_location(form_json: &str, location_json: &str) -> Result<String, JsValue> {
    apply_location_json(form_json, location_json).map_err(|e| JsValue::from_str(&e))
}

/// Token store over `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&JsValue::from_str("localStorage is unavailable"));
        }
        storage
    }
}

/// Console warning for a failed storage write, if any
fn storage_failure<E>(result: Result<(), E>, action: &str) -> Option<String> {
    result
        .err()
        .map(|_| format!("Could not {} session token", action))
}

fn warn_on_failure(result: Result<(), JsValue>, action: &str) {
    if let Some(message) = storage_failure(result, action) {
        web_sys::console::warn_1(&JsValue::from_str(&message));
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        self.storage()
            .and_then(|s| s.get_item(TOKEN_STORAGE_KEY).ok().flatten())
    }

    fn save(&mut self, token: &str) {
        if let Some(storage) = self.storage() {
            warn_on_failure(storage.set_item(TOKEN_STORAGE_KEY, token), "persist");
        }
    }

    fn clear(&mut self) {
        if let Some(storage) = self.storage() {
            warn_on_failure(storage.remove_item(TOKEN_STORAGE_KEY), "remove");
        }
    }
}

/// Browser session: created on app start, torn down on logout or when the
/// server rejects the token
#[wasm_bindgen]
pub struct ClientSession {
    inner: Session<LocalStorageTokenStore>,
}

#[wasm_bindgen]
impl ClientSession {
    /// Restore the session from `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn init() -> ClientSession {
        ClientSession {
            inner: Session::init(LocalStorageTokenStore),
        }
    }

    pub fn login(&mut self, token: &str) {
        self.inner.login(token);
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token().map(str::to_string)
    }

    #[wasm_bindgen(js_name = authorizationHeader)]
    pub fn authorization_header(&self) -> Option<String> {
        self.inner.authorization_header()
    }

    #[wasm_bindgen(js_name = isAuthenticated)]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }
}
