pub mod view;

use wasm_bindgen::prelude::*;
use vectionary_protocol::SubmissionId;
use vectionary_session::{Completion, EngineConfig, Session};
use vectionary_tagger::Classifier;

use crate::view::{AnalysisView, StateView};

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct VectionaryEngine {
    session: Session,
}

#[wasm_bindgen]
impl VectionaryEngine {
    /// `lexicon` is a compiled lexicon (loaded via fetch() in JS); `config` is an
    /// optional engine config JSON document.
    #[wasm_bindgen(constructor)]
    pub fn new(lexicon: Vec<u8>, config: Option<String>) -> Result<VectionaryEngine, JsValue> {
        let classifier =
            Classifier::from_archive(&lexicon).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let config = match config {
            Some(json) => EngineConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => EngineConfig::default(),
        };
        Ok(Self { session: Session::with_config(classifier, config) })
    }

    /// Engine over the built-in English word lists.
    pub fn english() -> Result<VectionaryEngine, JsValue> {
        let classifier = Classifier::english().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session: Session::with_config(classifier, EngineConfig::default()) })
    }

    #[wasm_bindgen(js_name = maxChars)]
    pub fn max_chars(&self) -> usize {
        self.session.config().max_chars
    }

    /// Validation message for the input box, or `undefined` when acceptable.
    pub fn validate(&self, text: &str) -> Option<String> {
        self.session.validate(text).err().map(|e| e.to_string())
    }

    /// Accepts a sentence for remote classification and returns the id the
    /// response must be reported back with. Throws the validation message.
    pub fn submit(&mut self, text: &str) -> Result<u32, JsValue> {
        self.session
            .submit(text)
            .map(|s| s.id.0)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Tags a sentence with the offline classifier only.
    #[wasm_bindgen(js_name = submitOffline)]
    pub fn submit_offline(&mut self, text: &str) -> Result<JsValue, JsValue> {
        self.session
            .submit_offline(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.view()
    }

    /// Reports the HTTP response for submission `id`. Returns whether it was
    /// applied; stale responses are dropped.
    pub fn complete(&mut self, id: u32, status: u16, body: &str) -> bool {
        let completion = self.session.complete_raw(SubmissionId::new(id), status, body);
        completion == Completion::Applied
    }

    /// Reports a failed fetch (network error, CORS, ...) for submission `id`.
    pub fn fail(&mut self, id: u32, message: &str) -> bool {
        self.session.fail(SubmissionId::new(id), message) == Completion::Applied
    }

    /// Current state: idle, pending, ready or failed.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&StateView::from(self.session.view()))
    }

    /// One-shot offline analysis, without touching the session state.
    pub fn analyze(&self, text: &str) -> Result<JsValue, JsValue> {
        let analysis = self.session.analyzer().analyze(text, &[]);
        to_js(&AnalysisView::from(&analysis))
    }
}
