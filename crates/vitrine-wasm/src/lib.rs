use js_sys::JSON;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use vitrine_core::{
    parse_count, parse_factor, parse_ms, Config, Engine, GalleryImage, Inputs, ItemId, RevealKind,
    RevealSpec,
};

use crate::dom::DomBindings;

pub mod dom;

#[wasm_bindgen]
pub struct Vitrine {
    core: Engine,
    dom: DomBindings,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

#[wasm_bindgen]
impl Vitrine {
    /// Create a new engine instance. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new Vitrine({ near_bottom_px: 600 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Vitrine, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(Vitrine {
            core: Engine::new(cfg),
            dom: DomBindings::new(),
        })
    }

    /// Load a RevealSpec (JSON) without touching the DOM. Returns a TargetId (u32).
    /// Hosts that render themselves pair this with `update`.
    #[wasm_bindgen(js_name = register_reveal)]
    pub fn register_reveal(&mut self, spec_json: JsValue) -> Result<u32, JsError> {
        let spec: RevealSpec = swb::from_value(spec_json)
            .map_err(|e| JsError::new(&format!("register_reveal parse error: {e}")))?;
        Ok(self.core.register_reveal(spec).0)
    }

    /// Register a reveal target from its element, reading the same data-*
    /// attributes the page markup carries (data-animation, data-delay,
    /// data-target, data-duration, data-text, data-speed). Missing or bad
    /// attributes fall back to the configured defaults. Returns a TargetId.
    #[wasm_bindgen(js_name = observe_reveal_element)]
    pub fn observe_reveal_element(&mut self, element: Element) -> u32 {
        let kind = match element.get_attribute("data-animation") {
            Some(raw) => RevealKind::parse(&raw),
            None => RevealKind::FadeUp,
        };
        let delay = parse_ms(element.get_attribute("data-delay").as_deref(), 0.0);
        let spec = match kind {
            RevealKind::Counter => {
                let target = parse_count(element.get_attribute("data-target").as_deref());
                let duration = parse_ms(
                    element.get_attribute("data-duration").as_deref(),
                    self.core.config().counter_duration_ms,
                );
                RevealSpec::counter(target, duration, delay)
            }
            RevealKind::Typewriter => {
                let text = element
                    .get_attribute("data-text")
                    .or_else(|| element.text_content())
                    .unwrap_or_default();
                let speed = parse_ms(
                    element.get_attribute("data-speed").as_deref(),
                    self.core.config().typewriter_speed_ms,
                );
                RevealSpec::typewriter(text, speed, delay)
            }
            RevealKind::Parallax => {
                let speed = parse_factor(
                    element.get_attribute("data-speed").as_deref(),
                    self.core.config().parallax_speed,
                );
                RevealSpec::parallax(speed)
            }
            other => RevealSpec::classes(other, delay),
        };
        let id = self.core.register_reveal(spec);
        self.dom.bind_target(id.0, element);
        id.0
    }

    /// Register a lazily loaded image from its element. The real source must
    /// sit in data-src; it is swapped in when the element scrolls into view.
    #[wasm_bindgen(js_name = observe_lazy_element)]
    pub fn observe_lazy_element(&mut self, element: Element) -> Result<u32, JsError> {
        let url = element
            .get_attribute("data-src")
            .ok_or_else(|| JsError::new("observe_lazy_element: data-src missing"))?;
        let id = self.core.register_lazy(&url);
        self.dom.bind_target(id.0, element);
        Ok(id.0)
    }

    /// Register the preloader element. Hidden after page load settles.
    #[wasm_bindgen(js_name = register_preloader_element)]
    pub fn register_preloader_element(&mut self, element: Element) -> u32 {
        let id = self.core.register_preloader();
        self.dom.bind_target(id.0, element);
        id.0
    }

    /// Add one gallery image (JSON: { src, alt, category }) without touching
    /// the DOM. Returns an ItemId (u32).
    #[wasm_bindgen(js_name = add_image)]
    pub fn add_image(&mut self, image_json: JsValue) -> Result<u32, JsError> {
        let image: GalleryImage = swb::from_value(image_json)
            .map_err(|e| JsError::new(&format!("add_image parse error: {e}")))?;
        Ok(self.core.add_image(image).0)
    }

    /// Register a gallery item from its markup: the item element carries
    /// data-category and wraps the `<img>`. Returns an ItemId (u32).
    #[wasm_bindgen(js_name = register_gallery_element)]
    pub fn register_gallery_element(&mut self, element: Element) -> Result<u32, JsError> {
        let img = element
            .query_selector("img")
            .map_err(|e| JsError::new(&format!("register_gallery_element query error: {e:?}")))?
            .ok_or_else(|| JsError::new("register_gallery_element: no <img> inside element"))?;
        let image = GalleryImage {
            source_url: img.get_attribute("src").unwrap_or_default(),
            alt_text: img.get_attribute("alt").unwrap_or_default(),
            category: element.get_attribute("data-category").unwrap_or_default(),
        };
        let id = self.core.add_image(image);
        self.dom.bind_item(id.0, element);
        Ok(id.0)
    }

    /// Load a gallery manifest (JSON array of { src, alt, category }).
    /// Accepts a JS array or a JSON string. Returns the new ItemIds.
    #[wasm_bindgen(js_name = load_manifest)]
    pub fn load_manifest(&mut self, manifest_json: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&manifest_json) {
            return Err(JsError::new(
                "load_manifest: manifest_json is null/undefined",
            ));
        }
        // Stringify the JS value so we can reuse the core parser (expects &str)
        let s = match manifest_json.as_string() {
            Some(s) => s,
            None => JSON::stringify(&manifest_json)
                .map_err(|e| JsError::new(&format!("load_manifest stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("load_manifest: stringify produced non-string"))?,
        };
        let ids: Vec<ItemId> = self
            .core
            .load_manifest(&s)
            .map_err(|e| JsError::new(&format!("load_manifest error: {e}")))?;
        let raw: Vec<u32> = ids.iter().map(|id| id.0).collect();
        swb::to_value(&raw)
            .map_err(|e| JsError::new(&format!("load_manifest ids error: {e}")))
    }

    /// Bind a filter control so the active class follows the engine's filter.
    #[wasm_bindgen(js_name = bind_filter_control)]
    pub fn bind_filter_control(&mut self, category: String, element: Element) {
        self.dom.bind_filter(category, element);
    }

    /// Bind the container that receives elements for appended batches.
    #[wasm_bindgen(js_name = set_items_container)]
    pub fn set_items_container(&mut self, element: Element) {
        self.dom.set_container(element);
    }

    /// The bound element for a gallery item, if any. Appended batches create
    /// and bind their elements; hosts use this to wire click handlers.
    #[wasm_bindgen(js_name = item_element)]
    pub fn item_element(&self, item_id: u32) -> Option<Element> {
        self.dom.item_element(item_id)
    }

    /// Open the lightbox at an index into the full gallery sequence.
    pub fn activate(&mut self, index: usize) -> Result<(), JsError> {
        self.core
            .activate(index)
            .map_err(|e| JsError::new(&format!("activate error: {e}")))
    }

    /// Advance the open lightbox to the next image (wraps).
    pub fn next(&mut self) {
        self.core.next();
    }

    /// Step the open lightbox back to the previous image (wraps).
    pub fn previous(&mut self) {
        self.core.previous();
    }

    /// Begin closing the open lightbox.
    pub fn close(&mut self) {
        self.core.close();
    }

    /// Switch the gallery filter ("all" or a category).
    #[wasm_bindgen(js_name = set_filter)]
    pub fn set_filter(&mut self, category: String) {
        self.core.set_filter(&category);
    }

    /// Request the next gallery batch now.
    #[wasm_bindgen(js_name = load_more)]
    pub fn load_more(&mut self) {
        self.core.load_more();
    }

    /// Step the engine by dt (milliseconds) with inputs JSON. Returns Outputs
    /// JSON; the host applies the changes itself.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out = self.core.update(dt_ms, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Step the engine and apply the resulting changes to the bound elements.
    /// Observe/Unobserve pass through untouched (observer wiring stays with
    /// the host); everything applied is still present in the returned Outputs.
    #[wasm_bindgen(js_name = step_and_apply)]
    pub fn step_and_apply(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out = self.core.update(dt_ms, inputs);
        self.dom
            .apply(out)
            .map_err(|e| JsError::new(&format!("dom apply error: {e:?}")))?;
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Whether the lightbox is currently open.
    #[wasm_bindgen(js_name = is_lightbox_open)]
    pub fn is_lightbox_open(&self) -> bool {
        self.core.is_lightbox_open()
    }

    /// Next page the infinite scroll will request.
    pub fn page(&self) -> u32 {
        self.core.page()
    }

    /// Gallery items visible under the active filter.
    #[wasm_bindgen(js_name = visible_count)]
    pub fn visible_count(&self) -> usize {
        self.core.visible_count()
    }

    /// Device class from the last settled resize, if any.
    pub fn device(&self) -> Option<String> {
        self.core.device().map(|d| d.as_str().to_string())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
