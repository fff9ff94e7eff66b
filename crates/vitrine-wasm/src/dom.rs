//! DOM side of the adapter: element bindings plus an applier that replays a
//! change batch against the page.
//!
//! The core never sees the document. Everything here is a straight projection
//! of [`Change`] values onto bound elements; unbound targets are skipped so a
//! host can mix adapter-rendered and self-rendered regions freely.

use hashbrown::HashMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, CustomEvent, CustomEventInit, Document, Element};

use vitrine_core::{AppendedItem, Change, CoreEvent, LightboxView, Outputs};

/// Elements the adapter may touch, keyed by the ids handed out at
/// registration. Reveal and lazy targets share the target id space; gallery
/// items have their own. The lightbox overlay is built on demand and owned
/// here until unmount.
#[derive(Default)]
pub struct DomBindings {
    targets: HashMap<u32, Element>,
    items: HashMap<u32, Element>,
    filters: Vec<(String, Element)>,
    container: Option<Element>,
    overlay: Option<Element>,
    overlay_image: Option<Element>,
    overlay_counter: Option<Element>,
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))
}

fn body_of(document: &Document) -> Result<web_sys::HtmlElement, JsValue> {
    document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))
}

fn style_of(element: &Element) -> Option<CssStyleDeclaration> {
    element.dyn_ref::<web_sys::HtmlElement>().map(|el| el.style())
}

impl DomBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_target(&mut self, id: u32, element: Element) {
        self.targets.insert(id, element);
    }

    pub fn bind_item(&mut self, id: u32, element: Element) {
        self.items.insert(id, element);
    }

    /// Later bindings for the same category replace earlier ones.
    pub fn bind_filter(&mut self, category: String, element: Element) {
        self.filters.retain(|(slot, _)| *slot != category);
        self.filters.push((category, element));
    }

    pub fn set_container(&mut self, element: Element) {
        self.container = Some(element);
    }

    pub fn item_element(&self, id: u32) -> Option<Element> {
        self.items.get(&id).cloned()
    }

    /// Apply one tick's outputs to the page. Unbound targets are skipped;
    /// Observe/Unobserve are left to the host's intersection observers.
    pub fn apply(&mut self, out: &Outputs) -> Result<(), JsValue> {
        if out.is_empty() {
            return Ok(());
        }
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        for change in &out.changes {
            match change {
                Change::Observe { .. } | Change::Unobserve { .. } => {}
                Change::AddClass { target, class } => {
                    if let Some(el) = self.targets.get(&target.0) {
                        el.class_list().add_1(class)?;
                    }
                }
                Change::RemoveClass { target, class } => {
                    if let Some(el) = self.targets.get(&target.0) {
                        el.class_list().remove_1(class)?;
                    }
                }
                Change::SetText { target, text } => {
                    if let Some(el) = self.targets.get(&target.0) {
                        el.set_text_content(Some(text));
                    }
                }
                Change::AppendText { target, text } => {
                    if let Some(el) = self.targets.get(&target.0) {
                        let current = el.text_content().unwrap_or_default();
                        el.set_text_content(Some(&format!("{current}{text}")));
                    }
                }
                Change::SetStyle {
                    target,
                    property,
                    value,
                } => {
                    if let Some(style) = self.targets.get(&target.0).and_then(style_of) {
                        style.set_property(property, value)?;
                    }
                }
                Change::SetImageSource { target, url } => {
                    if let Some(el) = self.targets.get(&target.0) {
                        el.set_attribute("src", url)?;
                    }
                }
                Change::SetItemVisible { item, visible } => {
                    if let Some(el) = self.items.get(&item.0) {
                        if let Some(style) = style_of(el) {
                            style.set_property("display", if *visible { "block" } else { "none" })?;
                        }
                        let classes = el.class_list();
                        if *visible {
                            classes.add_1("animate-fade-in")?;
                        } else {
                            classes.remove_1("animate-fade-in")?;
                        }
                    }
                }
                Change::SetActiveFilter { category } => {
                    for (slot, el) in &self.filters {
                        let classes = el.class_list();
                        if slot == category {
                            classes.add_1("active")?;
                        } else {
                            classes.remove_1("active")?;
                        }
                    }
                }
                Change::AppendItems { items } => self.append_items(&document, items)?,
                Change::MountLightbox { view } => self.mount_overlay(&document, view)?,
                Change::UpdateLightbox { view } => self.update_overlay(view)?,
                Change::SetOverlayActive { active } => {
                    if let Some(overlay) = &self.overlay {
                        let classes = overlay.class_list();
                        if *active {
                            classes.add_1("active")?;
                        } else {
                            classes.remove_1("active")?;
                        }
                    }
                }
                Change::UnmountLightbox => self.unmount_overlay(),
                Change::LockPageScroll => {
                    body_of(&document)?
                        .style()
                        .set_property("overflow", "hidden")?;
                }
                Change::UnlockPageScroll => {
                    body_of(&document)?.style().remove_property("overflow")?;
                }
                Change::SetDocumentAttr { name, value } => {
                    body_of(&document)?.set_attribute(name, value)?;
                }
            }
        }

        for event in &out.events {
            if let CoreEvent::DeviceChanged { device } = event {
                let detail = js_sys::Object::new();
                js_sys::Reflect::set(
                    &detail,
                    &JsValue::from_str("device"),
                    &JsValue::from_str(device.as_str()),
                )?;
                let init = CustomEventInit::new();
                init.set_detail(&detail);
                let event = CustomEvent::new_with_event_init_dict("vitrine:resize", &init)?;
                window.dispatch_event(&event)?;
            }
        }

        Ok(())
    }

    /// Build elements for a freshly appended batch inside the bound container.
    fn append_items(&mut self, document: &Document, items: &[AppendedItem]) -> Result<(), JsValue> {
        let container = match &self.container {
            Some(el) => el.clone(),
            // No container bound: the host renders appended batches itself.
            None => return Ok(()),
        };
        for appended in items {
            let item_el = document.create_element("div")?;
            item_el.set_class_name("gallery-item");
            item_el.set_attribute("data-category", &appended.image.category)?;
            let img = document.create_element("img")?;
            img.set_attribute("src", &appended.image.source_url)?;
            img.set_attribute("alt", &appended.image.alt_text)?;
            img.set_attribute("loading", "lazy")?;
            item_el.append_child(&img)?;
            if !appended.visible {
                if let Some(style) = style_of(&item_el) {
                    style.set_property("display", "none")?;
                }
            }
            container.append_child(&item_el)?;
            self.items.insert(appended.item.0, item_el);
        }
        Ok(())
    }

    fn mount_overlay(&mut self, document: &Document, view: &LightboxView) -> Result<(), JsValue> {
        // A replacement open unmounts first in the change stream, but stay
        // safe against a stray double mount.
        self.unmount_overlay();

        let overlay = document.create_element("div")?;
        overlay.set_class_name("lightbox");
        let content = document.create_element("div")?;
        content.set_class_name("lightbox-content");

        let close = document.create_element("span")?;
        close.set_class_name("lightbox-close");
        close.set_text_content(Some("\u{d7}"));
        let prev = document.create_element("span")?;
        prev.set_class_name("lightbox-prev");
        prev.set_text_content(Some("\u{2039}"));
        let next = document.create_element("span")?;
        next.set_class_name("lightbox-next");
        next.set_text_content(Some("\u{203a}"));

        let image = document.create_element("img")?;
        image.set_class_name("lightbox-image");
        image.set_attribute("src", &view.source_url)?;
        image.set_attribute("alt", &view.alt_text)?;

        let counter = document.create_element("div")?;
        counter.set_class_name("lightbox-counter");
        counter.set_text_content(Some(&view.counter_text()));

        content.append_child(&close)?;
        content.append_child(&prev)?;
        content.append_child(&next)?;
        content.append_child(&image)?;
        content.append_child(&counter)?;
        overlay.append_child(&content)?;
        body_of(document)?.append_child(&overlay)?;

        self.overlay = Some(overlay);
        self.overlay_image = Some(image);
        self.overlay_counter = Some(counter);
        Ok(())
    }

    fn update_overlay(&self, view: &LightboxView) -> Result<(), JsValue> {
        if let Some(img) = &self.overlay_image {
            img.set_attribute("src", &view.source_url)?;
            img.set_attribute("alt", &view.alt_text)?;
        }
        if let Some(counter) = &self.overlay_counter {
            counter.set_text_content(Some(&view.counter_text()));
        }
        Ok(())
    }

    fn unmount_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        self.overlay_image = None;
        self.overlay_counter = None;
    }
}
