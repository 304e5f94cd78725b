use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, HtmlCollection, HtmlInputElement, HtmlTextAreaElement};

use super::{EventHandler, SurfaceError, UiSurface};

/// [`UiSurface`] over the live browser document.
pub struct WebSurface {
    document: Document,
}

impl WebSurface {
    pub fn new(document: Document) -> WebSurface {
        WebSurface { document }
    }

    pub fn from_window() -> Result<WebSurface, SurfaceError> {
        let document = web_sys::window()
            .ok_or_else(|| SurfaceError::new("no window".to_string()))?
            .document()
            .ok_or_else(|| SurfaceError::new("window has no document".to_string()))?;
        Ok(WebSurface::new(document))
    }
}

fn collection_to_vec(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .collect()
}

impl UiSurface for WebSurface {
    type Element = Element;

    fn document_elements_by_class(&self, class_name: &str) -> Vec<Element> {
        collection_to_vec(self.document.get_elements_by_class_name(class_name))
    }

    fn elements_by_class(&self, root: &Element, class_name: &str) -> Vec<Element> {
        collection_to_vec(root.get_elements_by_class_name(class_name))
    }

    fn first_element_by_tag(&self, root: &Element, tag: &str) -> Option<Element> {
        root.get_elements_by_tag_name(tag).item(0)
    }

    fn text_content(&self, element: &Element) -> Option<String> {
        element.text_content()
    }

    fn create_element(&self, tag: &str) -> Result<Element, SurfaceError> {
        Ok(self.document.create_element(tag)?)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), SurfaceError> {
        Ok(element.set_attribute(name, value)?)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), SurfaceError> {
        parent.append_child(child)?;
        Ok(())
    }

    fn value(&self, element: &Element) -> Option<String> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            Some(textarea.value())
        } else {
            None
        }
    }

    fn set_value(&self, element: &Element, value: &str) -> Result<(), SurfaceError> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value(value);
        } else {
            return Err(SurfaceError::new(format!(
                "<{}> has no value",
                element.tag_name().to_lowercase()
            )));
        }
        Ok(())
    }

    fn add_listener(
        &self,
        element: &Element,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), SurfaceError> {
        let cb = Closure::<dyn FnMut()>::new(move || handler());
        element.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        // Controls live as long as the page does.
        cb.forget();
        Ok(())
    }
}
