pub mod web;

#[cfg(test)]
pub mod memory;

use std::{fmt, rc::Rc};

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceError {
    pub message: String,
}

impl SurfaceError {
    pub fn new(message: String) -> SurfaceError {
        SurfaceError { message }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SurfaceError {}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        SurfaceError::new(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<SurfaceError> for JsValue {
    fn from(err: SurfaceError) -> Self {
        JsValue::from_str(&err.message)
    }
}

pub type EventHandler = Rc<dyn Fn()>;

/// Everything the field editor needs from the page it runs in.
///
/// Element handles are cheap clones referring to the same node. Lookups are
/// in document order.
pub trait UiSurface {
    type Element: Clone;

    fn document_elements_by_class(&self, class_name: &str) -> Vec<Self::Element>;
    fn elements_by_class(&self, root: &Self::Element, class_name: &str) -> Vec<Self::Element>;
    fn first_element_by_tag(&self, root: &Self::Element, tag: &str) -> Option<Self::Element>;
    fn text_content(&self, element: &Self::Element) -> Option<String>;

    fn create_element(&self, tag: &str) -> Result<Self::Element, SurfaceError>;
    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), SurfaceError>;
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_class_name(&self, element: &Self::Element, class_name: &str);
    fn set_text(&self, element: &Self::Element, text: &str);
    fn append_child(
        &self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), SurfaceError>;

    /// Current value of a form control. `None` for elements that carry no value.
    fn value(&self, element: &Self::Element) -> Option<String>;
    fn set_value(&self, element: &Self::Element, value: &str) -> Result<(), SurfaceError>;

    fn add_listener(
        &self,
        element: &Self::Element,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), SurfaceError>;
}
