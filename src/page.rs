use std::rc::Rc;

use log::{debug, error, info};

use crate::{
    config::EditorConfig,
    controller::FieldController,
    surface::UiSurface,
};

/// Attaches a character editor to every handled field of the document.
///
/// A field container holds a `dt` with the field label and a `dd` with its
/// value. Containers missing either, with an unhandled label, or already
/// holding an editor are left alone; a field that fails to attach does not
/// stop the others.
pub fn enhance_page<S: UiSurface + 'static>(
    surface: &Rc<S>,
    config: &Rc<EditorConfig>,
) -> Vec<Rc<FieldController<S>>> {
    let mut controllers = Vec::new();

    for container in surface.document_elements_by_class(&config.classes.field_container) {
        let label = surface
            .first_element_by_tag(&container, "dt")
            .and_then(|dt| surface.text_content(&dt))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let value_element = surface.first_element_by_tag(&container, "dd");

        let (label, value_element) = match (label, value_element) {
            (Some(label), Some(value_element)) => (label, value_element),
            _ => continue,
        };

        if !config.handles_field(&label) {
            debug!("Ignoring field \"{}\"", label);
            continue;
        }
        if !surface
            .elements_by_class(&container, &config.classes.editor_wrapper)
            .is_empty()
        {
            debug!("Field \"{}\" already has an editor", label);
            continue;
        }

        match FieldController::attach(
            Rc::clone(surface),
            Rc::clone(config),
            &label,
            &container,
            &value_element,
        ) {
            Ok(controller) => controllers.push(controller),
            Err(err) => error!("{}", err),
        }
    }

    info!("Character editor attached to {} field(s)", controllers.len());
    controllers
}
