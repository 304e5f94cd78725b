use std::{fmt, rc::Rc};

use log::{debug, error};

use crate::{
    character::{Character, CharacterKey},
    codec,
    config::EditorConfig,
    surface::{EventHandler, SurfaceError, UiSurface},
};

/// Controls rendered for every character, with their input type.
const RENDERED_FIELDS: [(CharacterKey, &str); 2] =
    [(CharacterKey::FirstName, "text"), (CharacterKey::Age, "number")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The field's value element holds no textarea to read from and write to.
    MissingStorage(String),
    Surface(SurfaceError),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::MissingStorage(name) => {
                write!(f, "Could not find field \"{}\"", name)
            }
            ControllerError::Surface(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<SurfaceError> for ControllerError {
    fn from(err: SurfaceError) -> Self {
        ControllerError::Surface(err)
    }
}

/// Character editor bound to one form field.
///
/// The field's textarea stays the only state: controls are seeded from it
/// once, and every edit rewrites it from the controls.
pub struct FieldController<S: UiSurface> {
    surface: Rc<S>,
    config: Rc<EditorConfig>,
    name: String,
    wrapper: S::Element,
    storage: S::Element,
}

impl<S: UiSurface + 'static> FieldController<S> {
    /// Renders the editor for the field labelled `name` into `container`.
    /// `value_element` is searched for the textarea backing the field.
    pub fn attach(
        surface: Rc<S>,
        config: Rc<EditorConfig>,
        name: &str,
        container: &S::Element,
        value_element: &S::Element,
    ) -> Result<Rc<FieldController<S>>, ControllerError> {
        let storage = surface
            .first_element_by_tag(value_element, "textarea")
            .ok_or_else(|| ControllerError::MissingStorage(name.to_string()))?;

        let wrapper = surface.create_element("div")?;
        surface.set_class_name(&wrapper, &config.classes.editor_wrapper);

        let characters = codec::decode(surface.value(&storage).as_deref(), &config.separators);
        debug!("Field \"{}\": {} character(s) loaded", name, characters.len());

        let controller = Rc::new(FieldController {
            surface: Rc::clone(&surface),
            config: Rc::clone(&config),
            name: name.to_string(),
            wrapper,
            storage,
        });

        let title = surface.create_element("h3")?;
        surface.set_text(&title, name);
        surface.set_class_name(&title, &config.classes.title);
        surface.append_child(&controller.wrapper, &title)?;

        for character in &characters {
            controller.append_block(character)?;
        }
        surface.append_child(container, &controller.wrapper)?;

        let add_button = surface.create_element("button")?;
        surface.set_attribute(&add_button, "type", "button")?;
        surface.set_text(&add_button, &config.labels.add_button);
        let on_add = Rc::clone(&controller);
        surface.add_listener(
            &add_button,
            "click",
            Rc::new(move || {
                if let Err(err) = on_add.add_blank() {
                    error!("Field \"{}\": could not add a character: {}", on_add.name, err);
                }
            }),
        )?;
        surface.append_child(container, &add_button)?;

        Ok(controller)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub(crate) fn wrapper(&self) -> &S::Element {
        &self.wrapper
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S::Element {
        &self.storage
    }

    /// Characters as currently stored in the backing textarea.
    #[cfg(test)]
    pub(crate) fn characters(&self) -> Vec<Character> {
        codec::decode(
            self.surface.value(&self.storage).as_deref(),
            &self.config.separators,
        )
    }

    /// Appends a block for a fresh, blank character.
    pub fn add_blank(self: &Rc<Self>) -> Result<S::Element, SurfaceError> {
        self.append_block(&Character::blank())
    }

    fn append_block(self: &Rc<Self>, character: &Character) -> Result<S::Element, SurfaceError> {
        let block = self.render_block(character)?;
        self.surface.append_child(&self.wrapper, &block)?;
        Ok(block)
    }

    fn render_block(self: &Rc<Self>, character: &Character) -> Result<S::Element, SurfaceError> {
        let surface = &self.surface;
        let classes = &self.config.classes;

        let block = surface.create_element("div")?;
        surface.set_class_name(&block, &classes.character);

        for (key, input_type) in RENDERED_FIELDS.iter() {
            let input = surface.create_element("input")?;
            surface.set_attribute(&input, "type", input_type)?;
            surface.set_attribute(&input, "name", key.as_str())?;
            surface.set_attribute(&input, "placeholder", self.placeholder(*key))?;
            surface.set_value(&input, &character.field_value(*key))?;
            surface.set_class_name(&input, &classes.field_value);
            surface.add_listener(&input, "input", self.sync_handler())?;
            surface.append_child(&block, &input)?;
        }

        Ok(block)
    }

    fn placeholder(&self, key: CharacterKey) -> &str {
        match key {
            CharacterKey::Age => &self.config.labels.age_placeholder,
            _ => &self.config.labels.first_name_placeholder,
        }
    }

    fn sync_handler(self: &Rc<Self>) -> EventHandler {
        let controller = Rc::clone(self);
        Rc::new(move || {
            if let Err(err) = controller.sync() {
                error!("Field \"{}\": could not save characters: {}", controller.name, err);
            }
        })
    }

    /// Current `(name, value)` of every control, one list per block, in
    /// document order.
    pub fn collect(&self) -> Vec<Vec<(String, String)>> {
        let surface = &self.surface;
        let classes = &self.config.classes;
        surface
            .elements_by_class(&self.wrapper, &classes.character)
            .iter()
            .map(|block| {
                surface
                    .elements_by_class(block, &classes.field_value)
                    .iter()
                    .map(|control| {
                        (
                            surface.attribute(control, "name").unwrap_or_default(),
                            surface.value(control).unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .collect()
    }

    /// Rewrites the backing textarea from the rendered controls.
    pub fn sync(&self) -> Result<String, SurfaceError> {
        let serialized = codec::encode(&self.collect(), &self.config.separators);
        self.surface.set_value(&self.storage, &serialized)?;
        debug!("Field \"{}\" saved: {:?}", self.name, serialized);
        Ok(serialized)
    }
}
