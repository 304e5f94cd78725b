/// One entry of the "Personnages" field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Character {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKey {
    FirstName,
    LastName,
    Age,
    Description,
}

impl CharacterKey {
    pub const ALL: [CharacterKey; 4] = [
        CharacterKey::FirstName,
        CharacterKey::LastName,
        CharacterKey::Age,
        CharacterKey::Description,
    ];

    /// Name used both in the serialized text and as the `name` attribute of
    /// the rendered control.
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKey::FirstName => "firstName",
            CharacterKey::LastName => "lastName",
            CharacterKey::Age => "age",
            CharacterKey::Description => "description",
        }
    }

    pub fn from_name(key: &str) -> Option<CharacterKey> {
        match key {
            "firstName" => Some(CharacterKey::FirstName),
            "lastName" => Some(CharacterKey::LastName),
            "age" => Some(CharacterKey::Age),
            "description" => Some(CharacterKey::Description),
            _ => None,
        }
    }
}

impl Character {
    pub fn blank() -> Character {
        Character::default()
    }

    /// Value of `key` as it is written to a control or to the serialized text.
    /// A missing age is the empty string.
    pub fn field_value(&self, key: CharacterKey) -> String {
        match key {
            CharacterKey::FirstName => self.first_name.clone(),
            CharacterKey::LastName => self.last_name.clone(),
            CharacterKey::Age => self.age.map(|age| age.to_string()).unwrap_or_default(),
            CharacterKey::Description => self.description.clone(),
        }
    }

    /// Key/value pairs in canonical order, ready for `codec::encode`.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        CharacterKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), self.field_value(*key)))
            .collect()
    }
}
