use serde::{
    Serialize,
    Deserialize
};

/// The `name` field shared by every user-named holiday definition.
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}

impl NamedJsonObject {
    pub fn into_name(self) -> String {
        self.name
    }
}
