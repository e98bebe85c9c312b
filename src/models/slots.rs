use super::image::EncodedImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic role of a reference image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Person,
    Background,
    Object,
    Accessory,
}

impl ImageRole {
    /// Fixed order in which populated slots are sent to the model.
    pub const ALL: [ImageRole; 4] = [
        ImageRole::Person,
        ImageRole::Background,
        ImageRole::Object,
        ImageRole::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Person => "person",
            ImageRole::Background => "background",
            ImageRole::Object => "object",
            ImageRole::Accessory => "accessory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageRole::Person => "Person",
            ImageRole::Background => "Background",
            ImageRole::Object => "Object",
            ImageRole::Accessory => "Accessory",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One optional image per role; every role always has an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlots {
    slots: [Option<EncodedImage>; 4],
}

impl ImageSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the image for `role`. `None` clears the slot.
    pub fn set(&mut self, role: ImageRole, image: Option<EncodedImage>) {
        self.slots[role.index()] = image;
    }

    pub fn get(&self, role: ImageRole) -> Option<&EncodedImage> {
        self.slots[role.index()].as_ref()
    }

    /// All four roles in order, populated or not.
    pub fn iter(&self) -> impl Iterator<Item = (ImageRole, Option<&EncodedImage>)> + '_ {
        ImageRole::ALL
            .into_iter()
            .map(move |role| (role, self.get(role)))
    }

    pub fn populated(&self) -> impl Iterator<Item = (ImageRole, &EncodedImage)> + '_ {
        self.iter()
            .filter_map(|(role, image)| image.map(|image| (role, image)))
    }

    pub fn has_any(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    pub fn populated_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
