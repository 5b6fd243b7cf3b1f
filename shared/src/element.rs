use std::fmt;

use serde::{Deserialize, Serialize};

/// Elemental category of a roster entry, derived from its color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Null,
    Ice,
    Light,
    Fire,
    Thunder,
    Dark,
    Unison,
    /// Color token not present in the lookup table.
    Unknown,
}

/// Selectable elements, in filter-menu order. `Unknown` is never offered.
pub const ELEMENTS: [Element; 7] = [
    Element::Null,
    Element::Ice,
    Element::Light,
    Element::Fire,
    Element::Thunder,
    Element::Dark,
    Element::Unison,
];

/// Color token -> element. Many-to-one: both yellows are Thunder.
pub const ELEMENT_COLORS: &[(&str, Element)] = &[
    ("#b7b7b7", Element::Null),
    ("#a4c2f4", Element::Ice),
    ("#ffffff", Element::Light),
    ("#ea9999", Element::Fire),
    ("#ffd966", Element::Thunder),
    ("#ffe599", Element::Thunder),
    ("#8e7cc3", Element::Dark),
    ("#b6d7a8", Element::Unison),
];

/// Look up the element for a color token. Exact match; anything else is `Unknown`.
pub fn element_for_color(color: &str) -> Element {
    ELEMENT_COLORS
        .iter()
        .find(|(token, _)| *token == color)
        .map(|&(_, element)| element)
        .unwrap_or(Element::Unknown)
}

impl Element {
    pub fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Ice => "Ice",
            Self::Light => "Light",
            Self::Fire => "Fire",
            Self::Thunder => "Thunder",
            Self::Dark => "Dark",
            Self::Unison => "Unison",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a filter value. Empty input means "no filter" and yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Null" => Some(Self::Null),
            "Ice" => Some(Self::Ice),
            "Light" => Some(Self::Light),
            "Fire" => Some(Self::Fire),
            "Thunder" => Some(Self::Thunder),
            "Dark" => Some(Self::Dark),
            "Unison" => Some(Self::Unison),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Every color token that maps to this element.
    #[cfg(test)]
    pub(crate) fn colors(self) -> impl Iterator<Item = &'static str> {
        ELEMENT_COLORS
            .iter()
            .filter(move |(_, element)| *element == self)
            .map(|&(token, _)| token)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
