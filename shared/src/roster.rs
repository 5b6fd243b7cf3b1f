use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::element::{Element, element_for_color};
use crate::role::column_index;
use crate::tier::tier_index;

/// Accent used for entries without a color token.
pub const FALLBACK_ACCENT: &str = "#4b5563";

/// Path prefix image references are resolved against.
pub const IMAGE_ROOT: &str = "/images";

/// One appearance of a character variant in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub version: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub color: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tier: String,
    pub role: String,
    #[serde(default)]
    pub row_id: i64,
    pub rank_index: i64,
}

impl Entry {
    pub fn element(&self) -> Element {
        element_for_color(&self.color)
    }

    /// Card accent color, falling back to a neutral gray.
    pub fn accent(&self) -> &str {
        if self.color.is_empty() {
            FALLBACK_ACCENT
        } else {
            &self.color
        }
    }

    /// Image URL, or `None` when the entry should render a placeholder.
    pub fn image_path(&self) -> Option<String> {
        self.image
            .as_deref()
            .filter(|image| !image.is_empty())
            .map(|image| format!("{IMAGE_ROOT}/{image}"))
    }

    pub fn is_variant(&self, name: &str, version: &str) -> bool {
        self.name == name && self.version == version
    }
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid roster json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("duplicate rank_index {rank_index}: \"{first}\" and \"{second}\"")]
    DuplicateRankIndex {
        rank_index: i64,
        first: String,
        second: String,
    },
}

/// `null` and a missing key both read as an empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// On-disk shapes: a bare entry array, or an array wrapped with a dataset version label.
#[derive(Serialize)]
#[serde(untagged)]
enum RosterFile {
    Bare(Vec<Entry>),
    Wrapped {
        version: Option<String>,
        entries: Vec<Entry>,
    },
}

#[derive(Deserialize)]
struct WrappedFile {
    #[serde(default)]
    version: Option<String>,
    entries: Vec<Entry>,
}

/// The immutable entry array the whole viewer is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    version: Option<String>,
    entries: Vec<Entry>,
}

impl Roster {
    /// Build a roster, rejecting duplicate `rank_index` values.
    pub fn new(entries: Vec<Entry>) -> Result<Self, RosterError> {
        let mut seen: HashMap<i64, usize> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(&prev) = seen.get(&entry.rank_index) {
                return Err(RosterError::DuplicateRankIndex {
                    rank_index: entry.rank_index,
                    first: format!("{}|{}", entries[prev].name, entries[prev].version),
                    second: format!("{}|{}", entry.name, entry.version),
                });
            }
            seen.insert(entry.rank_index, idx);
        }
        Ok(Self {
            version: None,
            entries,
        })
    }

    /// Parse either on-disk shape. The shape is picked from the first token so
    /// serde reports the field that actually failed.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        if json.trim_start().starts_with('[') {
            let entries: Vec<Entry> = serde_json::from_str(json)?;
            return Self::new(entries);
        }
        let WrappedFile { version, entries } = serde_json::from_str(json)?;
        Ok(Self::new(entries)?.with_version(version))
    }

    /// Serialize back to the shape it was loaded from.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, RosterError> {
        let file = match &self.version {
            Some(version) => RosterFile::Wrapped {
                version: Some(version.clone()),
                entries: self.entries.clone(),
            },
            None => RosterFile::Bare(self.entries.clone()),
        };
        Ok(serde_json::to_vec(&file)?)
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version.filter(|v| !v.is_empty());
        self
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, rank_index: i64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.rank_index == rank_index)
    }

    /// Distinct names, ascending.
    pub fn unique_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Versions of every entry whose name matches case-insensitively, in roster order.
    /// Not sorted and not deduplicated.
    pub fn styles_for_name(&self, name: &str) -> Vec<String> {
        if name.is_empty() {
            return Vec::new();
        }
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase() == needle)
            .map(|e| e.version.clone())
            .collect()
    }

    /// Every entry sharing `(name, version)`, ascending by `rank_index`.
    pub fn variants_of(&self, name: &str, version: &str) -> Vec<&Entry> {
        let mut same: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| e.is_variant(name, version))
            .collect();
        same.sort_by_key(|e| e.rank_index);
        same
    }

    /// Collect data-quality findings that degrade display without failing the load.
    pub fn audit(&self) -> RosterAudit {
        let mut audit = RosterAudit::default();
        for entry in &self.entries {
            if entry.element() == Element::Unknown {
                audit.unknown_colors.insert(entry.color.clone());
            }
            if tier_index(&entry.tier).is_none() {
                audit.unknown_tiers.insert(entry.tier.clone());
            }
            if column_index(&entry.role).is_none() {
                audit.unknown_roles.insert(entry.role.clone());
            }
            if entry.image_path().is_none() {
                audit.missing_images += 1;
            }
        }
        audit
    }
}

/// Findings from [`Roster::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterAudit {
    pub unknown_colors: BTreeSet<String>,
    pub unknown_tiers: BTreeSet<String>,
    pub unknown_roles: BTreeSet<String>,
    pub missing_images: usize,
}

impl RosterAudit {
    /// True when every entry can be placed in the grid with a known element.
    pub fn is_clean(&self) -> bool {
        self.unknown_colors.is_empty()
            && self.unknown_tiers.is_empty()
            && self.unknown_roles.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for color in &self.unknown_colors {
            out.push(format!("color {color:?} has no element; shown as Unknown"));
        }
        for tier in &self.unknown_tiers {
            out.push(format!("tier {tier:?} is not a grid row; entries hidden"));
        }
        for role in &self.unknown_roles {
            out.push(format!("role {role:?} is not a grid column; entries hidden"));
        }
        out
    }
}
