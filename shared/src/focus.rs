//! Focus state for the tier grid.
//!
//! Focus is either a whole character (`ByName`, from a name search) or one
//! `(name, version)` pair (`ByVariant`, from a style search or a card click).
//! Name/style searches only move focus; they never change grid membership.

use crate::roster::{Entry, Roster};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Unfocused,
    ByName(String),
    ByVariant {
        name: String,
        version: String,
    },
}

/// Request for the view to bring the card with this `rank_index` into view.
/// Dropped silently when no such card is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub rank_index: i64,
}

/// Result of resolving the search inputs against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Name query empty: drop any focus.
    Cleared,
    Resolved { focus: Focus, scroll: ScrollRequest },
    /// Query set but nothing matched: keep whatever focus exists.
    NoMatch,
}

impl Focus {
    pub fn variant_of(entry: &Entry) -> Self {
        Self::ByVariant {
            name: entry.name.clone(),
            version: entry.version.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Unfocused)
    }

    /// `name` for a character focus, `name|version` for a variant focus.
    pub fn key(&self) -> Option<String> {
        match self {
            Self::Unfocused => None,
            Self::ByName(name) => Some(name.clone()),
            Self::ByVariant { name, version } => Some(format!("{name}|{version}")),
        }
    }

    pub fn is_variant_of(&self, entry: &Entry) -> bool {
        matches!(self, Self::ByVariant { name, version } if entry.is_variant(name, version))
    }

    /// Whether the card for `entry` is drawn focused.
    pub fn highlights(&self, entry: &Entry) -> bool {
        match self {
            Self::Unfocused => false,
            Self::ByName(name) => entry.name == *name,
            Self::ByVariant { name, version } => entry.is_variant(name, version),
        }
    }

    /// Whether the card for `entry` is drawn dimmed behind the focused ones.
    pub fn dims(&self, entry: &Entry) -> bool {
        self.is_active() && !self.highlights(entry)
    }
}

/// Resolve the name/style search inputs.
///
/// With a style, the first entry matching the name case-insensitively and the
/// version exactly is focused as a variant. Without one, the character is
/// focused and the scroll target is the first name match in roster order.
pub fn resolve_focus(roster: &Roster, name_query: &str, style_query: &str) -> SearchOutcome {
    if name_query.is_empty() {
        return SearchOutcome::Cleared;
    }
    let needle = name_query.to_lowercase();
    let mut by_name = roster
        .entries()
        .iter()
        .filter(|e| e.name.to_lowercase() == needle);

    let hit = if style_query.is_empty() {
        by_name
            .next()
            .map(|e| (Focus::ByName(e.name.clone()), e.rank_index))
    } else {
        by_name
            .find(|e| e.version == style_query)
            .map(|e| (Focus::variant_of(e), e.rank_index))
    };

    match hit {
        Some((focus, rank_index)) => SearchOutcome::Resolved {
            focus,
            scroll: ScrollRequest { rank_index },
        },
        None => SearchOutcome::NoMatch,
    }
}

/// Card click: focus this variant, or clear if it is already the focus.
pub fn toggle_card_focus(current: &Focus, entry: &Entry) -> Focus {
    if current.is_variant_of(entry) {
        Focus::Unfocused
    } else {
        Focus::variant_of(entry)
    }
}

/// The entry after `entry` among those sharing its `(name, version)`, by
/// ascending `rank_index`, wrapping to the first after the last.
pub fn cycle_variant<'a>(roster: &'a Roster, entry: &Entry) -> Option<&'a Entry> {
    let same = roster.variants_of(&entry.name, &entry.version);
    if same.is_empty() {
        return None;
    }
    let next = same
        .iter()
        .position(|e| e.rank_index == entry.rank_index)
        .map_or(0, |idx| (idx + 1) % same.len());
    Some(same[next])
}

/// The focus state machine driven by the view's input events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    focus: Focus,
}

impl FocusState {
    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Search inputs changed.
    pub fn on_search(
        &mut self,
        roster: &Roster,
        name_query: &str,
        style_query: &str,
    ) -> Option<ScrollRequest> {
        match resolve_focus(roster, name_query, style_query) {
            SearchOutcome::Cleared => {
                self.focus = Focus::Unfocused;
                None
            }
            SearchOutcome::Resolved { focus, scroll } => {
                self.focus = focus;
                Some(scroll)
            }
            SearchOutcome::NoMatch => None,
        }
    }

    pub fn on_card_click(&mut self, entry: &Entry) {
        self.focus = toggle_card_focus(&self.focus, entry);
    }

    pub fn on_background_click(&mut self) {
        self.focus = Focus::Unfocused;
    }

    /// The cycle control shows on a card only while its variant is focused and
    /// the variant has duplicates to step through.
    pub fn can_cycle(&self, roster: &Roster, entry: &Entry) -> bool {
        self.focus.is_variant_of(entry) && roster.variants_of(&entry.name, &entry.version).len() > 1
    }

    /// Cycle from `entry` to its next duplicate. Focus is unchanged.
    pub fn on_cycle(&self, roster: &Roster, entry: &Entry) -> Option<ScrollRequest> {
        if !self.can_cycle(roster, entry) {
            return None;
        }
        cycle_variant(roster, entry).map(|next| ScrollRequest {
            rank_index: next.rank_index,
        })
    }
}
