pub mod colors;
pub mod element;
pub mod focus;
pub mod grid;
pub mod role;
pub mod roster;
pub mod tier;
pub mod view_config;

pub use element::{ELEMENTS, Element, element_for_color};
pub use focus::{Focus, FocusState, ScrollRequest, SearchOutcome};
pub use grid::{Grid, GridCell, GridRow, SubRow};
pub use role::{ROLE_COLUMNS, RoleColumn};
pub use roster::{Entry, Roster, RosterAudit, RosterError};
pub use tier::TIER_ORDER;
pub use view_config::{Palette, VIEW_PRESETS, ViewConfig, ViewPreset};
