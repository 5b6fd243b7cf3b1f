use serde::{Deserialize, Serialize};

use crate::role::RoleColumn;

/// Named sizing/theme presets for the grid view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewPreset {
    #[default]
    Standard,
    Compact,
    Large,
}

pub const VIEW_PRESETS: [ViewPreset; 3] =
    [ViewPreset::Standard, ViewPreset::Compact, ViewPreset::Large];

impl ViewPreset {
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Compact => "Compact",
            Self::Large => "Large",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        VIEW_PRESETS.into_iter().find(|p| p.label() == label)
    }

    pub fn config(self) -> ViewConfig {
        match self {
            Self::Standard => ViewConfig {
                card_width: 160,
                card_height: 240,
                card_gap: 16,
                row_gap: 24,
                cell_padding: 16,
                tier_label_width: 200,
                header_height: 80,
                empty_cell_min_height: 160,
                zoom: 1.0,
                palette: Palette::SERAPH,
            },
            Self::Compact => ViewConfig {
                card_width: 128,
                card_height: 192,
                card_gap: 10,
                row_gap: 14,
                cell_padding: 10,
                tier_label_width: 150,
                header_height: 64,
                empty_cell_min_height: 120,
                zoom: 0.8,
                palette: Palette::SLATE,
            },
            Self::Large => ViewConfig {
                card_width: 200,
                card_height: 300,
                card_gap: 20,
                row_gap: 28,
                cell_padding: 20,
                tier_label_width: 220,
                header_height: 88,
                empty_cell_min_height: 200,
                zoom: 1.25,
                palette: Palette::SERAPH,
            },
        }
    }
}

/// Color tokens the view draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub header: &'static str,
    pub control: &'static str,
    pub card: &'static str,
    pub card_caption: &'static str,
    pub image_well: &'static str,
    pub accent: &'static str,
    pub accent_secondary: &'static str,
    pub tier_label: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
}

impl Palette {
    pub const SERAPH: Palette = Palette {
        background: "#0b0d17",
        header: "#0f111a",
        control: "#13151f",
        card: "#1a1b2e",
        card_caption: "#151520",
        image_well: "#0f0f13",
        accent: "#d64f92",
        accent_secondary: "#6366f1",
        tier_label: "#6888c3",
        text: "#e5e7eb",
        muted: "#6b7280",
    };

    pub const SLATE: Palette = Palette {
        background: "#0c0e17",
        header: "#13161f",
        control: "#1a1d2a",
        card: "#161921",
        card_caption: "#13161f",
        image_well: "#0f1118",
        accent: "#f5c542",
        accent_secondary: "#3b82f6",
        tier_label: "#9a9590",
        text: "#e2e0d8",
        muted: "#5a5860",
    };
}

/// Sizing and palette for one rendering of the grid. Pixel values are pre-zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub card_width: u32,
    pub card_height: u32,
    pub card_gap: u32,
    pub row_gap: u32,
    pub cell_padding: u32,
    pub tier_label_width: u32,
    pub header_height: u32,
    pub empty_cell_min_height: u32,
    pub zoom: f64,
    pub palette: Palette,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewPreset::default().config()
    }
}

impl ViewConfig {
    pub fn scaled(&self, px: u32) -> f64 {
        (px as f64 * self.zoom).round()
    }

    /// CSS length for a pre-zoom pixel value.
    pub fn px(&self, px: u32) -> String {
        format!("{}px", self.scaled(px))
    }

    /// Column width, widened so at least one card plus padding always fits.
    pub fn column_width(&self, column: &RoleColumn) -> f64 {
        let base = column.width as f64 * self.zoom;
        let minimum = self.scaled(self.card_width) + 2.0 * self.scaled(self.cell_padding);
        base.max(minimum).round()
    }
}

#[cfg(test)]
mod tests {
    use super::{VIEW_PRESETS, ViewConfig, ViewPreset};
    use crate::role::ROLE_COLUMNS;

    #[test]
    fn standard_matches_default() {
        assert_eq!(ViewConfig::default(), ViewPreset::Standard.config());
        let cfg = ViewConfig::default();
        assert_eq!((cfg.card_width, cfg.card_height), (160, 240));
        assert_eq!(cfg.px(240), "240px");
    }

    #[test]
    fn zoom_scales_lengths() {
        let compact = ViewPreset::Compact.config();
        assert_eq!(compact.scaled(100), 80.0);
        assert_eq!(compact.px(160), "128px");
    }

    #[test]
    fn columns_always_fit_a_card() {
        for preset in VIEW_PRESETS {
            let cfg = preset.config();
            for col in &ROLE_COLUMNS {
                assert!(
                    cfg.column_width(col) >= cfg.scaled(cfg.card_width),
                    "{:?} {}",
                    preset,
                    col.key
                );
            }
        }
    }

    #[test]
    fn labels_parse_back() {
        for preset in VIEW_PRESETS {
            assert_eq!(ViewPreset::from_label(preset.label()), Some(preset));
        }
        assert_eq!(ViewPreset::from_label("Huge"), None);
    }
}
