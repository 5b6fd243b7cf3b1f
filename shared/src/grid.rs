use std::collections::BTreeMap;

use crate::element::Element;
use crate::role::{ROLE_COLUMNS, column_index, normalize_role};
use crate::roster::{Entry, Roster};
use crate::tier::{TIER_ORDER, tier_index};

/// Tier × role view over a roster. Every (tier, column) cell exists, empty or not.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: Vec<GridRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub tier: &'static str,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub role: &'static str,
    /// Entries in roster order.
    pub entries: Vec<Entry>,
}

/// Entries of one cell sharing a `row_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRow {
    pub row_id: i64,
    pub entries: Vec<Entry>,
}

impl Grid {
    /// Place every entry in its (tier, normalized role) cell. With an element filter,
    /// entries of any other element (including `Unknown`) are left out.
    /// Entries with a tier or role outside the fixed lists are never placed.
    pub fn build(roster: &Roster, element_filter: Option<Element>) -> Self {
        let mut rows: Vec<GridRow> = TIER_ORDER
            .iter()
            .map(|&tier| GridRow {
                tier,
                cells: ROLE_COLUMNS
                    .iter()
                    .map(|col| GridCell {
                        role: col.key,
                        entries: Vec::new(),
                    })
                    .collect(),
            })
            .collect();

        for entry in roster.entries() {
            if let Some(filter) = element_filter
                && entry.element() != filter
            {
                continue;
            }
            let (Some(row), Some(col)) = (tier_index(&entry.tier), column_index(&entry.role))
            else {
                continue;
            };
            rows[row].cells[col].entries.push(entry.clone());
        }

        Self { rows }
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Cell lookup; `role` may be either defender label.
    pub fn cell(&self, tier: &str, role: &str) -> Option<&GridCell> {
        let row = tier_index(tier)?;
        let col = column_index(normalize_role(role))?;
        self.rows.get(row)?.cells.get(col)
    }

    /// Number of placed entries across all cells.
    pub fn len(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.entries.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GridCell {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group by `row_id`, ascending; entries keep roster order inside a sub-row.
    pub fn sub_rows(&self) -> Vec<SubRow> {
        let mut grouped: BTreeMap<i64, Vec<Entry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped
                .entry(entry.row_id)
                .or_default()
                .push(entry.clone());
        }
        grouped
            .into_iter()
            .map(|(row_id, entries)| SubRow { row_id, entries })
            .collect()
    }
}

impl Roster {
    pub fn build_grid(&self, element_filter: Option<Element>) -> Grid {
        Grid::build(self, element_filter)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Grid;
    use crate::element::{ELEMENTS, Element};
    use crate::role::ROLE_COLUMNS;
    use crate::roster::Roster;
    use crate::roster::tests::entry;
    use crate::tier::TIER_ORDER;

    fn alice_pair() -> Roster {
        Roster::new(vec![entry("Alice", "Default", 1), entry("Alice", "Default", 2)])
            .expect("roster")
    }

    fn mixed_roster() -> Roster {
        let mut entries = Vec::new();
        let colors = [
            "#b7b7b7", "#a4c2f4", "#ffffff", "#ea9999", "#ffd966", "#ffe599", "#8e7cc3",
            "#b6d7a8", "#0f0f0f",
        ];
        let roles = [
            "Buffer (General)",
            "Defender",
            "Defender (General)",
            "Healer",
            "DPS (AoE)",
            "Utility Support",
        ];
        let mut rank = 0;
        for (t, tier) in TIER_ORDER.iter().enumerate() {
            for (r, role) in roles.iter().enumerate() {
                rank += 1;
                let mut e = entry(&format!("Char{t}"), &format!("Style{r}"), rank);
                e.tier = tier.to_string();
                e.role = role.to_string();
                e.color = colors[(t + r) % colors.len()].to_string();
                e.row_id = (r % 2) as i64;
                entries.push(e);
            }
        }
        Roster::new(entries).expect("roster")
    }

    #[test]
    fn every_cell_exists_even_when_empty() {
        let grid = Roster::default().build_grid(None);
        assert_eq!(grid.rows().len(), TIER_ORDER.len());
        for row in grid.rows() {
            assert_eq!(row.cells.len(), ROLE_COLUMNS.len());
            assert!(row.cells.iter().all(|c| c.is_empty()));
        }
        assert!(grid.is_empty());
    }

    #[test]
    fn unfiltered_grid_places_each_entry_exactly_once() {
        let roster = mixed_roster();
        let grid = roster.build_grid(None);
        assert_eq!(grid.len(), roster.len());

        let mut seen = HashSet::new();
        for row in grid.rows() {
            for cell in &row.cells {
                for e in &cell.entries {
                    assert!(seen.insert(e.rank_index), "rank {} placed twice", e.rank_index);
                    assert_eq!(e.tier, row.tier);
                }
            }
        }
        assert_eq!(seen.len(), roster.len());
    }

    #[test]
    fn both_defender_labels_land_in_one_column() {
        let roster = mixed_roster();
        let grid = roster.build_grid(None);
        let cell = grid.cell("10 (Best)", "Defender").expect("defender cell");
        assert_eq!(cell.role, "Defender");
        let roles: HashSet<&str> = cell.entries.iter().map(|e| e.role.as_str()).collect();
        assert_eq!(
            roles,
            HashSet::from(["Defender", "Defender (General)"])
        );
        assert_eq!(grid.cell("10 (Best)", "Defender (General)"), Some(cell));
    }

    #[test]
    fn element_filter_keeps_only_matching_entries() {
        let roster = mixed_roster();
        let mut total = 0;
        for element in ELEMENTS {
            let grid = roster.build_grid(Some(element));
            for row in grid.rows() {
                for cell in &row.cells {
                    for e in &cell.entries {
                        assert_eq!(e.element(), element);
                        assert_ne!(e.color, "#0f0f0f");
                    }
                }
            }
            total += grid.len();
        }
        let unknown = roster
            .entries()
            .iter()
            .filter(|e| e.element() == Element::Unknown)
            .count();
        assert!(unknown > 0);
        assert_eq!(total + unknown, roster.len());
    }

    #[test]
    fn fire_filter_keeps_alice_and_ice_filter_empties_the_cell() {
        let roster = alice_pair();

        let fire = roster.build_grid(Some(Element::Fire));
        let cell = fire.cell("10 (Best)", "Healer").expect("cell");
        let ranks: Vec<i64> = cell.entries.iter().map(|e| e.rank_index).collect();
        assert_eq!(ranks, vec![1, 2]);

        let ice = roster.build_grid(Some(Element::Ice));
        let cell = ice.cell("10 (Best)", "Healer").expect("cell exists even when empty");
        assert!(cell.is_empty());
    }

    #[test]
    fn unplaceable_entries_are_skipped() {
        let mut stray = entry("Zed", "Default", 3);
        stray.tier = "11".into();
        let mut tank = entry("Tank", "Default", 4);
        tank.role = "Tank".into();
        let roster = Roster::new(vec![entry("Alice", "Default", 1), stray, tank]).expect("roster");
        assert_eq!(roster.build_grid(None).len(), 1);
    }

    #[test]
    fn sub_rows_group_by_row_id_ascending() {
        let mut a = entry("A", "Default", 1);
        a.row_id = 3;
        let mut b = entry("B", "Default", 2);
        b.row_id = 1;
        let mut c = entry("C", "Default", 3);
        c.row_id = 3;
        let roster = Roster::new(vec![a, b, c]).expect("roster");
        let grid = Grid::build(&roster, None);
        let sub_rows = grid.cell("10 (Best)", "Healer").expect("cell").sub_rows();

        let shape: Vec<(i64, Vec<&str>)> = sub_rows
            .iter()
            .map(|r| (r.row_id, r.entries.iter().map(|e| e.name.as_str()).collect()))
            .collect();
        assert_eq!(shape, vec![(1, vec!["B"]), (3, vec!["A", "C"])]);
    }
}
