/// A grid column. `key` is the role label entries carry after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleColumn {
    pub key: &'static str,
    pub title: &'static str,
    /// Base column width in px, before the view zoom is applied.
    pub width: u32,
}

pub const ROLE_COLUMNS: [RoleColumn; 9] = [
    RoleColumn {
        key: "Buffer (General)",
        title: "Buffer (Gen)",
        width: 320,
    },
    RoleColumn {
        key: "Buffer (Elemental)",
        title: "Buffer (Elem)",
        width: 500,
    },
    RoleColumn {
        key: "Defender",
        title: "Defender",
        width: 220,
    },
    RoleColumn {
        key: "Healer",
        title: "Healer",
        width: 320,
    },
    RoleColumn {
        key: "Debuffer (General)",
        title: "Debuffer (Gen)",
        width: 320,
    },
    RoleColumn {
        key: "Debuffer (Elemental)",
        title: "Debuffer (Elem)",
        width: 500,
    },
    RoleColumn {
        key: "Utility Support",
        title: "Utility",
        width: 380,
    },
    RoleColumn {
        key: "DPS (Single Target)",
        title: "DPS (Single)",
        width: 500,
    },
    RoleColumn {
        key: "DPS (AoE)",
        title: "DPS (AoE)",
        width: 500,
    },
];

/// Merge the general defender label into the plain defender column.
pub fn normalize_role(role: &str) -> &str {
    if role == "Defender (General)" {
        "Defender"
    } else {
        role
    }
}

pub fn column_index(role: &str) -> Option<usize> {
    let role = normalize_role(role);
    ROLE_COLUMNS.iter().position(|col| col.key == role)
}

/// Header accent for a role. First matching substring wins; matching is case-sensitive.
pub fn role_accent(role: &str) -> &'static str {
    const RULES: &[(&str, &str)] = &[
        ("Buffer", "#4ade80"),
        ("Defender", "#3b82f6"),
        ("Healer", "#2dd4bf"),
        ("Debuffer", "#a855f7"),
        ("AoE", "#facc15"),
        ("DPS", "#f472b6"),
    ];
    RULES
        .iter()
        .find(|(needle, _)| role.contains(needle))
        .map(|&(_, color)| color)
        .unwrap_or("#9ca3af")
}
