//! Brand palette and color mode for the catalog UI.

/// A single color token with a stable name and hex value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorToken {
    /// Semantic identifier for the shade (e.g., "500").
    pub name: &'static str,
    /// Hex RGB value for the shade.
    pub hex: &'static str,
}

/// Collection of related tokens (e.g., brand shades).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Palette identifier, used as the CSS variable prefix.
    pub id: &'static str,
    /// Ordered list of shades from lightest to darkest.
    pub shades: &'static [ColorToken],
}

/// Brand palette used for surfaces and text.
pub const BRAND: Palette = Palette {
    id: "brand",
    shades: &[
        ColorToken {
            name: "50",
            hex: "#EEF0F8",
        },
        ColorToken {
            name: "100",
            hex: "#D3D8EC",
        },
        ColorToken {
            name: "300",
            hex: "#8C97C4",
        },
        ColorToken {
            name: "500",
            hex: "#46538F",
        },
        ColorToken {
            name: "700",
            hex: "#262F5A",
        },
        ColorToken {
            name: "800",
            hex: "#1A2144",
        },
        ColorToken {
            name: "900",
            hex: "#10152E",
        },
    ],
};

/// Accent palette for primary actions.
pub const ACCENT: Palette = Palette {
    id: "accent",
    shades: &[
        ColorToken {
            name: "300",
            hex: "#FFB38A",
        },
        ColorToken {
            name: "500",
            hex: "#F46A25",
        },
        ColorToken {
            name: "700",
            hex: "#B8450F",
        },
    ],
};

/// Light/dark color mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme mode.
    Light,
    /// Dark theme mode.
    #[default]
    Dark,
}

impl ThemeMode {
    /// String identifier used in CSS datasets and preferences.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored preference value.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The opposite mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// File-name fragment of the themed default avatar.
    #[must_use]
    pub const fn avatar_suffix(self) -> &'static str {
        match self {
            Self::Light => "_Light",
            Self::Dark => "_Dark",
        }
    }
}

/// Inline CSS custom properties (`--brand-500: #...;`) for the given palettes.
#[must_use]
pub fn css_variables(palettes: &[Palette]) -> String {
    palettes
        .iter()
        .flat_map(|palette| {
            palette
                .shades
                .iter()
                .map(move |shade| format!("--{}-{}: {};", palette.id, shade.name, shade.hex))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
