//! Semantic classification of printed lines.

use serde::{Deserialize, Serialize};

/// Print role of a line segment.
///
/// The discriminants are stable so renderers can index color tables by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum LineType {
    /// No segment (placeholder for the first point of a path)
    #[default]
    None = 0,
    /// Outer wall (`WALL-OUTER`)
    OuterWall = 1,
    /// Inner wall (`WALL-INNER`)
    InnerWall = 2,
    /// Top/bottom skin (`SKIN`)
    Skin = 3,
    /// Support structure (`SUPPORT`)
    Support = 4,
    /// Skirt or brim (`SKIRT`)
    Skirt = 5,
    /// Sparse infill (`FILL`)
    Infill = 6,
    /// Support infill
    SupportInfill = 7,
    /// Non-printing repositioning move
    Travel = 8,
    /// Filament pull-back
    Retraction = 9,
}

impl LineType {
    /// Map a `;TYPE:` category name to its line type.
    ///
    /// Names are case sensitive. Returns `None` for unknown categories.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "WALL-INNER" => Some(Self::InnerWall),
            "WALL-OUTER" => Some(Self::OuterWall),
            "SKIN" => Some(Self::Skin),
            "SKIRT" => Some(Self::Skirt),
            "SUPPORT" => Some(Self::Support),
            "FILL" => Some(Self::Infill),
            _ => None,
        }
    }

    /// Numeric code of this type
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True for travel and retraction moves, which deposit no material
    pub fn is_move(self) -> bool {
        matches!(self, Self::Travel | Self::Retraction)
    }

    /// True for every type except [`LineType::None`]
    pub fn is_real(self) -> bool {
        self != Self::None
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::OuterWall => write!(f, "Outer wall"),
            Self::InnerWall => write!(f, "Inner wall"),
            Self::Skin => write!(f, "Skin"),
            Self::Support => write!(f, "Support"),
            Self::Skirt => write!(f, "Skirt"),
            Self::Infill => write!(f, "Infill"),
            Self::SupportInfill => write!(f, "Support infill"),
            Self::Travel => write!(f, "Travel"),
            Self::Retraction => write!(f, "Retraction"),
        }
    }
}
