//! # Retrofit Catalog
//!
//! Optional, non-structural add-on modules applied after the base structure is
//! defined: panels, cladding, doors, floor and the open-stand layout. Each has
//! either a set of allowed materials or an allowed count range, and a cost
//! multiplier applied to the base estimate.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::retrofits::{apply_cost_multiplier, validate_selection, RetrofitId};
//! use kiosk_core::settings::RetrofitLimits;
//!
//! let limits = RetrofitLimits::default();
//! let panels = validate_selection(RetrofitId::SlidingPanels, Some("metal"), None, &limits).unwrap();
//! assert_eq!(panels.material.as_deref(), Some("Metal"));
//!
//! // Door count outside 1-4 is rejected
//! assert!(validate_selection(RetrofitId::SlidingDoors, None, Some(6), &limits).is_err());
//!
//! let cost = apply_cost_multiplier(1000.0, &[RetrofitId::SlidingPanels, RetrofitId::DomeCladding]);
//! assert!((cost - 1380.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{KioskError, KioskResult};
use crate::settings::{CountRange, RetrofitLimits};

/// Catalog identifier of a retrofit module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrofitId {
    SlidingPanels,
    DomeCladding,
    SlidingDoors,
    RemovableFloor,
    OpenStand,
}

impl RetrofitId {
    /// All retrofit ids in catalog order
    pub const ALL: [RetrofitId; 5] = [
        RetrofitId::SlidingPanels,
        RetrofitId::DomeCladding,
        RetrofitId::SlidingDoors,
        RetrofitId::RemovableFloor,
        RetrofitId::OpenStand,
    ];

    /// Stable identifier (matches the JSON form)
    pub fn code(&self) -> &'static str {
        match self {
            RetrofitId::SlidingPanels => "sliding_panels",
            RetrofitId::DomeCladding => "dome_cladding",
            RetrofitId::SlidingDoors => "sliding_doors",
            RetrofitId::RemovableFloor => "removable_floor",
            RetrofitId::OpenStand => "open_stand",
        }
    }

    /// Parse from the stable identifier
    pub fn from_code(code: &str) -> KioskResult<Self> {
        RetrofitId::ALL
            .into_iter()
            .find(|id| id.code() == code.trim())
            .ok_or_else(|| KioskError::invalid_selection(code, "Unknown retrofit"))
    }

    /// Catalog entry for this id
    pub fn definition(&self) -> &'static RetrofitDefinition {
        // Catalog is indexed in `ALL` order
        &CATALOG[*self as usize]
    }
}

impl std::fmt::Display for RetrofitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What a counted retrofit counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountKind {
    Doors,
    OpenPetals,
}

impl CountKind {
    /// Range for this kind in the given limits
    pub fn range(&self, limits: &RetrofitLimits) -> CountRange {
        match self {
            CountKind::Doors => limits.door_count,
            CountKind::OpenPetals => limits.open_petal_count,
        }
    }

    fn noun(&self, count: u32) -> &'static str {
        match (self, count) {
            (CountKind::Doors, 1) => "door",
            (CountKind::Doors, _) => "doors",
            (CountKind::OpenPetals, 1) => "petal",
            (CountKind::OpenPetals, _) => "petals",
        }
    }
}

/// Choice a retrofit offers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "allowed", rename_all = "snake_case")]
pub enum RetrofitOptions {
    /// One material out of a fixed set; the first entry is the default
    Materials(&'static [&'static str]),
    /// A count within the configured range, with a free-text material
    Count(CountKind),
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrofitDefinition {
    pub id: RetrofitId,
    pub label: &'static str,
    pub description: &'static str,
    pub options: RetrofitOptions,
    /// Applied multiplicatively to the base cost
    pub cost_multiplier: f64,
}

impl RetrofitDefinition {
    /// Allowed materials, if this retrofit offers a material choice
    pub fn allowed_materials(&self) -> Option<&'static [&'static str]> {
        match self.options {
            RetrofitOptions::Materials(materials) => Some(materials),
            RetrofitOptions::Count(_) => None,
        }
    }

    /// Allowed count range, if this retrofit is counted
    pub fn allowed_count(&self, limits: &RetrofitLimits) -> Option<CountRange> {
        match self.options {
            RetrofitOptions::Materials(_) => None,
            RetrofitOptions::Count(kind) => Some(kind.range(limits)),
        }
    }
}

/// Default count when a counted retrofit is selected without one
const DEFAULT_DOOR_COUNT: u32 = 2;
const DEFAULT_OPEN_PETALS: u32 = 1;

/// Default door material
const DEFAULT_DOOR_MATERIAL: &str = "Wood";

static CATALOG: [RetrofitDefinition; 5] = [
    RetrofitDefinition {
        id: RetrofitId::SlidingPanels,
        label: "Circular sliding panels",
        description: "Panels between uprights (composite/metal)",
        options: RetrofitOptions::Materials(&["Composite", "Metal", "Wood"]),
        cost_multiplier: 1.2,
    },
    RetrofitDefinition {
        id: RetrofitId::DomeCladding,
        label: "Dome cladding",
        description: "Waterproof canvas (linen-hemp, polyester)",
        options: RetrofitOptions::Materials(&["Linen-hemp", "Polyester canvas", "Polycarbonate"]),
        cost_multiplier: 1.15,
    },
    RetrofitDefinition {
        id: RetrofitId::SlidingDoors,
        label: "Sliding doors",
        description: "Doors between petals (1-4)",
        options: RetrofitOptions::Count(CountKind::Doors),
        cost_multiplier: 1.25,
    },
    RetrofitDefinition {
        id: RetrofitId::RemovableFloor,
        label: "Removable floor",
        description: "Removable wood/composite floor",
        options: RetrofitOptions::Materials(&["Wood", "Composite"]),
        cost_multiplier: 1.18,
    },
    RetrofitDefinition {
        id: RetrofitId::OpenStand,
        label: "Open stand layout",
        description: "Opens petals for retail or exhibition",
        options: RetrofitOptions::Count(CountKind::OpenPetals),
        // Open petals save closing structure
        cost_multiplier: 0.95,
    },
];

/// The fixed catalog, in insertion order. Same sequence on every call.
pub fn list_retrofits() -> &'static [RetrofitDefinition] {
    &CATALOG
}

/// Catalog entry for an id
pub fn find_retrofit(id: RetrofitId) -> &'static RetrofitDefinition {
    id.definition()
}

/// A validated choice of one retrofit.
///
/// ## JSON Example
///
/// ```json
/// { "id": "sliding_doors", "material": "Wood", "count": 2 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrofitSelection {
    pub id: RetrofitId,

    /// Chosen material, canonical spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Chosen count for counted retrofits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl RetrofitSelection {
    /// Selection with the catalog defaults (first material, or default count)
    pub fn with_defaults(id: RetrofitId) -> Self {
        let definition = id.definition();
        match definition.options {
            RetrofitOptions::Materials(materials) => RetrofitSelection {
                id,
                material: materials.first().map(|m| m.to_string()),
                count: None,
            },
            RetrofitOptions::Count(CountKind::Doors) => RetrofitSelection {
                id,
                material: Some(DEFAULT_DOOR_MATERIAL.to_string()),
                count: Some(DEFAULT_DOOR_COUNT),
            },
            RetrofitOptions::Count(CountKind::OpenPetals) => RetrofitSelection {
                id,
                material: None,
                count: Some(DEFAULT_OPEN_PETALS),
            },
        }
    }

    /// Re-check this selection against the catalog and limits.
    pub fn validate(&self, limits: &RetrofitLimits) -> KioskResult<()> {
        validate_selection(self.id, self.material.as_deref(), self.count, limits).map(|_| ())
    }

    /// Human-readable line naming the selection, e.g. "Sliding doors x2 (Wood)"
    pub fn label(&self) -> String {
        let definition = self.id.definition();
        match definition.options {
            RetrofitOptions::Materials(_) => match &self.material {
                Some(material) => format!("{} ({})", definition.label, material),
                None => definition.label.to_string(),
            },
            RetrofitOptions::Count(kind) => {
                let count = self.count.unwrap_or(match kind {
                    CountKind::Doors => DEFAULT_DOOR_COUNT,
                    CountKind::OpenPetals => DEFAULT_OPEN_PETALS,
                });
                match &self.material {
                    Some(material) => format!("{} x{} ({})", definition.label, count, material),
                    None => format!("{} ({} {})", definition.label, count, kind.noun(count)),
                }
            }
        }
    }
}

/// Record of a count that was clamped into range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionAdjustment {
    pub retrofit: RetrofitId,
    pub requested: u32,
    pub applied: u32,
}

/// Validate a retrofit choice.
///
/// Materials are matched case-insensitively and returned in catalog spelling.
/// Missing material or count falls back to the catalog default.
///
/// # Returns
///
/// * `Ok(RetrofitSelection)` - Canonical selection
/// * `Err(KioskError::InvalidSelection)` - Material not allowed, count out of
///   range, or an option the retrofit does not take
pub fn validate_selection(
    id: RetrofitId,
    material: Option<&str>,
    count: Option<u32>,
    limits: &RetrofitLimits,
) -> KioskResult<RetrofitSelection> {
    let defaults = RetrofitSelection::with_defaults(id);
    let definition = id.definition();

    match definition.options {
        RetrofitOptions::Materials(allowed) => {
            if let Some(count) = count {
                return Err(KioskError::invalid_selection(
                    id.code(),
                    format!("takes a material, not a count (got {})", count),
                ));
            }
            let material = match material {
                None => defaults.material,
                Some(requested) => Some(canonical_material(id, allowed, requested)?.to_string()),
            };
            Ok(RetrofitSelection { id, material, count: None })
        }
        RetrofitOptions::Count(kind) => {
            let range = kind.range(limits);
            let count = count.or(defaults.count);
            if let Some(count) = count {
                if !range.contains(count) {
                    return Err(KioskError::invalid_selection(
                        id.code(),
                        format!("count {} outside allowed range {}", count, range),
                    ));
                }
            }
            let material = match (kind, material) {
                (CountKind::OpenPetals, Some(m)) => {
                    return Err(KioskError::invalid_selection(
                        id.code(),
                        format!("takes a count, not a material (got '{}')", m),
                    ));
                }
                (_, Some(m)) if m.trim().is_empty() => {
                    return Err(KioskError::invalid_selection(id.code(), "material is empty"));
                }
                (_, Some(m)) => Some(m.trim().to_string()),
                (_, None) => defaults.material,
            };
            Ok(RetrofitSelection { id, material, count })
        }
    }
}

/// Like [`validate_selection`], but clamps an out-of-range count into the
/// allowed range instead of rejecting it. The adjustment is logged and
/// returned. Materials are still validated strictly.
pub fn normalize_selection(
    id: RetrofitId,
    material: Option<&str>,
    count: Option<u32>,
    limits: &RetrofitLimits,
) -> KioskResult<(RetrofitSelection, Option<SelectionAdjustment>)> {
    let mut adjustment = None;
    let count = match (id.definition().allowed_count(limits), count) {
        (Some(range), Some(requested)) if !range.contains(requested) => {
            let applied = range.clamp(requested);
            tracing::warn!(
                retrofit = id.code(),
                requested,
                applied,
                "retrofit count outside {}, clamped",
                range
            );
            adjustment = Some(SelectionAdjustment {
                retrofit: id,
                requested,
                applied,
            });
            Some(applied)
        }
        (_, count) => count,
    };
    let selection = validate_selection(id, material, count, limits)?;
    Ok((selection, adjustment))
}

/// Multiply a base cost by the multiplier of each selected retrofit.
///
/// No selection leaves the base cost unchanged. Ids are not deduplicated.
pub fn apply_cost_multiplier(base_cost: f64, selected: &[RetrofitId]) -> f64 {
    selected
        .iter()
        .fold(base_cost, |cost, id| cost * id.definition().cost_multiplier)
}

fn canonical_material(id: RetrofitId, allowed: &'static [&'static str], requested: &str) -> KioskResult<&'static str> {
    let wanted = requested.trim().to_lowercase();
    allowed
        .iter()
        .copied()
        .find(|m| m.to_lowercase() == wanted)
        .ok_or_else(|| {
            KioskError::invalid_selection(
                id.code(),
                format!("material '{}' not in [{}]", requested, allowed.join(", ")),
            )
        })
}
