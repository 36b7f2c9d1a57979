//! # Geometry Generators
//!
//! Strategy seam between the parameter engine and a CAD host. A generator
//! turns primary + secondary parameters into a [`GeometryPlan`]: a
//! host-neutral list of petals, uprights and anchors with their dimensions
//! and plan positions. The host instantiates the actual solids.
//!
//! Generators are registered when the registry is built, never discovered at
//! run time.
//!
//! ## Layout
//!
//! ```text
//!            petal 1 (+y)
//!               ( )
//!  petal 2 ( )  [o]  ( ) petal 0 (+x)      [o] = central ring
//!               ( )
//!            petal 3 (-y)
//! ```
//!
//! Petal centers sit on the axes at `radius + spacing / 2` from the kiosk
//! center. Uprights and anchor plots are evenly spread on the anchor circle
//! of radius `radius + 500 mm`.
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::calculations::PrimaryParameters;
//! use kiosk_core::generator::{GenerationRequest, GeneratorRegistry};
//!
//! let registry = GeneratorRegistry::with_builtin();
//! let request = GenerationRequest::from_primary(PrimaryParameters::default()).unwrap();
//! let plan = registry.generate_with("kiosk_with_plots", &request).unwrap();
//! assert_eq!(plan.petals.len(), 4);
//! assert_eq!(plan.uprights.len(), 34);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::calculations::{derive_secondary_parameters, PrimaryParameters, SecondaryParameters};
use crate::equations::round_to;
use crate::equations::structure::ANCHOR_RING_OFFSET_MM;
use crate::errors::{KioskError, KioskResult};
use crate::materials::AnchorType;

/// Number of petals in the clover plan
pub const PETAL_COUNT: u8 = 4;

/// Most uprights a generator will lay out in one plan
pub const MAX_PLANNED_UPRIGHTS: u32 = 4096;

/// What a generator builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratorVariant {
    /// Structure only: petals, ring, uprights
    Standard,
    /// Structure plus foundations
    WithPlots,
}

/// Parameters handed to a generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub primary: PrimaryParameters,
    pub secondary: SecondaryParameters,
}

impl GenerationRequest {
    /// Derive the secondary parameters and bundle them with the primaries.
    pub fn from_primary(primary: PrimaryParameters) -> KioskResult<Self> {
        let secondary = derive_secondary_parameters(&primary)?;
        Ok(GenerationRequest { primary, secondary })
    }
}

/// Plan-view position relative to the kiosk center (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x_mm: f64,
    pub y_mm: f64,
}

impl PlanPoint {
    fn polar(distance_mm: f64, angle_rad: f64) -> Self {
        PlanPoint {
            x_mm: round_to(distance_mm * angle_rad.cos(), 1),
            y_mm: round_to(distance_mm * angle_rad.sin(), 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetalPlan {
    pub index: u8,
    pub center: PlanPoint,
    pub radius_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UprightPlan {
    pub index: u32,
    pub position: PlanPoint,
    pub height_mm: f64,
    pub tube_diameter_mm: f64,
}

/// Foundation element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorPlan {
    /// Isolated concrete plot under one upright
    Plot { upright: u32, position: PlanPoint, depth_mm: f64 },
    /// Continuous semicircular footing under one petal
    Semicircle { petal: u8, center: PlanPoint, radius_mm: f64, depth_mm: f64 },
}

/// Host-neutral description of the kiosk geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPlan {
    /// Name of the generator that produced the plan
    pub generator: String,
    pub variant: GeneratorVariant,
    pub petals: Vec<PetalPlan>,
    pub ring_diameter_mm: f64,
    pub dome_height_mm: f64,
    pub uprights: Vec<UprightPlan>,
    /// Empty for [`GeneratorVariant::Standard`]
    pub anchors: Vec<AnchorPlan>,
}

/// A geometry generation strategy.
pub trait KioskGenerator: Send + Sync {
    /// Unique registry name
    fn name(&self) -> &str;

    fn variant(&self) -> GeneratorVariant;

    /// Build the plan. Must not mutate anything outside the returned value.
    fn generate(&self, request: &GenerationRequest) -> KioskResult<GeometryPlan>;
}

/// Petals, ring and uprights.
#[derive(Debug, Default)]
pub struct StandardGenerator;

impl KioskGenerator for StandardGenerator {
    fn name(&self) -> &str {
        "kiosk_standard"
    }

    fn variant(&self) -> GeneratorVariant {
        GeneratorVariant::Standard
    }

    fn generate(&self, request: &GenerationRequest) -> KioskResult<GeometryPlan> {
        structure_plan(self.name(), self.variant(), request)
    }
}

/// Standard structure plus anchors following the derived anchoring mode.
#[derive(Debug, Default)]
pub struct PlotsGenerator;

impl KioskGenerator for PlotsGenerator {
    fn name(&self) -> &str {
        "kiosk_with_plots"
    }

    fn variant(&self) -> GeneratorVariant {
        GeneratorVariant::WithPlots
    }

    fn generate(&self, request: &GenerationRequest) -> KioskResult<GeometryPlan> {
        let mut plan = structure_plan(self.name(), self.variant(), request)?;
        let depth_mm = request.secondary.anchor_depth_mm;

        plan.anchors = match request.secondary.anchor_mode {
            AnchorType::IsolatedPlots => plan
                .uprights
                .iter()
                .map(|u| AnchorPlan::Plot {
                    upright: u.index,
                    position: u.position,
                    depth_mm,
                })
                .collect(),
            AnchorType::ContinuousSemicircle => plan
                .petals
                .iter()
                .map(|p| AnchorPlan::Semicircle {
                    petal: p.index,
                    center: p.center,
                    radius_mm: p.radius_mm,
                    depth_mm,
                })
                .collect(),
        };
        Ok(plan)
    }
}

fn structure_plan(name: &str, variant: GeneratorVariant, request: &GenerationRequest) -> KioskResult<GeometryPlan> {
    let primary = &request.primary;
    let secondary = &request.secondary;
    primary.validate()?;

    if secondary.upright_count == 0 {
        return Err(KioskError::generation_failed(name, "no uprights to place"));
    }
    if secondary.upright_count > MAX_PLANNED_UPRIGHTS {
        return Err(KioskError::generation_failed(
            name,
            format!(
                "{} uprights exceeds the plan limit of {}",
                secondary.upright_count, MAX_PLANNED_UPRIGHTS
            ),
        ));
    }

    let petal_offset_mm = primary.radius_mm + primary.spacing_mm / 2.0;
    let petals = (0..PETAL_COUNT)
        .map(|index| PetalPlan {
            index,
            center: PlanPoint::polar(petal_offset_mm, f64::from(index) * PI / 2.0),
            radius_mm: primary.radius_mm,
        })
        .collect();

    let anchor_circle_mm = primary.radius_mm + ANCHOR_RING_OFFSET_MM;
    let step = 2.0 * PI / f64::from(secondary.upright_count);
    let uprights = (0..secondary.upright_count)
        .map(|index| UprightPlan {
            index,
            position: PlanPoint::polar(anchor_circle_mm, f64::from(index) * step),
            height_mm: primary.upright_height_mm,
            tube_diameter_mm: secondary.tube_diameter_mm,
        })
        .collect();

    Ok(GeometryPlan {
        generator: name.to_string(),
        variant,
        petals,
        ring_diameter_mm: secondary.ring_diameter_mm,
        dome_height_mm: primary.dome_height_mm,
        uprights,
        anchors: Vec::new(),
    })
}

/// Ordered set of generators, populated at construction time.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn KioskGenerator>>,
}

impl GeneratorRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in generators
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.generators.push(Box::new(StandardGenerator));
        registry.generators.push(Box::new(PlotsGenerator));
        registry
    }

    /// Add a generator. Names must be unique.
    pub fn register(&mut self, generator: Box<dyn KioskGenerator>) -> KioskResult<()> {
        if self.get(generator.name()).is_some() {
            return Err(KioskError::invalid_parameter(
                "generator",
                generator.name(),
                "A generator with this name is already registered",
            ));
        }
        self.generators.push(generator);
        Ok(())
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn KioskGenerator> {
        self.generators.iter().find(|g| g.name() == name).map(|g| g.as_ref())
    }

    /// Names containing any of the keywords (case-insensitive), in registration order
    pub fn matching(&self, keywords: &[&str]) -> Vec<&str> {
        self.generators
            .iter()
            .map(|g| g.name())
            .filter(|name| {
                let lower = name.to_lowercase();
                keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
            })
            .collect()
    }

    /// Run one named generator.
    pub fn generate_with(&self, name: &str, request: &GenerationRequest) -> KioskResult<GeometryPlan> {
        let generator = self
            .get(name)
            .ok_or_else(|| KioskError::generation_failed(name, "not registered"))?;
        generator.generate(request)
    }

    /// Try each named generator in order and return the first plan produced.
    ///
    /// Every failure is kept; if none succeeds the error lists them all.
    pub fn generate_first_success(&self, names: &[&str], request: &GenerationRequest) -> KioskResult<GeometryPlan> {
        if names.is_empty() {
            return Err(KioskError::generation_failed("(none)", "no candidate generators"));
        }

        let mut failures = Vec::new();
        for name in names {
            match self.generate_with(name, request) {
                Ok(plan) => {
                    tracing::debug!(generator = *name, "geometry plan generated");
                    return Ok(plan);
                }
                Err(err) => {
                    tracing::debug!(generator = *name, error = %err, "generator failed");
                    failures.push(format!("{}: {}", name, err));
                }
            }
        }

        Err(KioskError::generation_failed(names.join(", "), failures.join("; ")))
    }
}
