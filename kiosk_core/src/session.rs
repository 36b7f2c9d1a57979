//! # Design Session
//!
//! A `DesignSession` bundles everything one design needs: primary parameters,
//! the preset they came from, the cost-optimization weight, retrofit
//! selections and the settings in force. Sessions serialize to `.kiosk`
//! files as human-readable JSON.
//!
//! Sessions are values. Every transition borrows the current session and
//! returns a new one, so a rejected change leaves the caller's session as it
//! was.
//!
//! ## Structure
//!
//! ```text
//! DesignSession
//! ├── meta: SessionMetadata (version, id, designer, site, timestamps)
//! ├── settings: DesignSettings (safety limits, cost model, retrofit limits)
//! ├── preset: Option<String>
//! ├── primary: PrimaryParameters
//! ├── cost_optimization: u8
//! └── retrofits: Vec<RetrofitSelection> (catalog order, one per id)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kiosk_core::retrofits::{RetrofitId, RetrofitSelection};
//! use kiosk_core::session::DesignSession;
//!
//! let session = DesignSession::new("Jane Designer", "Place du Marché")
//!     .with_preset("Temporaire (Bambou)")?
//!     .with_retrofit(RetrofitSelection::with_defaults(RetrofitId::DomeCladding))?;
//!
//! let evaluation = session.evaluate()?;
//! assert_eq!(evaluation.secondary.tube_diameter_mm, 72.0);
//! assert!(evaluation.report.contains("Dome cladding"));
//! # Ok::<(), kiosk_core::errors::KioskError>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{
    check_safety_limits, derive_secondary_parameters, estimate_costs_with, sizing_advice, CostEstimate, CostInput,
    PrimaryParameters, SafetyReport, SecondaryParameters, SizingAdvice,
};
use crate::errors::{KioskError, KioskResult};
use crate::presets::{apply_preset, PERMANENT_STEEL};
use crate::report::generate_report;
use crate::retrofits::{apply_cost_multiplier, validate_selection, RetrofitId, RetrofitSelection};
use crate::settings::DesignSettings;

/// Current schema version for .kiosk files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// One design, from preset to retrofits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSession {
    /// Session metadata (version, designer, site)
    pub meta: SessionMetadata,

    /// Constants in force for this design
    pub settings: DesignSettings,

    /// Preset the primary parameters were seeded from, if still accurate
    pub preset: Option<String>,

    /// Primary design parameters
    pub primary: PrimaryParameters,

    /// Cost-optimization weight, 0-100
    pub cost_optimization: u8,

    /// Selected retrofits
    pub retrofits: Vec<RetrofitSelection>,
}

impl DesignSession {
    /// Create a session with the dialog defaults and the reference settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kiosk_core::session::DesignSession;
    ///
    /// let session = DesignSession::new("John Doe", "Harbor front");
    /// assert_eq!(session.meta.designer, "John Doe");
    /// assert!(session.retrofits.is_empty());
    /// ```
    pub fn new(designer: impl Into<String>, site: impl Into<String>) -> Self {
        let now = Utc::now();
        DesignSession {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                designer: designer.into(),
                site: site.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            preset: None,
            primary: PrimaryParameters::default(),
            cost_optimization: PERMANENT_STEEL.cost_optimization,
            retrofits: Vec::new(),
        }
    }

    /// Seed material, wind speed, safety factor and cost weight from a preset.
    pub fn with_preset(&self, name: &str) -> KioskResult<Self> {
        let preset = apply_preset(name)?;
        let mut next = self.clone();
        next.primary = preset.seed(&self.primary);
        next.cost_optimization = preset.cost_optimization;
        next.preset = Some(preset.name.to_string());
        next.touch();
        Ok(next)
    }

    /// Replace the primary parameters.
    ///
    /// The preset name is dropped once the parameters no longer match it.
    pub fn with_primary(&self, primary: PrimaryParameters) -> KioskResult<Self> {
        primary.validate()?;
        let mut next = self.clone();
        next.preset = self
            .preset
            .as_deref()
            .and_then(|name| apply_preset(name).ok())
            .filter(|preset| preset.seed(&primary) == primary)
            .map(|preset| preset.name.to_string());
        next.primary = primary;
        next.touch();
        Ok(next)
    }

    /// Set the cost-optimization weight (0-100).
    pub fn with_cost_optimization(&self, weight: u8) -> KioskResult<Self> {
        validate_cost_optimization(weight)?;
        let mut next = self.clone();
        next.cost_optimization = weight;
        next.touch();
        Ok(next)
    }

    /// Replace the settings. Existing retrofit selections must still be valid.
    pub fn with_settings(&self, settings: DesignSettings) -> KioskResult<Self> {
        settings.validate()?;
        for selection in &self.retrofits {
            selection.validate(&settings.retrofit_limits)?;
        }
        let mut next = self.clone();
        next.settings = settings;
        next.touch();
        Ok(next)
    }

    /// Add a retrofit, replacing any earlier selection of the same module.
    ///
    /// The selection is validated and stored in canonical form; an invalid
    /// selection is rejected without touching the others.
    pub fn with_retrofit(&self, selection: RetrofitSelection) -> KioskResult<Self> {
        let canonical = validate_selection(
            selection.id,
            selection.material.as_deref(),
            selection.count,
            &self.settings.retrofit_limits,
        )?;
        let mut next = self.clone();
        next.retrofits.retain(|s| s.id != canonical.id);
        next.retrofits.push(canonical);
        next.retrofits.sort_by_key(|s| s.id);
        next.touch();
        Ok(next)
    }

    /// Remove a retrofit (no-op if it was not selected).
    pub fn without_retrofit(&self, id: RetrofitId) -> Self {
        let mut next = self.clone();
        let before = next.retrofits.len();
        next.retrofits.retain(|s| s.id != id);
        if next.retrofits.len() != before {
            next.touch();
        }
        next
    }

    /// Check a session built outside the `with_*` transitions (e.g. read from
    /// a file): settings, primary parameters, cost weight, and every retrofit
    /// selection against the session's own limits, one selection per id.
    pub fn validate(&self) -> KioskResult<()> {
        self.settings.validate()?;
        self.primary.validate()?;
        validate_cost_optimization(self.cost_optimization)?;
        for (i, selection) in self.retrofits.iter().enumerate() {
            selection.validate(&self.settings.retrofit_limits)?;
            if self.retrofits[..i].iter().any(|s| s.id == selection.id) {
                return Err(KioskError::invalid_selection(selection.id.code(), "selected more than once"));
            }
        }
        Ok(())
    }

    /// Ids of the selected retrofits, in catalog order
    pub fn selected_retrofit_ids(&self) -> Vec<RetrofitId> {
        self.retrofits.iter().map(|s| s.id).collect()
    }

    /// Run every derivation for the current state.
    ///
    /// Safety-limit violations are returned as warnings inside the evaluation
    /// and logged; they do not fail the call.
    pub fn evaluate(&self) -> KioskResult<DesignEvaluation> {
        let secondary = derive_secondary_parameters(&self.primary)?;

        let costs = estimate_costs_with(
            &CostInput {
                radius_mm: self.primary.radius_mm,
                upright_height_mm: self.primary.upright_height_mm,
                material: self.primary.material,
                anchor_type: secondary.anchor_mode,
                cost_optimization: self.cost_optimization,
            },
            &self.settings.cost_model,
        )?;

        let adjusted_cost = apply_cost_multiplier(costs.estimated_cost, &self.selected_retrofit_ids()).round();

        let safety = check_safety_limits(&self.primary, &secondary, &self.settings.safety_limits);
        for warning in &safety.warnings {
            tracing::warn!(session = %self.meta.id, "{}", warning);
        }

        let advice = sizing_advice(&self.primary)?;
        let report = generate_report(&secondary, &costs, &self.retrofits);

        Ok(DesignEvaluation {
            secondary,
            costs,
            adjusted_cost,
            safety,
            advice,
            report,
        })
    }

    /// Update the modified timestamp.
    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

fn validate_cost_optimization(weight: u8) -> KioskResult<()> {
    if weight > 100 {
        return Err(KioskError::invalid_parameter(
            "cost_optimization",
            weight.to_string(),
            "Cost optimization must be between 0 and 100",
        ));
    }
    Ok(())
}

impl Default for DesignSession {
    fn default() -> Self {
        DesignSession::new("", "")
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Unique session id
    pub id: Uuid,

    /// Person responsible for the design
    pub designer: String,

    /// Site or event name
    pub site: String,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last modified
    pub modified: DateTime<Utc>,
}

/// Everything derived from one session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignEvaluation {
    pub secondary: SecondaryParameters,
    pub costs: CostEstimate,
    /// Estimated cost after retrofit multipliers, rounded to a whole unit
    pub adjusted_cost: f64,
    pub safety: SafetyReport,
    pub advice: SizingAdvice,
    pub report: String,
}
