//! # Kiosk CLI
//!
//! Line-prompt front end for the kiosk engine: pick a preset, adjust the
//! primary dimensions, optionally add retrofits, then print the report and
//! the JSON form of the evaluation.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).

use std::io::{self, BufRead, Write};

use kiosk_core::calculations::PrimaryParameters;
use kiosk_core::generator::{GenerationRequest, GeneratorRegistry};
use kiosk_core::materials::StructuralMaterial;
use kiosk_core::presets::list_presets;
use kiosk_core::retrofits::{list_retrofits, normalize_selection, RetrofitId};
use kiosk_core::session::DesignSession;
use kiosk_core::KioskResult;
use tracing_subscriber::EnvFilter;

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    read_line(&format!("{} [{}]: ", prompt, default))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_yes(prompt: &str) -> bool {
    matches!(
        read_line(&format!("{} [y/N]: ", prompt)).as_deref(),
        Some("y") | Some("Y") | Some("yes")
    )
}

/// Parse a material answer; blank or unrecognized input keeps `current`.
fn parse_material(input: Option<&str>, current: StructuralMaterial) -> StructuralMaterial {
    match input.map(StructuralMaterial::from_str_flexible) {
        Some(Ok(material)) => material,
        Some(Err(e)) => {
            println!("    {} - keeping {}", e, current);
            current
        }
        None => current,
    }
}

/// Add one retrofit to the session. A rejected selection is reported and
/// skipped; the session and its other selections are kept as they were.
fn add_retrofit(session: DesignSession, id: RetrofitId, material: Option<&str>, count: Option<u32>) -> DesignSession {
    let added = normalize_selection(id, material, count, &session.settings.retrofit_limits).and_then(
        |(selection, adjustment)| {
            if let Some(adjustment) = adjustment {
                println!(
                    "    count {} outside the allowed range, using {}",
                    adjustment.requested, adjustment.applied
                );
            }
            session.with_retrofit(selection)
        },
    );
    match added {
        Ok(next) => next,
        Err(e) => {
            println!("    skipped: {}", e);
            session
        }
    }
}

fn build_session() -> KioskResult<DesignSession> {
    let presets = list_presets();
    println!("Presets:");
    for (i, preset) in presets.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, preset.name, preset.description);
    }
    let choice = prompt_u32("Preset", 1) as usize;
    let session = DesignSession::new("CLI", "Unnamed site");
    let session = match presets.get(choice.saturating_sub(1)).or_else(|| presets.first()) {
        Some(preset) => session.with_preset(preset.name)?,
        None => session,
    };
    let seeded = &session.primary;

    println!();
    let options: Vec<&str> = StructuralMaterial::ALL.iter().map(|m| m.code()).collect();
    let material = parse_material(
        read_line(&format!("Material ({}) [{}]: ", options.join(", "), seeded.material.code())).as_deref(),
        seeded.material,
    );
    let primary = PrimaryParameters {
        radius_mm: prompt_f64("Petal radius (mm)", seeded.radius_mm),
        upright_height_mm: prompt_f64("Upright height (mm)", seeded.upright_height_mm),
        spacing_mm: prompt_f64("Petal spacing (mm)", seeded.spacing_mm),
        dome_height_mm: prompt_f64("Dome height (mm)", seeded.dome_height_mm),
        wind_speed_kmh: prompt_f64("Wind speed (km/h)", seeded.wind_speed_kmh),
        safety_factor: prompt_f64("Safety factor", seeded.safety_factor),
        material,
    };
    let weight = prompt_u32("Cost optimization (0-100)", u32::from(session.cost_optimization));

    let mut session = session
        .with_primary(primary)?
        .with_cost_optimization(u8::try_from(weight).unwrap_or(u8::MAX))?;

    println!();
    for definition in list_retrofits() {
        if !prompt_yes(&format!("Add '{}'?", definition.label)) {
            continue;
        }
        let material = match definition.allowed_materials() {
            Some(options) => {
                println!("    options: {}", options.join(", "));
                read_line("    material: ")
            }
            None => None,
        };
        let count = definition
            .allowed_count(&session.settings.retrofit_limits)
            .map(|range| prompt_u32(&format!("    count ({})", range), range.min));

        session = add_retrofit(session, definition.id, material.as_deref(), count);
    }

    Ok(session)
}

fn run() -> KioskResult<()> {
    let session = build_session()?;
    let evaluation = session.evaluate()?;

    println!();
    println!("{}", evaluation.report);

    for warning in &evaluation.safety.warnings {
        println!("[WARN] {}", warning);
    }
    for suggestion in &evaluation.advice.suggestions {
        println!("[TIP]  {}", suggestion);
    }

    let registry = GeneratorRegistry::with_builtin();
    let request = GenerationRequest::from_primary(session.primary.clone())?;
    // Prefer generators that also place the foundations
    let mut candidates = registry.matching(&["plots"]);
    candidates.extend(registry.names().into_iter().filter(|n| !n.contains("plots")));
    let plan = registry.generate_first_success(&candidates, &request)?;
    println!();
    println!(
        "Geometry ({}): {} petals, {} uprights, {} anchors",
        plan.generator,
        plan.petals.len(),
        plan.uprights.len(),
        plan.anchors.len()
    );

    println!();
    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(&evaluation) {
        println!("{}", json);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    println!("Kiosk CLI - Parametric Kiosk Designer");
    println!("=====================================");
    println!();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_retrofit_keeps_other_selections() {
        let session = add_retrofit(DesignSession::default(), RetrofitId::DomeCladding, None, None);
        let session = add_retrofit(session, RetrofitId::SlidingPanels, Some("Glass"), None);
        assert_eq!(session.selected_retrofit_ids(), vec![RetrofitId::DomeCladding]);

        let session = add_retrofit(session, RetrofitId::RemovableFloor, Some("wood"), None);
        assert_eq!(
            session.selected_retrofit_ids(),
            vec![RetrofitId::DomeCladding, RetrofitId::RemovableFloor]
        );
        assert!(session.evaluate().is_ok());
    }

    #[test]
    fn test_door_count_clamped() {
        let session = add_retrofit(DesignSession::default(), RetrofitId::SlidingDoors, None, Some(9));
        assert_eq!(session.retrofits[0].count, Some(4));
    }

    #[test]
    fn test_material_answer() {
        let steel = StructuralMaterial::SteelGalvanized;
        assert_eq!(parse_material(Some("Bambou"), steel), StructuralMaterial::Bamboo);
        assert_eq!(parse_material(Some("aluminium"), steel), steel);
        assert_eq!(parse_material(None, StructuralMaterial::Bamboo), StructuralMaterial::Bamboo);
    }
}
