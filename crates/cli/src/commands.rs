//! Command implementations.
//!
//! Each command returns its output as a string so `run` owns all printing.

use anyhow::{Context, anyhow};
use colored::Colorize;
use std::fmt::Write;
use std::path::Path;
use studio_codegen::render_preview;
use studio_core::Technology;
use studio_ir::{GenerationRequest, load_request, validate_entities};
use studio_wizard::{
    AuthContext, HttpScaffoldApi, StudioConfig, UserProfile, WizardController,
};

fn load_model(path: &Path) -> anyhow::Result<GenerationRequest> {
    let request =
        load_request(path).with_context(|| format!("Failed to load model {}", path.display()))?;
    tracing::debug!(
        "Loaded model '{}' ({} entities)",
        request.project_name,
        request.entities.len()
    );
    Ok(request)
}

/// Display name used for the token-authenticated CLI user
const CLI_USER: &str = "Scaffold Studio CLI";

fn load_wizard(model: &Path, config: &StudioConfig) -> anyhow::Result<WizardController> {
    let request = load_model(model)?;
    let mut wizard = WizardController::from_config(config);
    wizard.load_request(&request);
    if config.api.token.is_some() {
        wizard.auth = AuthContext::signed_in(UserProfile::new(CLI_USER));
    }
    Ok(wizard)
}

// ============================================================================
// preview
// ============================================================================

pub fn preview(
    model: &Path,
    entity: &str,
    technology: Option<&str>,
    project_name: Option<&str>,
) -> anyhow::Result<String> {
    let request = load_model(model)?;
    let store = request.to_store();
    let selected = store
        .get_by_name(entity)
        .ok_or_else(|| anyhow!("Entity '{}' not found in {}", entity, model.display()))?;

    let technology = technology.unwrap_or(&request.technology);
    let project_name = project_name.unwrap_or(&request.project_name);
    Ok(render_preview(
        Some(selected),
        store.entities(),
        technology,
        project_name,
    ))
}

// ============================================================================
// layout
// ============================================================================

pub fn layout(
    model: &Path,
    config: Option<&Path>,
    fullscreen: bool,
    json: bool,
) -> anyhow::Result<String> {
    let config = StudioConfig::resolve(config)?;
    let wizard = load_wizard(model, &config)?;
    let diagram = wizard.diagram(fullscreen);
    let groups = &diagram.groups;

    if json {
        let nodes: Vec<serde_json::Value> = diagram
            .layout
            .nodes
            .iter()
            .map(|node| {
                serde_json::json!({
                    "id": node.id,
                    "name": node.name,
                    "position": node.position,
                    "group": groups.group_of(node.id),
                    "color": groups.color_of(node.id),
                })
            })
            .collect();
        let value = serde_json::json!({
            "canvas": diagram.layout.canvas,
            "nodes": nodes,
            "connections": diagram.connections,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = String::new();
    writeln!(out, "{}", "Entities".bold())?;
    writeln!(
        out,
        "  {:<20} {:>6} {:>8} {:>8} {:>8} {:>6}  {}",
        "NAME", "COLUMN", "X", "Y", "HEIGHT", "GROUP", "COLOR"
    )?;
    for node in &diagram.layout.nodes {
        let p = node.position;
        writeln!(
            out,
            "  {:<20} {:>6} {:>8.1} {:>8.1} {:>8.1} {:>6}  {}",
            node.name,
            p.column,
            p.x,
            p.y,
            p.height,
            groups.group_of(node.id).map(|g| g.to_string()).unwrap_or_default(),
            groups.color_of(node.id).unwrap_or("-"),
        )?;
    }

    if !diagram.connections.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Connections".bold())?;
        for connection in &diagram.connections {
            let from = wizard
                .store()
                .get(connection.from)
                .map(|e| e.name.as_str())
                .unwrap_or(studio_diagram::UNKNOWN_ENTITY_LABEL);
            let path = match &connection.path {
                Some(path) => path.to_svg_path(),
                None => "(unresolved)".yellow().to_string(),
            };
            writeln!(
                out,
                "  {} -> {} [{}] {}",
                from,
                connection.target_label,
                connection.relation_type.label(),
                path
            )?;
        }
    }

    write!(
        out,
        "\n{} entities, {} connections, {} groups",
        diagram.layout.len(),
        diagram.connections.len(),
        groups.group_count()
    )?;
    Ok(out)
}

// ============================================================================
// validate
// ============================================================================

/// Returns the report and whether the model is free of errors
pub fn validate(model: &Path) -> anyhow::Result<(String, bool)> {
    let request = load_model(model)?;
    let result = validate_entities(&request.to_entities());

    let mut out = String::new();
    for error in &result.errors {
        writeln!(out, "{} {}", "error:".red().bold(), error)?;
    }
    for warning in &result.warnings {
        writeln!(out, "{} {}", "warning:".yellow().bold(), warning)?;
    }

    let ok = !result.has_errors();
    if ok {
        write!(
            out,
            "{} {} is valid ({} warnings)",
            "✓".green(),
            model.display(),
            result.warnings.len()
        )?;
    } else {
        write!(
            out,
            "{} {} has {} errors",
            "✗".red(),
            model.display(),
            result.errors.len()
        )?;
    }
    Ok((out, ok))
}

// ============================================================================
// technologies
// ============================================================================

pub fn technologies() -> String {
    let mut out = String::new();
    for tech in Technology::all() {
        let _ = writeln!(
            out,
            "{:<8} {:<30} {}",
            tech.as_str().bold(),
            tech.display_name(),
            tech.language().dimmed()
        );
    }
    out.trim_end().to_string()
}

// ============================================================================
// generate
// ============================================================================

/// Submit the model and return the download URL
pub async fn generate(model: &Path, config: Option<&Path>) -> anyhow::Result<String> {
    let config = StudioConfig::resolve(config)?;
    let mut wizard = load_wizard(model, &config)?;
    let api = HttpScaffoldApi::new(&config.api)?;

    tracing::info!(
        "Submitting '{}' to {}",
        wizard.project_name,
        config.api.base_url
    );
    wizard.submit_generation(&api).await.ok_or_else(|| {
        anyhow!(
            wizard
                .message
                .clone()
                .unwrap_or_else(|| "Generation failed".to_string())
        )
    })
}
