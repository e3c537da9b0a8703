//! Preview report: what the builder would show for a stored structure.
//!
//! [`build_report`] summarises the authoring step reached, the layouts on
//! offer, the composed rows (slots, widths and spacers) and the audit
//! findings, as a serializable value.

use std::path::Path;

use serde::Serialize;

use emailkit_core::catalog::suggested_layouts;
use emailkit_core::error::CoreError;
use emailkit_core::layout::{CellWidth, RowCell};
use emailkit_core::structure::{AuditReport, EmailStructure};
use emailkit_core::wizard::{furthest_step, BuilderStep};

use crate::config::PreviewConfig;

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub step: BuilderStep,
    pub block_count: usize,
    pub suggested_layouts: Vec<&'static str>,
    pub layout: Option<LayoutPreview>,
    pub audit: AuditReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPreview {
    #[serde(rename = "type")]
    pub layout_type: &'static str,
    pub name: &'static str,
    pub rows: Vec<Vec<CellPreview>>,
    pub divider_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cell", rename_all = "camelCase")]
pub enum CellPreview {
    #[serde(rename_all = "camelCase")]
    Slot {
        slot_id: &'static str,
        /// Display name of the placed block; `None` for an empty slot.
        block: Option<String>,
        width: f64,
        flexible: bool,
    },
    Spacer { width: f64 },
}

/// Load a structure from disk, or start from an empty one.
pub fn load_structure(path: Option<&Path>) -> Result<EmailStructure, PreviewError> {
    let Some(path) = path else {
        tracing::info!("No structure path given, previewing an empty structure");
        return Ok(EmailStructure::default());
    };
    let json = std::fs::read_to_string(path).map_err(|source| PreviewError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let structure = EmailStructure::from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        blocks = structure.content_blocks.len(),
        "Structure loaded",
    );
    Ok(structure)
}

/// Summarise a structure.
pub fn build_report(structure: &EmailStructure) -> PreviewReport {
    let layout = structure.layout.as_ref().map(|layout| {
        let def = layout.definition();
        let rows = layout
            .row_cells()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        RowCell::Slot {
                            slot_id,
                            block_id,
                            width,
                        } => CellPreview::Slot {
                            slot_id,
                            block: block_id
                                .and_then(|id| structure.block(id))
                                .map(|b| b.display_name().to_string()),
                            width: width.percent(),
                            flexible: matches!(width, CellWidth::Flex(_)),
                        },
                        RowCell::Spacer { width } => CellPreview::Spacer { width },
                    })
                    .collect()
            })
            .collect();
        LayoutPreview {
            layout_type: def.layout_type.as_str(),
            name: def.name,
            rows,
            divider_count: layout.dividers.len(),
        }
    });

    PreviewReport {
        step: furthest_step(structure),
        block_count: structure.content_blocks.len(),
        suggested_layouts: suggested_layouts(structure.content_blocks.len())
            .iter()
            .map(|def| def.layout_type.as_str())
            .collect(),
        layout,
        audit: structure.audit(),
    }
}

/// Load, optionally normalize, and report, following `config`.
pub fn run(config: &PreviewConfig) -> Result<String, PreviewError> {
    let mut structure = load_structure(config.structure_path.as_deref())?;
    if config.normalize {
        structure = structure.normalized();
    }
    let report = build_report(&structure);
    if !report.audit.passed {
        tracing::warn!(errors = report.audit.errors.len(), "Structure has audit errors");
    }
    let out = if config.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    Ok(out.map_err(CoreError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emailkit_core::catalog::LayoutType;
    use emailkit_core::content_block::BlockType;
    use emailkit_core::structure::create_block;

    #[test]
    fn empty_structure_report() {
        let report = build_report(&EmailStructure::default());
        assert_eq!(report.step, BuilderStep::CreateBlocks);
        assert_eq!(report.block_count, 0);
        assert!(report.suggested_layouts.is_empty());
        assert!(report.layout.is_none());
        assert!(report.audit.passed);
    }

    #[test]
    fn report_names_placed_blocks() {
        let mut hero = create_block(Some(BlockType::Hero));
        hero.label = Some("Banner".into());
        let hero_id = hero.id.clone();
        let structure = EmailStructure::default()
            .add_block(hero)
            .add_block(create_block(Some(BlockType::Text)))
            .select_layout(LayoutType::HeroSingle)
            .update_layout(|l| l.assign_block("hero", &hero_id));

        let report = build_report(&structure);
        assert_eq!(report.step, BuilderStep::ArrangeBlocks);
        assert!(report.suggested_layouts.contains(&"hero-single"));

        let layout = report.layout.unwrap();
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(
            layout.rows[0][0],
            CellPreview::Slot {
                slot_id: "hero",
                block: Some("Banner".into()),
                width: 100.0,
                flexible: true,
            }
        );
        assert_eq!(
            layout.rows[1][0],
            CellPreview::Slot {
                slot_id: "main",
                block: None,
                width: 100.0,
                flexible: true,
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_structure(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, PreviewError::Io { .. }));
    }
}
