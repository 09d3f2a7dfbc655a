//! Integration tests: project file export/import (ds-core).
//!
//! Exercises the portable `.json` format end to end: fixture → ProjectFile
//! → Project → exported text → ProjectFile again.

use chrono::{TimeZone, Utc};
use ds_core::model::*;
use ds_core::{
    CanvasBackground, CanvasSize, ElementId, Project, ProjectFile, ProjectFileError, ProjectId,
};
use pretty_assertions::assert_eq;

fn fixture() -> ProjectFile {
    ProjectFile::parse(include_str!("fixtures/poster.json")).expect("fixture parses")
}

// ─── Parsing ────────────────────────────────────────────────────────────

#[test]
fn fixture_contains_every_kind_in_order() {
    let file = fixture();
    let kinds: Vec<ElementType> = file.elements.iter().map(Element::element_type).collect();
    assert_eq!(kinds, ElementType::ALL.to_vec());
    assert_eq!(file.canvas_size, CanvasSize::new(800.0, 600.0));
    assert!(matches!(file.canvas_background, CanvasBackground::Pattern(_)));
}

#[test]
fn shared_attributes_survive_parsing() {
    let file = fixture();
    let by_id = |id: &str| {
        file.elements
            .iter()
            .find(|e| e.id == ElementId::intern(id))
            .unwrap_or_else(|| panic!("missing {id}"))
    };

    let backdrop = by_id("bg_rect");
    assert!(backdrop.base.locked);
    assert_eq!(backdrop.display_name(), "Backdrop");

    let sun = by_id("sun");
    assert_eq!(sun.base.shadow.as_ref().map(|s| s.blur), Some(12.0));

    let title = by_id("title");
    assert_eq!(
        title.base.border.as_ref().map(|b| b.style),
        Some(BorderStyle::Dashed)
    );
    assert_eq!(title.display_name(), "Text: SUMMER FEST");

    let note = by_id("note");
    assert!(!note.base.visible);
    assert_eq!(note.display_name(), "Icon: music");

    assert_eq!(by_id("hex").base.opacity, 0.8);
    assert_eq!(by_id("badge").base.rotation, 15.0);
}

// ─── Round-trip ─────────────────────────────────────────────────────────

#[test]
fn export_then_import_preserves_document_content() {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let original = fixture().into_project(ProjectId::new("original"), created);

    let exported = ProjectFile::from_project(&original).to_json().unwrap();
    let imported_at = Utc.with_ymd_and_hms(2026, 4, 2, 12, 0, 0).unwrap();
    let imported: Project = ProjectFile::parse(&exported)
        .unwrap()
        .into_project(ProjectId::new("copy"), imported_at);

    assert_eq!(imported.elements, original.elements);
    assert_eq!(imported.canvas_size, original.canvas_size);
    assert_eq!(imported.canvas_background, original.canvas_background);
    assert_eq!(imported.name, original.name);
    assert_ne!(imported.id, original.id);
    assert_eq!(imported.created_at, imported_at);
}

#[test]
fn exported_file_has_version_and_iso_timestamp() {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let project = Project::new(
        ProjectId::new("p"),
        "Poster",
        CanvasSize::new(800.0, 600.0),
        CanvasBackground::from("#FFFFFF"),
        created,
    );
    let json: serde_json::Value =
        serde_json::from_str(&ProjectFile::from_project(&project).to_json().unwrap()).unwrap();
    assert_eq!(json["version"], "1.0.0");
    assert_eq!(json["name"], "Poster");
    assert_eq!(json["createdAt"], "2026-03-01T09:30:00Z");
    assert_eq!(json["canvasBackground"], "#FFFFFF");
    assert!(json["elements"].as_array().unwrap().is_empty());
}

// ─── Rejections ─────────────────────────────────────────────────────────

#[test]
fn element_with_bad_shape_is_invalid_format() {
    let text = r#"{"canvasSize":{"width":1,"height":1},"elements":[{"id":"x","type":"circle","radius":"big"}]}"#;
    assert!(matches!(
        ProjectFile::parse(text),
        Err(ProjectFileError::InvalidProjectFormat(_))
    ));
    let text = r#"{"canvasSize":{"width":1,"height":1},"elements":[{"id":"x","radius":4}]}"#;
    assert!(matches!(
        ProjectFile::parse(text),
        Err(ProjectFileError::InvalidProjectFormat(_))
    ));
}

#[test]
fn unknown_element_type_is_invalid_format() {
    let text = r#"{"canvasSize":{"width":1,"height":1},"elements":[{"id":"x","type":"hexagon"}]}"#;
    assert!(matches!(
        ProjectFile::parse(text),
        Err(ProjectFileError::InvalidProjectFormat(_))
    ));
}
