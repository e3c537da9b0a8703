//! Integration tests for loading and saving stored email structures.
//!
//! Documents come from the web client as camelCase JSON with sparse block
//! fields. Loading must keep every field and tolerate stale values.

use emailkit_core::catalog::LayoutType;
use emailkit_core::content_block::{Align, BlockType, ButtonAlign};
use emailkit_core::divider::Orientation;
use emailkit_core::structure::EmailStructure;
use serde_json::json;

fn stored_document() -> serde_json::Value {
    json!({
        "contentBlocks": [
            {
                "id": "hero-1",
                "blockType": "hero",
                "label": "Full moon banner",
                "heroBgColor": "#1e1b4b",
                "heroBgImage": "https://cdn.example.com/moon.jpg",
                "heroTitle": "Full Moon Circle",
                "heroSubtitle": "{{ event.date }}",
                "heroTextColor": "#ffffff",
                "heroMinHeight": 320,
                "heroAlign": "center",
                "heroButtonText": "Reserve",
                "heroButtonUrl": "{{ event.url }}",
                "title": "kept from an earlier text type"
            },
            {
                "id": "card-1",
                "blockType": "infoCard",
                "infoCardItems": [
                    {"label": "Practitioner", "value": "{{ practitioner.name }}"},
                    {"label": "Time", "value": "{{ booking.time }}"}
                ],
                "infoCardStyle": "shaded",
                "infoCardBgColor": "#faf5ff"
            },
            {
                "id": "table-1",
                "blockType": "table",
                "tableColumns": [
                    {"key": "name", "label": "Item"},
                    {"key": "price", "label": "Price", "align": "right", "format": "currency"}
                ],
                "tableDataSource": "order.items",
                "tableRowLimit": 3,
                "tableShowMoreText": "and {{ remaining }} more",
                "tableStriped": false,
                "tableBordered": true
            },
            {
                "id": "button-1",
                "blockType": "button",
                "buttonText": "View order",
                "buttonUrl": "{{ order.url }}",
                "buttonStyle": "outline",
                "buttonAlign": "center"
            }
        ],
        "layout": {
            "type": "hero-two-column",
            "slots": {"hero": "hero-1", "left": "card-1", "right": "table-1"},
            "slotWidths": {"left": 40.0, "right": 45.0},
            "spacerPositions": {"1": 1},
            "dividers": [
                {
                    "id": "div-1",
                    "orientation": "horizontal",
                    "position": 1,
                    "span": 2,
                    "style": {"color": "#e9d5ff", "height": 2, "marginTop": 10, "marginBottom": 10}
                }
            ],
            "backgroundColor": "#ffffff",
            "padding": {"top": 24, "bottom": 24, "left": 16, "right": 16}
        },
        "colorPalette": [
            {"id": "sw-1", "label": "Amethyst", "color": "#6b21a8"},
            {"id": "sw-2", "label": "Amethyst again", "color": "#6b21a8"}
        ]
    })
}

#[test]
fn stored_document_round_trips() {
    let doc = stored_document();
    let structure = EmailStructure::from_value(doc.clone()).expect("document should load");
    let saved = structure.to_value().expect("document should save");
    assert_eq!(saved, doc);
}

#[test]
fn stored_document_fields_are_typed() {
    let structure = EmailStructure::from_value(stored_document()).unwrap();

    let hero = structure.block("hero-1").unwrap();
    assert_eq!(hero.block_type, BlockType::Hero);
    assert_eq!(hero.hero_align, Some(Align::Center));
    assert_eq!(hero.title.as_deref(), Some("kept from an earlier text type"));

    let button = structure.block("button-1").unwrap();
    assert_eq!(button.button_align, Some(ButtonAlign::Center));

    let layout = structure.layout.as_ref().unwrap();
    assert_eq!(layout.layout_type, LayoutType::HeroTwoColumn);
    assert_eq!(layout.spacer_positions.get(&1), Some(&1));
    assert_eq!(layout.dividers[0].orientation, Orientation::Horizontal);
    assert_eq!(layout.padding.left, 16);

    let spacer = layout.row_spacer(1, &["left", "right"]).unwrap();
    assert_eq!(spacer.width, 15.0);
    assert_eq!(spacer.position, 1);

    assert_eq!(structure.color_palette.as_ref().unwrap().len(), 2);
    assert!(structure.audit().passed);
}

#[test]
fn saved_json_string_reloads() {
    let structure = EmailStructure::from_value(stored_document()).unwrap();
    let json = structure.to_json().unwrap();
    assert_eq!(EmailStructure::from_json(&json).unwrap(), structure);
}

#[test]
fn missing_padding_uses_defaults() {
    let structure = EmailStructure::from_value(json!({
        "contentBlocks": [{"id": "a", "blockType": "text"}],
        "layout": {"type": "single", "slots": {"main": "a"}}
    }))
    .unwrap();
    let layout = structure.layout.unwrap();
    assert_eq!(layout.padding.top, 20);
    assert_eq!(layout.padding.right, 20);
    assert!(layout.dividers.is_empty());
}

// ---------------------------------------------------------------------------
// Test: null and partially unreadable layout fields
// ---------------------------------------------------------------------------

fn two_column_with(extra: serde_json::Value) -> serde_json::Value {
    let mut layout = json!({
        "type": "two-column",
        "slots": {"left": "a", "right": "b"}
    });
    for (key, value) in extra.as_object().unwrap() {
        layout[key] = value.clone();
    }
    json!({
        "contentBlocks": [
            {"id": "a", "blockType": "text"},
            {"id": "b", "blockType": "image"}
        ],
        "layout": layout
    })
}

/// Null collections inside a layout read as empty; the layout and its slot
/// assignments survive.
#[test]
fn null_layout_collections_keep_layout() {
    for field in ["slotWidths", "spacerPositions", "dividers", "padding", "backgroundColor"] {
        let doc = two_column_with(json!({ field: null }));
        let structure = EmailStructure::from_value(doc).unwrap();
        let layout = structure
            .layout
            .as_ref()
            .unwrap_or_else(|| panic!("layout lost for null {field}"));
        assert_eq!(layout.block_in("left"), Some("a"));
        assert_eq!(layout.block_in("right"), Some("b"));
    }
}

/// A null `slots` map leaves the layout selected with nothing assigned.
#[test]
fn null_slots_keeps_layout_unassigned() {
    let structure = EmailStructure::from_value(two_column_with(json!({"slots": null}))).unwrap();
    let layout = structure.layout.unwrap();
    assert_eq!(layout.layout_type, LayoutType::TwoColumn);
    assert!(layout.slots.is_empty());
}

/// One unreadable width is dropped on its own.
#[test]
fn unreadable_width_dropped_alone() {
    let doc = two_column_with(json!({"slotWidths": {"left": "40", "right": 45.0}}));
    let structure = EmailStructure::from_value(doc).unwrap();
    let layout = structure.layout.unwrap();
    assert_eq!(layout.slot_widths.get("left"), None);
    assert_eq!(layout.slot_widths.get("right"), Some(&45.0));
    assert_eq!(layout.block_in("left"), Some("a"));
}

/// One unreadable divider is dropped on its own.
#[test]
fn unreadable_divider_dropped_alone() {
    let doc = two_column_with(json!({"dividers": [
        {"id": "d1", "orientation": "vertical", "position": 0, "span": 1},
        {"id": "d2", "orientation": "diagonal", "position": 0, "span": 1}
    ]}));
    let structure = EmailStructure::from_value(doc).unwrap();
    let layout = structure.layout.unwrap();
    assert_eq!(layout.dividers.len(), 1);
    assert_eq!(layout.dividers[0].id, "d1");
    assert_eq!(layout.dividers[0].style.color, "#000000");
}

/// Missing padding sides take the default; present sides are kept.
#[test]
fn partial_padding_keeps_given_sides() {
    let doc = two_column_with(json!({"padding": {"top": 0, "bottom": 0, "left": 8}}));
    let structure = EmailStructure::from_value(doc).unwrap();
    let padding = structure.layout.unwrap().padding;
    assert_eq!(padding.top, 0);
    assert_eq!(padding.bottom, 0);
    assert_eq!(padding.left, 8);
    assert_eq!(padding.right, 20);
}

// ---------------------------------------------------------------------------
// Test: null blocks, palette entries and nested items
// ---------------------------------------------------------------------------

#[test]
fn null_content_blocks_loads_empty() {
    let structure = EmailStructure::from_value(json!({"contentBlocks": null})).unwrap();
    assert!(structure.content_blocks.is_empty());
    assert!(structure.layout.is_none());
}

/// A swatch without a label loads; one that cannot be read is dropped and
/// the rest of the document is kept.
#[test]
fn palette_entries_load_one_by_one() {
    let structure = EmailStructure::from_value(json!({
        "contentBlocks": [{"id": "a", "blockType": "text"}],
        "layout": {"type": "single", "slots": {"main": "a"}},
        "colorPalette": [
            {"id": "s1", "color": "#6b21a8"},
            {"label": "No id or color"},
            {"id": "s2", "label": "Gold", "color": "#f59e0b"}
        ]
    }))
    .unwrap();

    let palette = structure.color_palette.as_ref().unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette[0].id, "s1");
    assert_eq!(palette[0].label, "");
    assert_eq!(palette[1].label, "Gold");
    assert_eq!(structure.layout.unwrap().block_in("main"), Some("a"));
}

#[test]
fn incomplete_nested_items_are_kept() {
    let structure = EmailStructure::from_value(json!({
        "contentBlocks": [
            {
                "id": "card",
                "blockType": "infoCard",
                "infoCardItems": [{"label": "Date", "value": "x"}, {"label": "Time"}]
            },
            {
                "id": "table",
                "blockType": "table",
                "tableColumns": [{"key": "name", "label": "Item"}, {"key": "price"}]
            }
        ]
    }))
    .unwrap();

    let items = structure.block("card").unwrap().info_card_items.as_ref().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].label, "Time");

    let columns = structure.block("table").unwrap().table_columns.as_ref().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1].key, "price");
}
