use outline_state::{ObjectType, OutlineConfig, OutlineState, PropertiesKind};
use properties_state::{ObjectProperties, SharedPanel};

fn wired_outline() -> (OutlineState, SharedPanel) {
    let panel = SharedPanel::new();
    let mut outline = OutlineState::new(OutlineConfig::default());
    outline.set_properties_sink(Box::new(panel.clone()));
    (outline, panel)
}

fn find(outline: &OutlineState, name: &str) -> outline_state::ObjectId {
    outline
        .store()
        .iter()
        .find(|(_, record)| record.name() == name)
        .map(|(id, _)| id)
        .unwrap()
}

#[test]
fn selecting_camera_shows_camera_defaults() {
    let (mut outline, panel) = wired_outline();
    outline.toggle_select(find(&outline, "Main Camera"));

    let selected = panel.selected();
    assert_eq!(selected.kind, PropertiesKind::Camera);
    assert_eq!(selected.name, "Main Camera");
    assert!(matches!(selected.properties, Some(ObjectProperties::Camera(_))));
}

#[test]
fn selecting_group_shows_mesh_properties() {
    let (mut outline, panel) = wired_outline();
    outline.toggle_select(find(&outline, "House_01_Structure"));
    assert_eq!(panel.selected().kind, PropertiesKind::Mesh);
}

#[test]
fn deselect_and_delete_clear_panel() {
    let (mut outline, panel) = wired_outline();
    let light = find(&outline, "Sun Light");

    outline.toggle_select(light);
    outline.toggle_select(light);
    assert!(panel.selected().is_none());

    outline.toggle_select(light);
    outline.request_delete_selected();
    outline.confirm_delete().unwrap();
    assert!(panel.selected().is_none());
}

#[test]
fn added_object_is_shown() {
    let (mut outline, panel) = wired_outline();
    outline.add_object(ObjectType::Light);
    assert_eq!(panel.selected().name, "New Light");
    assert_eq!(panel.selected().kind, PropertiesKind::Light);
}
