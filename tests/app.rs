use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ifc_treeview::parser::open;
use ifc_treeview::ui::app::FocusPanel;
use ifc_treeview::ui::App;
use pretty_assertions::assert_eq;

const HOUSE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/house.ifc");

fn app() -> App {
    App::new(open(HOUSE).unwrap())
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn section_labels(app: &App) -> Vec<&str> {
    app.properties
        .rows()
        .iter()
        .map(|r| r.label.as_str())
        .collect()
}

#[test]
fn starts_expanded_with_empty_panel() {
    let app = app();
    let labels: Vec<&str> = app
        .objects
        .visible()
        .iter()
        .map(|v| v.row.label.as_str())
        .collect();

    assert_eq!(
        labels,
        vec!["house.ifc", "Sample House", "Site", "House", "Ground Floor"]
    );
    assert!(app.properties.is_empty());
    assert_eq!(app.focus_panel, FocusPanel::Objects);
}

#[test]
fn selecting_an_object_fills_the_panel() {
    let mut app = app();
    press(&mut app, KeyCode::Down);

    assert_eq!(section_labels(&app), vec!["Attributes"]);
    assert_eq!(app.properties.rows()[0].id, "0YvctVUKr0kugbFTf53O9L");
}

#[test]
fn selecting_the_file_row_clears_the_panel() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    assert!(!app.properties.is_empty());

    press(&mut app, KeyCode::Up);
    assert!(app.properties.is_empty());
}

#[test]
fn multi_selection_accumulates_sections() {
    let mut app = app();
    for _ in 0..4 {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Down);
    assert_eq!(
        section_labels(&app),
        vec![
            "Attributes",
            "Basic Wall",
            "Pset_WallCommon",
            "Qto_WallBaseQuantities",
        ]
    );

    app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL));
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.properties.rows().len(), 5);
    assert_eq!(
        app.properties.rows()[4].columns(),
        ("Attributes", "", "1hOSvn6df7F8_7GcBWlRGQ")
    );

    // the panel opens fully expanded
    let visible = app.properties.visible().len();
    let total: usize = app.properties.rows().iter().map(|r| r.walk().count()).sum();
    assert_eq!(visible, total);
}

#[test]
fn tab_switches_panels_and_q_quits() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus_panel, FocusPanel::Properties);

    // navigation in the property panel leaves the object selection alone
    press(&mut app, KeyCode::Down);
    assert!(app.objects.selected_rows().is_empty());

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus_panel, FocusPanel::Objects);
    assert!(!app.should_quit);
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}
