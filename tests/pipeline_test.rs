//! End-to-end tests for the load -> render -> filter -> redraw pipeline.
//!
//! Drives a [`ChartApp`] on an in-memory [`SceneSurface`] against a small fixture table.
//!
//! Run: cargo test --test pipeline_test

#![allow(clippy::unwrap_used)]

use pokeviz::prelude::*;
use pokeviz::surface::Region;

const FIXTURE: &str = include_str!("fixtures/pokemon_sample.csv");

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn app() -> ChartApp<SceneSurface> {
    init_logging();
    let source = TextSource::new("fixture", FIXTURE);
    pollster::block_on(ChartApp::bootstrap(
        &source,
        ChartConfig::default(),
        SceneSurface::new(),
    ))
    .unwrap()
}

fn index_of(app: &ChartApp<SceneSurface>, name: &str) -> usize {
    app.surface()
        .marks()
        .position(|m| m.tooltip.name == name)
        .unwrap()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_fixture_rejects_non_numeric_row() {
    let dataset = Dataset::parse(FIXTURE.as_bytes(), Attributes::default()).unwrap();
    assert_eq!(dataset.len(), 15);
    assert_eq!(dataset.rejected(), 1);
    assert!(dataset.records().iter().all(|r| r.name != "MissingNo."));
}

#[test]
fn test_bootstrap_from_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokemon.csv");
    std::fs::write(&path, FIXTURE).unwrap();

    let app = pollster::block_on(ChartApp::bootstrap(
        &FileSource::new(&path),
        ChartConfig::default(),
        SceneSurface::new(),
    ))
    .unwrap();

    assert_eq!(app.visible_count(), 15);
    assert_eq!(app.surface().mark_count(), 15);
}

#[test]
fn test_failed_load_builds_nothing() {
    init_logging();
    let result = pollster::block_on(ChartApp::bootstrap(
        &FileSource::new("/nonexistent/pokemon.csv"),
        ChartConfig::default(),
        SceneSurface::new(),
    ));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_single_row_table_renders_centered_mark() {
    init_logging();
    let table = "#,Name,Type 1,Type 2,Total,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed,Generation,Legendary\n\
                 25,Pikachu,Electric,,320,35,55,40,50,50,90,1,False\n";
    let app = pollster::block_on(ChartApp::bootstrap(
        &TextSource::new("single", table),
        ChartConfig::default(),
        SceneSurface::new(),
    ))
    .unwrap();

    assert_eq!(app.visible_count(), 1);
    let marks: Vec<_> = app.surface().marks().collect();
    assert_eq!(marks.len(), 1);
    assert!((marks[0].cy - 250.0).abs() < 1e-3);
    assert!(app.surface().has_region(Region::Chart));
}

#[test]
fn test_constant_total_renders_on_one_line() {
    init_logging();
    let table = "#,Name,Type 1,Type 2,Total,HP,Attack,Defense,Sp. Atk,Sp. Def,Speed,Generation,Legendary\n\
                 149,Dragonite,Dragon,Flying,600,91,134,95,100,100,80,1,False\n\
                 248,Tyranitar,Rock,Dark,600,100,134,110,95,100,61,2,False\n";
    let app = pollster::block_on(ChartApp::bootstrap(
        &TextSource::new("flat", table),
        ChartConfig::default(),
        SceneSurface::new(),
    ))
    .unwrap();

    assert_eq!(app.surface().mark_count(), 2);
    assert!(app.surface().marks().all(|m| (m.cy - 250.0).abs() < 1e-3));
}

// ============================================================================
// Static rendering
// ============================================================================

#[test]
fn test_furniture_and_legend_drawn_once() {
    let app = app();
    let surface = app.surface();

    assert!(surface.has_region(Region::Chart));
    assert!(surface.has_region(Region::Legend));

    let legend = surface.legend_svg().unwrap();
    assert_eq!(legend.matches("<circle").count(), ColorMap::default().len());
    assert!(legend.contains(">Water</text>"));

    let chart = surface.chart_svg().unwrap();
    assert!(chart.contains(">Sp. Def</text>"));
    assert!(chart.contains(">Total</text>"));
    assert!(chart.contains("rotate(-90)"));
}

#[test]
fn test_controls_populated_first_seen() {
    let app = app();
    assert_eq!(app.surface().options(Control::Generation), ["All", "1", "2", "3"]);
    assert_eq!(app.surface().options(Control::Legendary), ["All", "False", "True"]);
}

// ============================================================================
// Redraw
// ============================================================================

#[test]
fn test_redraw_leaves_exactly_visible_marks() {
    let mut app = app();

    let steps = [
        (Control::Generation, "2", 4),
        (Control::Legendary, "True", 1),
        (Control::Generation, "All", 3),
        (Control::Legendary, "False", 12),
        (Control::Generation, "3", 1),
        (Control::Generation, "1", 8),
        (Control::Legendary, "All", 9),
    ];

    for (control, value, expected) in steps {
        let visible = app.change_control(control, value).unwrap();
        assert_eq!(visible, expected, "after {control:?} = {value}");
        assert_eq!(app.surface().mark_count(), expected);

        let svg = app.surface().chart_svg().unwrap();
        assert_eq!(svg.matches(r#"class="mark""#).count(), expected);
    }
}

#[test]
fn test_filters_compose_from_full_set() {
    let mut app = app();
    app.change_control(Control::Generation, "2").unwrap();
    app.change_control(Control::Legendary, "True").unwrap();
    let names: Vec<_> = app.surface().marks().map(|m| m.tooltip.name.clone()).collect();
    assert_eq!(names, vec!["Lugia"]);

    // Widening one control brings back records the previous result excluded.
    app.change_control(Control::Generation, "All").unwrap();
    let names: Vec<_> = app.surface().marks().map(|m| m.tooltip.name.clone()).collect();
    assert_eq!(names, vec!["Mewtwo", "Lugia", "Rayquaza"]);
}

#[test]
fn test_scales_do_not_move_on_filter() {
    let mut app = app();
    let before = app.surface().marks().find(|m| m.tooltip.name == "Lugia").cloned().unwrap();

    app.change_control(Control::Legendary, "True").unwrap();
    let after = app.surface().marks().find(|m| m.tooltip.name == "Lugia").cloned().unwrap();

    assert_eq!(before, after);
    // Lugia has the highest Sp. Def and the highest Total.
    assert!((after.cx - 500.0).abs() < 1e-3);
    assert!(after.cy.abs() < 1e-3);
}

#[test]
fn test_unmapped_category_gets_fallback_mark() {
    let app = app();
    let dragons: Vec<_> = app
        .surface()
        .marks()
        .filter(|m| m.category == "Dragon")
        .collect();

    assert_eq!(dragons.len(), 2);
    assert!(dragons.iter().all(|m| m.fill == Rgba::FALLBACK_GRAY));

    let rock = app.surface().marks().filter(|m| m.category == "Rock").count();
    assert_eq!(rock, 1);
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_hover_moves_between_marks_without_mixing() {
    let mut app = app();
    let bulbasaur = index_of(&app, "Bulbasaur");
    let charmander = index_of(&app, "Charmander");

    let surface = app.surface_mut();
    surface.pointer_enter(bulbasaur, Point::new(100.0, 200.0)).unwrap();
    assert_eq!(
        surface.tooltip().unwrap().html(),
        "<p>Bulbasaur<br />Grass<br />Poison</p>"
    );

    surface.pointer_leave(bulbasaur).unwrap();
    assert!(!surface.tooltip().unwrap().is_visible());

    surface.pointer_enter(charmander, Point::new(140.0, 260.0)).unwrap();
    let tooltip = surface.tooltip().unwrap();
    assert!(tooltip.is_visible());
    assert_eq!(tooltip.html(), "<p>Charmander<br />Fire<br /></p>");
    assert_eq!(tooltip.position(), Point::new(140.0, 232.0));
}

#[test]
fn test_single_tooltip_across_redraws() {
    let mut app = app();
    for value in ["1", "2", "3", "All"] {
        app.change_control(Control::Generation, value).unwrap();
        let first = 0;
        app.surface_mut().pointer_enter(first, Point::ORIGIN).unwrap();
        app.surface_mut().pointer_leave(first).unwrap();
    }
    assert_eq!(app.surface().tooltips_created(), 1);
}

#[test]
fn test_stale_marks_are_not_hoverable() {
    let mut app = app();
    app.change_control(Control::Generation, "3").unwrap();

    assert_eq!(app.surface().mark_count(), 2);
    assert!(app.surface_mut().pointer_enter(5, Point::ORIGIN).is_err());
}
