use fruitboard::atlas::SENTINEL;
use fruitboard::config::AppConfig;
use fruitboard::error::ConfigError;

fn doc(design: &str, tiles: &str) -> String {
    format!(
        r#"{{
            "design": {design},
            "atlases": [ {{ "name": "tiles-01", "path": "tiles-01.png", "width": 256, "height": 256 }} ],
            "tiles": [ {tiles} ]
        }}"#
    )
}

const SENTINEL_TILE: &str = r#"{ "atlas": 0, "x": 6, "y": 0, "width": 1, "height": 1, "name": "MISSINGTEX" }"#;

#[test]
fn embedded_table_defines_board_and_sentinel() {
    let cfg = AppConfig::embedded().unwrap();
    let names: Vec<&str> = cfg.table.tiles.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&SENTINEL));
    for r in 0..3 {
        for c in 0..3 {
            let name = format!("board-{r}{c}");
            assert!(names.contains(&name.as_str()), "missing {name}");
        }
    }
    assert_eq!(cfg.window.background, "#1099bb");
}

#[test]
fn window_section_is_optional() {
    let cfg = AppConfig::from_json(&doc(r#"{ "width": 4, "height": 3 }"#, SENTINEL_TILE)).unwrap();
    assert_eq!(cfg.window.title, "fruitboard");
    assert_eq!(cfg.design.width, 4.0);
}

#[test]
fn zero_design_height_is_rejected() {
    let err = AppConfig::from_json(&doc(r#"{ "width": 9, "height": 0 }"#, SENTINEL_TILE)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDesignSize { .. }), "{err}");
}

#[test]
fn table_without_sentinel_is_rejected() {
    let only = r#"{ "atlas": 0, "x": 0, "y": 0, "width": 1, "height": 1, "name": "dotgrid" }"#;
    let err = AppConfig::from_json(&doc(r#"{ "width": 9, "height": 9 }"#, only)).unwrap_err();
    assert!(matches!(err, ConfigError::NoSentinel(_)), "{err}");
}

#[test]
fn duplicate_tile_names_are_rejected() {
    let tiles = format!("{SENTINEL_TILE}, {SENTINEL_TILE}");
    let err = AppConfig::from_json(&doc(r#"{ "width": 9, "height": 9 }"#, &tiles)).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateTile(ref n) if n == SENTINEL), "{err}");
}

#[test]
fn bad_background_is_rejected() {
    let json = r#"{
        "design": { "width": 9, "height": 9 },
        "window": { "background": "blue" },
        "atlases": [ { "name": "a", "path": "a.png", "width": 16, "height": 16 } ],
        "tiles": [ { "atlas": 0, "x": 0, "y": 0, "width": 1, "height": 1, "name": "MISSINGTEX" } ]
    }"#;
    assert!(matches!(AppConfig::from_json(json), Err(ConfigError::InvalidColor(_))));
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(AppConfig::from_json("{ not json"), Err(ConfigError::Parse(_))));
}

#[test]
fn oversized_design_is_rejected_before_board_allocation() {
    let err = AppConfig::from_json(&doc(r#"{ "width": 1e6, "height": 1e6 }"#, SENTINEL_TILE)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDesignSize { .. }), "{err}");
}

#[test]
fn wrapping_tile_coordinates_are_rejected() {
    let tiles = format!(r#"{SENTINEL_TILE}, {{ "atlas": 0, "x": 268435456, "y": 0, "width": 1, "height": 1, "name": "far" }}"#);
    let err = AppConfig::from_json(&doc(r#"{ "width": 9, "height": 9 }"#, &tiles)).unwrap_err();
    assert!(matches!(err, ConfigError::TileOverflow { ref tile, .. } if tile == "far"), "{err}");
}
