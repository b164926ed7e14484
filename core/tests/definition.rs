use snapjig_core::codec::{decode, encode};
use snapjig_core::grid::GridSpec;
use snapjig_core::snapshot::{validate_definition, ImageInfo, PuzzleDefinition};

fn build_image() -> ImageInfo {
    ImageInfo {
        id: "meadow".to_string(),
        label: "Meadow".to_string(),
        src: "images/meadow.jpg".to_string(),
        width: 1600,
        height: 900,
    }
}

#[test]
fn definition_round_trips_through_the_codec() {
    let grid = GridSpec::new(10, 15).unwrap();
    let definition = PuzzleDefinition::new(build_image(), grid, 0xFEED_BEEF);
    let bytes = encode(&definition).expect("encode");
    let decoded: PuzzleDefinition = decode(&bytes).expect("decode");
    assert_eq!(decoded, definition);
    assert_eq!(decoded.grid().unwrap(), grid);
}

#[test]
fn validation_rejects_broken_definitions() {
    let grid = GridSpec::new(4, 4).unwrap();
    let good = PuzzleDefinition::new(build_image(), grid, 1);
    assert!(validate_definition(&good).is_ok());

    let mut missing_id = good.clone();
    missing_id.image.id = "  ".to_string();
    assert!(validate_definition(&missing_id).is_err());

    let mut zero_dims = good.clone();
    zero_dims.image.width = 0;
    assert!(validate_definition(&zero_dims).is_err());

    let mut bad_version = good.clone();
    bad_version.version = 99;
    assert!(validate_definition(&bad_version).is_err());

    let mut empty_grid = good;
    empty_grid.rows = 0;
    assert!(validate_definition(&empty_grid).is_err());
}

#[test]
fn aspect_guards_zero_height() {
    let mut image = build_image();
    assert!((image.aspect() - 16.0 / 9.0).abs() < 1e-4);
    image.height = 0;
    assert_eq!(image.aspect(), 1.0);
}
