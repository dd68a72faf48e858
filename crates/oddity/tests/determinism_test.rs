//! Rendering the same tree with the same seed yields the same document.

use oddity::DiagramBuilder;
use proptest::prelude::*;

const SCATTERED_CIRCLE: &str = r#"
    [shape]
    kind = "circle"

    [shape.scatter]
    count = 6
    motif = { kind = "star", shading = "black" }
"#;

const SYMMETRIC_FREE_SCATTER: &str = r#"
    [scatter]
    symmetry = "diagonal_slash"
    shapes = [{ kind = "club" }, { kind = "square", shading = "grey" }, { kind = "triangle" }]
"#;

const ARRAY_OF_SCATTERS: &str = r#"
    [array]
    arrangement = "rectangular"
    rows = 2
    cols = 2
    mesh = { style = "dashed" }
    fill = { shape = { kind = "square", scatter = { count = 3, motif = { kind = "circle" } } } }
"#;

fn render(source: &str, seed: u64) -> String {
    let builder = DiagramBuilder::default();
    let diagram = builder.parse(source).expect("Failed to parse");
    builder.render_svg(&diagram, seed).expect("Failed to render")
}

#[test]
fn test_seed_changes_placement() {
    assert_ne!(render(SCATTERED_CIRCLE, 1), render(SCATTERED_CIRCLE, 2));
}

#[test]
fn test_static_diagram_ignores_seed() {
    let source = r#"
        [shape]
        kind = "hexagon"
        partition = { direction = "concentric", sections = 3, shadings = ["black", "white", "grey"] }
    "#;
    assert_eq!(render(source, 1), render(source, 99));
}

// ===================
// Property Test Functions
// ===================

fn check_same_seed_same_bytes(source: &str, seed: u64) -> Result<(), TestCaseError> {
    let first = render(source, seed);
    let second = render(source, seed);
    prop_assert_eq!(first, second);
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn same_seed_same_bytes_container(seed in any::<u64>()) {
        check_same_seed_same_bytes(SCATTERED_CIRCLE, seed)?;
    }

    #[test]
    fn same_seed_same_bytes_symmetric(seed in any::<u64>()) {
        check_same_seed_same_bytes(SYMMETRIC_FREE_SCATTER, seed)?;
    }

    #[test]
    fn same_seed_same_bytes_array(seed in any::<u64>()) {
        check_same_seed_same_bytes(ARRAY_OF_SCATTERS, seed)?;
    }
}
