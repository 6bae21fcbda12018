//! Property-based tests
//!
//! Invariants that hold for all inputs:
//! - Constant counted loops run `U - L` (`+ 1` inclusive) times
//! - Writing the comparison the other way round never changes the count
//! - Increment and decrement loops over the same range agree
//! - Constant algebra folds exactly like integer arithmetic

mod common;

use common::*;
use proptest::prelude::*;
use prealloc_ir::features::capacity::CapacityExpr;
use prealloc_ir::{analyze_source, PreallocConfig};

/// Message for one `var x []int` fed by the given loop header
fn message_for(header: &str) -> Option<String> {
    let source = fixture_func(
        "",
        &["\tvar x []int", &format!("\tfor {} {{", header), "\t\tx = append(x, i)", "\t}"],
    );
    let diagnostics =
        analyze_source(&source, "a.go", &PreallocConfig::all_loops()).expect("analysis");
    diagnostics.into_iter().next().map(|d| d.message)
}

fn expected(count: i64) -> Option<String> {
    (count > 0).then(|| format!("Consider preallocating x with capacity {}", count))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_increment_exclusive(lower in -20i64..20, upper in -20i64..20) {
        let header = format!("i := {}; i < {}; i++", lower, upper);
        prop_assert_eq!(message_for(&header), expected(upper - lower));
    }

    #[test]
    fn prop_increment_inclusive(lower in -20i64..20, upper in -20i64..20) {
        let header = format!("i := {}; i <= {}; i++", lower, upper);
        prop_assert_eq!(message_for(&header), expected(upper - lower + 1));
    }

    #[test]
    fn prop_operand_order_is_irrelevant(lower in -20i64..20, upper in -20i64..20, inclusive: bool) {
        let (op, mirrored) = if inclusive { ("<=", ">=") } else { ("<", ">") };
        let forward = message_for(&format!("i := {}; i {} {}; i++", lower, op, upper));
        let reversed = message_for(&format!("i := {}; {} {} i; i++", lower, upper, mirrored));
        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn prop_decrement_matches_increment(lower in -20i64..20, upper in -20i64..20) {
        let up = message_for(&format!("i := {}; i < {}; i++", lower, upper));
        let down = message_for(&format!("i := {}; i > {}; i--", upper, lower));
        prop_assert_eq!(up, down);
    }

    #[test]
    fn prop_constant_folding(a in -1000i64..1000, b in -1000i64..1000, c in -1000i64..1000) {
        let folded = CapacityExpr::int(a)
            .add(CapacityExpr::int(b))
            .mul(CapacityExpr::int(c))
            .sub(CapacityExpr::int(b));
        prop_assert_eq!(folded.const_value(), Some((a + b) * c - b));
    }

    #[test]
    fn prop_symbolic_offsets_cancel(k in -1000i64..1000) {
        let expr = CapacityExpr::var("n").add(CapacityExpr::int(k)).sub(CapacityExpr::int(k));
        prop_assert_eq!(expr.render().ok(), Some("n".to_string()));
    }
}
