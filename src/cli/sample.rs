//! Single solver evaluation command

use std::process::ExitCode;

use super::{SampleKind, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::area::{area_diag, area_ortho, AreaError, AreaResult, DiagPattern, OrthoPattern};
use crate::geometry::Vec2;

/// Largest sub-pixel offset magnitude the solvers accept.
const MAX_OFFSET: f64 = 0.5;

/// Run the sample command
pub fn run_sample(
    kind: SampleKind,
    pattern: u32,
    left: u32,
    right: u32,
    offset: (f64, f64),
    json: bool,
) -> ExitCode {
    let area = match evaluate(kind, pattern, left, right, offset) {
        Ok(area) => area,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if json {
        let value = serde_json::json!({
            "kind": kind_name(kind),
            "pattern": pattern,
            "left": left,
            "right": right,
            "offset": [offset.0, offset.1],
            "area": area,
            "bytes": area.to_bytes(),
        });
        println!("{}", value);
    } else {
        println!("{}", area);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn kind_name(kind: SampleKind) -> &'static str {
    match kind {
        SampleKind::Ortho => "ortho",
        SampleKind::Diag => "diag",
    }
}

fn evaluate(
    kind: SampleKind,
    pattern: u32,
    left: u32,
    right: u32,
    offset: (f64, f64),
) -> Result<AreaResult, String> {
    let invalid = |e: AreaError| e.to_string();
    check_offset("--offset", offset.0)?;
    check_offset("--offset-y", offset.1)?;
    match kind {
        SampleKind::Ortho => {
            if offset.1 != 0.0 {
                return Err("--offset-y only applies to diagonal patterns".to_string());
            }
            let pattern = OrthoPattern::new(pattern).map_err(invalid)?;
            Ok(area_ortho(pattern, left, right, offset.0))
        }
        SampleKind::Diag => {
            let pattern = DiagPattern::new(pattern).map_err(invalid)?;
            Ok(area_diag(pattern, left, right, Vec2::from(offset)))
        }
    }
}

fn check_offset(flag: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value.abs() <= MAX_OFFSET {
        Ok(())
    } else {
        Err(format!("{} must be within [-0.5, 0.5], got {}", flag, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_ortho_straight_edge() {
        let area = evaluate(SampleKind::Ortho, 7, 0, 0, (0.0, 0.0)).unwrap();
        assert!((area.r - 0.125).abs() < 1e-12);
        assert!((area.g - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_rejects_bad_pattern() {
        let err = evaluate(SampleKind::Diag, 16, 0, 0, (0.0, 0.0)).unwrap_err();
        assert_eq!(err, "invalid diagonal pattern 16: expected a value in 0..=15");
    }

    #[test]
    fn test_evaluate_rejects_vertical_offset_for_ortho() {
        assert!(evaluate(SampleKind::Ortho, 1, 0, 0, (0.0, 0.25)).is_err());
    }

    #[test]
    fn test_evaluate_diag_matches_solver() {
        let area = evaluate(SampleKind::Diag, 3, 2, 1, (0.25, -0.25)).unwrap();
        let pattern = DiagPattern::new(3).unwrap();
        assert_eq!(area, area_diag(pattern, 2, 1, Vec2::new(0.25, -0.25)));
    }

    #[test]
    fn test_evaluate_rejects_out_of_range_offsets() {
        let err = evaluate(SampleKind::Ortho, 7, 0, 0, (3.0, 0.0)).unwrap_err();
        assert_eq!(err, "--offset must be within [-0.5, 0.5], got 3");
        assert!(evaluate(SampleKind::Ortho, 7, 0, 0, (f64::NAN, 0.0)).is_err());
        assert!(evaluate(SampleKind::Diag, 3, 0, 0, (0.25, -0.75)).is_err());
        assert!(evaluate(SampleKind::Diag, 3, 0, 0, (0.5, -0.5)).is_ok());
    }
}
