use crate::model::PuzzlePieceState;

/// Degrees turned by a single rotate action.
pub const ROTATION_STEP_DEGREES: f64 = 15.0;

/// Fewest rotate actions that bring `rotation` back to 0 degrees, turning
/// whichever way is shorter.
pub fn steps_to_upright(rotation: f64) -> u32 {
    if !rotation.is_finite() {
        return 0;
    }
    let normalized = rotation.rem_euclid(360.0);
    let arc = if normalized <= 180.0 {
        normalized
    } else {
        360.0 - normalized
    };
    (arc / ROTATION_STEP_DEGREES).ceil() as u32
}

/// Minimum rotations for a freshly scattered board. Only meaningful right
/// after scattering; see `GameplayStats::capture_min_rotations`.
pub fn minimum_rotations_at_start(pieces: &[PuzzlePieceState]) -> u32 {
    pieces
        .iter()
        .map(|piece| steps_to_upright(piece.rotation))
        .sum()
}

/// Same count as `minimum_rotations_at_start` but skipping completed pieces.
/// For progress display only.
pub fn remaining_rotations(pieces: &[PuzzlePieceState]) -> u32 {
    pieces
        .iter()
        .filter(|piece| !piece.is_completed)
        .map(|piece| steps_to_upright(piece.rotation))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(rotations: &[f64]) -> Vec<PuzzlePieceState> {
        rotations.iter().map(|r| PuzzlePieceState::new(*r)).collect()
    }

    #[test]
    fn test_counter_clockwise_half() {
        assert_eq!(steps_to_upright(0.0), 0);
        assert_eq!(steps_to_upright(15.0), 1);
        assert_eq!(steps_to_upright(20.0), 2);
        assert_eq!(steps_to_upright(180.0), 12);
    }

    #[test]
    fn test_clockwise_half() {
        // 200 degrees is 160 degrees the other way round
        assert_eq!(minimum_rotations_at_start(&pieces(&[200.0])), 11);
        assert_eq!(steps_to_upright(345.0), 1);
    }

    #[test]
    fn test_out_of_range_angles_wrap() {
        assert_eq!(steps_to_upright(-15.0), 1);
        assert_eq!(steps_to_upright(-90.0), 6);
        assert_eq!(steps_to_upright(720.0 + 30.0), 2);
        assert_eq!(steps_to_upright(360.0), 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(minimum_rotations_at_start(&[]), 0);
        assert_eq!(remaining_rotations(&[]), 0);
    }

    #[test]
    fn test_sum_over_pieces() {
        assert_eq!(minimum_rotations_at_start(&pieces(&[90.0, 270.0, 45.0])), 6 + 6 + 3);
    }

    #[test]
    fn test_remaining_skips_completed_pieces() {
        let mut board = pieces(&[90.0, 30.0, 200.0]);
        board[0].is_completed = true;
        assert_eq!(remaining_rotations(&board), 2 + 11);
        assert_eq!(minimum_rotations_at_start(&board), 6 + 2 + 11);
    }

    #[test]
    fn test_non_finite_rotation_counts_zero() {
        assert_eq!(steps_to_upright(f64::NAN), 0);
        assert_eq!(steps_to_upright(f64::INFINITY), 0);
    }
}
