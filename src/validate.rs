use crate::puzzle::PuzzleState;

/// Checks a solution independently of the engine that produced it.
///
/// The path must begin at `start`, end at `goal`, and each board must be one
/// of the [`PuzzleState::valid_moves`] of its predecessor.
pub fn is_valid_path(path: &[PuzzleState], start: &PuzzleState, goal: &PuzzleState) -> bool {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return false;
    };
    if first != start || last != goal {
        return false;
    }

    path.windows(2)
        .all(|pair| pair[0].valid_moves().contains(&pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    #[test]
    fn empty_path_is_invalid() {
        let goal = PuzzleState::goal(3).unwrap();
        assert!(!is_valid_path(&[], &goal, &goal));
    }

    #[test]
    fn single_board_path_needs_start_equal_to_goal() {
        let goal = PuzzleState::goal(3).unwrap();
        let other = goal.apply_move(Move::Up).unwrap();
        assert!(is_valid_path(&[goal.clone()], &goal, &goal));
        assert!(!is_valid_path(&[goal.clone()], &other, &goal));
    }

    #[test]
    fn endpoints_must_match() {
        let goal = PuzzleState::goal(3).unwrap();
        let a = goal.apply_move(Move::Up).unwrap();
        let path = vec![a.clone(), goal.clone()];
        assert!(is_valid_path(&path, &a, &goal));
        assert!(!is_valid_path(&path, &goal, &goal));
        assert!(!is_valid_path(&path, &a, &a));
    }

    #[test]
    fn skipped_and_repeated_boards_are_rejected() {
        let goal = PuzzleState::goal(3).unwrap();
        let a = goal.apply_move(Move::Up).unwrap();
        let b = a.apply_move(Move::Left).unwrap();

        assert!(is_valid_path(&[b.clone(), a.clone(), goal.clone()], &b, &goal));
        assert!(!is_valid_path(&[b.clone(), goal.clone()], &b, &goal));
        assert!(!is_valid_path(
            &[b.clone(), a.clone(), a.clone(), goal.clone()],
            &b,
            &goal
        ));
    }
}
