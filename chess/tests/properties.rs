use proptest::prelude::*;

use portalchess_core::{
    Board, MoveValidator, MovementRules, Piece, PieceColor, PieceKind, Portal, PortalSystem,
    Position, SpecialAbilities,
};

fn stone(color: PieceColor) -> Piece {
    Piece::new(
        PieceKind::Custom("Stone".into()),
        color,
        MovementRules::default(),
        SpecialAbilities::default(),
    )
}

/// A board of the given size with pieces on the listed (in-bounds) squares.
fn board_with(size: i32, squares: &[(i32, i32, bool)]) -> Board {
    let mut board = Board::new(size);
    for &(x, y, white) in squares {
        let color = if white { PieceColor::White } else { PieceColor::Black };
        let _ = board.place(Position::new(x.rem_euclid(size), y.rem_euclid(size)), stone(color));
    }
    board
}

fn snapshot(board: &Board) -> Vec<(Position, Option<Piece>)> {
    board
        .squares()
        .map(|pos| (pos, board.get_piece(pos).cloned()))
        .collect()
}

proptest! {
    #[test]
    fn position_validity_matches_bounds(size in 1i32..16, x in -20i32..20, y in -20i32..20) {
        let board = Board::new(size);
        let expected = (0..size).contains(&x) && (0..size).contains(&y);
        prop_assert_eq!(board.is_position_valid(Position::new(x, y)), expected);
    }

    #[test]
    fn failed_moves_leave_board_unchanged(
        squares in prop::collection::vec((0i32..8, 0i32..8, any::<bool>()), 0..12),
        from in (-2i32..10, -2i32..10),
        to in (-2i32..10, -2i32..10),
    ) {
        let mut board = board_with(8, &squares);
        let before = snapshot(&board);
        let from = Position::from(from);
        let to = Position::from(to);

        let source_empty = !board.has_piece_at(from);
        let dest_invalid = !board.is_position_valid(to);
        let result = board.move_piece(from, to);

        if source_empty || dest_invalid {
            prop_assert!(result.is_err());
            prop_assert_eq!(snapshot(&board), before);
        }
    }

    #[test]
    fn clone_moves_never_affect_original(
        squares in prop::collection::vec((0i32..8, 0i32..8, any::<bool>()), 1..16),
        moves in prop::collection::vec(((0i32..8, 0i32..8), (0i32..8, 0i32..8)), 1..10),
    ) {
        let board = board_with(8, &squares);
        let before = snapshot(&board);

        let mut clone = board.clone();
        for (from, to) in moves {
            let _ = clone.move_piece_for_clone_board(from.into(), to.into());
        }

        prop_assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn handle_portal_without_portals_is_identity(
        squares in prop::collection::vec((0i32..8, 0i32..8, any::<bool>()), 0..16),
        from in (0i32..8, 0i32..8),
        to in (-2i32..10, -2i32..10),
    ) {
        let board = board_with(8, &squares);
        let to = Position::from(to);
        prop_assert_eq!(board.handle_portal(from.into(), to), to);
    }

    #[test]
    fn empty_board_reachability_is_symmetric(
        size in 1i32..10,
        a in (0i32..10, 0i32..10),
        b in (0i32..10, 0i32..10),
    ) {
        let board = Board::new(size);
        let a = Position::new(a.0 % size, a.1 % size);
        let b = Position::new(b.0 % size, b.1 % size);
        let validator = MoveValidator::new(&board);
        prop_assert_eq!(validator.is_path_valid(a, b), validator.is_path_valid(b, a));
        prop_assert!(validator.is_path_valid(a, b));
    }

    #[test]
    fn cooldown_expires_after_configured_turns(turns in 1u32..10, extra in 0u32..5) {
        let entry = Position::new(2, 2);
        let mut system = PortalSystem::new();
        system.add_portal(Portal {
            id: "p".into(),
            entry,
            exit: Position::new(5, 5),
            two_way: false,
            allowed_colors: vec![PieceColor::White],
            cooldown: turns,
        });

        system.apply_cooldown(entry);
        prop_assert!(system.is_on_cooldown(entry));
        for _ in 1..turns {
            system.decrement_cooldowns();
            prop_assert!(system.is_on_cooldown(entry));
        }
        system.decrement_cooldowns();
        prop_assert!(!system.is_on_cooldown(entry));
        for _ in 0..extra {
            system.decrement_cooldowns();
            prop_assert!(!system.is_on_cooldown(entry));
        }
    }
}
