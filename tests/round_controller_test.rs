//! Round flow through the public controller API.

use tictactoe_engine::{
    ControllerSettings, Difficulty, IllegalReason, Mark, MoveError, Outcome, Phase,
    RoundController, WinLine,
};

const WIN_ROW_MIDDLE: WinLine = tictactoe_engine::WIN_LINES[1];

fn two_player() -> RoundController {
    RoundController::new(ControllerSettings {
        opponent_enabled: false,
        ..ControllerSettings::default()
    })
}

fn play(controller: &mut RoundController, moves: &[usize]) {
    for &index in moves {
        let mark = controller.turn();
        controller.submit_move(index, mark).unwrap();
    }
}

#[test]
fn test_occupied_square_rejected_and_board_unchanged() {
    let mut controller = two_player();
    controller.start_round(Mark::X);
    controller.submit_move(4, Mark::X).unwrap();
    controller.submit_move(0, Mark::O).unwrap();
    let before = controller.snapshot();

    let result = controller.submit_move(0, Mark::X);
    assert_eq!(
        result.unwrap_err(),
        MoveError::IllegalMove(IllegalReason::Occupied(0))
    );
    assert_eq!(controller.snapshot(), before);
}

#[test]
fn test_completing_middle_row_wins_for_o() {
    let mut controller = two_player();
    controller.start_round(Mark::O);
    play(&mut controller, &[3, 0, 4, 1]);

    let report = controller.submit_move(5, Mark::O).unwrap();
    let expected = Outcome::Win {
        mark: Mark::O,
        line: WIN_ROW_MIDDLE,
    };
    assert_eq!(report.outcome, expected);
    assert_eq!(report.next_turn, None);
    assert_eq!(controller.phase(), Phase::RoundOver(expected));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let mut controller = two_player();
    controller.start_round(Mark::X);
    play(&mut controller, &[0, 4, 8, 1, 7, 6, 2, 5]);

    let report = controller.submit_move(3, Mark::X).unwrap();
    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(controller.board().empty_indices().count(), 0);
    assert_eq!(
        controller.submit_move(0, Mark::O).unwrap_err(),
        MoveError::RoundAlreadyOver
    );
}

#[test]
fn test_hard_hint_answers_center_with_corner() {
    let mut controller = two_player();
    controller.start_round(Mark::O);
    controller.submit_move(4, Mark::O).unwrap();

    let hint = controller.request_hint(Mark::X).unwrap();
    assert!([0, 2, 6, 8].contains(&hint), "hint {hint} is not a corner");
}

#[test]
fn test_wrong_mark_rejected_before_square_check() {
    let mut controller = two_player();
    controller.start_round(Mark::X);
    controller.submit_move(4, Mark::X).unwrap();
    assert_eq!(
        controller.submit_move(4, Mark::X).unwrap_err(),
        MoveError::InvalidTurn {
            expected: Mark::O,
            actual: Mark::X
        }
    );
}

#[test]
fn test_every_move_keeps_square_count() {
    let mut controller = two_player();
    controller.start_round(Mark::X);
    for index in [4, 0, 8, 2, 1, 7] {
        let mark = controller.turn();
        controller.submit_move(index, mark).unwrap();
        let board = controller.board();
        let occupied = board.count(Mark::X) + board.count(Mark::O);
        assert_eq!(board.empty_indices().count() + occupied, 9);
        assert_eq!(occupied, controller.state().history().len());
    }
}

#[test]
fn test_computer_replies_through_ticket() {
    let mut controller = RoundController::new(ControllerSettings {
        difficulty: Difficulty::Hard,
        seed: Some(3),
        ..ControllerSettings::default()
    });
    assert!(controller.start_round(Mark::X).scheduled.is_none());

    let report = controller.submit_move(0, Mark::X).unwrap();
    let ticket = report.scheduled.expect("computer plays O");
    assert_eq!(ticket.mark(), Mark::O);

    let reply = controller.run_scheduled(ticket).unwrap().unwrap();
    assert_eq!(reply.mv.map(|m| m.index), Some(4));
    assert_eq!(controller.turn(), Mark::X);

    // Firing the same ticket twice does nothing.
    assert!(controller.run_scheduled(ticket).unwrap().is_none());
}

#[test]
fn test_new_round_invalidates_ticket() {
    let mut controller = RoundController::new(ControllerSettings::default());
    controller.start_round(Mark::X);
    let ticket = controller
        .submit_move(4, Mark::X)
        .unwrap()
        .scheduled
        .unwrap();

    controller.next_round();
    assert!(controller.run_scheduled(ticket).unwrap().is_none());
}

#[test]
fn test_disabling_computer_invalidates_ticket() {
    let mut controller = RoundController::new(ControllerSettings::default());
    controller.start_round(Mark::X);
    let ticket = controller
        .submit_move(4, Mark::X)
        .unwrap()
        .scheduled
        .unwrap();

    assert!(controller.configure(false, Difficulty::Hard).scheduled.is_none());
    assert!(controller.run_scheduled(ticket).unwrap().is_none());
    assert_eq!(controller.board().empty_indices().count(), 8);
}
