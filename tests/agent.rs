use nogo_mcts::agent::{Agent, MctsPlayer, RandomPlayer};
use nogo_mcts::board::{Board, Color, Legality, Placement};
use nogo_mcts::boards::nogo::NoGoBoard;
use nogo_mcts::config::SearchConfig;
use nogo_mcts::error::Error;
use std::time::Duration;

/// A board with a single cell that either color may fill.
#[derive(Clone, Default)]
struct SingleCell(Option<Color>);

impl Board for SingleCell {
    fn cell_count(&self) -> usize {
        1
    }

    fn place(&mut self, placement: Placement) -> Legality {
        if placement.cell != 0 || self.0.is_some() {
            return Legality::Illegal;
        }
        self.0 = Some(placement.color);
        Legality::Legal
    }
}

fn quick(player: MctsPlayer) -> MctsPlayer {
    let config = player.config().clone().with_time_limit(Duration::from_secs(30));
    player.with_config(config)
}

#[test]
fn single_legal_move_is_always_chosen() {
    for args in ["role=black T=0", "role=black T=1000", "role=black T=5 exp=3.0"] {
        // arrange
        let mut player = MctsPlayer::new(args).unwrap();

        // act
        let placement = player.take_action(&SingleCell::default());

        // assert
        assert_eq!(placement, Some(Placement::new(0, Color::Black)));
    }
}

#[test]
fn no_legal_move_gives_no_action() {
    let mut player = quick(MctsPlayer::new("role=white T=20").unwrap());
    let board: NoGoBoard = "X.".parse().unwrap();

    assert_eq!(player.take_action(&board), None);
    assert_eq!(player.take_action(&SingleCell(Some(Color::Black))), None);
}

#[test]
fn mcts_player_plays_the_winning_cell() {
    let mut player = quick(MctsPlayer::new("role=black seed=1 T=300").unwrap());

    let placement = player.take_action(&NoGoBoard::new(3, 1));

    assert_eq!(placement, Some(Placement::new(1, Color::Black)));
}

#[test]
fn same_seed_gives_same_decisions() {
    let mut first = quick(MctsPlayer::new("role=black seed=5 T=150").unwrap());
    let mut second = quick(MctsPlayer::new("role=black seed=5 T=150").unwrap());
    let mut board = NoGoBoard::new(5, 5);

    for _ in 0..3 {
        let placement = first.take_action(&board);
        assert_eq!(placement, second.take_action(&board));
        let placement = placement.unwrap();
        assert_eq!(board.place(placement), Legality::Legal);
        let reply = board.legal_cells(Color::White)[0];
        assert_eq!(board.place(Placement::new(reply, Color::White)), Legality::Legal);
    }
}

#[test]
fn invalid_role_is_rejected() {
    assert!(matches!(
        MctsPlayer::new("role=red"),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        MctsPlayer::new(""),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        RandomPlayer::new("role=green"),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn invalid_name_is_rejected() {
    assert!(matches!(
        MctsPlayer::new("name=bad(name) role=black"),
        Err(Error::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        RandomPlayer::new("name=a;b role=white"),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn malformed_numbers_fall_back_to_defaults() {
    let player = MctsPlayer::new("role=white T=lots exp=?").unwrap();

    assert_eq!(player.config(), &SearchConfig::default());
    assert_eq!(player.color(), Color::White);
}

#[test]
fn malformed_seed_is_rejected() {
    assert!(matches!(
        MctsPlayer::new("role=black seed=x"),
        Err(Error::InvalidConfiguration { .. })
    ));
}

#[test]
fn agents_expose_their_arguments() {
    let mut player: Box<dyn Agent<NoGoBoard>> =
        Box::new(MctsPlayer::new("name=deep role=black T=10").unwrap());

    assert_eq!(player.name(), "deep");
    assert_eq!(player.role(), "black");
    assert_eq!(player.args().property("T"), Some("10"));
    assert!(!player.check_for_win(&NoGoBoard::default()));

    player.notify("name=deeper");
    assert_eq!(player.name(), "deeper");

    let random: Box<dyn Agent<NoGoBoard>> = Box::new(RandomPlayer::new("role=white").unwrap());
    assert_eq!(random.name(), "random");
}

#[test]
fn game_between_mcts_and_random_ends_with_a_stuck_side() {
    // arrange
    let mut mcts = quick(MctsPlayer::new("role=black seed=3 T=60").unwrap());
    let mut random = RandomPlayer::new("role=white seed=4").unwrap();
    let mut board = NoGoBoard::new(4, 4);
    let mut agents: [&mut dyn Agent<NoGoBoard>; 2] = [&mut mcts, &mut random];
    for agent in agents.iter_mut() {
        agent.open_episode("");
    }

    // act
    let mut side = 0;
    let mut placements = 0;
    let loser = loop {
        let Some(placement) = agents[side].take_action(&board) else {
            break side;
        };
        assert_eq!(board.place(placement), Legality::Legal);
        placements += 1;
        side = 1 - side;
    };
    for agent in agents.iter_mut() {
        agent.close_episode("");
    }

    // assert
    let loser_color = if loser == 0 { Color::Black } else { Color::White };
    assert!(board.legal_cells(loser_color).is_empty());
    assert!(placements > 0);
    assert!(placements <= 16);
}
