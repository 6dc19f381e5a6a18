use cycle_snake::autoplay::AutoPlayer;
use cycle_snake::game::{Direction, GameConfig, GameEngine, GameError, Position, Snapshot, Status};
use cycle_snake::metrics::SimulationStats;
use cycle_snake::modes::{SimulateConfig, SimulateMode};

#[test]
fn test_autoplay_clears_six_by_six() {
    let player = AutoPlayer::new(6).unwrap();

    for seed in [1, 2, 3, 42, 1234] {
        let mut engine = GameEngine::new(GameConfig::small().with_seed(seed)).unwrap();
        let mut status = Status::Continue;
        while status == Status::Continue {
            let turn = player.play_turn(&mut engine).unwrap();
            assert!(!turn.decision.is_fallback(), "seed {} fell back", seed);
            status = turn.status;
        }
        assert_eq!(status, Status::Win, "seed {}", seed);
        assert_eq!(engine.remaining_growth(), 0);
        assert_eq!(engine.vacant_count(), 0);
    }
}

#[test]
fn test_autoplay_clears_eight_by_eight() {
    let mut config = GameConfig::new(8).with_seed(99);
    config.initial_body_length = 3;
    let mut mode = SimulateMode::new(SimulateConfig::new(3, config)).unwrap();

    let stats: SimulationStats = mode.run().unwrap();
    assert_eq!(stats.wins(), 3);
    assert_eq!(stats.fallbacks(), 0);
}

#[test]
fn test_straight_run_keeps_length() {
    for seed in 0..5 {
        let mut config = GameConfig::new(8).with_seed(seed);
        config.initial_body_length = 3;
        let mut engine = GameEngine::new(config).unwrap();
        let start = engine.body_len();

        for _ in 0..3 {
            assert_eq!(engine.tick(Direction::Right), Status::Continue);
        }
        assert_eq!(engine.head(), Position::new(3, 6));
        // Only eaten apples lengthen the body
        assert_eq!(engine.body_len(), start + engine.score() as usize);
    }
}

#[test]
fn test_leaving_the_board_from_a_corner_loses() {
    let mut engine = GameEngine::new(GameConfig::small().with_seed(7)).unwrap();

    for direction in [Direction::Up, Direction::Up, Direction::Left, Direction::Left] {
        assert_eq!(engine.tick(direction), Status::Continue);
    }
    assert_eq!(engine.head(), Position::new(0, 0));

    assert_eq!(engine.tick(Direction::Left), Status::Loss);
    assert!(!engine.is_running());
    assert_eq!(engine.steps(), 4);
    // Terminal games stay put
    assert_eq!(engine.tick(Direction::Down), Status::Loss);
    assert_eq!(engine.head(), Position::new(0, 0));
}

#[test]
fn test_snapshot_feeds_the_autoplayer() {
    let player = AutoPlayer::new(6).unwrap();
    let engine = GameEngine::new(GameConfig::small().with_seed(21)).unwrap();

    let text = engine.snapshot().to_string();
    let reparsed: Snapshot = text.parse().unwrap();
    assert_eq!(
        player.decide(&engine.snapshot()).unwrap(),
        player.decide(&reparsed).unwrap()
    );
}

#[test]
fn test_odd_board_has_no_autoplayer() {
    assert_eq!(
        AutoPlayer::new(7).unwrap_err(),
        GameError::OddBoard { size: 7 }
    );

    // The board itself is still playable by hand
    let mut config = GameConfig::new(7);
    config.initial_body_length = 2;
    assert!(GameEngine::new(config).is_ok());
}

#[test]
fn test_config_errors() {
    assert_eq!(
        GameEngine::new(GameConfig::new(4)).unwrap_err(),
        GameError::BoardTooSmall { size: 4, min: 5 }
    );

    let mut config = GameConfig::small();
    config.initial_body_length = 3;
    assert_eq!(
        GameEngine::new(config).unwrap_err(),
        GameError::BodyLengthOutOfRange {
            length: 3,
            max: 2,
            size: 6
        }
    );
}

#[test]
fn test_config_from_toml() {
    let config = GameConfig::from_toml_str("board_size = 8\nseed = 5\n").unwrap();
    assert_eq!(config.board_size, 8);
    assert_eq!(config.initial_body_length, 3);
    assert_eq!(config.seed, Some(5));
    assert!(config.validate().is_ok());
}
