use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use karrot::{
    audio::Muted,
    config::GameConfig,
    field::ItemKind,
    game::{Game, StopReason},
    hud::Hud,
    runtime::{FixedTicker, GameEvent, Runner, TestEventSource},
};

fn click(column: u16, row: u16) -> GameEvent {
    GameEvent::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn seeded_game(duration: u32, carrots: u32, bugs: u32) -> Game<Hud, Muted> {
    let config = GameConfig::new(duration, carrots, bugs).unwrap();
    let mut game = Game::seeded(config, 77, Hud::default(), Muted);
    game.resize_field(50, 15);
    game
}

// Headless integration using the runtime + Game without a TTY.
// Each Tick is treated as a quarter second of game time.
#[test]
fn headless_clicking_flow_wins() {
    let mut game = seeded_game(10, 3, 0);
    let stops = game.subscribe();
    game.start();

    // topmost first, so overlapping carrots never shadow a later click
    let (tx, rx) = mpsc::channel();
    for item in game.field().items().iter().rev() {
        let (x, y) = item.cell();
        tx.send(click(x, y)).unwrap();
    }

    let es = TestEventSource::new(rx);
    let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));

    for _ in 0..200u32 {
        match runner.step() {
            GameEvent::Tick => game.on_tick(Duration::from_millis(250)),
            GameEvent::Mouse(m) => {
                game.click_at(m.column, m.row);
            }
            GameEvent::Key(_) | GameEvent::Resize => {}
        }
        if !game.is_running() {
            break;
        }
    }

    assert_eq!(stops.try_recv(), Ok(StopReason::Win));
    assert_eq!(game.score(), 3);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let mut game = seeded_game(1, 3, 3);
    let stops = game.subscribe();
    game.start();

    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));

    for _ in 0..50u32 {
        if let GameEvent::Tick = runner.step() {
            game.on_tick(Duration::from_millis(250));
        }
        if !game.is_running() {
            break;
        }
    }

    assert!(!game.is_running(), "timed session should finish by timeout");
    assert_eq!(stops.try_iter().collect::<Vec<_>>(), vec![StopReason::Lose]);
}

#[test]
fn headless_bug_click_ends_round() {
    let mut game = seeded_game(10, 3, 3);
    let stops = game.subscribe();
    game.start();

    let bug = game
        .field()
        .items()
        .iter()
        .rev()
        .find(|i| i.kind == ItemKind::Bug)
        .copied()
        .unwrap();
    let (x, y) = bug.cell();

    let (tx, rx) = mpsc::channel();
    tx.send(click(x, y)).unwrap();
    let es = TestEventSource::new(rx);
    let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(50)));

    if let GameEvent::Mouse(m) = runner.step() {
        game.click_at(m.column, m.row);
    }

    assert_eq!(stops.try_recv(), Ok(StopReason::Lose));
    assert_eq!(game.remaining_secs(), 10);
}
