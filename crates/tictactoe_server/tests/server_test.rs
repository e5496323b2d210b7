//! Tests for the server loop: dispatch, budgets and idle resets.

mod common;

use common::{ScriptedTransport, move_to, new_game, peer};
use std::time::Duration;
use tictactoe_core::Position;
use tictactoe_server::{DecodeError, GameServer, ServerConfig, SessionId, Step, Transition};

fn id(n: u8) -> SessionId {
    SessionId::new(n).unwrap()
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// The paused clock may round timers up to the next millisecond.
fn assert_about(actual: Duration, expected: Duration) {
    let slack = Duration::from_millis(1);
    assert!(
        actual + slack >= expected && actual <= expected + slack,
        "expected about {expected:?}, got {actual:?}"
    );
}

fn server() -> GameServer<ScriptedTransport> {
    GameServer::new(ScriptedTransport::new(), ServerConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_new_game_step() {
    let mut server = server();
    server.transport().push(secs(2), new_game(), peer(6001));

    let step = server.step().await;
    assert_eq!(
        step,
        Step::Handled {
            transition: Transition::Started {
                session: id(1),
                opening: Position::TopLeft
            },
            evicted: vec![],
        }
    );
    assert_eq!(server.roster().active_count(), 1);
    assert_eq!(*server.roster().get(id(1)).unwrap().remaining(), secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_slow_peer_is_evicted_while_others_play() {
    let mut server = server();
    server.transport().push(secs(0), new_game(), peer(6001));
    server.transport().push(secs(20), new_game(), peer(6002));
    server.transport().push(secs(15), move_to(2, 5), peer(6002));

    server.step().await;
    server.step().await;
    assert_about(*server.roster().get(id(1)).unwrap().remaining(), secs(10));
    assert_eq!(*server.roster().get(id(2)).unwrap().remaining(), secs(30));

    match server.step().await {
        Step::Handled {
            transition,
            evicted,
        } => {
            assert!(matches!(
                transition,
                Transition::Continued { session, .. } if session == id(2)
            ));
            assert_eq!(evicted, vec![id(1)]);
        }
        other => panic!("unexpected step {other:?}"),
    }
    assert!(server.roster().get(id(1)).unwrap().is_free());
    assert!(server.roster().get(id(2)).unwrap().is_bound_to(peer(6002)));
    assert_eq!(server.roster().active_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_silence_with_active_games_resets_roster() {
    let mut server = server();
    server.transport().push(secs(0), new_game(), peer(6001));
    server.transport().push(secs(1), new_game(), peer(6002));
    server.step().await;
    server.step().await;

    assert_eq!(server.step().await, Step::IdleReset(vec![id(1), id(2)]));
    assert_eq!(server.roster().active_count(), 0);

    // Nothing left to reset; further silence is just idle.
    assert_eq!(server.step().await, Step::Idle);
    assert_eq!(server.step().await, Step::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_discarded_datagrams_do_not_touch_budgets() {
    let mut server = server();
    server.transport().push(secs(0), new_game(), peer(6001));
    server.transport().push(secs(0), new_game(), peer(6002));
    server.transport().push(secs(25), vec![2, 0, 0, 0], peer(6003));
    server.transport().push(secs(10), move_to(2, 5), peer(6002));
    server.step().await;
    server.step().await;

    assert_eq!(
        server.step().await,
        Step::Discarded(DecodeError::UnsupportedVersion {
            found: 2,
            expected: 3
        })
    );
    assert_eq!(*server.roster().get(id(1)).unwrap().remaining(), secs(30));

    let step = server.step().await;
    assert!(matches!(step, Step::Handled { ref evicted, .. } if evicted.is_empty()));
    assert_about(*server.roster().get(id(1)).unwrap().remaining(), secs(20));
}

#[tokio::test(start_paused = true)]
async fn test_malformed_datagrams_are_discarded_without_reply() {
    let mut server = server();
    server.transport().push(secs(0), vec![], peer(6001));
    server.transport().push(secs(0), vec![3, 7, 0, 0], peer(6001));
    server.transport().push(secs(0), move_to(11, 5), peer(6001));

    assert_eq!(server.step().await, Step::Discarded(DecodeError::Empty));
    assert_eq!(server.step().await, Step::Discarded(DecodeError::UnknownCommand(7)));
    assert_eq!(
        server.step().await,
        Step::Discarded(DecodeError::InvalidSessionId { found: 11, max: 10 })
    );
    assert!(server.transport().sent().is_empty());
    assert_eq!(server.roster().active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_move_still_refreshes_target_budget() {
    let mut server = server();
    server.transport().push(secs(0), new_game(), peer(6001));
    server.transport().push(secs(12), move_to(1, 5), peer(6099));
    server.step().await;

    let step = server.step().await;
    assert!(matches!(
        step,
        Step::Handled {
            transition: Transition::Rejected { .. },
            ..
        }
    ));
    let game = server.roster().get(id(1)).unwrap();
    assert!(game.is_bound_to(peer(6001)));
    assert_eq!(*game.remaining(), secs(30));
    assert_eq!(server.transport().sent().len(), 1);
}
