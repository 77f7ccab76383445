mod common;

use common::{harness, player, ScriptedRandom};
use handcricket::domain::ports::SessionStore;
use handcricket::infrastructure::local_ledger::LocalLedger;
use std::sync::Arc;
use std::time::Duration;

// Every draw is 5 while every play is 3, so the batsman is never out and the
// final score must be exactly 3 per accepted call.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_plays_are_sequenced_per_player() {
    let h = harness(
        LocalLedger::auto_settling(),
        Box::new(ScriptedRandom::new(&[], &[])),
    );
    let p = player();

    h.engine.start(&p).await.unwrap();

    let engine = Arc::new(h.engine);
    let mut handles = Vec::new();
    for i in 0..20u64 {
        let engine = engine.clone();
        let p = p.clone();
        handles.push(tokio::spawn(async move {
            // Stagger slightly so calls overlap in different interleavings.
            tokio::time::sleep(Duration::from_millis(i % 5)).await;
            engine.play(&p, "3").await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // No update lost, none double-applied.
    let session = h.store.get(&p).await.unwrap().unwrap();
    assert_eq!(session.score(), Some(20 * 3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_players_do_not_interfere() {
    let h = harness(
        LocalLedger::auto_settling(),
        Box::new(ScriptedRandom::new(&[], &[])),
    );
    let engine = Arc::new(h.engine);

    let addresses = [
        "BatsmanAAA11111111111111111111111",
        "BatsmanBBB11111111111111111111111",
        "BatsmanCCC11111111111111111111111",
    ];

    let mut handles = Vec::new();
    for address in addresses {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let p = handcricket::domain::session::PlayerId::parse(address).unwrap();
            engine.start(&p).await.unwrap();
            for _ in 0..10 {
                engine.play(&p, "3").await.unwrap();
            }
            p
        }));
    }

    for handle in handles {
        let p = handle.await.unwrap();
        let session = h.store.get(&p).await.unwrap().unwrap();
        assert_eq!(session.score(), Some(30));
    }
}
