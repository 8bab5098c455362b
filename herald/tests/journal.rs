//! End-to-end: a debugging subsystem publishing through the journal.

use herald::{
    Attributes, AttributeValue, Broadcaster, Journal, Listener,
    listeners::{Channel, ChannelOutputListener, TracingListener},
    testing::{CollectingSink, RecordingListener, RecordingOutbound},
};
use std::{sync::Arc, time::Duration};

mod common;
use common::{MOD_LOG, home_guild};

/// The debugging subsystem: it only knows its broadcaster.
struct Debugging {
    journal: Broadcaster,
}

impl Debugging {
    fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.broadcaster("/debug"),
        }
    }

    async fn test_error(&self) -> Result<(), &'static str> {
        self.journal
            .send(
                "error/runtime",
                Some(home_guild()),
                "Raising runtime error",
                Attributes::new().with("icon", "error"),
            )
            .await;
        Err("Intentionally raised exception")
    }

    async fn test_network_error(&self) {
        self.journal
            .send(
                "error/network",
                Some(home_guild()),
                "Raising network error",
                Attributes::new().with("icon", "error"),
            )
            .await;
    }

    async fn shutdown(&self) {
        self.journal
            .send(
                "admin/shutdown",
                Some(home_guild()),
                "Shutting down bot",
                Attributes::new().with("icon", "shutdown"),
            )
            .await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_debug_subsystem_end_to_end() {
    common::init_tracing();
    let sink = CollectingSink::new();
    let journal = Journal::with_sink(common::throttle(), sink.shared());
    let outbound = RecordingOutbound::new();

    let errors = RecordingListener::new("/debug/error");
    journal.register(errors.clone());
    journal.register(TracingListener::new("/debug").with_level(tracing::Level::DEBUG));
    journal.register(ChannelOutputListener::new(
        "/debug/admin",
        Channel::new(MOD_LOG, "mod-log"),
        Arc::new(outbound.clone()),
        journal.queue().clone(),
    ));

    let debugging = Debugging::new(&journal);
    assert!(debugging.test_error().await.is_err());
    debugging.test_network_error().await;
    debugging.shutdown().await;

    assert_eq!(
        errors.handled_paths(),
        vec!["/debug/error/runtime", "/debug/error/network"]
    );
    let icons: Vec<_> = errors
        .handled()
        .iter()
        .map(|event| event.attributes.get("icon").cloned())
        .collect();
    assert_eq!(icons, vec![Some(AttributeValue::from("error")); 2]);

    while outbound.count() < 1 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(outbound.sent()[0].1.content, "Shutting down bot");
    assert!(journal.is_running());
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_spawned_send_is_fire_and_forget() {
    let journal = Journal::start(common::throttle());
    let recorder = RecordingListener::new("/moderation").exact();
    journal.register(recorder.clone());

    let handle = journal
        .broadcaster("/moderation")
        .spawn_send("", None, "fire and forget", Attributes::new());
    handle.await.unwrap();

    assert_eq!(recorder.handled_paths(), vec!["/moderation"]);
    assert_eq!(Listener::path(&recorder).as_str(), "/moderation");
}

#[tokio::test]
async fn test_journal_shares_one_queue() {
    let journal = Journal::start(common::throttle());
    let copy = journal.clone();
    let (tx, rx) = tokio::sync::oneshot::channel();
    copy.queue()
        .push_fn(async move {
            let _ = tx.send(());
            Ok::<(), herald::BoxError>(())
        })
        .unwrap();
    rx.await.unwrap();
    assert!(journal.queue().is_empty());
    assert_eq!(journal.queue().config(), &common::throttle());
}
