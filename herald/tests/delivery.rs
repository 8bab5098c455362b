use herald::{BoxError, DispatchConfig, DispatchQueue, testing::CollectingSink};
use std::{
    num::NonZeroUsize,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{sync::oneshot, time::Instant};

mod common;

#[test]
fn test_delay_table() {
    let config = common::throttle();
    let expected = [
        (0, 0),
        (4, 0),
        (5, 1),
        (9, 1),
        (10, 2),
        (27, 5),
        (49, 9),
        (50, 10),
        (500, 10),
    ];
    for (depth, secs) in expected {
        assert_eq!(
            config.delay_for_depth(depth),
            Duration::from_secs(secs),
            "depth {depth}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_burst_is_smoothed() {
    let sink = CollectingSink::new();
    let (queue, worker) = DispatchQueue::new(common::throttle(), sink.shared());
    let stamps = Arc::new(Mutex::new(Vec::new()));

    // 20 actions: the first 15 run while at least 5 are still pending.
    for _ in 0..20 {
        let stamps = stamps.clone();
        queue
            .push_fn(async move {
                stamps.lock().unwrap().push(Instant::now());
                Ok::<(), BoxError>(())
            })
            .unwrap();
    }
    let (tx, rx) = oneshot::channel();
    queue
        .push_fn(async move {
            let _ = tx.send(());
            Ok::<(), BoxError>(())
        })
        .unwrap();

    let started = Instant::now();
    worker.start();
    rx.await.unwrap();

    // Remaining after each action: 20, 19, ..., 1 (the done action counts).
    // Sleeps: floor(remaining / 5) seconds for every one of the 20 actions.
    let expected: u64 = (1..=20u64).map(|remaining| remaining / 5).sum();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(expected), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_secs(expected + 1), "elapsed {elapsed:?}");
    assert_eq!(stamps.lock().unwrap().len(), 20);
    assert_eq!(sink.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_delay_is_capped() {
    let config = DispatchConfig::new(
        NonZeroUsize::new(1).unwrap(),
        Duration::from_secs(5),
        Duration::from_secs(7),
    );
    let sink = CollectingSink::new();
    let (queue, worker) = DispatchQueue::new(config, sink.shared());

    let stamps = Arc::new(Mutex::new(Vec::new()));
    for _ in 0..4 {
        let stamps = stamps.clone();
        queue
            .push_fn(async move {
                stamps.lock().unwrap().push(Instant::now());
                Ok::<(), BoxError>(())
            })
            .unwrap();
    }
    assert_eq!(queue.current_delay(), Duration::from_secs(7));

    worker.start();
    while stamps.lock().unwrap().len() < 4 {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let stamps = stamps.lock().unwrap();
    // After the first action 3 remain (15s, capped to 7s); then 2 (10s -> 7s);
    // then 1 (5s).
    let gaps: Vec<u64> = stamps
        .windows(2)
        .map(|w| (w[1] - w[0]).as_secs())
        .collect();
    assert_eq!(gaps, vec![7, 7, 5]);
}

#[tokio::test(start_paused = true)]
async fn test_failures_are_reported_and_skipped() {
    let sink = CollectingSink::new();
    let (queue, worker) = DispatchQueue::new(common::throttle(), sink.shared());
    let ran = Arc::new(Mutex::new(Vec::new()));

    for id in 0..4 {
        let ran = ran.clone();
        queue
            .push_fn(async move {
                ran.lock().unwrap().push(id);
                if id % 2 == 0 {
                    Err::<(), BoxError>(format!("action {id} rejected").into())
                } else {
                    Ok(())
                }
            })
            .unwrap();
    }
    let (tx, rx) = oneshot::channel();
    queue
        .push_fn(async move {
            let _ = tx.send(());
            Ok::<(), BoxError>(())
        })
        .unwrap();

    worker.start();
    rx.await.unwrap();

    assert_eq!(*ran.lock().unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(sink.count(), 2);
}

#[tokio::test]
async fn test_push_from_many_tasks() {
    let sink = CollectingSink::new();
    let (queue, worker) = DispatchQueue::new(common::throttle(), sink.shared());

    let mut producers = Vec::new();
    for _ in 0..8 {
        let queue = queue.clone();
        producers.push(tokio::spawn(async move {
            for _ in 0..100 {
                queue
                    .push_fn(async { Ok::<(), BoxError>(()) })
                    .unwrap();
            }
        }));
    }
    for producer in producers {
        producer.await.unwrap();
    }

    assert_eq!(queue.len(), 800);
    drop(worker);
}
