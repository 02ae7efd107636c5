/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::unbounded_channel;
use tokio::time::timeout;

use courier::prelude::*;

use crate::setup::{initialize_tracing, messages::Tagged};

mod setup;

/// Mutual exclusion: under concurrent puts from many producers, no two
/// handler invocations for the same actor ever overlap.
#[tokio::test(flavor = "multi_thread")]
async fn test_handler_mutual_exclusion() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let processed = Arc::new(AtomicUsize::new(0));

    let mut actor = runtime.new_actor_with_name::<()>("exclusive");
    {
        let in_flight = in_flight.clone();
        let peak = peak.clone();
        let processed = processed.clone();
        actor.on_message(move |_actor, _context| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            let processed = processed.clone();
            Reply::from_async(async move {
                let concurrent = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(concurrent, Ordering::SeqCst);
                // Yield inside the critical section so overlap would show up.
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                processed.fetch_add(1, Ordering::SeqCst);
                Reply::none()
            })
        });
    }
    let handle = actor.start().await;

    let mut producers = Vec::new();
    for _ in 0..8 {
        let handle = handle.clone();
        producers.push(tokio::spawn(async move {
            for n in 0..125_usize {
                handle.put(n);
            }
        }));
    }
    for producer in producers {
        producer.await?;
    }

    handle.stop().await?;

    assert_eq!(processed.load(Ordering::SeqCst), 1000);
    assert_eq!(
        peak.load(Ordering::SeqCst),
        1,
        "handler invocations overlapped"
    );
    Ok(())
}

/// FIFO holds per (sender, receiver) pair even when producers interleave:
/// each producer's sequence numbers arrive strictly increasing.
#[tokio::test(flavor = "multi_thread")]
async fn test_fifo_per_producer_under_interleaving() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx, mut rx) = unbounded_channel::<Tagged>();
    let mut actor = runtime.new_actor_with_name::<()>("ordered");
    actor.on_message(move |_actor, context| {
        if let Some(tagged) = context.downcast_ref::<Tagged>() {
            let _ = tx.send(tagged.clone());
        }
        Reply::ready()
    });
    let handle = actor.start().await;

    let mut producers = Vec::new();
    for producer in 0..4 {
        let handle = handle.clone();
        producers.push(tokio::spawn(async move {
            for seq in 0..250_usize {
                handle.put(Tagged { producer, seq });
            }
        }));
    }
    for producer in producers {
        producer.await?;
    }
    handle.stop().await?;

    let mut next_expected = [0_usize; 4];
    let mut total = 0;
    while let Ok(Some(tagged)) = timeout(Duration::from_secs(5), rx.recv()).await {
        assert_eq!(
            tagged.seq, next_expected[tagged.producer],
            "producer {} reordered",
            tagged.producer
        );
        next_expected[tagged.producer] += 1;
        total += 1;
        if total == 1000 {
            break;
        }
    }
    assert_eq!(total, 1000);
    Ok(())
}

/// Actors make progress independently: a fast actor finishes its workload
/// while a slow actor is still grinding through its own mailbox.
#[tokio::test(flavor = "multi_thread")]
async fn test_actors_run_in_parallel() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (slow_tx, mut slow_rx) = unbounded_channel::<usize>();
    let mut slow = runtime.new_actor_with_name::<()>("slow");
    slow.on_message(move |_actor, context| {
        let n = context.downcast_ref::<usize>().copied();
        let done = slow_tx.clone();
        Reply::from_async(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if let Some(n) = n {
                let _ = done.send(n);
            }
            Reply::none()
        })
    });
    let slow_handle = slow.start().await;

    let (fast_tx, mut fast_rx) = unbounded_channel::<usize>();
    let mut fast = runtime.new_actor_with_name::<()>("fast");
    fast.on_message(move |_actor, context| {
        if let Some(n) = context.downcast_ref::<usize>() {
            let _ = fast_tx.send(*n);
        }
        Reply::ready()
    });
    let fast_handle = fast.start().await;

    for n in 0..5_usize {
        slow_handle.put(n);
    }
    for n in 0..100_usize {
        fast_handle.put(n);
    }

    // The fast actor's full workload completes while the slow actor still
    // has messages queued behind its sleeps.
    for _ in 0..100 {
        timeout(Duration::from_secs(5), fast_rx.recv())
            .await?
            .expect("fast channel closed");
    }
    let slow_done = slow_rx.len();
    assert!(
        slow_done < 5,
        "slow actor finished everything before the fast actor; no parallelism observed"
    );

    // The slow actor still completes its mailbox eventually.
    for _ in 0..5 {
        timeout(Duration::from_secs(5), slow_rx.recv())
            .await?
            .expect("slow channel closed");
    }

    slow_handle.stop().await?;
    fast_handle.stop().await?;
    Ok(())
}
