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

use std::time::Duration;

use tokio::sync::mpsc::unbounded_channel;
use tokio::time::timeout;

use courier::prelude::*;

use crate::setup::{actors::counter::Counter, initialize_tracing, messages::Ping};

mod setup;

/// Stop is graceful: everything accepted before the terminate signal is
/// still dispatched, and `after_stop` observes the final state.
#[tokio::test(flavor = "multi_thread")]
async fn test_stop_drains_mailbox() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx, mut rx) = unbounded_channel::<usize>();
    let mut actor = runtime.new_actor_with_name::<Counter>("drainer");
    actor
        .on_message(|actor, _context| {
            actor.model.received += 1;
            Reply::ready()
        })
        .after_stop(move |actor| {
            let _ = tx.send(actor.model.received);
            async {}
        });
    let handle = actor.start().await;

    for _ in 0..100 {
        handle.put(Ping);
    }
    handle.stop().await?;

    let final_count = timeout(Duration::from_secs(5), rx.recv())
        .await?
        .expect("after_stop channel closed");
    assert_eq!(final_count, 100, "stop discarded accepted messages");
    Ok(())
}

/// Lifecycle hooks fire in order around the event loop.
#[tokio::test(flavor = "multi_thread")]
async fn test_lifecycle_hook_order() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx, mut rx) = unbounded_channel::<&'static str>();
    let before_start_tx = tx.clone();
    let after_start_tx = tx.clone();
    let before_stop_tx = tx.clone();
    let after_stop_tx = tx.clone();

    let mut actor = runtime.new_actor_with_name::<()>("hooked");
    actor
        .before_start(move |_actor| {
            let _ = before_start_tx.send("before_start");
            async {}
        })
        .after_start(move |_actor| {
            let _ = after_start_tx.send("after_start");
            async {}
        })
        .before_stop(move |_actor| {
            let _ = before_stop_tx.send("before_stop");
            async {}
        })
        .after_stop(move |_actor| {
            let _ = after_stop_tx.send("after_stop");
            async {}
        });
    let handle = actor.start().await;
    handle.stop().await?;

    let mut observed = Vec::new();
    for _ in 0..4 {
        observed.push(
            timeout(Duration::from_secs(5), rx.recv())
                .await?
                .expect("hook channel closed"),
        );
    }
    assert_eq!(
        observed,
        vec!["before_start", "after_start", "before_stop", "after_stop"]
    );
    Ok(())
}

/// A panicking handler is contained at the dispatch boundary: the panic is
/// reported, the event loop survives, and later messages are processed.
#[tokio::test(flavor = "multi_thread")]
async fn test_handler_panic_is_contained() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx, mut rx) = unbounded_channel::<usize>();
    let mut actor = runtime.new_actor_with_name::<()>("flaky");
    actor.on_message(move |_actor, context| {
        let Some(n) = context.downcast_ref::<usize>().copied() else {
            return Reply::ready();
        };
        if n == 13 {
            panic!("unlucky payload");
        }
        let _ = tx.send(n);
        Reply::ready()
    });
    let handle = actor.start().await;

    handle.put(1_usize);
    handle.put(13_usize);
    handle.put(2_usize);

    let first = timeout(Duration::from_secs(5), rx.recv())
        .await?
        .expect("channel closed");
    let second = timeout(Duration::from_secs(5), rx.recv())
        .await?
        .expect("channel closed");
    assert_eq!((first, second), (1, 2));

    // A panic inside a call handler surfaces as a handler error to the caller.
    let error = handle
        .call(13_usize, Some(Duration::from_secs(5)))
        .await
        .expect_err("panicking call must fail");
    assert!(matches!(
        error,
        CallError::Handler(HandlerError::Panicked(_))
    ));

    handle.stop().await?;
    Ok(())
}

/// Stopping twice is harmless.
#[tokio::test(flavor = "multi_thread")]
async fn test_double_stop() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let handle = runtime.new_actor_with_name::<()>("once").start().await;
    handle.stop().await?;
    handle.stop().await?;
    Ok(())
}

/// `shutdown_all` stops every actor created through the runtime.
#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_all() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let first = runtime.new_actor_with_name::<()>("one").start().await;
    let second = runtime.new_actor_with_name::<()>("two").start().await;
    let third = runtime.new_actor_with_name::<()>("three").start().await;
    assert_eq!(runtime.actor_count(), 3);

    runtime.shutdown_all().await?;
    assert_eq!(runtime.actor_count(), 0);

    // All mailboxes are closed now; calls fail fast.
    for handle in [&first, &second, &third] {
        let result = handle.call(1_u32, Some(Duration::from_secs(1))).await;
        assert!(matches!(result, Err(CallError::MailboxClosed)));
    }
    Ok(())
}
