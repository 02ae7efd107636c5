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

use crate::setup::initialize_tracing;

mod setup;

/// Send 1000 messages to one bus handler through its subscriber handle.
#[tokio::test(flavor = "multi_thread")]
async fn test_bus_put() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx, mut rx) = unbounded_channel::<usize>();
    let bus = runtime
        .new_bus()
        .route("collect", move |payload| {
            if let Some(n) = payload.as_any().downcast_ref::<usize>() {
                let _ = tx.send(*n);
            }
            Reply::ready()
        })
        .start()
        .await;

    let collect = bus.subscriber("collect");
    for n in 0..1000_usize {
        collect.put(n);
        let observed = timeout(Duration::from_secs(5), rx.recv())
            .await?
            .expect("bus channel closed");
        assert_eq!(observed, n);
    }

    bus.stop().await?;
    Ok(())
}

/// An actor calling a bus handler from inside its own handler, 1000 rounds.
#[tokio::test(flavor = "multi_thread")]
async fn test_bus_call() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let bus = runtime
        .new_bus()
        .route("echo", |payload| Reply::forward(payload))
        .start()
        .await;
    let echo = bus.subscriber("echo");

    let (tx, mut rx) = unbounded_channel::<u32>();
    let mut driver = runtime.new_actor_with_name::<()>("driver");
    driver.on_message(move |actor, context| {
        let Some(n) = context.downcast_ref::<u32>().copied() else {
            return Reply::ready();
        };
        let me = actor.handle.clone();
        let echo = echo.clone();
        let results = tx.clone();
        Reply::from_async(async move {
            let response = echo
                .call_from(&me, n, Some(Duration::from_secs(5)))
                .await
                .map_err(|err| HandlerError::failed(err.to_string()))?;
            let value = response.downcast::<u32>().expect("echo returns u32");
            let _ = results.send(value);
            Reply::none()
        })
    });
    let driver_handle = driver.start().await;

    for n in 0..1000_u32 {
        driver_handle.put(n);
        let observed = timeout(Duration::from_secs(5), rx.recv())
            .await?
            .expect("driver channel closed");
        assert_eq!(observed, n);
    }

    driver_handle.stop().await?;
    bus.stop().await?;
    Ok(())
}

/// Selector routing: selector `a` only ever reaches handler `a`; an
/// unregistered selector reaches `on_invalid_call` and nothing else.
#[tokio::test(flavor = "multi_thread")]
async fn test_selector_routing() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let (tx_a, mut rx_a) = unbounded_channel::<usize>();
    let (tx_b, mut rx_b) = unbounded_channel::<usize>();
    let (tx_invalid, mut rx_invalid) = unbounded_channel::<String>();

    let bus = runtime
        .new_bus()
        .route("a", move |payload| {
            if let Some(n) = payload.as_any().downcast_ref::<usize>() {
                let _ = tx_a.send(*n);
            }
            Reply::ready()
        })
        .route("b", move |payload| {
            if let Some(n) = payload.as_any().downcast_ref::<usize>() {
                let _ = tx_b.send(*n);
            }
            Reply::ready()
        })
        .on_invalid_call(move |selector, _payload| {
            let name = selector.as_deref().unwrap_or("<none>").to_string();
            let _ = tx_invalid.send(name);
            Reply::ready()
        })
        .start()
        .await;

    for n in 0..100_usize {
        bus.subscriber("a").put(n);
    }
    bus.subscriber("c").put(999_usize);

    for expected in 0..100_usize {
        let observed = timeout(Duration::from_secs(5), rx_a.recv())
            .await?
            .expect("handler a channel closed");
        assert_eq!(observed, expected);
    }
    let unroutable = timeout(Duration::from_secs(5), rx_invalid.recv())
        .await?
        .expect("invalid channel closed");
    assert_eq!(unroutable, "c");

    // Handler b saw nothing at all.
    assert!(
        timeout(Duration::from_millis(200), rx_b.recv()).await.is_err(),
        "selector routing leaked into handler b"
    );

    bus.stop().await?;
    Ok(())
}

/// The default fallback answers calls to unknown selectors with an
/// `UnknownSelector` error instead of failing the bus.
#[tokio::test(flavor = "multi_thread")]
async fn test_default_invalid_call_reports_routing_error() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let bus = runtime
        .new_bus()
        .route("known", |payload| Reply::forward(payload))
        .start()
        .await;

    let error = bus
        .subscriber("unknown")
        .call(1_u32, Some(Duration::from_secs(5)))
        .await
        .expect_err("unknown selector must fail the call");
    match error {
        CallError::Handler(HandlerError::UnknownSelector(selector)) => {
            assert_eq!(selector, "unknown");
        }
        other => panic!("expected UnknownSelector, got {other:?}"),
    }

    // The bus survived the routing failure.
    let response = bus
        .subscriber("known")
        .call(2_u32, Some(Duration::from_secs(5)))
        .await
        .expect("known selector failed after routing error");
    assert_eq!(response.downcast::<u32>(), Some(2));

    bus.stop().await?;
    Ok(())
}

/// Handlers on the same bus share one mailbox: two selectors hammered from
/// separate producers never run concurrently.
#[tokio::test(flavor = "multi_thread")]
async fn test_bus_handlers_are_mutually_exclusive() -> anyhow::Result<()> {
    initialize_tracing();
    let mut runtime = CourierApp::launch();

    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let processed = Arc::new(AtomicUsize::new(0));

    let make_route = |in_flight: Arc<AtomicUsize>,
                      peak: Arc<AtomicUsize>,
                      processed: Arc<AtomicUsize>| {
        move |_payload: Arc<dyn ActorMessage>| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            let processed = processed.clone();
            Reply::from_async(async move {
                let concurrent = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(concurrent, Ordering::SeqCst);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                processed.fetch_add(1, Ordering::SeqCst);
                Reply::none()
            })
        }
    };

    let bus = runtime
        .new_bus()
        .route(
            "left",
            make_route(in_flight.clone(), peak.clone(), processed.clone()),
        )
        .route(
            "right",
            make_route(in_flight.clone(), peak.clone(), processed.clone()),
        )
        .start()
        .await;

    let left = bus.subscriber("left");
    let right = bus.subscriber("right");
    let producer_a = tokio::spawn(async move {
        for n in 0..500_usize {
            left.put(n);
        }
    });
    let producer_b = tokio::spawn(async move {
        for n in 0..500_usize {
            right.put(n);
        }
    });
    producer_a.await?;
    producer_b.await?;

    bus.stop().await?;

    assert_eq!(processed.load(Ordering::SeqCst), 1000);
    assert_eq!(
        peak.load(Ordering::SeqCst),
        1,
        "two bus handlers overlapped"
    );
    Ok(())
}
