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

//! A counter actor answering calls: `put` increments fire-and-forget, `call`
//! returns the running total.

use courier::prelude::*;

#[courier_message]
struct Increment;

#[courier_message]
struct Total;

#[courier_actor]
struct CounterState {
    count: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut runtime = CourierApp::launch();

    let mut counter = runtime.new_actor_with_name::<CounterState>("counter");
    counter.on_message(|actor, context| {
        if context.downcast_ref::<Increment>().is_some() {
            actor.model.count += 1;
            return Reply::ready();
        }
        if context.downcast_ref::<Total>().is_some() {
            return Reply::with(actor.model.count);
        }
        Reply::ready()
    });
    let counter_handle = counter.start().await;

    for _ in 0..10 {
        counter_handle.put(Increment);
    }

    let response = counter_handle.call(Total, None).await?;
    let total = response.downcast::<u64>().expect("counter returns u64");
    tracing::info!(total, "counter answered");
    println!("counted {total} increments");

    runtime.shutdown_all().await?;
    Ok(())
}
