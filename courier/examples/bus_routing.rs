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

//! A bus demultiplexing to named handlers: `shout` and `whisper` selectors
//! transform text, unknown selectors hit the fallback.

use courier::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut runtime = CourierApp::launch();
    tracing::info!("starting bus demo");

    let bus = runtime
        .new_bus()
        .route("shout", |payload| {
            let Some(text) = payload.as_any().downcast_ref::<String>() else {
                return Reply::ready();
            };
            Reply::with(text.to_uppercase())
        })
        .route("whisper", |payload| {
            let Some(text) = payload.as_any().downcast_ref::<String>() else {
                return Reply::ready();
            };
            Reply::with(text.to_lowercase())
        })
        .start()
        .await;

    let loud = bus
        .subscriber("shout")
        .call("hello bus".to_string(), None)
        .await?;
    println!("shout   -> {:?}", loud.downcast::<String>());

    let quiet = bus
        .subscriber("whisper")
        .call("HELLO BUS".to_string(), None)
        .await?;
    println!("whisper -> {:?}", quiet.downcast::<String>());

    match bus.subscriber("sing").call("la la la".to_string(), None).await {
        Err(CallError::Handler(HandlerError::UnknownSelector(selector))) => {
            println!("no handler registered for '{selector}'");
        }
        other => println!("unexpected outcome: {other:?}"),
    }

    bus.stop().await?;
    Ok(())
}
