use crate::plugin::command_relay::CommandRelay;
use crate::plugin::room_plugin::{RoomCommandPlugin, RoomOwnerPlugin};
use futures::FutureExt;
use futures::future::join_all;
use roomlink_core::{InboundFrame, RoomCommand, UserRequest};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Routes inbound frames to the registered plugins.
///
/// Owner and command plugins live in separate ordered lists. For one frame
/// every plugin is started without waiting on the others, but all of them
/// are polled from the caller's task: invocations interleave only at their
/// await points and never run at the same time. A failing or panicking
/// plugin is logged and never affects its siblings.
pub struct Dispatcher {
    owners: Vec<Arc<dyn RoomOwnerPlugin>>,
    commands: Vec<Arc<dyn RoomCommandPlugin>>,
    relay: Option<Arc<dyn CommandRelay>>,
}

impl Dispatcher {
    /// Dispatcher for the session that opened the room.
    pub fn owner(
        owners: Vec<Arc<dyn RoomOwnerPlugin>>,
        commands: Vec<Arc<dyn RoomCommandPlugin>>,
        relay: Arc<dyn CommandRelay>,
    ) -> Self {
        Self {
            owners,
            commands,
            relay: Some(relay),
        }
    }

    /// Dispatcher for a joined session. It has no owner role and ignores
    /// request frames.
    pub fn member(commands: Vec<Arc<dyn RoomCommandPlugin>>) -> Self {
        Self {
            owners: Vec::new(),
            commands,
            relay: None,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.relay.is_some()
    }

    /// Handles one raw text frame. Never fails: malformed and unknown frames
    /// are dropped.
    pub async fn dispatch(&self, text: &str) {
        let frame = match InboundFrame::parse(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping malformed frame: {}", e);
                return;
            }
        };

        match frame {
            InboundFrame::Request(request) => self.handle_request(request).await,
            InboundFrame::Command(command) => self.execute(command).await,
            InboundFrame::Unknown(kind) => debug!("Ignoring frame of unknown type '{}'", kind),
        }
    }

    async fn handle_request(&self, request: UserRequest) {
        let Some(relay) = &self.relay else {
            debug!("Ignoring request frame on a non-owner session");
            return;
        };

        let commands = self.collect_commands(request).await;
        if commands.is_empty() {
            return;
        }

        debug!("Relaying {} owner commands", commands.len());
        if let Err(e) = relay.relay(commands).await {
            error!("Failed to relay owner commands: {}", e);
        }
    }

    /// Offers `request` to every owner plugin and flattens the replies in
    /// registration order, whatever order the plugins finish in.
    pub async fn collect_commands(&self, request: UserRequest) -> Vec<RoomCommand> {
        let calls = self.owners.iter().map(|plugin| {
            AssertUnwindSafe(plugin.on_request(request.clone())).catch_unwind()
        });

        join_all(calls)
            .await
            .into_iter()
            .enumerate()
            .flat_map(|(index, outcome)| match outcome {
                Ok(Ok(reply)) => reply.into_commands(),
                Ok(Err(e)) => {
                    warn!("Owner plugin #{} failed: {:#}", index, e);
                    Vec::new()
                }
                Err(panic) => {
                    warn!("Owner plugin #{} panicked: {}", index, panic_message(&*panic));
                    Vec::new()
                }
            })
            .collect()
    }

    /// Runs `command` through every command plugin.
    pub async fn execute(&self, command: RoomCommand) {
        let calls = self.commands.iter().map(|plugin| {
            AssertUnwindSafe(plugin.execute(command.clone())).catch_unwind()
        });

        for (index, outcome) in join_all(calls).await.into_iter().enumerate() {
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    "Command plugin #{} failed on '{}': {:#}",
                    index, command.name, e
                ),
                Err(panic) => warn!(
                    "Command plugin #{} panicked on '{}': {}",
                    index,
                    command.name,
                    panic_message(&*panic)
                ),
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
