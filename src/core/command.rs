//! External command port
//!
//! The native bridge and any other thread talk to a minimap instance by
//! sending [`MinimapCommand`]s through a [`MinimapHandle`]. The commands are
//! queued on a channel and applied on the core thread, so render state is
//! never touched from anywhere else.

use crate::core::geo::Vector2;
use crate::friends::FriendData;
use crate::traits::MarkerSource;
use crate::{MinimapError, Result};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Payload of the process-wide position update event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub position: Vector2,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PositionUpdate {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(MinimapError::from)?)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MinimapCommand {
    SetPosition(Vector2),
    PositionUpdate(PositionUpdate),
    /// `None` clears the friends list
    SetFriends(Option<Vec<FriendData>>),
    ZoomIn,
    ZoomOut,
}

/// Cloneable, thread-safe handle onto one minimap instance.
#[derive(Clone)]
pub struct MinimapHandle {
    sender: Sender<MinimapCommand>,
    markers: Option<Arc<dyn MarkerSource>>,
}

impl MinimapHandle {
    pub(crate) fn new(sender: Sender<MinimapCommand>, markers: Option<Arc<dyn MarkerSource>>) -> Self {
        Self { sender, markers }
    }

    pub fn send(&self, command: MinimapCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| MinimapError::Bridge("minimap is no longer running".to_string()))?;
        Ok(())
    }

    pub fn set_position(&self, position: Vector2) -> Result<()> {
        self.send(MinimapCommand::SetPosition(position))
    }

    pub fn set_friends(&self, friends: Option<Vec<FriendData>>) -> Result<()> {
        self.send(MinimapCommand::SetFriends(friends))
    }

    pub fn position_update(&self, update: PositionUpdate) -> Result<()> {
        self.send(MinimapCommand::PositionUpdate(update))
    }

    /// Current map markers, or `null` when no marker source was attached.
    pub fn markers(&self) -> Value {
        self.markers
            .as_ref()
            .map(|source| source.markers())
            .unwrap_or(Value::Null)
    }
}

impl std::fmt::Debug for MinimapHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinimapHandle")
            .field("has_markers", &self.markers.is_some())
            .finish()
    }
}

/// Receiving end, owned by the minimap.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    sender: Sender<MinimapCommand>,
    receiver: Receiver<MinimapCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> Sender<MinimapCommand> {
        self.sender.clone()
    }

    /// Takes everything queued so far without blocking.
    pub fn drain(&self) -> Vec<MinimapCommand> {
        let mut commands = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(command) => commands.push(command),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        commands
    }
}
