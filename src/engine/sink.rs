use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::warn;

use crate::player::PlayerPose;
use crate::world::BlockEvent;

/// Per-tick message for the external frame driver (animation, camera sync).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub frame: u64,
    pub dt: f32,
    pub pose: PlayerPose,
    /// False when the pointer was not locked and the player did not move.
    pub simulated: bool,
}

/// Receives the core's outputs. `advance` is called exactly once per tick,
/// after the core update.
pub trait FrameSink: Send {
    fn advance(&mut self, update: &FrameUpdate);

    fn block_changed(&mut self, _event: &BlockEvent) {}
}

impl<F> FrameSink for F
where
    F: FnMut(&FrameUpdate) + Send,
{
    fn advance(&mut self, update: &FrameUpdate) {
        self(update)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SinkMessage {
    Frame(FrameUpdate),
    Block(BlockEvent),
}

/// Forwards everything over a bounded channel to a renderer thread. A full
/// or closed channel drops the message and never blocks the tick.
pub struct ChannelSink {
    sender: Sender<SinkMessage>,
    disconnected: bool,
}

impl ChannelSink {
    pub fn bounded(capacity: usize) -> (Self, Receiver<SinkMessage>) {
        let (sender, receiver) = bounded(capacity);
        (
            Self {
                sender,
                disconnected: false,
            },
            receiver,
        )
    }

    fn send(&mut self, message: SinkMessage) {
        match self.sender.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                warn!("Frame sink full, dropping {:?}", message);
            }
            Err(TrySendError::Disconnected(_)) => {
                if !self.disconnected {
                    warn!("Frame sink receiver disconnected");
                    self.disconnected = true;
                }
            }
        }
    }
}

impl FrameSink for ChannelSink {
    fn advance(&mut self, update: &FrameUpdate) {
        self.send(SinkMessage::Frame(*update));
    }

    fn block_changed(&mut self, event: &BlockEvent) {
        self.send(SinkMessage::Block(*event));
    }
}
