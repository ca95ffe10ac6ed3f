//! Thread boundary between a host and a rock surface instance.
//!
//! Parameter-change notifications reach the instance as commands on one
//! channel and are applied strictly in arrival order by [`RockSurface::run`],
//! so no two relinks of the same instance ever overlap.

use crate::graph::{ParamValue, TopologySnapshot};
use crate::rock_surface::RockSurface;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Commands sent from the host to the rock surface thread.
#[derive(Debug, Clone)]
pub enum RockSurfaceCommand {
    /// Write a public property.
    SetProperty { name: String, value: ParamValue },
    /// Rebuild every link for the current toggle state.
    Relink,
    /// Request a topology snapshot.
    RequestTopology,
    /// Stop the command loop.
    Shutdown,
}

/// Messages sent from the rock surface thread back to the host.
#[derive(Debug, Clone)]
pub enum HostMessage {
    /// A property was written; carries the value actually stored.
    PropertyChanged { name: String, value: ParamValue },
    /// Topology after a relink or on request.
    Topology(TopologySnapshot),
    /// A command failed.
    Error(String),
    /// The command loop has exited.
    Shutdown,
}

/// Channel capacity for commands (host → rock surface).
const CMD_CHANNEL_CAPACITY: usize = 256;
/// Channel capacity for messages (rock surface → host).
const MSG_CHANNEL_CAPACITY: usize = 1024;

/// Host-side handle for talking to a rock surface thread.
pub struct RockSurfaceBridge {
    pub cmd_tx: Sender<RockSurfaceCommand>,
    pub msg_rx: Receiver<HostMessage>,
}

impl RockSurfaceBridge {
    /// Create a new bridge pair: `(bridge_for_host, cmd_rx, msg_tx)`.
    ///
    /// The rock surface thread owns `cmd_rx` and `msg_tx`.
    pub fn new() -> (Self, Receiver<RockSurfaceCommand>, Sender<HostMessage>) {
        let (cmd_tx, cmd_rx) = bounded(CMD_CHANNEL_CAPACITY);
        let (msg_tx, msg_rx) = bounded(MSG_CHANNEL_CAPACITY);
        (Self { cmd_tx, msg_rx }, cmd_rx, msg_tx)
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<HostMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    /// Try to receive a single message without blocking.
    pub fn try_recv(&self) -> Option<HostMessage> {
        self.msg_rx.try_recv().ok()
    }

    pub fn send_command(&self, cmd: RockSurfaceCommand) -> bool {
        self.cmd_tx.send(cmd).is_ok()
    }

    pub fn set_property(&self, name: impl Into<String>, value: ParamValue) {
        let _ = self.cmd_tx.send(RockSurfaceCommand::SetProperty {
            name: name.into(),
            value,
        });
    }

    pub fn relink(&self) {
        let _ = self.cmd_tx.send(RockSurfaceCommand::Relink);
    }

    pub fn request_topology(&self) {
        let _ = self.cmd_tx.send(RockSurfaceCommand::RequestTopology);
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(RockSurfaceCommand::Shutdown);
    }
}

impl RockSurface {
    /// Apply commands in order until `Shutdown` or until the host hangs up.
    ///
    /// A failed command is reported as `HostMessage::Error` and the loop
    /// keeps going.
    pub fn run(&mut self, cmd_rx: Receiver<RockSurfaceCommand>, msg_tx: Sender<HostMessage>) {
        tracing::info!("Rock surface command loop started");

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                RockSurfaceCommand::SetProperty { name, value } => {
                    self.handle_set_property(name, value, &msg_tx);
                }
                RockSurfaceCommand::Relink => match self.update() {
                    Ok(()) => {
                        let _ = msg_tx.send(HostMessage::Topology(self.snapshot()));
                    }
                    Err(e) => {
                        let _ = msg_tx.send(HostMessage::Error(e.to_string()));
                    }
                },
                RockSurfaceCommand::RequestTopology => {
                    let _ = msg_tx.send(HostMessage::Topology(self.snapshot()));
                }
                RockSurfaceCommand::Shutdown => break,
            }
        }

        let _ = msg_tx.send(HostMessage::Shutdown);
        tracing::info!("Rock surface command loop exiting");
    }

    fn handle_set_property(&mut self, name: String, value: ParamValue, msg_tx: &Sender<HostMessage>) {
        let generation = self.graph().generation();
        match self.set_property(&name, value) {
            Ok(stored) => {
                let _ = msg_tx.send(HostMessage::PropertyChanged {
                    name,
                    value: stored,
                });
                if self.graph().generation() != generation {
                    let _ = msg_tx.send(HostMessage::Topology(self.snapshot()));
                }
            }
            Err(e) => {
                tracing::warn!("Rejected property '{}': {}", name, e);
                let _ = msg_tx.send(HostMessage::Error(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rock_surface::properties;

    #[test]
    fn test_commands_applied_in_order() {
        let (bridge, cmd_rx, msg_tx) = RockSurfaceBridge::new();
        let mut surface = RockSurface::with_defaults().unwrap();

        bridge.set_property(properties::DEPTH, ParamValue::Int(3));
        bridge.set_property(properties::DEPTH, ParamValue::Int(40));
        bridge.shutdown();
        surface.run(cmd_rx, msg_tx);

        let msgs = bridge.drain();
        assert!(matches!(
            &msgs[0],
            HostMessage::PropertyChanged { value: ParamValue::Int(3), .. }
        ));
        assert!(matches!(
            &msgs[1],
            HostMessage::PropertyChanged { value: ParamValue::Int(25), .. }
        ));
        assert!(matches!(msgs.last(), Some(HostMessage::Shutdown)));
        assert_eq!(surface.property(properties::DEPTH).unwrap(), ParamValue::Int(25));
    }

    #[test]
    fn test_toggle_emits_topology() {
        let (bridge, cmd_rx, msg_tx) = RockSurfaceBridge::new();
        let mut surface = RockSurface::with_defaults().unwrap();

        bridge.set_property(properties::SWITCH_M6, ParamValue::Bool(false));
        bridge.shutdown();
        surface.run(cmd_rx, msg_tx);

        let msgs = bridge.drain();
        assert!(msgs.iter().any(|m| matches!(m, HostMessage::Topology(_))));
    }

    #[test]
    fn test_error_does_not_stop_loop() {
        let (bridge, cmd_rx, msg_tx) = RockSurfaceBridge::new();
        let mut surface = RockSurface::with_defaults().unwrap();

        bridge.set_property("roughness", ParamValue::Double(1.0));
        bridge.request_topology();
        bridge.shutdown();
        surface.run(cmd_rx, msg_tx);

        let msgs = bridge.drain();
        assert!(matches!(msgs[0], HostMessage::Error(_)));
        assert!(matches!(msgs[1], HostMessage::Topology(_)));
        assert!(matches!(msgs[2], HostMessage::Shutdown));
    }

    #[test]
    fn test_loop_exits_when_host_hangs_up() {
        let (bridge, cmd_rx, msg_tx) = RockSurfaceBridge::new();
        let mut surface = RockSurface::with_defaults().unwrap();

        bridge.relink();
        let RockSurfaceBridge { cmd_tx, msg_rx } = bridge;
        drop(cmd_tx);
        surface.run(cmd_rx, msg_tx);

        let msgs: Vec<_> = msg_rx.try_iter().collect();
        assert!(matches!(msgs[0], HostMessage::Topology(_)));
        assert!(matches!(msgs[1], HostMessage::Shutdown));
    }
}
