use crate::host::error::HostError;
use crate::host::protocol::{CommandBatch, DeviceRecord, PanelEvent};

pub(crate) mod client;
pub use client::HostClient;
pub mod error;
pub mod protocol;

#[cfg(test)]
use mockall::{automock, predicate::*};

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait HostBus: Send + Sync {
    /// Resolve a device id to its stable connection identifier.
    async fn lookup_device(&self, device_id: &str) -> Result<DeviceRecord, HostError>;

    /// Long-poll the next batch of panel commands past `cursor`.
    async fn poll_commands(
        &self,
        connection_id: &str,
        cursor: u64,
    ) -> Result<CommandBatch, HostError>;

    /// Publish an outbound panel event envelope.
    async fn publish_event(&self, event: &PanelEvent) -> Result<(), HostError>;
}
