//! Runtime wiring for the panel worker set

use crate::consts::cli_consts;
use crate::events::Event;
use crate::host::HostClient;
use crate::host::protocol::{DeviceRecord, PanelCommand};
use crate::workers::core::{EventSender, OutboundLine};
use crate::workers::offline::PreviewFile;
use crate::workers::{offline, publisher, stream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Channel ends and handles the UI task needs to drive one panel session.
pub struct PanelHandles {
    /// Worker events for the activity strip.
    pub event_receiver: mpsc::Receiver<Event>,
    /// Inbound commands awaiting application.
    pub command_receiver: mpsc::Receiver<PanelCommand>,
    /// The dashboard's line to the publisher.
    pub outbound: OutboundLine,
    /// Join handles for worker tasks.
    pub join_handles: Vec<JoinHandle<()>>,
    /// Cancelling this detaches every worker from its loop.
    pub cancellation: CancellationToken,
}

/// Start the command stream and event publisher for a bound device.
pub fn start_panel_workers(host: HostClient, device: &DeviceRecord) -> PanelHandles {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(cli_consts::EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) =
        mpsc::channel::<PanelCommand>(cli_consts::COMMAND_QUEUE_SIZE);
    let (outbound_sender, outbound_receiver) = mpsc::channel(cli_consts::OUTBOUND_QUEUE_SIZE);

    let cancellation = CancellationToken::new();
    let outbound = OutboundLine::new(outbound_sender, device.connection_id.clone());

    let join_handles = vec![
        stream::start_command_stream(
            Box::new(host.clone()),
            device.connection_id.clone(),
            command_sender,
            EventSender::new(event_sender.clone()),
            cancellation.clone(),
        ),
        publisher::start_event_publisher(
            Box::new(host),
            outbound_receiver,
            EventSender::new(event_sender),
            cancellation.clone(),
        ),
    ];

    // The connect announcement goes out exactly once, before any interaction.
    outbound.send_online();

    PanelHandles {
        event_receiver,
        command_receiver,
        outbound,
        join_handles,
        cancellation,
    }
}

/// Start the offline worker set that drives a preview from a layout file.
pub fn start_preview_workers(preview: PreviewFile) -> PanelHandles {
    let (event_sender, event_receiver) = mpsc::channel::<Event>(cli_consts::EVENT_QUEUE_SIZE);
    let (command_sender, command_receiver) =
        mpsc::channel::<PanelCommand>(cli_consts::COMMAND_QUEUE_SIZE);
    let (outbound_sender, outbound_receiver) = mpsc::channel(cli_consts::OUTBOUND_QUEUE_SIZE);

    let cancellation = CancellationToken::new();
    let connection_id = format!("preview-{}", Uuid::new_v4());
    let outbound = OutboundLine::new(outbound_sender, connection_id);

    let join_handles = vec![
        offline::start_preview_feeder(
            preview,
            command_sender,
            EventSender::new(event_sender.clone()),
        ),
        offline::start_outbound_sink(
            outbound_receiver,
            EventSender::new(event_sender),
            cancellation.clone(),
        ),
    ];

    outbound.send_online();

    PanelHandles {
        event_receiver,
        command_receiver,
        outbound,
        join_handles,
        cancellation,
    }
}
