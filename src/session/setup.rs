//! Session setup and initialization

use crate::config::Config;
use crate::host::{HostBus, HostClient};
use crate::runtime::{PanelHandles, start_panel_workers, start_preview_workers};
use crate::workers::offline::PreviewFile;
use std::error::Error;
use std::path::Path;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Channels and handles for the running worker set
    pub handles: PanelHandles,
    /// Device name when the host knows one, otherwise the device id
    pub device_label: String,
}

/// Sets up a live panel session
///
/// This function handles the common setup required for both TUI and headless
/// modes:
/// 1. Builds the host client from the configured URL
/// 2. Resolves the device id to its connection id
/// 3. Starts the command stream and event publisher
///
/// # Arguments
/// * `config` - Resolved configuration with device_id and host_url
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - Session setup failed
pub async fn setup_session(config: Config) -> Result<SessionData, Box<dyn Error>> {
    let host = HostClient::new(config.host_url.clone());

    // A panel bound to no device has nothing to render, so a failed lookup
    // ends the session before it starts.
    let device = host.lookup_device(&config.device_id).await.map_err(|e| {
        format!(
            "Device lookup failed for '{}' at {}: {}",
            config.device_id, config.host_url, e
        )
    })?;

    let device_label = device
        .name
        .clone()
        .unwrap_or_else(|| config.device_id.clone());
    let handles = start_panel_workers(host, &device);

    Ok(SessionData {
        handles,
        device_label,
    })
}

/// Sets up an offline preview session from a local layout file
pub fn setup_preview_session(path: &Path) -> Result<SessionData, Box<dyn Error>> {
    let preview = PreviewFile::load(path)
        .map_err(|e| format!("Failed to load layout file {}: {}", path.display(), e))?;
    let handles = start_preview_workers(preview);

    Ok(SessionData {
        handles,
        device_label: format!("preview:{}", path.display()),
    })
}
