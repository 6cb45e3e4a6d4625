//! Capability bridge between the privileged host and the session layer.
//!
//! The session layer may ask the host for exactly one thing: the terminal
//! identity. Everything else the host can do (spawning browsers, reading
//! hardware) stays behind this boundary.

use kiosk_core::TerminalIdentity;

use crate::identity::{get_identity, HostInfoCollector, SystemHostInfo};

/// The single host capability exposed to the session layer
#[trait_variant::make(DeviceIdSource: Send)]
pub trait LocalDeviceIdSource {
    /// Terminal identity; never fails, may be a sentinel-derived value
    async fn get_device_id(&self) -> TerminalIdentity;
}

/// Host-side implementation of [`DeviceIdSource`]
#[derive(Debug, Clone)]
pub struct HostBridge<C = SystemHostInfo> {
    collector: C,
}

impl HostBridge<SystemHostInfo> {
    /// Bridge backed by the running operating system
    pub fn system() -> Self {
        Self::new(SystemHostInfo::new())
    }
}

impl<C> HostBridge<C> {
    pub fn new(collector: C) -> Self {
        Self { collector }
    }
}

impl<C> DeviceIdSource for HostBridge<C>
where
    C: HostInfoCollector + Sync,
{
    async fn get_device_id(&self) -> TerminalIdentity {
        let identity = get_identity(&self.collector).await;
        tracing::info!(
            degraded = identity.is_degraded(),
            "Terminal identity: {}",
            identity.short(12)
        );
        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::derive_identity;
    use crate::test_utils::FakeHostInfo;

    #[tokio::test]
    async fn test_bridge_returns_derived_identity() {
        let bridge = HostBridge::new(FakeHostInfo::new(Some("DISK"), Some("UUID")));
        let id = DeviceIdSource::get_device_id(&bridge).await;
        assert_eq!(id.as_str(), derive_identity("DISK", "UUID"));
    }

    #[tokio::test]
    async fn test_bridge_is_stable_across_calls() {
        let bridge = HostBridge::new(FakeHostInfo::new(Some("DISK"), Some("UUID")));
        let first = DeviceIdSource::get_device_id(&bridge).await;
        let second = DeviceIdSource::get_device_id(&bridge).await;
        assert_eq!(first, second);
    }
}
