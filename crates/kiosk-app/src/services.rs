//! Service layer - the capabilities the engine drives
//!
//! The engine is generic over the backend, the identity source and the
//! surface host so tests can swap in scripted fakes. The `*Service` traits
//! bundle the bounds a capability needs to be shared with spawned tasks.

use std::sync::Arc;

use kiosk_host::{DeviceIdSource, KioskApi, SurfaceHost, TokenStore};

/// Backend usable from spawned tasks
pub trait ApiService: KioskApi + Sync + 'static {}
impl<T: KioskApi + Sync + 'static> ApiService for T {}

/// Identity source usable from spawned tasks
pub trait DeviceService: DeviceIdSource + Sync + 'static {}
impl<T: DeviceIdSource + Sync + 'static> DeviceService for T {}

/// Surface host usable from spawned tasks
pub trait SurfaceService: SurfaceHost + Sync + 'static {}
impl<T: SurfaceHost + Sync + 'static> SurfaceService for T {}

/// Injected capabilities, cheap to clone into tasks
pub struct Services<A, D, H> {
    pub api: Arc<A>,
    pub device: Arc<D>,
    pub surface: Arc<H>,
    pub tokens: Arc<dyn TokenStore>,
}

impl<A, D, H> Services<A, D, H> {
    pub fn new(api: A, device: D, surface: H, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api: Arc::new(api),
            device: Arc::new(device),
            surface: Arc::new(surface),
            tokens,
        }
    }
}

impl<A, D, H> Clone for Services<A, D, H> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            device: Arc::clone(&self.device),
            surface: Arc::clone(&self.surface),
            tokens: Arc::clone(&self.tokens),
        }
    }
}
