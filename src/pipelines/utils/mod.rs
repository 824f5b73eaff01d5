use crate::core::{Result, SentimentError};
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::Device;

/// Loads a device to be used for the model.
/// If `index` is `Some(i)` it will attempt to load the specified CUDA device
/// and fail if it cannot. When `None` it picks CUDA device 0, then Metal
/// device 0, and otherwise falls back to CPU.
pub fn load_device_with(index: Option<usize>) -> Result<Device> {
    if let Some(i) = index {
        return Device::new_cuda(i).map_err(|e| {
            SentimentError::resource(format!("CUDA device {i} unavailable: {e}"))
        });
    }

    if cuda_is_available() {
        match Device::new_cuda(0) {
            Ok(device) => return Ok(device),
            Err(e) => tracing::warn!("CUDA reported available but failed to open: {e}"),
        }
    }
    if metal_is_available() {
        match Device::new_metal(0) {
            Ok(device) => return Ok(device),
            Err(e) => tracing::warn!("Metal reported available but failed to open: {e}"),
        }
    }
    Ok(Device::Cpu)
}

/// Accelerated hardware if present, otherwise CPU.
pub fn load_device() -> Result<Device> {
    load_device_with(None)
}

/// Device selection for a classifier, resolved once at build time.
#[derive(Clone, Debug, Default)]
pub enum DeviceRequest {
    /// Use accelerated hardware if available, otherwise CPU.
    #[default]
    Default,
    /// Force CPU even if accelerated hardware is available.
    Cpu,
    /// Select a specific CUDA device by index.
    Cuda(usize),
    /// Provide an already constructed device.
    Explicit(Device),
}

impl DeviceRequest {
    /// Resolve the request into an actual [`Device`].
    pub fn resolve(self) -> Result<Device> {
        match self {
            DeviceRequest::Default => load_device(),
            DeviceRequest::Cpu => Ok(Device::Cpu),
            DeviceRequest::Cuda(i) => load_device_with(Some(i)),
            DeviceRequest::Explicit(d) => Ok(d),
        }
    }
}

/// Trait providing convenience methods for builders to select a device.
pub trait DeviceSelectable: Sized {
    /// Returns a mutable reference to the builder's internal [`DeviceRequest`].
    fn device_request_mut(&mut self) -> &mut DeviceRequest;

    /// Force the classifier to run on CPU.
    fn cpu(mut self) -> Self {
        *self.device_request_mut() = DeviceRequest::Cpu;
        self
    }

    /// Select a specific CUDA device by index.
    fn cuda_device(mut self, index: usize) -> Self {
        *self.device_request_mut() = DeviceRequest::Cuda(index);
        self
    }

    /// Provide an explicit [`Device`].
    fn device(mut self, device: Device) -> Self {
        *self.device_request_mut() = DeviceRequest::Explicit(device);
        self
    }
}
