// Matches declared claim plans against whatever is currently on the bus.
// Resolution is a read-only scan: nothing here opens a device or claims an
// interface, it only decides which plan applies to which physical unit.

use crate::error::ResolveError;
use crate::matcher::{DeviceIdentity, InterfaceClaim, UsbMatcher};
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;

/// One device reported by the host enumeration layer. Bus number and address
/// pin down the physical unit, so the transfer layer can open the right one
/// when several identical surfaces are connected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EnumeratedDevice {
    identity: DeviceIdentity,
    bus_number: u8,
    address: u8,
}

impl EnumeratedDevice {
    pub fn new(identity: DeviceIdentity, bus_number: u8, address: u8) -> Self {
        Self {
            identity,
            bus_number,
            address,
        }
    }

    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

/// Walks the bus and reports every device rusb can describe. Devices whose
/// descriptor cannot be read are skipped rather than failing the whole scan.
pub fn enumerate_devices() -> Result<Vec<EnumeratedDevice>, rusb::Error> {
    let mut found = Vec::new();
    for device in rusb::devices()?.iter() {
        if let Ok(descriptor) = device.device_descriptor() {
            found.push(EnumeratedDevice {
                identity: DeviceIdentity::new(descriptor.vendor_id(), descriptor.product_id()),
                bus_number: device.bus_number(),
                address: device.address(),
            });
        }
    }
    debug!("Enumerated {} USB devices", found.len());
    Ok(found)
}

/// Candidate matchers in priority order. The resolver borrows its candidates
/// and owns none of them, so a plan registered here can no longer be modified
/// by anyone.
#[derive(Debug, Default)]
pub struct ClaimResolver<'a> {
    candidates: Vec<&'a UsbMatcher>,
}

impl<'a> ClaimResolver<'a> {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Registration order doubles as match priority: when identities overlap,
    /// register the preferred plan first.
    pub fn register(&mut self, matcher: &'a UsbMatcher) {
        self.candidates.push(matcher);
    }

    /// The first candidate whose identity equals some enumerated device wins,
    /// paired with the first such device. No match is the normal "not plugged
    /// in yet" outcome and is worth retrying on a later enumeration pass.
    pub fn resolve(
        &self,
        devices: &[EnumeratedDevice],
    ) -> Result<ResolvedClaim<'a>, ResolveError> {
        for &matcher in &self.candidates {
            if let Some(device) = devices.iter().find(|d| d.identity() == matcher.identity()) {
                debug!(
                    "Matched {} at bus {:03} address {:03}",
                    device.identity(),
                    device.bus_number(),
                    device.address()
                );
                return Ok(ResolvedClaim {
                    matcher,
                    device: device.clone(),
                });
            }
        }
        Err(ResolveError::NoMatchingDevice)
    }

    /// Enumerates the bus and resolves against it in one step.
    pub fn resolve_connected(&self) -> Result<ResolvedClaim<'a>, ResolveError> {
        let devices = enumerate_devices()?;
        self.resolve(&devices)
    }
}

/// The outcome the transfer layer consumes: which plan applies, and which
/// physical unit it applies to.
#[derive(Debug)]
pub struct ResolvedClaim<'a> {
    matcher: &'a UsbMatcher,
    device: EnumeratedDevice,
}

impl<'a> ResolvedClaim<'a> {
    pub fn matcher(&self) -> &'a UsbMatcher {
        self.matcher
    }

    pub fn device(&self) -> &EnumeratedDevice {
        &self.device
    }

    pub fn interface_claims(&self) -> &'a [InterfaceClaim] {
        self.matcher.interface_claims()
    }
}
