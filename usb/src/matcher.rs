// This file describes which USB device a driver wants to take ownership of, and
// the interfaces and endpoints on it that must be claimed before any bulk or
// interrupt I/O can happen. Nothing in here talks to USB directly; the transfer
// layer consumes these claim plans once a physical device has been matched.

use crate::error::MatcherError;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt::Formatter;

/// Vendor / product pair identifying one USB device model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DeviceIdentity {
    vendor_id: u16,
    product_id: u16,
}

impl DeviceIdentity {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }
}

impl std::fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vendor_id, self.product_id)
    }
}

/// One interface and the endpoints to claim on it, in registration order.
///
/// Endpoint addresses are carried as opaque bytes; the high bit encodes the
/// transfer direction by USB convention, but nothing here interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InterfaceClaim {
    interface_number: u8,
    endpoint_addresses: Vec<u8>,
}

impl InterfaceClaim {
    /// A claim with no endpoints can never be satisfied, so an empty address
    /// list is rejected outright.
    pub fn new(interface_number: u8, endpoint_addresses: &[u8]) -> Result<Self, MatcherError> {
        if endpoint_addresses.is_empty() {
            return Err(MatcherError::NoEndpoints(interface_number));
        }
        Ok(Self {
            interface_number,
            endpoint_addresses: endpoint_addresses.to_vec(),
        })
    }

    pub fn interface_number(&self) -> u8 {
        self.interface_number
    }

    pub fn endpoint_addresses(&self) -> &[u8] {
        &self.endpoint_addresses
    }
}

/// Everything a driver needs claimed on one supported device: the identity to
/// match during enumeration, plus the interface claims to hand to the transfer
/// layer afterwards.
///
/// Plans are built up with the add methods while the matcher is still owned
/// mutably, then shared by reference with a resolver. The claim list is
/// append-only, so a plan can never lose or reorder entries once written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UsbMatcher {
    identity: DeviceIdentity,
    claims: Vec<InterfaceClaim>,
}

impl UsbMatcher {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            identity: DeviceIdentity::new(vendor_id, product_id),
            claims: Vec::new(),
        }
    }

    /// Matcher with a single interface carrying a single endpoint.
    pub fn with_endpoint(vendor_id: u16, product_id: u16, interface: u8, endpoint: u8) -> Self {
        let mut matcher = Self::new(vendor_id, product_id);
        matcher.add_endpoint(interface, endpoint);
        matcher
    }

    /// Matcher with a single interface carrying multiple endpoints.
    pub fn with_endpoints(
        vendor_id: u16,
        product_id: u16,
        interface: u8,
        endpoints: &[u8],
    ) -> Result<Self, MatcherError> {
        let mut matcher = Self::new(vendor_id, product_id);
        matcher.add_endpoints(interface, endpoints)?;
        Ok(matcher)
    }

    /// Appends one claim for `interface`. Every call appends its own entry,
    /// even when an interface number repeats; entries are never merged, and
    /// consumers must claim them in this order.
    pub fn add_endpoints(&mut self, interface: u8, endpoints: &[u8]) -> Result<(), MatcherError> {
        self.claims.push(InterfaceClaim::new(interface, endpoints)?);
        Ok(())
    }

    /// Appends one single-endpoint claim for `interface`.
    pub fn add_endpoint(&mut self, interface: u8, endpoint: u8) {
        self.claims.push(InterfaceClaim {
            interface_number: interface,
            endpoint_addresses: vec![endpoint],
        });
    }

    pub fn identity(&self) -> DeviceIdentity {
        self.identity
    }

    pub fn interface_claims(&self) -> &[InterfaceClaim] {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_through_matcher() {
        let matcher = UsbMatcher::new(0x17cc, 0x1600);
        assert_eq!(matcher.identity().vendor_id(), 0x17cc);
        assert_eq!(matcher.identity().product_id(), 0x1600);
        assert!(matcher.interface_claims().is_empty());
    }

    #[test]
    fn identity_equality_is_structural() {
        assert_eq!(DeviceIdentity::new(1, 10), DeviceIdentity::new(1, 10));
        assert_ne!(DeviceIdentity::new(1, 10), DeviceIdentity::new(1, 20));
        assert_ne!(DeviceIdentity::new(1, 10), DeviceIdentity::new(2, 10));
    }

    #[test]
    fn identity_displays_as_lsusb_pair() {
        assert_eq!(DeviceIdentity::new(0x17cc, 0x1600).to_string(), "17cc:1600");
    }

    #[test]
    fn each_add_appends_its_own_claim() {
        let mut matcher = UsbMatcher::new(0x17cc, 0x1600);
        matcher.add_endpoint(0x04, 0x81);
        matcher.add_endpoint(0x04, 0x02);

        let claims = matcher.interface_claims();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].interface_number(), 0x04);
        assert_eq!(claims[0].endpoint_addresses(), [0x81]);
        assert_eq!(claims[1].interface_number(), 0x04);
        assert_eq!(claims[1].endpoint_addresses(), [0x02]);
    }

    #[test]
    fn convenience_constructor_preserves_endpoint_order() {
        let matcher = UsbMatcher::with_endpoints(0x17cc, 0x1600, 0x00, &[0x81, 0x01]).unwrap();

        let claims = matcher.interface_claims();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].interface_number(), 0x00);
        assert_eq!(claims[0].endpoint_addresses(), [0x81, 0x01]);
    }

    #[test]
    fn single_endpoint_constructor_claims_one_interface() {
        let matcher = UsbMatcher::with_endpoint(0x2982, 0x1967, 0x00, 0x01);

        let claims = matcher.interface_claims();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].endpoint_addresses(), [0x01]);
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        assert!(InterfaceClaim::new(0x02, &[]).is_err());
        assert!(UsbMatcher::with_endpoints(0x17cc, 0x1600, 0x02, &[]).is_err());

        let mut matcher = UsbMatcher::new(0x17cc, 0x1600);
        assert!(matcher.add_endpoints(0x02, &[]).is_err());
        assert!(matcher.interface_claims().is_empty());
    }

    #[test]
    fn accessor_copies_cannot_reach_internal_state() {
        let mut matcher = UsbMatcher::new(0x17cc, 0x1600);
        matcher.add_endpoints(0x04, &[0x81, 0x02]).unwrap();

        let mut copy = matcher.interface_claims().to_vec();
        copy[0].endpoint_addresses.clear();
        copy.clear();

        let claims = matcher.interface_claims();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].endpoint_addresses(), [0x81, 0x02]);
    }
}
