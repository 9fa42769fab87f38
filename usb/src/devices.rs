// This file holds the claim plans for the control surfaces deckhand supports,
// keyed by model. The rest of the crate treats these as opaque data; anything
// that needs to know which interface carries pads, or which one feeds the
// displays, should look here and nowhere else.

use crate::matcher::UsbMatcher;
use deckhand_types::ControllerModel;
use strum::IntoEnumIterator;

pub const VID_NATIVE_INSTRUMENTS: u16 = 0x17cc;
pub const VID_ABLETON: u16 = 0x2982;

pub const PID_MASCHINE_MK3: u16 = 0x1600;
pub const PID_MASCHINE_MIKRO_MK3: u16 = 0x1700;
pub const PID_KONTROL_S49_MK2: u16 = 0x1610;
pub const PID_KONTROL_S61_MK2: u16 = 0x1620;
pub const PID_PUSH_2: u16 = 0x1967;

/// The claim plan for one model.
pub fn matcher_for(model: ControllerModel) -> UsbMatcher {
    match model {
        // Pads and buttons arrive on the HID-style input interface; the two
        // displays are fed over a separate bulk interface.
        ControllerModel::MaschineMk3 => {
            let mut matcher = UsbMatcher::with_endpoint(
                VID_NATIVE_INSTRUMENTS,
                PID_MASCHINE_MK3,
                0x04,
                0x81,
            );
            matcher.add_endpoint(0x05, 0x04);
            matcher
        }
        // No displays on the Mikro, input only.
        ControllerModel::MaschineMikroMk3 => UsbMatcher::with_endpoint(
            VID_NATIVE_INSTRUMENTS,
            PID_MASCHINE_MIKRO_MK3,
            0x03,
            0x81,
        ),
        ControllerModel::KompleteKontrolS49Mk2 => {
            kontrol_mk2_matcher(PID_KONTROL_S49_MK2)
        }
        ControllerModel::KompleteKontrolS61Mk2 => {
            kontrol_mk2_matcher(PID_KONTROL_S61_MK2)
        }
        // The Push 2 display sits alone on interface 0, bulk OUT.
        ControllerModel::PushTwo => {
            UsbMatcher::with_endpoint(VID_ABLETON, PID_PUSH_2, 0x00, 0x01)
        }
    }
}

// The Kontrol Mk2 keyboards share one layout across keybed sizes: button and
// encoder events on interface 2, both displays on interface 3.
fn kontrol_mk2_matcher(product_id: u16) -> UsbMatcher {
    let mut matcher =
        UsbMatcher::with_endpoint(VID_NATIVE_INSTRUMENTS, product_id, 0x02, 0x81);
    matcher.add_endpoint(0x03, 0x03);
    matcher
}

/// Every supported plan in priority order, ready to hand to a resolver.
pub fn supported_matchers() -> Vec<(ControllerModel, UsbMatcher)> {
    ControllerModel::iter()
        .map(|model| (model, matcher_for(model)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn every_model_has_a_usable_claim_plan() {
        for (model, matcher) in supported_matchers() {
            assert!(
                !matcher.interface_claims().is_empty(),
                "{model} has no interface claims"
            );
            for claim in matcher.interface_claims() {
                assert!(!claim.endpoint_addresses().is_empty());
            }
        }
    }

    #[test]
    fn registry_covers_every_model() {
        assert_eq!(supported_matchers().len(), ControllerModel::COUNT);
    }

    #[test]
    fn native_instruments_surfaces_share_the_vendor_id() {
        for model in [
            ControllerModel::MaschineMk3,
            ControllerModel::MaschineMikroMk3,
            ControllerModel::KompleteKontrolS49Mk2,
            ControllerModel::KompleteKontrolS61Mk2,
        ] {
            assert_eq!(
                matcher_for(model).identity().vendor_id(),
                VID_NATIVE_INSTRUMENTS
            );
        }
    }

    #[test]
    fn maschine_mk3_claims_input_before_displays() {
        let matcher = matcher_for(ControllerModel::MaschineMk3);

        let claims = matcher.interface_claims();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].interface_number(), 0x04);
        assert_eq!(claims[0].endpoint_addresses(), [0x81]);
        assert_eq!(claims[1].interface_number(), 0x05);
        assert_eq!(claims[1].endpoint_addresses(), [0x04]);
    }

    #[test]
    fn kontrol_mk2_sizes_differ_only_by_product_id() {
        let s49 = matcher_for(ControllerModel::KompleteKontrolS49Mk2);
        let s61 = matcher_for(ControllerModel::KompleteKontrolS61Mk2);

        assert_ne!(s49.identity(), s61.identity());
        assert_eq!(s49.interface_claims(), s61.interface_claims());
    }
}
