#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// The control surfaces deckhand ships claim plans for.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControllerModel {
    MaschineMk3,
    MaschineMikroMk3,
    KompleteKontrolS49Mk2,
    KompleteKontrolS61Mk2,
    PushTwo,
}
