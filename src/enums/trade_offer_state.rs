use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The state of a trade offer, as reported by Steam.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy, Hash)]
#[repr(u8)]
pub enum TradeOfferState {
    Invalid = 1,
    Active = 2,
    Accepted = 3,
    Countered = 4,
    Expired = 5,
    Canceled = 6,
    Declined = 7,
    InvalidItems = 8,
    CreatedNeedsConfirmation = 9,
    CanceledBySecondFactor = 10,
    InEscrow = 11,
}

impl TradeOfferState {
    /// The offer is still waiting on someone to act on it.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Active |
            Self::CreatedNeedsConfirmation |
            Self::InEscrow
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_primitive() {
        assert_eq!(TradeOfferState::try_from(3u8).unwrap(), TradeOfferState::Accepted);
        assert!(TradeOfferState::try_from(42u8).is_err());
    }

    #[test]
    fn pending_states() {
        assert!(TradeOfferState::Active.is_pending());
        assert!(TradeOfferState::InEscrow.is_pending());
        assert!(!TradeOfferState::Accepted.is_pending());
        assert!(!TradeOfferState::Declined.is_pending());
    }
}
