//! Sale phase as a pure function of the clock and the configured windows.
//!
//! Nothing here touches storage; every entry point loads the windows it needs
//! and asks these predicates whether the call is allowed at `now`.

use crate::errors::Error;
use crate::types::{Phase, PurchaseRound, SaleParams, TimeWindow};

pub fn derive(
    now: u64,
    sale: Option<&SaleParams>,
    registration: Option<&TimeWindow>,
    purchase: Option<&PurchaseRound>,
) -> Phase {
    if let Some(sale) = sale {
        if now >= sale.token_unlock {
            return Phase::Vesting;
        }
    }
    let (Some(registration), Some(purchase)) = (registration, purchase) else {
        return match registration {
            Some(window) if window.contains(now) => Phase::Registration,
            _ => Phase::Setup,
        };
    };

    if now < registration.start {
        Phase::Setup
    } else if now < registration.end {
        Phase::Registration
    } else if now < purchase.window.start {
        Phase::AwaitingPurchase
    } else if now < purchase.window.end {
        Phase::Purchase
    } else {
        Phase::AwaitingUnlock
    }
}

pub fn ensure_registration_open(now: u64, registration: &TimeWindow) -> Result<(), Error> {
    if registration.contains(now) {
        Ok(())
    } else {
        Err(Error::RegistrationClosed)
    }
}

pub fn ensure_registration_closed(now: u64, registration: &TimeWindow) -> Result<(), Error> {
    if now >= registration.end {
        Ok(())
    } else {
        Err(Error::RegistrationStillOpen)
    }
}

pub fn ensure_purchase_open(now: u64, round: &PurchaseRound) -> Result<(), Error> {
    if now < round.window.start {
        return Err(Error::PurchaseNotStarted);
    }
    if now >= round.window.end {
        return Err(Error::PurchaseOver);
    }
    Ok(())
}

pub fn ensure_sale_ended(now: u64, sale: &SaleParams) -> Result<(), Error> {
    if now >= sale.sale_end {
        Ok(())
    } else {
        Err(Error::SaleNotEnded)
    }
}

pub fn is_unlocked(now: u64, unlock_time: u64) -> bool {
    now >= unlock_time
}
