use soroban_sdk::{contracterror, log, symbol_short, Env, String, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Configuration (10–34) ---
    SaleAlreadyCreated = 10,
    SaleNotCreated = 11,
    InvalidAddress = 12,
    ZeroPrice = 13,
    ZeroTokensToSell = 14,
    SaleEndInPast = 15,
    UnlockBeforeSaleEnd = 17,
    ZeroVestingPrecision = 18,
    AlreadySet = 19,
    VestingNotSet = 20,
    InvalidVestingSchedule = 21,
    VestingPercentMismatch = 22,
    InvalidVestingShift = 23,
    RegistrationNotSet = 25,
    InvalidRegistrationWindow = 26,
    PurchaseRoundNotSet = 28,
    InvalidPurchaseRound = 29,
    LotteryNotSet = 32,
    ZeroWinningSlots = 33,
    TokensAlreadyDeposited = 34,

    // --- Phase (40–44) ---
    RegistrationClosed = 40,
    RegistrationStillOpen = 41,
    PurchaseNotStarted = 42,
    PurchaseOver = 43,
    SaleNotEnded = 44,

    // --- Authorization (50–52) ---
    NotAdmin = 50,
    NotSaleOwner = 51,
    SignatureExpired = 52,

    // --- State (60–72) ---
    AlreadyRegistered = 60,
    NoAllocation = 61,
    AlreadyParticipated = 62,
    ZeroTokens = 63,
    ExceedingAllowance = 64,
    CrossingMaxParticipation = 65,
    SoldOut = 66,
    TokensNotDeposited = 67,
    InvalidBatchSize = 68,
    IndexOutOfRange = 69,
    SelectionOutOfOrder = 70,
    AlreadySettled = 71,
    ZeroWeight = 72,

    // --- Vesting (80–85) ---
    PortionIdZero = 80,
    PortionNotFound = 81,
    TokensNotUnlocked = 82,
    PortionAlreadyClaimed = 83,
    NotParticipant = 84,
    NothingToWithdraw = 85,

    // --- Arithmetic (90) ---
    AmountOverflow = 90,
}

impl Error {
    /// Taxonomy bucket, usable as an event or log topic.
    pub fn category(&self) -> Symbol {
        match *self as u32 {
            1..=2 => symbol_short!("LIFECYCLE"),
            10..=34 => symbol_short!("CONFIG"),
            40..=44 => symbol_short!("PHASE"),
            50..=52 => symbol_short!("AUTH"),
            60..=72 => symbol_short!("STATE"),
            80..=85 => symbol_short!("VESTING"),
            _ => symbol_short!("MATH"),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Error::AlreadyInitialized => "Sale is already initialized",
            Error::NotInitialized => "Sale is not initialized",
            Error::SaleAlreadyCreated => "Sale is already created",
            Error::SaleNotCreated => "Sale params not set",
            Error::InvalidAddress => "Address can not be the sale itself",
            Error::ZeroPrice => "IDO Token price must be greater than zero",
            Error::ZeroTokensToSell => "Number of IDO Tokens to sell must be greater than zero",
            Error::SaleEndInPast => "Sale end time in the past",
            Error::UnlockBeforeSaleEnd => "Tokens unlock time must be after sale end",
            Error::ZeroVestingPrecision => "Vesting precision must be greater than zero",
            Error::AlreadySet => "Parameters already set",
            Error::VestingNotSet => "Vesting parameters not set",
            Error::InvalidVestingSchedule => "Invalid vesting unlock times",
            Error::VestingPercentMismatch => "Percent distribution issue",
            Error::InvalidVestingShift => "Invalid vesting time shift",
            Error::RegistrationNotSet => "Registration time not set",
            Error::InvalidRegistrationWindow => "Invalid registration window",
            Error::PurchaseRoundNotSet => "Purchase round not set",
            Error::InvalidPurchaseRound => "Invalid purchase round parameters",
            Error::LotteryNotSet => "Lottery not configured",
            Error::ZeroWinningSlots => "Winning slots must be greater than zero",
            Error::TokensAlreadyDeposited => "Tokens already deposited",
            Error::RegistrationClosed => "Registration window is closed",
            Error::RegistrationStillOpen => "Registration window is still open",
            Error::PurchaseNotStarted => "Purchase round has not started yet",
            Error::PurchaseOver => "Purchase round is over",
            Error::SaleNotEnded => "Sale has not ended yet",
            Error::NotAdmin => "Caller is missing admin role",
            Error::NotSaleOwner => "Caller is not the sale owner",
            Error::SignatureExpired => "Signature expired",
            Error::AlreadyRegistered => "User already registered",
            Error::NoAllocation => "No allocation",
            Error::AlreadyParticipated => "User participated",
            Error::ZeroTokens => "Can't buy 0 tokens",
            Error::ExceedingAllowance => "Exceeding allowance",
            Error::CrossingMaxParticipation => "Crossing max participation",
            Error::SoldOut => "Not enough tokens left for sale",
            Error::TokensNotDeposited => "Tokens were not deposited",
            Error::InvalidBatchSize => "Batch size must be greater than zero",
            Error::IndexOutOfRange => "Registrant index out of range",
            Error::SelectionOutOfOrder => "Selection would skip registrants",
            Error::AlreadySettled => "Sale owner already withdrew this balance",
            Error::ZeroWeight => "Lottery weight must be greater than zero",
            Error::PortionIdZero => "Portion id can't be zero",
            Error::PortionNotFound => "Portion id out of range",
            Error::TokensNotUnlocked => "Tokens can not be withdrawn yet",
            Error::PortionAlreadyClaimed => "Tokens already withdrawn",
            Error::NotParticipant => "User did not participate",
            Error::NothingToWithdraw => "No portion can be withdrawn",
            Error::AmountOverflow => "Amount overflow",
        }
    }
}

/// Logs why an entry point failed before the error reaches the caller.
pub trait LogRejection {
    fn log_rejection(self, env: &Env) -> Self;
}

impl<T> LogRejection for Result<T, Error> {
    fn log_rejection(self, env: &Env) -> Self {
        if let Err(error) = &self {
            log!(
                env,
                "rejected {} #{}: {}",
                error.category(),
                *error as u32,
                String::from_str(env, error.reason())
            );
        }
        self
    }
}
