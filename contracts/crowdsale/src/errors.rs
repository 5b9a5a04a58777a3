use soroban_sdk::contracterror;

/// Failure codes returned by every fallible entry point.
///
/// Codes are grouped by kind: 1xx authorization, 2xx lifecycle state, 3xx input or
/// accounting validation. Any error aborts the whole invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotAdmin = 100,
    NotOwner = 101,
    NotWhitelisted = 102,

    NotInitialized = 200,
    AlreadyInitialized = 201,
    SaleAlreadyInitialized = 202,
    SaleNotOpen = 203,
    SaleNotClosed = 204,
    AlreadyFinalized = 205,
    BonusNotReleased = 206,
    Reentrant = 207,

    ZeroPrice = 300,
    InvalidAmount = 301,
    BelowMinimumContribution = 302,
    AllocationExceeded = 303,
    NoBonusBalance = 304,
    ReleaseDateAlreadySet = 305,
    InvalidReleaseDate = 306,
    BonusScheduleMismatch = 307,
    InvalidBonusThreshold = 308,
    InvalidSaleWindow = 309,
    ArithmeticOverflow = 310,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Authorization,
    State,
    Validation,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 {
            100..=199 => ErrorKind::Authorization,
            200..=299 => ErrorKind::State,
            _ => ErrorKind::Validation,
        }
    }
}
