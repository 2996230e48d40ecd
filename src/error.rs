use crate::addresses::ModuleRole;
use crate::builders::Section;
use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Boxed error produced by an external RPC client.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TickMathError {
    #[error("Tick math error - tick {0} out of bounds")]
    TickOutOfBounds(i32),
    #[error("Tick math error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("Tick math error - tick spacing must be in [1, 32767], got {0}")]
    InvalidTickSpacing(i32),
    #[error("Tick math error - price must be finite and positive, got {0}")]
    InvalidPrice(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GammaError {
    #[error("Gamma error - epoch length must be positive")]
    ZeroEpochLength,
    #[error("Gamma error - duration {duration}s is shorter than one epoch of {epoch_length}s")]
    NoEpochs { duration: u64, epoch_length: u64 },
    #[error("Gamma error - computed gamma {gamma} is not a multiple of tick spacing {tick_spacing}")]
    NotDivisible { gamma: i32, tick_spacing: i32 },
    #[error(transparent)]
    TickMath(#[from] TickMathError),
}

/// Configuration and normalization failures raised by `build()` and by the
/// builder setters that derive values eagerly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Missing configuration: {}", format_sections(.0))]
    Missing(Vec<Section>),
    #[error("Invalid tick range: start {start} must be below end {end}")]
    InvalidTickRange { start: i32, end: i32 },
    #[error("Tick {tick} is not a multiple of tick spacing {tick_spacing}")]
    UnalignedTick { tick: i32, tick_spacing: i32 },
    #[error("Invalid sale: {0}")]
    InvalidSale(&'static str),
    #[error("Invalid pool: {0}")]
    InvalidPool(String),
    #[error("Invalid auction: {0}")]
    InvalidAuction(String),
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Normalization failure: {0}")]
    Normalization(String),
    #[error(transparent)]
    TickMath(#[from] TickMathError),
    #[error(transparent)]
    Gamma(#[from] GammaError),
}

fn format_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(Section::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cross-field rules checked when built params are encoded or simulated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vesting recipients ({recipients}) and amounts ({amounts}) length mismatch")]
    VestingLengthMismatch { recipients: usize, amounts: usize },
    #[error("Vesting requires at least one recipient")]
    EmptyVestingRecipients,
    #[error("Total vested amount {vested} exceeds unsold supply {available}")]
    VestingExceedsSupply { vested: U256, available: U256 },
    #[error("Vesting cliff {cliff}s exceeds vesting duration {duration}s")]
    CliffExceedsDuration { cliff: u64, duration: u64 },
    #[error("Vesting is not supported by the doppler404 token factory")]
    VestingUnsupported,
    #[error("Beneficiaries must be strictly sorted by ascending address ({0} is out of order)")]
    BeneficiariesUnsorted(Address),
    #[error("Beneficiary {0} has zero shares")]
    ZeroBeneficiaryShares(Address),
    #[error("Beneficiary shares sum to {0}, expected 1e18")]
    BeneficiarySharesSum(U256),
    #[error("Protocol owner {owner} must be a beneficiary with at least 5% of shares, got {shares}")]
    ProtocolOwnerShare { owner: Address, shares: U256 },
    #[error("Curve shares sum to {0}, expected 1e18")]
    CurveSharesSum(U256),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinerError {
    #[error("Invalid prefix {0:?}: expected 1 to 40 hex characters")]
    InvalidPrefix(String),
    #[error("Max iterations must be positive")]
    InvalidMaxIterations,
    #[error("Token factory data could not be decoded: {0}")]
    InvalidTokenData(String),
    #[error("No salt producing prefix 0x{prefix} found within {max_iterations} iterations")]
    NotFound { prefix: String, max_iterations: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("No address for module {role} on chain {chain_id} and no override supplied")]
    MissingModule { role: ModuleRole, chain_id: u64 },
    #[error("Value {value} does not fit in {ty}")]
    Overflow { value: String, ty: &'static str },
    #[error("Custom migration requires a migration encoder")]
    MissingMigrationEncoder,
    #[error("Migration encoder failed: {0}")]
    MigrationEncoder(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TickMath(#[from] TickMathError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Miner(#[from] MinerError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("{step} failed: {source}")]
    Rpc {
        step: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("{step} returned undecodable data: {source}")]
    Decode {
        step: &'static str,
        #[source]
        source: alloy_sol_types::Error,
    },

    #[error("{step} transaction {tx_hash} reverted")]
    Reverted {
        step: &'static str,
        tx_hash: alloy_primitives::B256,
    },
}

impl Error {
    pub(crate) fn rpc(step: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Rpc { step, source }
    }

    pub(crate) fn decode(step: &'static str) -> impl FnOnce(alloy_sol_types::Error) -> Self {
        move |source| Self::Decode { step, source }
    }
}
