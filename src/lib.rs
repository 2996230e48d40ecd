//! Launch-parameter derivation and call-data encoding for Doppler auctions.
//!
//! This crate exposes:
//! - Tick/price math (`math::*`) matching the on-chain fixed-point rounding.
//! - Fluent builders for static, dynamic and multicurve auctions.
//! - A CREATE2 salt miner for vanity token (and paired hook) addresses.
//! - Stateless encoders producing byte-exact Airlock `create` call-data.
//! - A thin read/simulate layer over any [`client::RpcClient`], plus an
//!   alloy-provider backed client behind the `onchain` feature.
//!
//! # Examples
//!
//! ## Tick math
//! ```no_run
//! use doppler_sdk::{math::tick_math, U256};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(tick_math::get_tick_at_sqrt_ratio(sqrt_price).unwrap(), 0);
//! assert!(sqrt_price > U256::ZERO);
//! ```
//!
//! ## Encoding a multicurve launch
//! ```no_run
//! use doppler_sdk::{
//!     builders::{MarketCapPresets, MulticurveBuilder},
//!     encode::Encoder,
//!     types::{GovernanceConfig, MigrationConfig, SaleConfig, TokenConfig},
//!     Address, U256,
//! };
//!
//! let supply = U256::from(1_000_000_000u64) * doppler_sdk::constants::WAD;
//! let params = MulticurveBuilder::new()
//!     .token(TokenConfig::standard("Example", "EXM", "ipfs://example"))
//!     .sale(SaleConfig::new(supply, supply / U256::from(2u8), Address::ZERO))
//!     .with_market_cap_presets(MarketCapPresets::new())
//!     .unwrap()
//!     .governance(GovernanceConfig::Default)
//!     .migration(MigrationConfig::UniswapV2)
//!     .user_address(Address::repeat_byte(0x11))
//!     .build()
//!     .unwrap();
//!
//! let encoded = Encoder::new(31337).encode_create_multicurve(&params).unwrap();
//! println!("airlock call-data: {}", encoded.calldata);
//! ```

pub use alloy_primitives::{Address, B256, Bytes, I256, U256};

pub mod abi;
pub mod addresses;
pub mod builders;
pub mod client;
pub mod constants;
pub mod encode;
pub mod error;
pub mod factory;
mod hash;
pub mod math;
pub mod miner;
#[cfg(feature = "onchain")]
pub mod onchain;
pub mod read;
pub mod types;

pub use error::Error;
pub use hash::FastMap;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
