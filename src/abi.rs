//! Solidity bindings for the Doppler modules and the narrowing helpers used
//! to move SDK values into fixed-width ABI types.

use crate::error::EncodeError;
use crate::types::{BeneficiaryShare, Curve};
use alloy_primitives::aliases::{I24, U24, U48, U96};
use alloy_primitives::U256;
use alloy_sol_macro::sol;

sol! {
    /// Argument of `Airlock.create`.
    #[derive(Debug, PartialEq, Eq)]
    struct CreateParams {
        uint256 initialSupply;
        uint256 numTokensToSell;
        address numeraire;
        address tokenFactory;
        bytes tokenFactoryData;
        address governanceFactory;
        bytes governanceFactoryData;
        address poolInitializer;
        bytes poolInitializerData;
        address liquidityMigrator;
        bytes liquidityMigratorData;
        address integrator;
        bytes32 salt;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct BeneficiaryData {
        address beneficiary;
        uint96 shares;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct CurveData {
        int24 tickLower;
        int24 tickUpper;
        uint16 numPositions;
        uint256 shares;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct PoolKey {
        address currency0;
        address currency1;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
    }

    // token factories, decoded as flat parameter lists

    #[derive(Debug, PartialEq, Eq)]
    struct TokenFactoryData {
        string name;
        string symbol;
        uint256 yearlyMintRate;
        uint256 vestingDuration;
        address[] recipients;
        uint256[] amounts;
        string tokenURI;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Doppler404FactoryData {
        string name;
        string symbol;
        string baseURI;
        uint256 unit;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct TokenConstructorArgs {
        string name;
        string symbol;
        uint256 initialSupply;
        address recipient;
        address owner;
        uint256 yearlyMintRate;
        uint256 vestingDuration;
        address[] recipients;
        uint256[] amounts;
        string tokenURI;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Doppler404ConstructorArgs {
        string name;
        string symbol;
        uint256 initialSupply;
        address recipient;
        address owner;
        string baseURI;
        uint256 unit;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct GovernanceData {
        string name;
        uint48 initialVotingDelay;
        uint32 initialVotingPeriod;
        uint256 initialProposalThreshold;
    }

    // pool initializers

    #[derive(Debug, PartialEq, Eq)]
    struct V3InitData {
        uint24 fee;
        int24 tickLower;
        int24 tickUpper;
        uint16 numPositions;
        uint256 maxShareToBeSold;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct LockableV3InitData {
        uint24 fee;
        int24 tickLower;
        int24 tickUpper;
        uint16 numPositions;
        uint256 maxShareToBeSold;
        BeneficiaryData[] beneficiaries;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct DopplerInitData {
        uint256 minimumProceeds;
        uint256 maximumProceeds;
        uint256 startingTime;
        uint256 endingTime;
        int24 startingTick;
        int24 endingTick;
        uint256 epochLength;
        int24 gamma;
        bool isToken0;
        uint256 numPDSlugs;
        uint24 lpFee;
        int24 tickSpacing;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct MulticurveInitData {
        uint24 fee;
        int24 tickSpacing;
        CurveData[] curves;
        BeneficiaryData[] beneficiaries;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct ScheduledMulticurveInitData {
        uint24 fee;
        int24 tickSpacing;
        CurveData[] curves;
        BeneficiaryData[] beneficiaries;
        uint32 startingTime;
    }

    // liquidity migrators

    #[derive(Debug, PartialEq, Eq)]
    struct V3MigratorData {
        uint24 fee;
        int24 tickSpacing;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct V4MigratorData {
        uint24 fee;
        int24 tickSpacing;
        uint32 lockDuration;
        BeneficiaryData[] beneficiaries;
    }

    interface IAirlock {
        function create(CreateParams createData) external returns (
            address asset,
            address pool,
            address governance,
            address timelock,
            address migrationPool
        );
        function migrate(address asset) external;
        function owner() external view returns (address);
        function getAssetData(address asset) external view returns (
            address numeraire,
            address timelock,
            address governance,
            address liquidityMigrator,
            address poolInitializer,
            address pool,
            address migrationPool,
            uint256 numTokensToSell,
            uint256 totalSupply,
            address integrator
        );
    }

    interface IUniswapV3Pool {
        function slot0() external view returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
        function liquidity() external view returns (uint128);
    }

    interface IUniswapV3Initializer {
        function getState(address pool) external view returns (
            address asset,
            address numeraire,
            int24 tickLower,
            int24 tickUpper,
            uint16 numPositions,
            bool isInitialized,
            bool isExited,
            uint256 maxShareToBeSold,
            uint256 totalTokensOnBondingCurve
        );
    }

    interface IDopplerHook {
        function state() external view returns (
            uint40 lastEpoch,
            int256 tickAccumulator,
            uint256 totalTokensSold,
            uint256 totalProceeds,
            uint256 totalTokensSoldLastEpoch,
            int256 feesAccrued
        );
        function earlyExit() external view returns (bool);
        function insufficientProceeds() external view returns (bool);
        function isToken0() external view returns (bool);
        function minimumProceeds() external view returns (uint256);
        function maximumProceeds() external view returns (uint256);
        function startingTime() external view returns (uint256);
        function endingTime() external view returns (uint256);
        function epochLength() external view returns (uint256);
        function gamma() external view returns (int24);
        function numTokensToSell() external view returns (uint256);
    }

    interface IMulticurveInitializer {
        function getState(address asset) external view returns (
            address numeraire,
            uint8 status,
            PoolKey poolKey,
            int24 farTick
        );
    }
}

pub(crate) fn to_i24(value: i32) -> Result<I24, EncodeError> {
    I24::try_from(value).map_err(|_| EncodeError::Overflow {
        value: value.to_string(),
        ty: "int24",
    })
}

pub(crate) fn to_u24(value: u32) -> Result<U24, EncodeError> {
    if value >= 1 << 24 {
        return Err(EncodeError::Overflow {
            value: value.to_string(),
            ty: "uint24",
        });
    }
    Ok(U24::from_limbs([u64::from(value)]))
}

pub(crate) fn to_u48(value: u64) -> Result<U48, EncodeError> {
    if value >= 1 << 48 {
        return Err(EncodeError::Overflow {
            value: value.to_string(),
            ty: "uint48",
        });
    }
    Ok(U48::from_limbs([value]))
}

pub(crate) fn to_u96(value: U256) -> Result<U96, EncodeError> {
    if value.bit_len() > 96 {
        return Err(EncodeError::Overflow {
            value: value.to_string(),
            ty: "uint96",
        });
    }
    let limbs = value.as_limbs();
    Ok(U96::from_limbs([limbs[0], limbs[1]]))
}

pub(crate) fn beneficiary_data(shares: &[BeneficiaryShare]) -> Result<Vec<BeneficiaryData>, EncodeError> {
    shares
        .iter()
        .map(|share| {
            Ok(BeneficiaryData {
                beneficiary: share.beneficiary,
                shares: to_u96(share.shares)?,
            })
        })
        .collect()
}

pub(crate) fn curve_data(curves: &[Curve]) -> Result<Vec<CurveData>, EncodeError> {
    curves
        .iter()
        .map(|curve| {
            Ok(CurveData {
                tickLower: to_i24(curve.tick_lower)?,
                tickUpper: to_i24(curve.tick_upper)?,
                numPositions: curve.num_positions,
                shares: curve.shares,
            })
        })
        .collect()
}
