//! Stateless mapping from frozen launch params to Airlock call-data.

mod governance;
mod migration;
mod pool;
mod token;
pub mod validation;

pub use migration::MigrationEncoder;

use crate::abi::{self, IAirlock};
use crate::addresses::{AddressResolver, ModuleOverrides, ModuleRole};
use crate::builders::{
    CreateDynamicAuctionParams, CreateMulticurveParams, CreateParams, CreateStaticAuctionParams,
    LaunchConfig,
};
use crate::client::CallRequest;
use crate::constants::{DEFAULT_START_TIME_OFFSET, DOPPLER_HOOK_FLAGS};
use crate::error::EncodeError;
use crate::miner::{HookMatch, MineParams, TokenInitCode};
use alloy_primitives::{Address, B256, Bytes, U256};
use alloy_sol_types::SolCall;
use governance::governance_factory_data;
use migration::migration_data;
use pool::{dynamic_init_data, multicurve_init_data, static_init_data};
use std::fmt;
use std::sync::Arc;
use token::{token_factory_data, token_factory_role};
use tracing::{debug, warn};
use validation::validate_beneficiaries;

/// Airlock `create` call ready to simulate or send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCreate {
    pub airlock: Address,
    pub create_params: abi::CreateParams,
    pub calldata: Bytes,
    pub gas_limit: Option<u64>,
    /// Account the launch is submitted from.
    pub from: Address,
}

impl EncodedCreate {
    pub fn call(&self) -> CallRequest {
        CallRequest::new(self.airlock, self.calldata.clone())
            .from(self.from)
            .gas_limit(self.gas_limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCall {
    pub to: Address,
    pub calldata: Bytes,
}

impl EncodedCall {
    pub fn call(&self) -> CallRequest {
        CallRequest::new(self.to, self.calldata.clone())
    }
}

/// Encodes launches for one chain.
#[derive(Clone)]
pub struct Encoder {
    chain_id: u64,
    migration_encoder: Option<Arc<dyn MigrationEncoder>>,
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("chain_id", &self.chain_id)
            .field("custom_migration", &self.migration_encoder.is_some())
            .finish()
    }
}

impl Encoder {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            migration_encoder: None,
        }
    }

    /// Installs an encoder that produces every migration payload.
    pub fn with_migration_encoder(mut self, encoder: impl MigrationEncoder + 'static) -> Self {
        self.migration_encoder = Some(Arc::new(encoder));
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `block_timestamp` only matters for dynamic auctions without an
    /// explicit start time.
    pub fn encode(
        &self,
        params: &CreateParams,
        block_timestamp: u64,
    ) -> Result<EncodedCreate, EncodeError> {
        match params {
            CreateParams::Static(params) => self.encode_create_static_auction(params),
            CreateParams::Dynamic(params) => {
                self.encode_create_dynamic_auction(params, block_timestamp)
            }
            CreateParams::Multicurve(params) => self.encode_create_multicurve(params),
        }
    }

    pub fn encode_create_static_auction(
        &self,
        params: &CreateStaticAuctionParams,
    ) -> Result<EncodedCreate, EncodeError> {
        let resolver = AddressResolver::new(self.chain_id, &params.config.overrides);
        if params.is_lockable() {
            validate_beneficiaries(
                &params.beneficiaries,
                resolver.resolve(ModuleRole::AirlockOwner)?,
            )?;
        }
        let initializer = static_init_data(params)?;
        self.assemble("static", &params.config, params.is_lockable(), initializer, &resolver)
    }

    /// Starts `DEFAULT_START_TIME_OFFSET` seconds after `block_timestamp`
    /// unless the schedule fixes a start time.
    pub fn encode_create_dynamic_auction(
        &self,
        params: &CreateDynamicAuctionParams,
        block_timestamp: u64,
    ) -> Result<EncodedCreate, EncodeError> {
        let resolver = AddressResolver::new(self.chain_id, &params.config.overrides);
        let starting_time = params
            .auction
            .start_time
            .unwrap_or_else(|| block_timestamp.saturating_add(DEFAULT_START_TIME_OFFSET));
        let numeraire = params.config.sale.numeraire;
        let is_token0 = params.is_token0.unwrap_or_else(|| {
            if !numeraire.is_zero() {
                warn!(
                    %numeraire,
                    "token ordering not set for a non-native numeraire, assuming token1"
                );
            }
            false
        });

        let data = dynamic_init_data(&params.pool, &params.auction, starting_time, is_token0)?;
        self.assemble(
            "dynamic",
            &params.config,
            false,
            (ModuleRole::V4Initializer, data),
            &resolver,
        )
    }

    pub fn encode_create_multicurve(
        &self,
        params: &CreateMulticurveParams,
    ) -> Result<EncodedCreate, EncodeError> {
        let resolver = AddressResolver::new(self.chain_id, &params.config.overrides);
        if params.is_lockable() {
            validate_beneficiaries(
                &params.pool.beneficiaries,
                resolver.resolve(ModuleRole::AirlockOwner)?,
            )?;
        }
        let initializer = multicurve_init_data(params)?;
        self.assemble("multicurve", &params.config, params.is_lockable(), initializer, &resolver)
    }

    /// Airlock `migrate(asset)` for a graduated launch.
    pub fn encode_migrate(
        &self,
        asset: Address,
        overrides: &ModuleOverrides,
    ) -> Result<EncodedCall, EncodeError> {
        let airlock = AddressResolver::new(self.chain_id, overrides).resolve(ModuleRole::Airlock)?;
        debug!(%asset, %airlock, "encoding migrate");
        Ok(EncodedCall {
            to: airlock,
            calldata: IAirlock::migrateCall { asset }.abi_encode().into(),
        })
    }

    pub fn encode_token_factory_data(&self, config: &LaunchConfig) -> Result<Bytes, EncodeError> {
        token_factory_data(config)
    }

    /// Mining inputs for the token `config` will deploy, starting at salt 0.
    pub fn token_mine_params(
        &self,
        config: &LaunchConfig,
        prefix: impl Into<String>,
        init_code: TokenInitCode,
        max_iterations: u64,
    ) -> Result<MineParams, EncodeError> {
        let resolver = AddressResolver::new(self.chain_id, &config.overrides);
        Ok(MineParams {
            prefix: prefix.into(),
            deployer: resolver.resolve(token_factory_role(config.token.kind()))?,
            token: config.token.kind(),
            token_factory_data: token_factory_data(config)?,
            initial_supply: config.sale.initial_supply,
            airlock: resolver.resolve(ModuleRole::Airlock)?,
            init_code,
            max_iterations,
            start_salt: U256::ZERO,
            hook: None,
        })
    }

    /// Hook constraint for a dynamic auction: deployed by the Doppler
    /// deployer with the auction's permission flags.
    pub fn doppler_hook_match(
        &self,
        overrides: &ModuleOverrides,
        hook_init_code_hash: B256,
    ) -> Result<HookMatch, EncodeError> {
        let deployer =
            AddressResolver::new(self.chain_id, overrides).resolve(ModuleRole::DopplerDeployer)?;
        Ok(HookMatch {
            deployer,
            init_code_hash: hook_init_code_hash,
            prefix: None,
            permission_flags: Some(DOPPLER_HOOK_FLAGS),
        })
    }

    fn assemble(
        &self,
        pool_type: &'static str,
        config: &LaunchConfig,
        lockable: bool,
        (initializer_role, pool_initializer_data): (ModuleRole, Bytes),
        resolver: &AddressResolver<'_>,
    ) -> Result<EncodedCreate, EncodeError> {
        let airlock = resolver.resolve(ModuleRole::Airlock)?;
        let token_factory = resolver.resolve(token_factory_role(config.token.kind()))?;
        let token_factory_data = token_factory_data(config)?;
        let (governance_role, governance_factory_data) =
            governance_factory_data(&config.governance, config.token.name())?;
        let governance_factory = resolver.resolve(governance_role)?;
        let pool_initializer = resolver.resolve(initializer_role)?;
        let (liquidity_migrator, liquidity_migrator_data) = migration_data(
            &config.migration,
            lockable,
            self.migration_encoder.as_deref(),
            resolver,
        )?;

        debug!(
            pool_type,
            chain_id = self.chain_id,
            %pool_initializer,
            %liquidity_migrator,
            salt = %config.salt,
            "encoding create"
        );

        let create_params = abi::CreateParams {
            initialSupply: config.sale.initial_supply,
            numTokensToSell: config.sale.num_tokens_to_sell,
            numeraire: config.sale.numeraire,
            tokenFactory: token_factory,
            tokenFactoryData: token_factory_data,
            governanceFactory: governance_factory,
            governanceFactoryData: governance_factory_data,
            poolInitializer: pool_initializer,
            poolInitializerData: pool_initializer_data,
            liquidityMigrator: liquidity_migrator,
            liquidityMigratorData: liquidity_migrator_data,
            integrator: config.integrator,
            salt: config.salt,
        };
        let calldata = IAirlock::createCall {
            createData: create_params.clone(),
        }
        .abi_encode()
        .into();

        Ok(EncodedCreate {
            airlock,
            create_params,
            calldata,
            gas_limit: config.gas_limit,
            from: config.user_address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{DopplerInitData, ScheduledMulticurveInitData};
    use crate::addresses::{ANVIL, ANVIL_CHAIN_ID};
    use crate::builders::{
        AuctionSchedule, DynamicAuctionBuilder, DynamicPool, MarketCapPresets, MulticurveBuilder,
        StaticAuctionBuilder, StaticPool, fixtures,
    };
    use crate::constants::WAD;
    use crate::error::{ClientError, ValidationError};
    use crate::miner::{compute_create2_address, mine, token_init_code_hash};
    use crate::types::{BeneficiaryShare, MigrationConfig, VestingConfig};
    use alloy_sol_types::SolValue;

    fn encoder() -> Encoder {
        Encoder::new(ANVIL_CHAIN_ID)
    }

    fn owner_split() -> Vec<BeneficiaryShare> {
        let tenth = WAD / U256::from(10u8);
        vec![
            BeneficiaryShare::new(ANVIL.airlock_owner.unwrap(), tenth),
            BeneficiaryShare::new(Address::repeat_byte(0x22), WAD - tenth),
        ]
    }

    fn multicurve() -> MulticurveBuilder {
        MulticurveBuilder::new()
            .token(fixtures::token())
            .sale(fixtures::sale())
            .governance(fixtures::governance())
            .migration(fixtures::migration())
            .user_address(fixtures::user())
            .with_market_cap_presets(MarketCapPresets::new())
            .unwrap()
    }

    fn static_auction() -> StaticAuctionBuilder {
        StaticAuctionBuilder::new()
            .token(fixtures::token())
            .sale(fixtures::sale())
            .governance(fixtures::governance())
            .migration(MigrationConfig::UniswapV3 {
                fee: 3000,
                tick_spacing: 60,
            })
            .user_address(fixtures::user())
            .pool_by_ticks(StaticPool::new(175_000, 225_000))
    }

    fn dynamic_auction() -> DynamicAuctionBuilder {
        DynamicAuctionBuilder::new()
            .token(fixtures::token())
            .sale(fixtures::sale())
            .governance(fixtures::governance())
            .migration(fixtures::migration())
            .user_address(fixtures::user())
            .pool_config(DynamicPool::new(3000, 60))
            .auction_by_ticks(
                -100_020,
                60_000,
                AuctionSchedule::new(U256::from(100u32), U256::from(1000u32)),
            )
    }

    #[test]
    fn multicurve_calldata_wraps_create_params() {
        let params = multicurve().build().unwrap();
        let encoded = encoder().encode_create_multicurve(&params).unwrap();

        assert_eq!(encoded.airlock, ANVIL.airlock);
        assert_eq!(encoded.from, fixtures::user());
        assert_eq!(&encoded.calldata[..4], IAirlock::createCall::SELECTOR.as_slice());

        let decoded = IAirlock::createCall::abi_decode(&encoded.calldata).unwrap();
        assert_eq!(decoded.createData, encoded.create_params);

        let create = &encoded.create_params;
        assert_eq!(create.initialSupply, fixtures::supply());
        assert_eq!(create.tokenFactory, ANVIL.token_factory);
        assert_eq!(create.governanceFactory, ANVIL.governance_factory);
        assert_eq!(create.poolInitializer, ANVIL.multicurve_initializer.unwrap());
        assert_eq!(create.liquidityMigrator, ANVIL.v2_migrator.unwrap());
        assert!(create.liquidityMigratorData.is_empty());
        assert_eq!(create.salt, B256::ZERO);
    }

    #[test]
    fn scheduled_multicurve_uses_scheduled_initializer() {
        let params = multicurve().with_schedule(1_900_000_000u32).unwrap().build().unwrap();
        let encoded = encoder().encode_create_multicurve(&params).unwrap();
        let create = &encoded.create_params;
        assert_eq!(create.poolInitializer, ANVIL.scheduled_multicurve_initializer.unwrap());

        let init = ScheduledMulticurveInitData::abi_decode(&create.poolInitializerData).unwrap();
        assert_eq!(init.startingTime, 1_900_000_000);
        assert_eq!(init.curves.len(), 4);
    }

    #[test]
    fn lockable_static_auction_forces_noop_migration() {
        let params = static_auction().with_beneficiaries(owner_split()).build().unwrap();
        let encoded = encoder().encode_create_static_auction(&params).unwrap();
        let create = &encoded.create_params;
        assert_eq!(create.poolInitializer, ANVIL.lockable_v3_initializer.unwrap());
        assert_eq!(create.liquidityMigrator, ANVIL.no_op_migrator.unwrap());
        assert!(create.liquidityMigratorData.is_empty());

        let plain = static_auction().build().unwrap();
        let create = encoder().encode_create_static_auction(&plain).unwrap().create_params;
        assert_eq!(create.poolInitializer, ANVIL.v3_initializer.unwrap());
        assert_eq!(create.liquidityMigrator, ANVIL.v3_migrator.unwrap());
        assert_eq!(create.liquidityMigratorData.len(), 64);
    }

    #[test]
    fn lockable_beneficiaries_need_the_protocol_owner() {
        let params = static_auction()
            .with_beneficiaries(vec![BeneficiaryShare::new(Address::repeat_byte(0x22), WAD)])
            .build()
            .unwrap();
        assert!(matches!(
            encoder().encode_create_static_auction(&params),
            Err(EncodeError::Validation(ValidationError::ProtocolOwnerShare { .. }))
        ));
    }

    #[test]
    fn dynamic_start_defaults_after_block_timestamp() {
        let params = dynamic_auction().build().unwrap();
        let encoded = encoder().encode_create_dynamic_auction(&params, 1_700_000_000).unwrap();
        let create = &encoded.create_params;
        assert_eq!(create.poolInitializer, ANVIL.v4_initializer.unwrap());

        let init = DopplerInitData::abi_decode_params(&create.poolInitializerData).unwrap();
        assert_eq!(init.startingTime, U256::from(1_700_000_030u64));
        assert_eq!(init.endingTime, U256::from(1_700_000_030u64 + 7 * 86_400));
        assert_eq!(init.gamma.as_i32(), 11_460);
        assert!(!init.isToken0);

        let explicit = dynamic_auction()
            .auction_by_ticks(
                -100_020,
                60_000,
                AuctionSchedule::new(U256::from(100u32), U256::from(1000u32)).start_time(42),
            )
            .with_token_ordering(true)
            .build()
            .unwrap();
        let create = encoder()
            .encode(&explicit.into(), 1_700_000_000)
            .unwrap()
            .create_params;
        let init = DopplerInitData::abi_decode_params(&create.poolInitializerData).unwrap();
        assert_eq!(init.startingTime, U256::from(42u8));
        assert!(init.isToken0);
    }

    #[test]
    fn vesting_mismatch_fails_at_encode_time() {
        let params = multicurve()
            .with_vesting(VestingConfig::new(3600).recipients(
                vec![Address::repeat_byte(1), Address::repeat_byte(2)],
                vec![U256::from(100u32)],
            ))
            .build()
            .unwrap();
        assert_eq!(
            encoder().encode_create_multicurve(&params),
            Err(EncodeError::Validation(ValidationError::VestingLengthMismatch {
                recipients: 2,
                amounts: 1
            }))
        );
    }

    #[test]
    fn unknown_chain_needs_overrides() {
        let params = multicurve().build().unwrap();
        assert_eq!(
            Encoder::new(1).encode_create_multicurve(&params),
            Err(EncodeError::MissingModule {
                role: ModuleRole::Airlock,
                chain_id: 1
            })
        );
    }

    #[test]
    fn custom_migration_uses_injected_encoder() {
        let migrator = Address::repeat_byte(0x77);
        let params = multicurve()
            .migration(MigrationConfig::Custom { migrator })
            .build()
            .unwrap();
        assert_eq!(
            encoder().encode_create_multicurve(&params),
            Err(EncodeError::MissingMigrationEncoder)
        );

        let custom = encoder().with_migration_encoder(
            |_: &MigrationConfig| -> Result<Bytes, ClientError> {
                Ok(Bytes::from((U256::from(7u8),).abi_encode_params()))
            },
        );
        let create = custom.encode_create_multicurve(&params).unwrap().create_params;
        assert_eq!(create.liquidityMigrator, migrator);
        assert_eq!(U256::from_be_slice(&create.liquidityMigratorData), U256::from(7u8));
    }

    #[test]
    fn migrate_targets_airlock() {
        let asset = Address::repeat_byte(0x44);
        let encoded = encoder().encode_migrate(asset, &ModuleOverrides::new()).unwrap();
        assert_eq!(encoded.to, ANVIL.airlock);
        let decoded = IAirlock::migrateCall::abi_decode(&encoded.calldata).unwrap();
        assert_eq!(decoded.asset, asset);
    }

    #[test]
    fn mined_salt_predicts_the_token_address() {
        let params = multicurve().build().unwrap();
        let mine_params = encoder()
            .token_mine_params(
                &params.config,
                "0xa",
                TokenInitCode::Creation(Bytes::from_static(&[0x60, 0x80, 0x60, 0x40])),
                10_000,
            )
            .unwrap();
        assert_eq!(mine_params.deployer, ANVIL.token_factory);

        let mined = mine(&mine_params).unwrap();
        let expected = compute_create2_address(
            ANVIL.token_factory,
            mined.salt,
            token_init_code_hash(&mine_params).unwrap(),
        );
        assert_eq!(mined.token_address, expected);

        let params = params.with_mined(&mined);
        let create = encoder().encode_create_multicurve(&params).unwrap().create_params;
        assert_eq!(create.salt, mined.salt);
    }

    #[test]
    fn hook_match_uses_doppler_deployer() {
        let hook = encoder()
            .doppler_hook_match(&ModuleOverrides::new(), B256::repeat_byte(1))
            .unwrap();
        assert_eq!(hook.deployer, ANVIL.doppler_deployer.unwrap());
        assert_eq!(hook.permission_flags, Some(DOPPLER_HOOK_FLAGS));
    }
}
