use super::validation::validate_beneficiaries;
use crate::abi::{V3MigratorData, V4MigratorData, beneficiary_data, to_i24, to_u24};
use crate::addresses::{AddressResolver, ModuleRole};
use crate::error::{ClientError, EncodeError};
use crate::types::MigrationConfig;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;
use tracing::warn;

/// Produces liquidity migrator payloads for schemes this crate does not
/// model. Once installed it encodes every migration variant.
pub trait MigrationEncoder: Send + Sync {
    fn encode(&self, config: &MigrationConfig) -> Result<Bytes, ClientError>;
}

impl<F> MigrationEncoder for F
where
    F: Fn(&MigrationConfig) -> Result<Bytes, ClientError> + Send + Sync,
{
    fn encode(&self, config: &MigrationConfig) -> Result<Bytes, ClientError> {
        self(config)
    }
}

fn migrator_address(
    config: &MigrationConfig,
    resolver: &AddressResolver<'_>,
) -> Result<Address, EncodeError> {
    let role = match config {
        MigrationConfig::UniswapV2 => ModuleRole::V2Migrator,
        MigrationConfig::UniswapV3 { .. } => ModuleRole::V3Migrator,
        MigrationConfig::UniswapV4 { .. } => ModuleRole::V4Migrator,
        MigrationConfig::NoOp => ModuleRole::NoOpMigrator,
        MigrationConfig::Custom { migrator } => return Ok(*migrator),
    };
    resolver.resolve(role)
}

/// Migrator address and payload.
///
/// Launches that lock fees to beneficiaries never migrate: they are routed
/// to the no-op migrator whatever `config` asks for.
pub(crate) fn migration_data(
    config: &MigrationConfig,
    lockable: bool,
    custom: Option<&dyn MigrationEncoder>,
    resolver: &AddressResolver<'_>,
) -> Result<(Address, Bytes), EncodeError> {
    if lockable {
        if !matches!(config, MigrationConfig::NoOp) {
            warn!(
                requested = config.kind(),
                "fee beneficiaries are set, migration replaced by the no-op migrator"
            );
        }
        return Ok((resolver.resolve(ModuleRole::NoOpMigrator)?, Bytes::new()));
    }

    let migrator = migrator_address(config, resolver)?;

    if let Some(encoder) = custom {
        let data = encoder
            .encode(config)
            .map_err(|e| EncodeError::MigrationEncoder(e.to_string()))?;
        return Ok((migrator, data));
    }

    let data = match config {
        MigrationConfig::UniswapV2 | MigrationConfig::NoOp => Bytes::new(),
        MigrationConfig::UniswapV3 { fee, tick_spacing } => V3MigratorData {
            fee: to_u24(*fee)?,
            tickSpacing: to_i24(*tick_spacing)?,
        }
        .abi_encode_params()
        .into(),
        MigrationConfig::UniswapV4 {
            fee,
            tick_spacing,
            lock_duration,
            beneficiaries,
        } => {
            validate_beneficiaries(beneficiaries, resolver.resolve(ModuleRole::AirlockOwner)?)?;
            V4MigratorData {
                fee: to_u24(*fee)?,
                tickSpacing: to_i24(*tick_spacing)?,
                lockDuration: *lock_duration,
                beneficiaries: beneficiary_data(beneficiaries)?,
            }
            .abi_encode_params()
            .into()
        }
        MigrationConfig::Custom { .. } => return Err(EncodeError::MissingMigrationEncoder),
    };
    Ok((migrator, data))
}
