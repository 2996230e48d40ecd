use super::validation::resolve_vesting;
use crate::abi::{Doppler404FactoryData, TokenFactoryData};
use crate::addresses::ModuleRole;
use crate::builders::LaunchConfig;
use crate::error::{EncodeError, ValidationError};
use crate::types::{TokenConfig, TokenKind};
use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;
use tracing::warn;

pub(crate) const fn token_factory_role(kind: TokenKind) -> ModuleRole {
    match kind {
        TokenKind::Standard => ModuleRole::TokenFactory,
        TokenKind::Doppler404 => ModuleRole::Doppler404Factory,
    }
}

/// Payload the token factory decodes to construct the asset.
pub(crate) fn token_factory_data(config: &LaunchConfig) -> Result<Bytes, EncodeError> {
    let encoded = match &config.token {
        TokenConfig::Standard(token) => {
            let vesting =
                resolve_vesting(config.vesting.as_ref(), &config.sale, config.user_address)?;
            if vesting.cliff_duration > 0 {
                warn!(
                    cliff = vesting.cliff_duration,
                    token = %token.symbol,
                    "standard token factory has no cliff parameter, vesting starts immediately"
                );
            }
            TokenFactoryData {
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                yearlyMintRate: token.yearly_mint_rate,
                vestingDuration: U256::from(vesting.duration),
                recipients: vesting.recipients,
                amounts: vesting.amounts,
                tokenURI: token.token_uri.clone(),
            }
            .abi_encode_params()
        }
        TokenConfig::Doppler404(token) => {
            if config.vesting.is_some() {
                return Err(ValidationError::VestingUnsupported.into());
            }
            Doppler404FactoryData {
                name: token.name.clone(),
                symbol: token.symbol.clone(),
                baseURI: token.base_uri.clone(),
                unit: token.unit,
            }
            .abi_encode_params()
        }
    };
    Ok(encoded.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addresses::ModuleOverrides;
    use crate::builders::fixtures;
    use crate::types::{GovernanceConfig, MigrationConfig, VestingConfig};
    use alloy_primitives::{Address, B256};

    fn config(token: TokenConfig, vesting: Option<VestingConfig>) -> LaunchConfig {
        LaunchConfig {
            token,
            sale: fixtures::sale(),
            vesting,
            governance: GovernanceConfig::Default,
            migration: MigrationConfig::UniswapV2,
            integrator: Address::ZERO,
            user_address: fixtures::user(),
            overrides: ModuleOverrides::new(),
            gas_limit: None,
            salt: B256::ZERO,
        }
    }

    #[test]
    fn standard_token_payload_carries_vesting() {
        let data = token_factory_data(&config(
            fixtures::token(),
            Some(VestingConfig::new(31_536_000)),
        ))
        .unwrap();
        let decoded = TokenFactoryData::abi_decode_params(&data).unwrap();
        assert_eq!(decoded.name, "Test Token");
        assert_eq!(decoded.symbol, "TEST");
        assert_eq!(decoded.tokenURI, "ipfs://test");
        assert_eq!(decoded.vestingDuration, U256::from(31_536_000u64));
        assert_eq!(decoded.recipients, vec![fixtures::user()]);
        assert_eq!(decoded.amounts, vec![fixtures::sale().unsold_supply()]);
    }

    #[test]
    fn standard_token_without_vesting_has_empty_schedule() {
        let data = token_factory_data(&config(fixtures::token(), None)).unwrap();
        let decoded = TokenFactoryData::abi_decode_params(&data).unwrap();
        assert_eq!(decoded.vestingDuration, U256::ZERO);
        assert!(decoded.recipients.is_empty());
        assert!(decoded.amounts.is_empty());
    }

    #[test]
    fn doppler404_rejects_vesting() {
        let token = TokenConfig::doppler404("Nft", "NFT", "ipfs://nft/");
        let err = token_factory_data(&config(token.clone(), Some(VestingConfig::new(1)))).unwrap_err();
        assert_eq!(err, EncodeError::Validation(ValidationError::VestingUnsupported));

        let data = token_factory_data(&config(token, None)).unwrap();
        let decoded = Doppler404FactoryData::abi_decode_params(&data).unwrap();
        assert_eq!(decoded.baseURI, "ipfs://nft/");
        assert_eq!(decoded.unit, U256::from(1000u32));
    }
}
