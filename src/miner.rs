//! CREATE2 salt search for vanity token addresses, optionally paired with a
//! hook address deployed from the same salt.

use crate::abi::{
    Doppler404ConstructorArgs, Doppler404FactoryData, TokenConstructorArgs, TokenFactoryData,
};
use crate::constants::HOOK_FLAG_MASK;
use crate::error::MinerError;
use crate::types::TokenKind;
use alloy_primitives::{Address, B256, Bytes, U256, keccak256};
use alloy_sol_types::SolValue;
use tracing::debug;

const CREATE2_PREIMAGE_LEN: usize = 1 + 20 + 32 + 32;

/// Init code of the token the factory deploys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInitCode {
    /// Creation bytecode without constructor arguments; they are rebuilt
    /// from the token factory payload.
    Creation(Bytes),
    /// Complete init code, hashed as is.
    Custom(Bytes),
}

/// Second address derived from the same salt, e.g. a dynamic auction hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookMatch {
    pub deployer: Address,
    pub init_code_hash: B256,
    pub prefix: Option<String>,
    /// Required value of the low 14 bits of the hook address.
    pub permission_flags: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineParams {
    /// Hex prefix of the token address, with or without `0x`.
    pub prefix: String,
    /// Token factory performing the CREATE2.
    pub deployer: Address,
    pub token: TokenKind,
    pub token_factory_data: Bytes,
    pub initial_supply: U256,
    pub airlock: Address,
    pub init_code: TokenInitCode,
    pub max_iterations: u64,
    pub start_salt: U256,
    pub hook: Option<HookMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningResult {
    pub salt: B256,
    pub token_address: Address,
    /// Candidates tried, including the matching one.
    pub iterations: u64,
    pub hook_address: Option<Address>,
}

/// Nibbles an address must start with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Prefix {
    text: String,
    nibbles: Vec<u8>,
}

impl Prefix {
    fn parse(raw: &str) -> Result<Self, MinerError> {
        let text = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw)
            .to_ascii_lowercase();
        if text.is_empty() || text.len() > 40 {
            return Err(MinerError::InvalidPrefix(raw.to_string()));
        }
        let nibbles = text
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| MinerError::InvalidPrefix(raw.to_string()))?;
        Ok(Self { text, nibbles })
    }

    #[inline]
    fn matches(&self, address: &Address) -> bool {
        self.nibbles.iter().enumerate().all(|(i, nibble)| {
            let byte = address[i / 2];
            let got = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            got == *nibble
        })
    }
}

/// Reusable `0xff ‖ deployer ‖ salt ‖ init_code_hash` buffer.
struct Create2Preimage([u8; CREATE2_PREIMAGE_LEN]);

impl Create2Preimage {
    fn new(deployer: Address, init_code_hash: B256) -> Self {
        let mut buf = [0u8; CREATE2_PREIMAGE_LEN];
        buf[0] = 0xff;
        buf[1..21].copy_from_slice(deployer.as_slice());
        buf[53..85].copy_from_slice(init_code_hash.as_slice());
        Self(buf)
    }

    #[inline]
    fn address(&mut self, salt: &B256) -> Address {
        self.0[21..53].copy_from_slice(salt.as_slice());
        Address::from_slice(&keccak256(self.0)[12..])
    }
}

/// `keccak256(0xff ‖ deployer ‖ salt ‖ init_code_hash)[12..]`.
pub fn compute_create2_address(deployer: Address, salt: B256, init_code_hash: B256) -> Address {
    Create2Preimage::new(deployer, init_code_hash).address(&salt)
}

/// Rebuilds the token constructor arguments from the factory payload. The
/// airlock receives the supply and owns the token.
pub fn token_constructor_args(
    token: TokenKind,
    token_factory_data: &[u8],
    initial_supply: U256,
    airlock: Address,
) -> Result<Bytes, MinerError> {
    let invalid = |e: alloy_sol_types::Error| MinerError::InvalidTokenData(e.to_string());
    let encoded = match token {
        TokenKind::Standard => {
            let data = TokenFactoryData::abi_decode_params(token_factory_data).map_err(invalid)?;
            TokenConstructorArgs {
                name: data.name,
                symbol: data.symbol,
                initialSupply: initial_supply,
                recipient: airlock,
                owner: airlock,
                yearlyMintRate: data.yearlyMintRate,
                vestingDuration: data.vestingDuration,
                recipients: data.recipients,
                amounts: data.amounts,
                tokenURI: data.tokenURI,
            }
            .abi_encode_params()
        }
        TokenKind::Doppler404 => {
            let data =
                Doppler404FactoryData::abi_decode_params(token_factory_data).map_err(invalid)?;
            Doppler404ConstructorArgs {
                name: data.name,
                symbol: data.symbol,
                initialSupply: initial_supply,
                recipient: airlock,
                owner: airlock,
                baseURI: data.baseURI,
                unit: data.unit,
            }
            .abi_encode_params()
        }
    };
    Ok(encoded.into())
}

/// Hash of the init code the token factory will deploy for `params`.
pub fn token_init_code_hash(params: &MineParams) -> Result<B256, MinerError> {
    match &params.init_code {
        TokenInitCode::Custom(code) => Ok(keccak256(code)),
        TokenInitCode::Creation(creation) => {
            let args = token_constructor_args(
                params.token,
                &params.token_factory_data,
                params.initial_supply,
                params.airlock,
            )?;
            let mut code = Vec::with_capacity(creation.len() + args.len());
            code.extend_from_slice(creation);
            code.extend_from_slice(&args);
            Ok(keccak256(code))
        }
    }
}

/// Walks salts from `start_salt` until the token address (and the hook
/// address, when requested) match, trying at most `max_iterations` salts.
pub fn mine(params: &MineParams) -> Result<MiningResult, MinerError> {
    if params.max_iterations == 0 {
        return Err(MinerError::InvalidMaxIterations);
    }
    let prefix = Prefix::parse(&params.prefix)?;
    let hook_prefix = params
        .hook
        .as_ref()
        .and_then(|hook| hook.prefix.as_deref())
        .map(Prefix::parse)
        .transpose()?;

    let mut token = Create2Preimage::new(params.deployer, token_init_code_hash(params)?);
    let mut hook = params
        .hook
        .as_ref()
        .map(|hook| Create2Preimage::new(hook.deployer, hook.init_code_hash));
    let flags = params.hook.as_ref().and_then(|hook| hook.permission_flags);

    debug!(
        prefix = %prefix.text,
        deployer = %params.deployer,
        max_iterations = params.max_iterations,
        with_hook = hook.is_some(),
        "mining token salt"
    );

    let mut salt_value = params.start_salt;
    for iteration in 1..=params.max_iterations {
        let salt = B256::from(salt_value);
        salt_value = salt_value.wrapping_add(U256::ONE);

        let token_address = token.address(&salt);
        if !prefix.matches(&token_address) {
            continue;
        }

        let hook_address = match hook.as_mut() {
            None => None,
            Some(hook) => {
                let address = hook.address(&salt);
                if hook_prefix.as_ref().is_some_and(|p| !p.matches(&address)) {
                    continue;
                }
                if flags.is_some_and(|flags| hook_flags(&address) != flags & HOOK_FLAG_MASK) {
                    continue;
                }
                Some(address)
            }
        };

        debug!(%salt, %token_address, iterations = iteration, "salt found");
        return Ok(MiningResult {
            salt,
            token_address,
            iterations: iteration,
            hook_address,
        });
    }

    Err(MinerError::NotFound {
        prefix: prefix.text,
        max_iterations: params.max_iterations,
    })
}

/// Low 14 bits of an address, where v4 hooks encode their permissions.
#[inline]
pub fn hook_flags(address: &Address) -> u16 {
    u16::from_be_bytes([address[18], address[19]]) & HOOK_FLAG_MASK
}
