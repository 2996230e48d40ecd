//! Cross-field rules that depend on more than one section of a launch and
//! are therefore checked when params are encoded, not when they are built.

use crate::constants::{MIN_PROTOCOL_OWNER_SHARES, WAD};
use crate::error::ValidationError;
use crate::types::{BeneficiaryShare, Curve, SaleConfig, VestingConfig};
use alloy_primitives::{Address, U256};

/// Fee beneficiaries must be strictly ascending by address, each hold a
/// positive share, sum to exactly 1e18 and include `protocol_owner` with at
/// least 5%.
pub fn validate_beneficiaries(
    beneficiaries: &[BeneficiaryShare],
    protocol_owner: Address,
) -> Result<(), ValidationError> {
    for pair in beneficiaries.windows(2) {
        if pair[0].beneficiary >= pair[1].beneficiary {
            return Err(ValidationError::BeneficiariesUnsorted(pair[1].beneficiary));
        }
    }
    if let Some(zero) = beneficiaries.iter().find(|b| b.shares.is_zero()) {
        return Err(ValidationError::ZeroBeneficiaryShares(zero.beneficiary));
    }

    let total = beneficiaries
        .iter()
        .fold(U256::ZERO, |acc, b| acc.saturating_add(b.shares));
    if total != WAD {
        return Err(ValidationError::BeneficiarySharesSum(total));
    }

    let owner_shares = beneficiaries
        .iter()
        .find(|b| b.beneficiary == protocol_owner)
        .map_or(U256::ZERO, |b| b.shares);
    if owner_shares < MIN_PROTOCOL_OWNER_SHARES {
        return Err(ValidationError::ProtocolOwnerShare {
            owner: protocol_owner,
            shares: owner_shares,
        });
    }
    Ok(())
}

pub fn validate_curve_shares(curves: &[Curve]) -> Result<(), ValidationError> {
    let total = curves
        .iter()
        .fold(U256::ZERO, |acc, c| acc.saturating_add(c.shares));
    if total != WAD {
        return Err(ValidationError::CurveSharesSum(total));
    }
    Ok(())
}

/// Vesting in the shape the token factory takes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVesting {
    pub duration: u64,
    pub cliff_duration: u64,
    pub recipients: Vec<Address>,
    pub amounts: Vec<U256>,
}

/// Checks `vesting` against the sale and fills in the single-recipient
/// default: the whole unsold supply vests to `user_address`.
pub fn resolve_vesting(
    vesting: Option<&VestingConfig>,
    sale: &SaleConfig,
    user_address: Address,
) -> Result<ResolvedVesting, ValidationError> {
    let Some(vesting) = vesting else {
        return Ok(ResolvedVesting::default());
    };
    if vesting.cliff_duration > vesting.duration {
        return Err(ValidationError::CliffExceedsDuration {
            cliff: vesting.cliff_duration,
            duration: vesting.duration,
        });
    }

    let available = sale.unsold_supply();
    let (recipients, amounts) = match (&vesting.recipients, &vesting.amounts) {
        (None, None) => (vec![user_address], vec![available]),
        (recipients, amounts) => {
            let recipients = recipients.clone().unwrap_or_default();
            let amounts = amounts.clone().unwrap_or_default();
            if recipients.len() != amounts.len() {
                return Err(ValidationError::VestingLengthMismatch {
                    recipients: recipients.len(),
                    amounts: amounts.len(),
                });
            }
            if recipients.is_empty() {
                return Err(ValidationError::EmptyVestingRecipients);
            }
            let vested = amounts
                .iter()
                .fold(U256::ZERO, |acc, amount| acc.saturating_add(*amount));
            if vested > available {
                return Err(ValidationError::VestingExceedsSupply { vested, available });
            }
            (recipients, amounts)
        }
    };

    Ok(ResolvedVesting {
        duration: vesting.duration,
        cliff_duration: vesting.cliff_duration,
        recipients,
        amounts,
    })
}
