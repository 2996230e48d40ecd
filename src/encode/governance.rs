use crate::abi::{GovernanceData, to_u48};
use crate::addresses::ModuleRole;
use crate::constants::{DEFAULT_PROPOSAL_THRESHOLD, DEFAULT_VOTING_DELAY, DEFAULT_VOTING_PERIOD};
use crate::error::EncodeError;
use crate::types::GovernanceConfig;
use alloy_primitives::Bytes;
use alloy_sol_types::SolValue;

/// Governance factory role and its payload; governance is named after the
/// token.
pub(crate) fn governance_factory_data(
    governance: &GovernanceConfig,
    token_name: &str,
) -> Result<(ModuleRole, Bytes), EncodeError> {
    let (delay, period, threshold) = match governance {
        GovernanceConfig::NoOp => return Ok((ModuleRole::NoOpGovernanceFactory, Bytes::new())),
        GovernanceConfig::Default => (
            DEFAULT_VOTING_DELAY,
            DEFAULT_VOTING_PERIOD,
            DEFAULT_PROPOSAL_THRESHOLD,
        ),
        GovernanceConfig::Custom {
            initial_voting_delay,
            initial_voting_period,
            initial_proposal_threshold,
        } => (
            *initial_voting_delay,
            *initial_voting_period,
            *initial_proposal_threshold,
        ),
    };

    let data = GovernanceData {
        name: token_name.to_string(),
        initialVotingDelay: to_u48(delay)?,
        initialVotingPeriod: period,
        initialProposalThreshold: threshold,
    }
    .abi_encode_params();
    Ok((ModuleRole::GovernanceFactory, data.into()))
}
