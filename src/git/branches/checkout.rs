use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::git::branches::operations::{current_branch, Branch};
use crate::git::engine::Engine;
use crate::git::error::{Error, Result};

/// Which branch to check out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    pub branch_name: String,
}

impl CheckoutOptions {
    pub fn new(branch_name: impl Into<String>) -> Self {
        Self {
            branch_name: branch_name.into(),
        }
    }
}

/// Where a checkout stands.
///
/// `Detached` and `OnBranch` describe HEAD before the checkout; a finished
/// checkout ends in `OnBranch` with the target branch or in `Failed` with
/// the error that stopped it.
#[derive(Debug)]
pub enum CheckoutState {
    Detached,
    OnBranch(Branch),
    Resolving(String),
    Failed(Error),
}

impl CheckoutState {
    /// Where HEAD is now.
    pub fn current(engine: &Engine) -> Self {
        match current_branch(engine) {
            Ok(Some(branch)) => Self::OnBranch(branch),
            Ok(None) => Self::Detached,
            Err(e) => Self::Failed(e),
        }
    }

    /// Move one step towards `target`.
    ///
    /// From a starting position this begins resolving the target; from
    /// `Resolving` it switches the working copy over. `Failed` stays put.
    pub fn advance(self, engine: &Engine, target: &str) -> Self {
        match self {
            Self::Detached | Self::OnBranch(_) => Self::Resolving(target.to_string()),
            Self::Resolving(name) => match switch_to(engine, &name) {
                Ok(branch) => Self::OnBranch(branch),
                Err(e) => Self::Failed(e),
            },
            failed @ Self::Failed(_) => failed,
        }
    }

    pub fn into_result(self) -> Result<Branch> {
        match self {
            Self::OnBranch(branch) => Ok(branch),
            Self::Failed(e) => Err(e),
            Self::Detached | Self::Resolving(_) => Err(Error::RefNotFound {
                name: "HEAD".to_string(),
            }),
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => f.write_str("detached"),
            Self::OnBranch(branch) => write!(f, "on {}", branch.name),
            Self::Resolving(name) => write!(f, "resolving {name}"),
            Self::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Check out `options.branch_name` and report the final state.
///
/// The working tree is updated before HEAD moves, so a checkout refused
/// for conflicting local changes leaves HEAD where it was.
pub fn checkout(engine: &Engine, options: &CheckoutOptions) -> CheckoutState {
    let target = options.branch_name.as_str();
    let start = CheckoutState::current(engine);
    debug!(from = %start, target, "checkout");

    let mut state = start.advance(engine, target);
    while let CheckoutState::Resolving(_) = state {
        state = state.advance(engine, target);
    }

    match &state {
        CheckoutState::OnBranch(branch) => info!(branch = %branch.name, "checked out"),
        CheckoutState::Failed(e) => warn!(target, error = %e, "checkout failed"),
        _ => {}
    }
    state
}

fn switch_to(engine: &Engine, name: &str) -> Result<Branch> {
    let target = engine.branch_target(name)?;
    engine.checkout_safe(&target)?;
    engine.set_head_to_branch(name)?;
    Ok(Branch {
        name: name.to_string(),
        oid: Some(target),
    })
}
