//! # Role / Authorization Store
//!
//! Two interchangeable authorization strategies behind one
//! [`AuthorizationPolicy`] interface. A deployment picks one by type
//! parameter; the two are never merged.
//!
//! | Strategy | `can_mint` / `can_mutate` | `can_administer` |
//! |----------|---------------------------|------------------|
//! | [`AllowListAuthorization`] | admin or allow-listed | admin |
//! | [`RoleGraphAuthorization`] | `PROVIDER_ROLE` or `DEFAULT_ADMIN_ROLE` | `DEFAULT_ADMIN_ROLE` |
//!
//! Every predicate is a pure function of `(caller, state)`.

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::entities::{AccountId, RoleId};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Role that administers every role unless reassigned.
pub const DEFAULT_ADMIN_ROLE: RoleId = RoleId::ZERO;

/// Name hashed into the provider role id.
pub const PROVIDER_ROLE_NAME: &str = "PROVIDER_ROLE";

/// Returns `keccak256("PROVIDER_ROLE")`.
#[must_use]
pub fn provider_role() -> RoleId {
    RoleId::from_name(PROVIDER_ROLE_NAME)
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// The right a caller was checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Create records.
    Mint,
    /// Update record fields or add maintenance.
    Mutate,
    /// Pause control and allow-list management.
    Administer,
    /// Complete a pending admin handover.
    AcceptAdmin,
    /// Grant or revoke the given role.
    ManageRole(RoleId),
    /// Renounce the given role on behalf of another account.
    RenounceRole(RoleId),
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mint => write!(f, "mint"),
            Self::Mutate => write!(f, "mutate"),
            Self::Administer => write!(f, "administer"),
            Self::AcceptAdmin => write!(f, "accept-admin"),
            Self::ManageRole(role) => write!(f, "manage-role {role}"),
            Self::RenounceRole(role) => write!(f, "renounce-role {role}"),
        }
    }
}

// =============================================================================
// POLICY INTERFACE
// =============================================================================

/// Authorization predicates consumed by the lifecycle operations.
pub trait AuthorizationPolicy: Send + Sync {
    /// May `caller` create records?
    fn can_mint(&self, caller: &AccountId) -> bool;

    /// May `caller` overwrite record fields?
    fn can_mutate(&self, caller: &AccountId) -> bool;

    /// May `caller` flip pause switches and manage authorization?
    fn can_administer(&self, caller: &AccountId) -> bool;

    /// Fails with `Unauthorized` unless `caller` may mint.
    fn require_mint(&self, caller: &AccountId) -> Result<(), RegistryError> {
        require(self.can_mint(caller), caller, Permission::Mint)
    }

    /// Fails with `Unauthorized` unless `caller` may mutate records.
    fn require_mutate(&self, caller: &AccountId) -> Result<(), RegistryError> {
        require(self.can_mutate(caller), caller, Permission::Mutate)
    }

    /// Fails with `Unauthorized` unless `caller` may administer.
    fn require_admin(&self, caller: &AccountId) -> Result<(), RegistryError> {
        require(self.can_administer(caller), caller, Permission::Administer)
    }
}

fn require(allowed: bool, caller: &AccountId, permission: Permission) -> Result<(), RegistryError> {
    if allowed {
        Ok(())
    } else {
        Err(RegistryError::unauthorized(*caller, permission))
    }
}

// =============================================================================
// SINGLE ADMIN + ALLOW-LIST
// =============================================================================

/// One admin account plus an explicit set of custom-authorized accounts.
///
/// Admin handover is two-step: the admin nominates, the nominee accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowListAuthorization {
    admin: AccountId,
    pending_admin: Option<AccountId>,
    authorized: BTreeSet<AccountId>,
}

impl AllowListAuthorization {
    /// Creates a store administered by `admin` with an empty allow-list.
    #[must_use]
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            pending_admin: None,
            authorized: BTreeSet::new(),
        }
    }

    /// Current admin.
    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    /// Nominated successor, if a handover is in progress.
    #[must_use]
    pub fn pending_admin(&self) -> Option<AccountId> {
        self.pending_admin
    }

    /// True for the admin and for every allow-listed account.
    #[must_use]
    pub fn is_authorized(&self, account: &AccountId) -> bool {
        *account == self.admin || self.authorized.contains(account)
    }

    /// Explicitly allow-listed accounts (the admin is not listed).
    pub fn authorized_accounts(&self) -> impl Iterator<Item = &AccountId> {
        self.authorized.iter()
    }

    /// Adds `account` to the allow-list. Returns false if already present.
    pub fn add_authorized(
        &mut self,
        caller: &AccountId,
        account: AccountId,
    ) -> Result<bool, RegistryError> {
        self.require_admin(caller)?;
        Ok(self.authorized.insert(account))
    }

    /// Removes `account` from the allow-list. Returns false if absent.
    pub fn remove_authorized(
        &mut self,
        caller: &AccountId,
        account: &AccountId,
    ) -> Result<bool, RegistryError> {
        self.require_admin(caller)?;
        Ok(self.authorized.remove(account))
    }

    /// Nominates `new_admin`. Nominating the zero account cancels a pending
    /// handover.
    pub fn transfer_admin(
        &mut self,
        caller: &AccountId,
        new_admin: AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        self.pending_admin = (!new_admin.is_zero()).then_some(new_admin);
        Ok(())
    }

    /// Completes a handover. Returns the previous admin.
    pub fn accept_admin(&mut self, caller: &AccountId) -> Result<AccountId, RegistryError> {
        if self.pending_admin != Some(*caller) {
            return Err(RegistryError::unauthorized(*caller, Permission::AcceptAdmin));
        }
        self.pending_admin = None;
        Ok(std::mem::replace(&mut self.admin, *caller))
    }
}

impl AuthorizationPolicy for AllowListAuthorization {
    fn can_mint(&self, caller: &AccountId) -> bool {
        self.is_authorized(caller)
    }

    fn can_mutate(&self, caller: &AccountId) -> bool {
        self.is_authorized(caller)
    }

    fn can_administer(&self, caller: &AccountId) -> bool {
        *caller == self.admin
    }
}

// =============================================================================
// ROLE GRAPH
// =============================================================================

/// Role memberships plus a role -> admin-role relation.
///
/// Holding a role's admin role permits granting and revoking that role.
/// Every role is administered by `DEFAULT_ADMIN_ROLE` until reassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGraphAuthorization {
    members: HashMap<RoleId, BTreeSet<AccountId>>,
    admins: HashMap<RoleId, RoleId>,
    provider: RoleId,
}

impl RoleGraphAuthorization {
    /// Creates a graph where `admin` holds `DEFAULT_ADMIN_ROLE`.
    #[must_use]
    pub fn new(admin: AccountId) -> Self {
        let mut members = HashMap::new();
        members.insert(DEFAULT_ADMIN_ROLE, BTreeSet::from([admin]));
        Self {
            members,
            admins: HashMap::new(),
            provider: provider_role(),
        }
    }

    /// The role that gates minting and record mutation.
    #[must_use]
    pub fn provider_role(&self) -> RoleId {
        self.provider
    }

    /// Does `account` hold `role`?
    #[must_use]
    pub fn has_role(&self, role: &RoleId, account: &AccountId) -> bool {
        self.members
            .get(role)
            .is_some_and(|holders| holders.contains(account))
    }

    /// The admin role governing `role`.
    #[must_use]
    pub fn role_admin(&self, role: &RoleId) -> RoleId {
        self.admins.get(role).copied().unwrap_or(DEFAULT_ADMIN_ROLE)
    }

    /// Current holders of `role`, in account order.
    #[must_use]
    pub fn role_members(&self, role: &RoleId) -> Vec<AccountId> {
        self.members
            .get(role)
            .map(|holders| holders.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Grants `role` to `account`. Returns false if already held.
    pub fn grant_role(
        &mut self,
        caller: &AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<bool, RegistryError> {
        self.require_role_admin(caller, &role)?;
        Ok(self.members.entry(role).or_default().insert(account))
    }

    /// Revokes `role` from `account`. Returns false if not held.
    pub fn revoke_role(
        &mut self,
        caller: &AccountId,
        role: RoleId,
        account: &AccountId,
    ) -> Result<bool, RegistryError> {
        self.require_role_admin(caller, &role)?;
        Ok(self.remove_member(&role, account))
    }

    /// Drops the caller's own membership in `role`.
    pub fn renounce_role(
        &mut self,
        caller: &AccountId,
        role: RoleId,
        account: &AccountId,
    ) -> Result<bool, RegistryError> {
        if caller != account {
            return Err(RegistryError::unauthorized(
                *caller,
                Permission::RenounceRole(role),
            ));
        }
        Ok(self.remove_member(&role, account))
    }

    /// Reassigns the admin role of `role`. Returns the previous admin role.
    pub fn set_role_admin(
        &mut self,
        caller: &AccountId,
        role: RoleId,
        admin_role: RoleId,
    ) -> Result<RoleId, RegistryError> {
        self.require_admin(caller)?;
        let previous = self.role_admin(&role);
        self.admins.insert(role, admin_role);
        Ok(previous)
    }

    fn require_role_admin(&self, caller: &AccountId, role: &RoleId) -> Result<(), RegistryError> {
        require(
            self.has_role(&self.role_admin(role), caller),
            caller,
            Permission::ManageRole(*role),
        )
    }

    fn remove_member(&mut self, role: &RoleId, account: &AccountId) -> bool {
        self.members
            .get_mut(role)
            .is_some_and(|holders| holders.remove(account))
    }
}

impl AuthorizationPolicy for RoleGraphAuthorization {
    fn can_mint(&self, caller: &AccountId) -> bool {
        self.has_role(&self.provider, caller) || self.has_role(&DEFAULT_ADMIN_ROLE, caller)
    }

    fn can_mutate(&self, caller: &AccountId) -> bool {
        self.can_mint(caller)
    }

    fn can_administer(&self, caller: &AccountId) -> bool {
        self.has_role(&DEFAULT_ADMIN_ROLE, caller)
    }
}

// =============================================================================
// TESTS
// =============================================================================
