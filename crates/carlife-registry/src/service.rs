//! # Registry Service
//!
//! Composes the authorization store, pause controller and record store into
//! the lifecycle operations, and publishes every committed change to the
//! event bus.
//!
//! ## Atomicity
//!
//! All mutable core state sits behind one `tokio::sync::RwLock`. A mutating
//! call holds the write lock from its first precondition check until its last
//! notification is published, so:
//! - no reader observes a half-applied call
//! - a rejected call commits nothing and publishes nothing
//! - bus order equals commit order
//!
//! The identity token is minted on the ledger before the record is appended;
//! a ledger failure therefore leaves neither a record nor a counter bump.

use crate::adapters::{InMemoryTokenLedger, ManualClock};
use crate::config::{ConfigError, RegistryConfig};
use crate::domain::authorization::{
    AllowListAuthorization, AuthorizationPolicy, RoleGraphAuthorization,
};
use crate::domain::entities::{NewVehicle, RecordView, VehicleRecord};
use crate::domain::invariants::{
    check_count_monotonic, check_dense_ids, check_identity_fields_unchanged,
};
use crate::domain::pause::PauseState;
use crate::domain::records::RecordStore;
use crate::errors::RegistryError;
use crate::ports::inbound::VehicleRegistryApi;
use crate::ports::outbound::{Clock, TokenLedger};

use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus, RegistryEvent};
use shared_types::entities::{AccountId, RoleId, Timestamp, TokenId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Start time of the clock handed out by the test constructors.
pub const TEST_CLOCK_START: Timestamp = 1_700_000_000;

/// Statistics for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Records minted.
    pub mints: u64,
    /// Successful `update_info` calls.
    pub updates: u64,
    /// Successful `add_maintenance` calls.
    pub maintenance_entries: u64,
    /// Identity transfers committed.
    pub transfers: u64,
    /// Pause, allow-list, role and admin changes that altered state.
    pub admin_changes: u64,
    /// Calls rejected with an error.
    pub rejected_calls: u64,
}

/// Everything a call may read or write, guarded together.
#[derive(Debug)]
struct RegistryState<P> {
    policy: P,
    pause: PauseState,
    records: RecordStore,
}

/// The vehicle registry.
///
/// `P` picks the authorization strategy for the deployment, `L` the token
/// ledger backing identities.
pub struct RegistryService<P, L> {
    /// Deployment settings.
    config: RegistryConfig,
    /// Policy, pause switches and records.
    state: RwLock<RegistryState<P>>,
    /// Identity-token collaborator.
    ledger: Arc<L>,
    /// Notification sink.
    events: Arc<dyn EventPublisher>,
    /// Source of `now`.
    clock: Arc<dyn Clock>,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<P: AuthorizationPolicy, L: TokenLedger> RegistryService<P, L> {
    /// Create a registry with the given collaborators.
    ///
    /// # Errors
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        policy: P,
        ledger: Arc<L>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        config: RegistryConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(policy, ledger, events, clock, config))
    }

    fn assemble(
        policy: P,
        ledger: Arc<L>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        config: RegistryConfig,
    ) -> Self {
        let pause = PauseState::new(config.paused_at_start, config.minting_paused_at_start);
        info!(
            name = %config.collection_name,
            symbol = %config.collection_symbol,
            max_batch_size = config.max_batch_size,
            strict_pause = config.pause_blocks_mutations,
            "Registry created"
        );
        Self {
            config,
            state: RwLock::new(RegistryState {
                policy,
                pause,
                records: RecordStore::new(),
            }),
            ledger,
            events,
            clock,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Deployment settings.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The token ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Copy of every stored record, in id order.
    pub async fn records_snapshot(&self) -> Vec<VehicleRecord> {
        self.state.read().await.records.as_slice().to_vec()
    }

    /// Copy of the authorization state.
    pub async fn policy(&self) -> P
    where
        P: Clone,
    {
        self.state.read().await.policy.clone()
    }

    /// Logs and counts a rejected call, passing the result through.
    async fn finish<T>(
        &self,
        operation: &'static str,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        if let Err(err) = &result {
            warn!(operation, kind = ?err.kind(), error = %err, "Call rejected");
            self.stats.write().await.rejected_calls += 1;
        }
        result
    }

    async fn publish_all(&self, correlation_id: Uuid, events: Vec<RegistryEvent>) {
        for event in events {
            self.events.publish(correlation_id, event).await;
        }
    }

    async fn count_admin_change(&self) {
        self.stats.write().await.admin_changes += 1;
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    #[instrument(
        skip(self, vehicle),
        fields(correlation_id = %correlation_id, caller = %caller, vin = %vehicle.vin)
    )]
    async fn mint_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        vehicle: NewVehicle,
    ) -> Result<TokenId, RegistryError> {
        let mut state = self.state.write().await;
        state.pause.check_mint(self.config.pause_blocks_mutations)?;
        state.policy.require_mint(&caller)?;

        let token_id = state.records.next_id();
        let count_before = state.records.total_count();

        self.ledger
            .mint_identity(vehicle.recipient, token_id, vehicle.metadata_uri.clone())
            .await?;
        let appended = state.records.append(&vehicle, self.clock.now());

        debug_assert_eq!(appended, token_id);
        debug_assert!(check_count_monotonic(
            count_before,
            state.records.total_count()
        ));
        debug_assert!(check_dense_ids(state.records.as_slice()));

        self.publish_all(
            correlation_id,
            vec![
                RegistryEvent::Transfer {
                    from: AccountId::ZERO,
                    to: vehicle.recipient,
                    token_id,
                },
                RegistryEvent::VehicleMinted {
                    token_id,
                    recipient: vehicle.recipient,
                    vin: vehicle.vin,
                },
            ],
        )
        .await;
        self.stats.write().await.mints += 1;

        info!(token_id = %token_id, recipient = %vehicle.recipient, "Vehicle minted");
        Ok(token_id)
    }

    #[instrument(
        skip(self, condition),
        fields(correlation_id = %correlation_id, caller = %caller, token_id = %token_id)
    )]
    async fn update_info_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        condition: String,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        state.pause.check_mutation(self.config.pause_blocks_mutations)?;
        state.policy.require_mutate(&caller)?;

        let before = state.records.get(token_id)?.clone();
        let after = state
            .records
            .update_info(token_id, mileage, condition.clone())?;
        debug_assert!(check_identity_fields_unchanged(&before, after));
        debug_assert_eq!(before.last_service_date, after.last_service_date);

        self.publish_all(
            correlation_id,
            vec![RegistryEvent::VehicleInfoUpdated {
                token_id,
                mileage,
                condition,
            }],
        )
        .await;
        self.stats.write().await.updates += 1;

        info!(mileage, "Vehicle info updated");
        Ok(())
    }

    #[instrument(
        skip(self, notes),
        fields(correlation_id = %correlation_id, caller = %caller, token_id = %token_id)
    )]
    async fn add_maintenance_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        notes: String,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        state.pause.check_mutation(self.config.pause_blocks_mutations)?;
        state.policy.require_mutate(&caller)?;

        let before = state.records.get(token_id)?.clone();
        let now = self.clock.now();
        let after = state.records.record_maintenance(token_id, mileage, now)?;
        debug_assert!(check_identity_fields_unchanged(&before, after));

        self.publish_all(
            correlation_id,
            vec![RegistryEvent::MaintenanceAdded {
                token_id,
                mileage,
                notes,
            }],
        )
        .await;
        self.stats.write().await.maintenance_entries += 1;

        info!(mileage, service_date = now, "Maintenance recorded");
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    async fn view(&self, record: VehicleRecord) -> Result<RecordView, RegistryError> {
        let owner = self.ledger.owner_of(record.id).await?;
        Ok(RecordView { record, owner })
    }

    async fn get_record_inner(&self, token_id: TokenId) -> Result<RecordView, RegistryError> {
        let state = self.state.read().await;
        let record = state.records.get(token_id)?.clone();
        debug!(token_id = %token_id, "Record read");
        self.view(record).await
    }

    async fn get_record_batch_inner(
        &self,
        start: TokenId,
        count: u64,
    ) -> Result<Vec<RecordView>, RegistryError> {
        let state = self.state.read().await;
        let records = state
            .records
            .batch(start, count, self.config.max_batch_size)?
            .to_vec();

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            views.push(self.view(record).await?);
        }
        debug!(start = %start, count, "Batch read");
        Ok(views)
    }

    async fn token_uri_inner(&self, token_id: TokenId) -> Result<String, RegistryError> {
        let state = self.state.read().await;
        if !state.records.contains(token_id) {
            return Err(RegistryError::RecordNotFound(token_id));
        }
        Ok(self.ledger.metadata_uri(token_id).await?)
    }

    // =========================================================================
    // PAUSE CONTROL
    // =========================================================================

    #[instrument(skip(self), fields(correlation_id = %correlation_id, caller = %caller))]
    async fn set_paused_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        paused: bool,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        state.policy.require_admin(&caller)?;

        if state.pause.set_paused(paused) {
            self.publish_all(
                correlation_id,
                vec![RegistryEvent::PauseChanged { paused, by: caller }],
            )
            .await;
            self.count_admin_change().await;
            info!(paused, "Global pause changed");
        }
        Ok(())
    }

    #[instrument(skip(self), fields(correlation_id = %correlation_id, caller = %caller))]
    async fn set_minting_paused_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        paused: bool,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        state.policy.require_admin(&caller)?;

        if state.pause.set_minting_paused(paused) {
            self.publish_all(
                correlation_id,
                vec![RegistryEvent::MintingPauseChanged { paused, by: caller }],
            )
            .await;
            self.count_admin_change().await;
            info!(paused, "Minting pause changed");
        }
        Ok(())
    }

    // =========================================================================
    // IDENTITY TRANSFER
    // =========================================================================

    #[instrument(
        skip(self),
        fields(correlation_id = %correlation_id, caller = %caller, token_id = %token_id)
    )]
    async fn transfer_inner(
        &self,
        correlation_id: Uuid,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        let state = self.state.write().await;
        state.pause.check_transfer()?;
        if !state.records.contains(token_id) {
            return Err(RegistryError::RecordNotFound(token_id));
        }

        self.ledger
            .transfer(&state.pause, caller, from, to, token_id)
            .await?;

        self.publish_all(
            correlation_id,
            vec![RegistryEvent::Transfer { from, to, token_id }],
        )
        .await;
        self.stats.write().await.transfers += 1;

        info!(from = %from, to = %to, "Identity transferred");
        Ok(())
    }
}

#[async_trait]
impl<P, L> VehicleRegistryApi for RegistryService<P, L>
where
    P: AuthorizationPolicy + 'static,
    L: TokenLedger + 'static,
{
    async fn mint(&self, caller: AccountId, vehicle: NewVehicle) -> Result<TokenId, RegistryError> {
        let result = self.mint_inner(Uuid::new_v4(), caller, vehicle).await;
        self.finish("mint", result).await
    }

    async fn update_info(
        &self,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        condition: String,
    ) -> Result<(), RegistryError> {
        let result = self
            .update_info_inner(Uuid::new_v4(), caller, token_id, mileage, condition)
            .await;
        self.finish("update_info", result).await
    }

    async fn add_maintenance(
        &self,
        caller: AccountId,
        token_id: TokenId,
        mileage: u64,
        notes: String,
    ) -> Result<(), RegistryError> {
        let result = self
            .add_maintenance_inner(Uuid::new_v4(), caller, token_id, mileage, notes)
            .await;
        self.finish("add_maintenance", result).await
    }

    async fn get_record(&self, token_id: TokenId) -> Result<RecordView, RegistryError> {
        let result = self.get_record_inner(token_id).await;
        self.finish("get_record", result).await
    }

    async fn get_record_batch(
        &self,
        start: TokenId,
        count: u64,
    ) -> Result<Vec<RecordView>, RegistryError> {
        let result = self.get_record_batch_inner(start, count).await;
        self.finish("get_record_batch", result).await
    }

    async fn total_count(&self) -> u64 {
        self.state.read().await.records.total_count()
    }

    async fn token_uri(&self, token_id: TokenId) -> Result<String, RegistryError> {
        let result = self.token_uri_inner(token_id).await;
        self.finish("token_uri", result).await
    }

    fn name(&self) -> &str {
        &self.config.collection_name
    }

    fn symbol(&self) -> &str {
        &self.config.collection_symbol
    }

    fn max_batch_size(&self) -> u64 {
        self.config.max_batch_size
    }

    async fn set_paused(&self, caller: AccountId, paused: bool) -> Result<(), RegistryError> {
        let result = self.set_paused_inner(Uuid::new_v4(), caller, paused).await;
        self.finish("set_paused", result).await
    }

    async fn set_minting_paused(
        &self,
        caller: AccountId,
        paused: bool,
    ) -> Result<(), RegistryError> {
        let result = self
            .set_minting_paused_inner(Uuid::new_v4(), caller, paused)
            .await;
        self.finish("set_minting_paused", result).await
    }

    async fn is_paused(&self) -> bool {
        self.state.read().await.pause.is_paused()
    }

    async fn is_minting_paused(&self) -> bool {
        self.state.read().await.pause.is_minting_paused()
    }

    async fn transfer(
        &self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        let result = self
            .transfer_inner(Uuid::new_v4(), caller, from, to, token_id)
            .await;
        self.finish("transfer", result).await
    }
}

// =============================================================================
// SINGLE ADMIN + ALLOW-LIST ADMINISTRATION
// =============================================================================

impl<L: TokenLedger> RegistryService<AllowListAuthorization, L> {
    /// True for the admin and every allow-listed account.
    pub async fn is_authorized(&self, account: &AccountId) -> bool {
        self.state.read().await.policy.is_authorized(account)
    }

    /// Current admin.
    pub async fn admin(&self) -> AccountId {
        self.state.read().await.policy.admin()
    }

    /// Nominated successor, if any.
    pub async fn pending_admin(&self) -> Option<AccountId> {
        self.state.read().await.policy.pending_admin()
    }

    /// Grants `account` mint and mutation rights. Admin only; idempotent.
    #[instrument(skip(self), fields(caller = %caller, account = %account))]
    pub async fn add_authorized(
        &self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), RegistryError> {
        let result = self.set_authorized(caller, account, true).await;
        self.finish("add_authorized", result).await
    }

    /// Withdraws the rights granted by [`Self::add_authorized`].
    #[instrument(skip(self), fields(caller = %caller, account = %account))]
    pub async fn remove_authorized(
        &self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), RegistryError> {
        let result = self.set_authorized(caller, account, false).await;
        self.finish("remove_authorized", result).await
    }

    async fn set_authorized(
        &self,
        caller: AccountId,
        account: AccountId,
        authorized: bool,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        let changed = if authorized {
            state.policy.add_authorized(&caller, account)?
        } else {
            state.policy.remove_authorized(&caller, &account)?
        };

        if changed {
            self.publish_all(
                Uuid::new_v4(),
                vec![RegistryEvent::AuthorizationChanged {
                    account,
                    authorized,
                    by: caller,
                }],
            )
            .await;
            self.count_admin_change().await;
            info!(authorized, "Allow-list changed");
        }
        Ok(())
    }

    /// Nominates `new_admin`; the zero account cancels a pending handover.
    #[instrument(skip(self), fields(caller = %caller, new_admin = %new_admin))]
    pub async fn transfer_admin(
        &self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            state.policy.transfer_admin(&caller, new_admin)?;
            if let Some(pending) = state.policy.pending_admin() {
                self.publish_all(
                    Uuid::new_v4(),
                    vec![RegistryEvent::AdminTransferStarted {
                        current: caller,
                        pending,
                    }],
                )
                .await;
            }
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("transfer_admin", result).await
    }

    /// Completes a handover started by [`Self::transfer_admin`].
    #[instrument(skip(self), fields(caller = %caller))]
    pub async fn accept_admin(&self, caller: AccountId) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            let previous = state.policy.accept_admin(&caller)?;
            self.publish_all(
                Uuid::new_v4(),
                vec![RegistryEvent::AdminTransferred {
                    previous,
                    new: caller,
                }],
            )
            .await;
            self.count_admin_change().await;
            info!(previous = %previous, "Admin transferred");
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("accept_admin", result).await
    }
}

// =============================================================================
// ROLE GRAPH ADMINISTRATION
// =============================================================================

impl<L: TokenLedger> RegistryService<RoleGraphAuthorization, L> {
    /// Does `account` hold `role`?
    pub async fn has_role(&self, role: &RoleId, account: &AccountId) -> bool {
        self.state.read().await.policy.has_role(role, account)
    }

    /// Admin role governing `role`.
    pub async fn role_admin(&self, role: &RoleId) -> RoleId {
        self.state.read().await.policy.role_admin(role)
    }

    /// Current holders of `role`.
    pub async fn role_members(&self, role: &RoleId) -> Vec<AccountId> {
        self.state.read().await.policy.role_members(role)
    }

    /// Grants `role` to `account`. Caller must hold the role's admin role.
    #[instrument(skip(self), fields(caller = %caller, role = %role, account = %account))]
    pub async fn grant_role(
        &self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            if state.policy.grant_role(&caller, role, account)? {
                self.publish_all(
                    Uuid::new_v4(),
                    vec![RegistryEvent::RoleGranted {
                        role,
                        account,
                        sender: caller,
                    }],
                )
                .await;
                self.count_admin_change().await;
                info!("Role granted");
            }
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("grant_role", result).await
    }

    /// Revokes `role` from `account`. Caller must hold the role's admin role.
    #[instrument(skip(self), fields(caller = %caller, role = %role, account = %account))]
    pub async fn revoke_role(
        &self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            if state.policy.revoke_role(&caller, role, &account)? {
                self.publish_all(
                    Uuid::new_v4(),
                    vec![RegistryEvent::RoleRevoked {
                        role,
                        account,
                        sender: caller,
                    }],
                )
                .await;
                self.count_admin_change().await;
                info!("Role revoked");
            }
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("revoke_role", result).await
    }

    /// Drops the caller's own membership in `role`.
    #[instrument(skip(self), fields(caller = %caller, role = %role))]
    pub async fn renounce_role(
        &self,
        caller: AccountId,
        role: RoleId,
        account: AccountId,
    ) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            if state.policy.renounce_role(&caller, role, &account)? {
                self.publish_all(
                    Uuid::new_v4(),
                    vec![RegistryEvent::RoleRevoked {
                        role,
                        account,
                        sender: caller,
                    }],
                )
                .await;
                self.count_admin_change().await;
                info!("Role renounced");
            }
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("renounce_role", result).await
    }

    /// Reassigns the admin role of `role`. `DEFAULT_ADMIN_ROLE` holders only.
    #[instrument(skip(self), fields(caller = %caller, role = %role, admin_role = %admin_role))]
    pub async fn set_role_admin(
        &self,
        caller: AccountId,
        role: RoleId,
        admin_role: RoleId,
    ) -> Result<(), RegistryError> {
        let result = async {
            let mut state = self.state.write().await;
            let previous = state.policy.set_role_admin(&caller, role, admin_role)?;
            if previous != admin_role {
                self.publish_all(
                    Uuid::new_v4(),
                    vec![RegistryEvent::RoleAdminChanged {
                        role,
                        previous_admin: previous,
                        new_admin: admin_role,
                    }],
                )
                .await;
                self.count_admin_change().await;
            }
            Ok::<(), RegistryError>(())
        }
        .await;
        self.finish("set_role_admin", result).await
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// A registry wired to in-memory collaborators, with handles to each.
pub struct TestRegistry<P> {
    /// The registry under test.
    pub service: RegistryService<P, InMemoryTokenLedger>,
    /// Bus the registry publishes to.
    pub bus: Arc<InMemoryEventBus>,
    /// Clock the registry reads.
    pub clock: Arc<ManualClock>,
    /// Ledger backing identities.
    pub ledger: Arc<InMemoryTokenLedger>,
}

/// Allow-list registry administered by `admin`, minting open.
#[must_use]
pub fn create_test_service(admin: AccountId) -> TestRegistry<AllowListAuthorization> {
    assemble_test_service(
        AllowListAuthorization::new(admin),
        RegistryConfig::minting_open(),
    )
}

/// Role-graph registry where `admin` holds `DEFAULT_ADMIN_ROLE`, minting open.
#[must_use]
pub fn create_role_test_service(admin: AccountId) -> TestRegistry<RoleGraphAuthorization> {
    assemble_test_service(
        RoleGraphAuthorization::new(admin),
        RegistryConfig::minting_open(),
    )
}

/// Registry with an explicit policy and configuration.
///
/// # Errors
///
/// Fails if `config` does not validate.
pub fn create_test_service_with<P: AuthorizationPolicy>(
    policy: P,
    config: RegistryConfig,
) -> Result<TestRegistry<P>, ConfigError> {
    config.validate()?;
    Ok(assemble_test_service(policy, config))
}

fn assemble_test_service<P: AuthorizationPolicy>(
    policy: P,
    config: RegistryConfig,
) -> TestRegistry<P> {
    let bus = Arc::new(InMemoryEventBus::new());
    let clock = Arc::new(ManualClock::new(TEST_CLOCK_START));
    let ledger = Arc::new(InMemoryTokenLedger::new());
    let service = RegistryService::assemble(
        policy,
        Arc::clone(&ledger),
        bus.clone(),
        clock.clone(),
        config,
    );
    TestRegistry {
        service,
        bus,
        clock,
        ledger,
    }
}

// =============================================================================
// TESTS
// =============================================================================
