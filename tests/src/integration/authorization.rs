//! # Authorization Deployments
//!
//! The same lifecycle surface under both authorization strategies.
//!
//! ## Flows Tested
//!
//! 1. Allow-list: unauthorized update, admin grant, identical call succeeds
//! 2. Allow-list: token holders get no mutation rights from holding
//! 3. Allow-list: two-step admin handover moves pause control
//! 4. Role graph: provider role gates mint and mutation, admin role gates pause
//! 5. Role graph: delegated role administration

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use carlife_registry::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_bus::{EventFilter, EventTopic, RegistryEvent};

    /// Every lifecycle mutation an unauthorized caller could attempt.
    async fn assert_locked_out<R: VehicleRegistryApi>(registry: &R, caller: AccountId) {
        assert_eq!(
            registry.mint(caller, model_s(caller)).await.map_err(|e| e.kind()),
            Err(ErrorKind::Unauthorized)
        );
        assert_eq!(
            registry
                .update_info(caller, TokenId(0), 1, "x".to_string())
                .await
                .map_err(|e| e.kind()),
            Err(ErrorKind::Unauthorized)
        );
        assert_eq!(
            registry
                .add_maintenance(caller, TokenId(0), 1, "x".to_string())
                .await
                .map_err(|e| e.kind()),
            Err(ErrorKind::Unauthorized)
        );
        assert_eq!(
            registry.set_paused(caller, true).await.map_err(|e| e.kind()),
            Err(ErrorKind::Unauthorized)
        );
    }

    // =============================================================================
    // SINGLE ADMIN + ALLOW-LIST
    // =============================================================================

    #[tokio::test]
    async fn test_grant_then_identical_update_succeeds() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.mint(ADMIN, model_s(ALICE)).await?;
        let mut lifecycle = t.bus.subscribe(EventFilter::topics(vec![EventTopic::Lifecycle]));

        let attempt = || {
            t.service
                .update_info(WORKSHOP, TokenId(0), 60_000, "excellent".to_string())
        };

        assert_eq!(
            attempt().await,
            Err(RegistryError::unauthorized(WORKSHOP, Permission::Mutate))
        );
        assert!(lifecycle.drain()?.is_empty());

        t.service.add_authorized(ADMIN, WORKSHOP).await?;
        attempt().await?;

        let published: Vec<_> = lifecycle.drain()?.into_iter().map(|e| e.event).collect();
        assert_eq!(
            published,
            vec![RegistryEvent::VehicleInfoUpdated {
                token_id: TokenId(0),
                mileage: 60_000,
                condition: "excellent".to_string(),
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_random_strangers_locked_out() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.mint(ADMIN, model_s(ALICE)).await?;

        let mut rng = StdRng::seed_from_u64(11);
        for stranger in random_accounts(&mut rng, 16) {
            assert!(!t.service.is_authorized(&stranger).await);
            assert_locked_out(&t.service, stranger).await;
        }
        // Holding the identity token grants nothing either
        assert_locked_out(&t.service, ALICE).await;

        assert_eq!(t.service.total_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_allow_listed_accounts_cannot_administer() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.add_authorized(ADMIN, WORKSHOP).await?;

        assert!(t.service.add_authorized(WORKSHOP, MALLORY).await.is_err());
        assert!(t.service.set_minting_paused(WORKSHOP, true).await.is_err());
        assert!(t.service.transfer_admin(WORKSHOP, WORKSHOP).await.is_err());
        assert!(!t.service.is_authorized(&MALLORY).await);
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_handover_moves_control() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.transfer_admin(ADMIN, BOB).await?;

        // Pending admin has no rights yet
        assert!(t.service.set_paused(BOB, true).await.is_err());
        assert!(t.service.mint(BOB, model_s(BOB)).await.is_err());

        t.service.accept_admin(BOB).await?;
        assert_eq!(t.service.admin().await, BOB);
        assert_eq!(t.service.pending_admin().await, None);

        t.service.mint(BOB, model_s(BOB)).await?;
        assert_locked_out(&t.service, ADMIN).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_cancelled_handover() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.transfer_admin(ADMIN, BOB).await?;
        t.service.transfer_admin(ADMIN, AccountId::ZERO).await?;

        assert_eq!(
            t.service.accept_admin(BOB).await,
            Err(RegistryError::unauthorized(BOB, Permission::AcceptAdmin))
        );
        assert_eq!(t.service.admin().await, ADMIN);
        Ok(())
    }

    // =============================================================================
    // ROLE GRAPH
    // =============================================================================

    #[tokio::test]
    async fn test_role_graph_deployment() -> anyhow::Result<()> {
        let t = create_role_test_service(ADMIN);
        let provider = provider_role();

        assert!(t.service.has_role(&DEFAULT_ADMIN_ROLE, &ADMIN).await);
        assert_locked_out(&t.service, WORKSHOP).await;

        t.service.grant_role(ADMIN, provider, WORKSHOP).await?;
        let id = t.service.mint(WORKSHOP, model_s(ALICE)).await?;
        t.service
            .add_maintenance(WORKSHOP, id, 50_500, "Inspection".to_string())
            .await?;

        // Providers are not admins
        assert!(t.service.set_paused(WORKSHOP, true).await.is_err());

        t.service.revoke_role(ADMIN, provider, WORKSHOP).await?;
        assert_locked_out(&t.service, WORKSHOP).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_delegated_role_administration() -> anyhow::Result<()> {
        let t = create_role_test_service(ADMIN);
        let provider = provider_role();
        let manager = RoleId::from_name("PROVIDER_MANAGER_ROLE");

        t.service.set_role_admin(ADMIN, provider, manager).await?;
        t.service.grant_role(ADMIN, manager, BOB).await?;

        assert_eq!(
            t.service.grant_role(ADMIN, provider, WORKSHOP).await,
            Err(RegistryError::unauthorized(
                ADMIN,
                Permission::ManageRole(provider)
            ))
        );
        t.service.grant_role(BOB, provider, WORKSHOP).await?;
        assert_eq!(t.service.role_members(&provider).await, vec![WORKSHOP]);

        // Managers hand out the role but cannot use it
        assert!(t.service.mint(BOB, model_s(BOB)).await.is_err());
        assert!(t.service.mint(WORKSHOP, model_s(BOB)).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_renounce_own_role_only() -> anyhow::Result<()> {
        let t = create_role_test_service(ADMIN);
        let provider = provider_role();
        t.service.grant_role(ADMIN, provider, WORKSHOP).await?;

        assert!(t
            .service
            .renounce_role(ADMIN, provider, WORKSHOP)
            .await
            .is_err());
        t.service.renounce_role(WORKSHOP, provider, WORKSHOP).await?;
        assert!(!t.service.has_role(&provider, &WORKSHOP).await);
        Ok(())
    }
}
