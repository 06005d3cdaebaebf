//! # Pause Semantics
//!
//! ## Flows Tested
//!
//! 1. Global pause blocks every transfer, not record mutation
//! 2. Minting pause blocks mint for everyone, admin included
//! 3. Strict deployments: global pause blocks all mutations
//! 4. Startup values come from configuration

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use carlife_registry::prelude::*;

    #[tokio::test]
    async fn test_global_pause_blocks_transfers_only() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        mint_many(&t.service, ADMIN, ALICE, 3).await?;
        t.service.set_paused(ADMIN, true).await?;

        for id in 0..3 {
            assert_eq!(
                t.service.transfer(ALICE, ALICE, BOB, TokenId(id)).await,
                Err(RegistryError::OperationPaused)
            );
        }
        assert_eq!(t.ledger.balance_of(ALICE).await, 3);

        // Mutation stays open while paused
        t.service
            .update_info(ADMIN, TokenId(1), 9_000, "good".to_string())
            .await?;
        t.service
            .add_maintenance(ADMIN, TokenId(1), 9_100, "Oil".to_string())
            .await?;

        t.service.set_paused(ADMIN, false).await?;
        t.service.transfer(ALICE, ALICE, BOB, TokenId(1)).await?;
        assert_eq!(t.service.get_record(TokenId(1)).await?.owner, BOB);
        Ok(())
    }

    #[tokio::test]
    async fn test_global_pause_outranks_transfer_rules() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        mint_many(&t.service, ADMIN, ALICE, 2).await?;
        t.service.set_paused(ADMIN, true).await?;

        let attempts = [
            (MALLORY, ALICE, MALLORY, TokenId(0)),
            (BOB, ALICE, BOB, TokenId(1)),
            (ALICE, BOB, ALICE, TokenId(0)),
            (ALICE, ALICE, AccountId::ZERO, TokenId(1)),
            (ALICE, ALICE, BOB, TokenId(2)),
            (ALICE, ALICE, BOB, TokenId(u64::MAX)),
        ];
        for (caller, from, to, id) in attempts {
            assert_eq!(
                t.service.transfer(caller, from, to, id).await,
                Err(RegistryError::OperationPaused),
                "transfer of {id} by {caller} while paused"
            );
        }

        // Once unpaused the ordinary rules apply again
        t.service.set_paused(ADMIN, false).await?;
        assert_eq!(
            t.service.transfer(ALICE, ALICE, BOB, TokenId(2)).await,
            Err(RegistryError::RecordNotFound(TokenId(2)))
        );
        assert_eq!(
            t.service
                .transfer(ALICE, ALICE, AccountId::ZERO, TokenId(1))
                .await
                .map_err(|e| e.kind()),
            Err(ErrorKind::Ledger)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_minting_pause_applies_to_everyone() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.add_authorized(ADMIN, WORKSHOP).await?;
        t.service.set_minting_paused(ADMIN, true).await?;

        for caller in [ADMIN, WORKSHOP, MALLORY] {
            assert_eq!(
                t.service.mint(caller, model_s(ALICE)).await,
                Err(RegistryError::MintingPaused)
            );
        }
        assert_eq!(t.service.total_count().await, 0);

        // Minting pause leaves transfers alone
        t.service.set_minting_paused(ADMIN, false).await?;
        t.service.mint(ADMIN, model_s(ALICE)).await?;
        t.service.set_minting_paused(ADMIN, true).await?;
        t.service.transfer(ALICE, ALICE, BOB, TokenId(0)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_strict_deployment() -> anyhow::Result<()> {
        let config = RegistryConfig::from_lookup(|key| match key {
            "CARLIFE_STRICT_PAUSE" => Some("true".to_string()),
            "CARLIFE_MINTING_PAUSED" => Some("false".to_string()),
            _ => None,
        })?;
        let t = create_test_service_with(AllowListAuthorization::new(ADMIN), config)?;
        t.service.mint(ADMIN, model_s(ALICE)).await?;
        t.service.set_paused(ADMIN, true).await?;

        let kinds = [
            t.service.mint(ADMIN, model_s(ALICE)).await.map(|_| ()),
            t.service
                .update_info(ADMIN, TokenId(0), 1, "x".to_string())
                .await,
            t.service
                .add_maintenance(ADMIN, TokenId(0), 1, "x".to_string())
                .await,
            t.service.transfer(ALICE, ALICE, BOB, TokenId(0)).await,
        ]
        .map(|result| result.map_err(|e| e.kind()));

        assert!(kinds
            .iter()
            .all(|kind| *kind == Err(ErrorKind::OperationPaused)));
        assert_eq!(t.service.stats().await.rejected_calls, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_startup_pause_values() -> anyhow::Result<()> {
        let t = create_test_service_with(
            AllowListAuthorization::new(ADMIN),
            RegistryConfig::default(),
        )?;
        assert!(t.service.is_minting_paused().await);
        assert!(!t.service.is_paused().await);

        let config = RegistryConfig {
            paused_at_start: true,
            ..RegistryConfig::default()
        };
        let t = create_test_service_with(AllowListAuthorization::new(ADMIN), config)?;
        assert!(t.service.is_paused().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_pause_toggles_are_idempotent() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        for _ in 0..3 {
            t.service.set_paused(ADMIN, false).await?;
            t.service.set_minting_paused(ADMIN, false).await?;
        }
        assert_eq!(t.service.stats().await.admin_changes, 0);
        Ok(())
    }
}
