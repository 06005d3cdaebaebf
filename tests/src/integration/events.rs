//! # Notification Flow
//!
//! ## Flows Tested
//!
//! 1. Per-call total order: shared correlation id, consecutive sequences
//! 2. Rejected calls publish nothing
//! 3. Maintenance journal rebuilds the full service history
//! 4. A journal fed by a lagging subscription reports the lost visits
//! 5. Token-scoped subscriptions via `EventStream`

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use carlife_registry::prelude::*;
    use shared_bus::{EventFilter, EventPublisher, EventTopic, InMemoryEventBus, RegistryEvent};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_calls_are_totally_ordered() -> anyhow::Result<()> {
        carlife_telemetry::init_test_tracing();
        let t = create_test_service(ADMIN);
        let mut sub = t.bus.subscribe(EventFilter::all());

        mint_many(&t.service, ADMIN, ALICE, 3).await?;
        let envelopes = sub.drain()?;
        assert_eq!(envelopes.len(), 6);

        // Two notifications per mint, grouped by call
        for pair in envelopes.chunks(2) {
            assert_eq!(pair[0].correlation_id, pair[1].correlation_id);
            assert_eq!(pair[0].sequence + 1, pair[1].sequence);
            assert!(matches!(pair[0].event, RegistryEvent::Transfer { .. }));
            assert!(matches!(pair[1].event, RegistryEvent::VehicleMinted { .. }));
        }
        assert_ne!(envelopes[0].correlation_id, envelopes[2].correlation_id);
        assert!(envelopes.windows(2).all(|w| w[0].sequence < w[1].sequence));
        assert_eq!(t.bus.events_published(), 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_calls_are_silent() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        t.service.mint(ADMIN, model_s(ALICE)).await?;
        let mut sub = t.bus.subscribe(EventFilter::all());

        let _ = t.service.mint(MALLORY, model_s(MALLORY)).await;
        let _ = t
            .service
            .update_info(MALLORY, TokenId(0), 1, "x".to_string())
            .await;
        let _ = t.service.add_maintenance(ADMIN, TokenId(9), 1, "x".to_string()).await;
        let _ = t.service.transfer(MALLORY, ALICE, MALLORY, TokenId(0)).await;
        let _ = t.service.set_paused(MALLORY, true).await;

        assert!(sub.drain()?.is_empty());
        assert_eq!(t.service.stats().await.rejected_calls, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_journal_rebuilds_history() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        let mut feed = t.bus.subscribe(MaintenanceJournal::filter());
        let mut journal = MaintenanceJournal::new();

        mint_many(&t.service, ADMIN, ALICE, 2).await?;
        let visits = [
            (0, 51_000, "Oil change"),
            (1, 2_000, "Recall fix"),
            (0, 60_000, "Brake pads"),
            (0, 75_000, "Timing belt"),
        ];
        for (id, mileage, notes) in visits {
            t.clock.advance(86_400);
            t.service
                .add_maintenance(ADMIN, TokenId(id), mileage, notes.to_string())
                .await?;
        }

        assert_eq!(journal.sync(&mut feed)?, 4);
        assert!(journal.is_complete());
        let history: Vec<_> = journal
            .history(TokenId(0))
            .iter()
            .map(|entry| entry.notes.as_str())
            .collect();
        assert_eq!(history, vec!["Oil change", "Brake pads", "Timing belt"]);

        // The record itself only keeps the latest visit
        let record = t.service.get_record(TokenId(0)).await?.record;
        assert_eq!(record.mileage, 75_000);
        assert_eq!(record.last_service_date, TEST_CLOCK_START + 4 * 86_400);
        Ok(())
    }

    #[tokio::test]
    async fn test_journal_flags_lost_visits() -> anyhow::Result<()> {
        let bus = Arc::new(InMemoryEventBus::with_capacity(4));
        let service = RegistryService::new(
            AllowListAuthorization::new(ADMIN),
            Arc::new(InMemoryTokenLedger::new()),
            bus.clone(),
            Arc::new(ManualClock::new(TEST_CLOCK_START)),
            RegistryConfig::minting_open(),
        )?;
        let mut feed = bus.subscribe(MaintenanceJournal::filter());
        let mut journal = MaintenanceJournal::new();

        // Mint publishes sequences 0 and 1, the visits 2 through 7
        service.mint(ADMIN, model_s(ALICE)).await?;
        for visit in 0..6 {
            service
                .add_maintenance(ADMIN, TokenId(0), 50_000 + visit * 1_000, format!("Visit {visit}"))
                .await?;
        }

        assert_eq!(
            journal.sync(&mut feed),
            Err(JournalError::Incomplete {
                missed: 4,
                added: 4
            })
        );
        let kept: Vec<_> = journal
            .history(TokenId(0))
            .iter()
            .map(|entry| entry.notes.as_str())
            .collect();
        assert_eq!(kept, vec!["Visit 2", "Visit 3", "Visit 4", "Visit 5"]);
        assert!(!journal.is_complete());
        assert_eq!(feed.missed(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_token_scoped_stream() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        mint_many(&t.service, ADMIN, ALICE, 2).await?;
        let mut stream = t.bus.event_stream(EventFilter::for_tokens(vec![TokenId(1)]));

        t.service
            .update_info(ADMIN, TokenId(0), 1, "x".to_string())
            .await?;
        t.service.transfer(ALICE, ALICE, BOB, TokenId(1)).await?;

        let envelope = timeout(Duration::from_millis(200), stream.next())
            .await?
            .ok_or_else(|| anyhow::anyhow!("stream closed"))??;
        assert_eq!(
            envelope.event,
            RegistryEvent::Transfer {
                from: ALICE,
                to: BOB,
                token_id: TokenId(1),
            }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_notifications_topic() -> anyhow::Result<()> {
        let t = create_test_service(ADMIN);
        let mut auth = t.bus.subscribe(EventFilter::topics(vec![EventTopic::Authorization]));

        t.service.add_authorized(ADMIN, WORKSHOP).await?;
        t.service.add_authorized(ADMIN, WORKSHOP).await?;
        t.service.remove_authorized(ADMIN, WORKSHOP).await?;
        t.service.set_paused(ADMIN, true).await?;

        let authorized: Vec<_> = auth
            .drain()?
            .into_iter()
            .filter_map(|e| match e.event {
                RegistryEvent::AuthorizationChanged { authorized, .. } => Some(authorized),
                _ => None,
            })
            .collect();
        assert_eq!(authorized, vec![true, false]);
        Ok(())
    }
}
