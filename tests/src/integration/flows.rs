//! # End-to-End Flows
//!
//! Whole-platform scenarios: airline admission, flight opening, policy
//! purchase, oracle rounds and settlement against the in-memory ledger.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fs_surety::events::{StatusRequestedEvent, StatusResolvedEvent};
    use fs_surety::{
        BlockHashEntropy, ClaimTally, InMemoryEventBus, InMemoryLedger, SuretyApi, SuretyConfig,
        SuretyDependencies, SuretyError, SuretyEvent, SuretyService,
    };
    use fs_telemetry::TelemetryConfig;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use shared_types::{ether, Address, FlightKey, StatusCode};

    type Service = SuretyService<InMemoryLedger, BlockHashEntropy, InMemoryEventBus>;

    const ADMIN: Address = [0xAD; 20];
    const FOUNDER: Address = [0xA1; 20];
    const DEPARTURE: u64 = 1_700_000_000;

    struct Platform {
        service: Service,
        ledger: Arc<InMemoryLedger>,
        bus: Arc<InMemoryEventBus>,
    }

    fn account(tag: u8, index: u16) -> Address {
        let mut out = [tag; 20];
        out[18..].copy_from_slice(&index.to_be_bytes());
        out
    }

    fn chain_entropy(seed: u64) -> BlockHashEntropy {
        let entropy = BlockHashEntropy::new();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..300 {
            let mut hash = [0u8; 32];
            rng.fill_bytes(&mut hash);
            entropy.push_block(hash);
        }
        entropy
    }

    fn init_test_logging() {
        let config = TelemetryConfig::from_lookup(|key| match key {
            "FS_LOG_LEVEL" => Some("fs_surety=debug".to_string()),
            _ => None,
        });
        // Another test may have installed the subscriber already.
        let _ = fs_telemetry::init_logging(&config);
    }

    async fn platform(config: SuretyConfig) -> Platform {
        init_test_logging();
        let ledger = Arc::new(InMemoryLedger::with_founding_airline(FOUNDER));
        let bus = Arc::new(InMemoryEventBus::new());
        let service = SuretyService::new(SuretyDependencies {
            ledger: ledger.clone(),
            entropy: Arc::new(chain_entropy(0xF11E)),
            event_bus: bus.clone(),
            config,
        })
        .unwrap();
        service.fund_airline(FOUNDER, ether(10)).await.unwrap();
        Platform {
            service,
            ledger,
            bus,
        }
    }

    /// Enroll fresh reporters until `count` of them hold `slot`.
    async fn reporters_on_slot(service: &Service, slot: u8, count: usize) -> Vec<Address> {
        let mut holders = Vec::new();
        for index in 0..500u16 {
            let reporter = account(0x0C, index);
            let slots = service.enroll_reporter(reporter, ether(1)).await.unwrap();
            if slots.contains(&slot) {
                holders.push(reporter);
                if holders.len() == count {
                    return holders;
                }
            }
        }
        panic!("only {} reporters drawn for slot {}", holders.len(), slot);
    }

    async fn open_insured_flight(p: &Platform, designator: &str) -> FlightKey {
        let flight = p
            .service
            .open_flight(FOUNDER, designator, DEPARTURE)
            .await
            .unwrap();
        for passenger in 0..3u16 {
            p.ledger
                .buy_insurance(account(0xCC, passenger), &flight.key, ether(1))
                .unwrap();
        }
        flight.key
    }

    // =========================================================================
    // ADMISSION THEN INSURANCE
    // =========================================================================

    #[tokio::test]
    async fn test_admitted_airline_flight_pays_out_on_airline_delay() {
        let p = platform(SuretyConfig::with_admin(ADMIN)).await;

        // Bootstrap fills the first four seats.
        for tag in [0xA2, 0xA3, 0xA4] {
            let outcome = p.service.propose_airline([tag; 20], FOUNDER).await.unwrap();
            assert!(outcome.accepted);
            p.service.fund_airline([tag; 20], ether(10)).await.unwrap();
        }

        // The fifth needs two of four votes.
        let a5 = [0xA5; 20];
        assert!(!p.service.propose_airline(a5, FOUNDER).await.unwrap().accepted);
        assert!(p.service.propose_airline(a5, [0xA2; 20]).await.unwrap().accepted);
        p.service.fund_airline(a5, ether(10)).await.unwrap();

        let flight = p.service.open_flight(a5, "ND1309", DEPARTURE).await.unwrap();
        let passenger = account(0xCC, 7);
        p.ledger
            .buy_insurance(passenger, &flight.key, ether(1))
            .unwrap();

        let slot = p
            .service
            .request_status(flight.key.clone(), passenger)
            .await
            .unwrap();
        assert!(slot < 10);

        let reporters = reporters_on_slot(&p.service, slot, 3).await;
        for (i, reporter) in reporters.iter().enumerate() {
            let tally = p
                .service
                .submit_claim(slot, flight.key.clone(), StatusCode::LateAirline, *reporter)
                .await
                .unwrap();
            if i < 2 {
                assert_eq!(tally, ClaimTally::Pending { support: i + 1 });
            } else {
                assert!(matches!(
                    tally,
                    ClaimTally::Quorum {
                        status: StatusCode::LateAirline,
                        ..
                    }
                ));
            }
        }

        let resolved = p.service.flight_status(flight.key.clone()).await.unwrap();
        assert!(resolved.landed);
        assert_eq!(resolved.status, StatusCode::LateAirline);
        assert!(!p.ledger.is_flight_open(&flight.key));
        assert_eq!(
            p.ledger.credit_of(&passenger),
            ether(1) + ether(1) / 2
        );

        // Sales are closed for late buyers.
        assert!(p
            .ledger
            .buy_insurance(account(0xCC, 8), &flight.key, ether(1))
            .is_err());
    }

    // =========================================================================
    // ORACLE ROUNDS
    // =========================================================================

    #[tokio::test]
    async fn test_split_claims_leave_round_open() {
        let p = platform(SuretyConfig::with_admin(ADMIN)).await;
        let flight = open_insured_flight(&p, "SPLIT1").await;

        let slot = p
            .service
            .request_status(flight.clone(), account(0xCC, 0))
            .await
            .unwrap();
        let reporters = reporters_on_slot(&p.service, slot, 4).await;

        let statuses = [
            StatusCode::OnTime,
            StatusCode::OnTime,
            StatusCode::LateWeather,
            StatusCode::LateWeather,
        ];
        for (reporter, status) in reporters.iter().zip(statuses) {
            let tally = p
                .service
                .submit_claim(slot, flight.clone(), status, *reporter)
                .await
                .unwrap();
            assert!(matches!(tally, ClaimTally::Pending { .. }));
        }

        let round = p.service.round(slot, flight.clone()).await.unwrap();
        assert!(round.is_open());
        assert_eq!(round.supporters(StatusCode::OnTime).len(), 2);
        assert_eq!(round.supporters(StatusCode::LateWeather).len(), 2);

        let state = p.service.flight_status(flight.clone()).await.unwrap();
        assert!(!state.landed);
        assert!(p.ledger.is_flight_open(&flight));
        assert!(p.ledger.credit_instructions().is_empty());
    }

    #[tokio::test]
    async fn test_weather_delay_lands_without_payout() {
        let p = platform(SuretyConfig::with_admin(ADMIN)).await;
        let flight = open_insured_flight(&p, "WX42").await;

        let slot = p
            .service
            .request_status(flight.clone(), account(0xCC, 0))
            .await
            .unwrap();
        for reporter in reporters_on_slot(&p.service, slot, 3).await {
            p.service
                .submit_claim(slot, flight.clone(), StatusCode::LateWeather, reporter)
                .await
                .unwrap();
        }

        let state = p.service.flight_status(flight.clone()).await.unwrap();
        assert!(state.landed);
        assert_eq!(state.status, StatusCode::LateWeather);
        assert!(!p.ledger.is_flight_open(&flight));
        assert!(p.ledger.credit_of(&account(0xCC, 0)).is_zero());

        // A landed flight takes no further rounds.
        let err = p
            .service
            .request_status(flight, account(0xCC, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, SuretyError::FlightAlreadyLanded(_)));
    }

    #[tokio::test]
    async fn test_event_stream_for_resolved_round() {
        let p = platform(SuretyConfig::with_admin(ADMIN)).await;
        let flight = open_insured_flight(&p, "EV100").await;

        let slot = p
            .service
            .request_status(flight.clone(), account(0xCC, 0))
            .await
            .unwrap();
        assert_eq!(
            p.bus.last_event(),
            Some(SuretyEvent::CommitteeBroadcast(StatusRequestedEvent {
                slot,
                flight: flight.clone(),
            }))
        );

        for reporter in reporters_on_slot(&p.service, slot, 3).await {
            p.service
                .submit_claim(slot, flight.clone(), StatusCode::LateAirline, reporter)
                .await
                .unwrap();
        }

        let kinds: Vec<&str> = p.bus.get_events().iter().map(SuretyEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "committee_broadcast",
                "claim_reported",
                "claim_reported",
                "claim_reported",
                "status_resolved",
            ]
        );
        assert_eq!(
            p.bus.last_event(),
            Some(SuretyEvent::StatusResolved(StatusResolvedEvent {
                slot,
                flight,
                status: StatusCode::LateAirline,
                payout_triggered: true,
            }))
        );
    }

    #[tokio::test]
    async fn test_payout_uses_factor_in_force_at_resolution() {
        let p = platform(SuretyConfig::with_admin(ADMIN)).await;
        let flight = open_insured_flight(&p, "FX7").await;

        let slot = p
            .service
            .request_status(flight.clone(), account(0xCC, 0))
            .await
            .unwrap();
        let reporters = reporters_on_slot(&p.service, slot, 3).await;

        p.service
            .submit_claim(slot, flight.clone(), StatusCode::LateAirline, reporters[0])
            .await
            .unwrap();
        p.service.set_compensation_factor(ADMIN, 2, 1).await.unwrap();
        for reporter in &reporters[1..] {
            p.service
                .submit_claim(slot, flight.clone(), StatusCode::LateAirline, *reporter)
                .await
                .unwrap();
        }

        assert_eq!(p.ledger.credit_of(&account(0xCC, 1)), ether(2));
    }

    // =========================================================================
    // CONCURRENCY
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_claims_resolve_once() {
        let p = Arc::new(platform(SuretyConfig::with_admin(ADMIN)).await);
        let flight = open_insured_flight(&p, "MT88").await;

        let slot = p
            .service
            .request_status(flight.clone(), account(0xCC, 0))
            .await
            .unwrap();
        let reporters = reporters_on_slot(&p.service, slot, 6).await;

        let handles: Vec<_> = reporters
            .into_iter()
            .map(|reporter| {
                let p = p.clone();
                let flight = flight.clone();
                tokio::spawn(async move {
                    p.service
                        .submit_claim(slot, flight, StatusCode::LateAirline, reporter)
                        .await
                })
            })
            .collect();

        let mut quorum = 0;
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(ClaimTally::Quorum { .. }) => quorum += 1,
                Ok(_) => {}
                Err(SuretyError::RoundNotOpen { .. }) => rejected += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(quorum, 1);
        assert_eq!(rejected, 3);
        assert_eq!(p.ledger.credit_instructions().len(), 1);
        assert_eq!(p.ledger.credit_of(&account(0xCC, 2)), ether(1) + ether(1) / 2);

        // The bus sees every counted claim before the resolution.
        let kinds: Vec<&str> = p.bus.get_events().iter().map(SuretyEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "committee_broadcast",
                "claim_reported",
                "claim_reported",
                "claim_reported",
                "status_resolved",
            ]
        );
    }
}
