//! # Admission Sequences
//!
//! Random proposal sequences checked against the admission rule:
//! bootstrap while fewer than four airlines are registered, then
//! `votes >= ceil(registered / 2)`.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use fs_surety::{
        FixedEntropy, InMemoryEventBus, InMemoryLedger, LedgerError, LedgerGateway, SuretyApi,
        SuretyConfig, SuretyDependencies, SuretyError, SuretyService,
    };
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::{ether, Address};

    const ADMIN: Address = [0xAD; 20];

    fn airline(index: u8) -> Address {
        let mut out = [0xA0; 20];
        out[19] = index;
        out
    }

    #[tokio::test]
    async fn test_random_proposals_follow_threshold() {
        let founder = airline(0);
        let ledger = Arc::new(InMemoryLedger::with_founding_airline(founder));
        let service = SuretyService::new(SuretyDependencies {
            ledger: ledger.clone(),
            entropy: Arc::new(FixedEntropy([7u8; 32])),
            event_bus: Arc::new(InMemoryEventBus::new()),
            config: SuretyConfig::with_admin(ADMIN),
        })
        .unwrap();
        service.fund_airline(founder, ether(10)).await.unwrap();

        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut members = vec![founder];
        let mut votes_cast: HashSet<(Address, Address)> = HashSet::new();
        let candidates: Vec<Address> = (1..=24).map(airline).collect();

        for _ in 0..300 {
            let proposer = *members.choose(&mut rng).unwrap();
            let candidate = *candidates.choose(&mut rng).unwrap();

            let registered = ledger.registered_airlines().await.unwrap();
            let votes = ledger.airline_votes(candidate).await.unwrap();
            let already_member = members.contains(&candidate);
            let result = service.propose_airline(candidate, proposer).await;

            if already_member {
                assert!(matches!(
                    result,
                    Err(SuretyError::Ledger(LedgerError::AlreadyRegistered(_)))
                ));
                continue;
            }
            if !votes_cast.insert((candidate, proposer)) {
                assert!(matches!(
                    result,
                    Err(SuretyError::Ledger(LedgerError::DuplicateVote { .. }))
                ));
                continue;
            }

            let outcome = result.unwrap();
            let expected = registered < 4 || (votes + 1) * 2 >= registered;
            assert_eq!(
                outcome.accepted, expected,
                "votes={} registered={}",
                votes + 1,
                registered
            );
            assert_eq!(outcome.votes, votes + 1);

            if outcome.accepted {
                service.fund_airline(candidate, ether(10)).await.unwrap();
                members.push(candidate);
            }
        }

        assert_eq!(
            ledger.registered_airlines().await.unwrap(),
            members.len() as u64
        );
        assert!(members.len() > 4, "sequence never left bootstrap");
    }

    #[tokio::test]
    async fn test_rejected_vote_counts_toward_later_attempt() {
        let founder = airline(0);
        let ledger = Arc::new(InMemoryLedger::with_founding_airline(founder));
        let service = SuretyService::new(SuretyDependencies {
            ledger: ledger.clone(),
            entropy: Arc::new(FixedEntropy([7u8; 32])),
            event_bus: Arc::new(InMemoryEventBus::new()),
            config: SuretyConfig::with_admin(ADMIN),
        })
        .unwrap();
        service.fund_airline(founder, ether(10)).await.unwrap();
        for i in 1..=3 {
            service.propose_airline(airline(i), founder).await.unwrap();
            service.fund_airline(airline(i), ether(10)).await.unwrap();
        }
        assert_eq!(ledger.registered_airlines().await.unwrap(), 4);

        let first = service.propose_airline(airline(4), founder).await.unwrap();
        assert!(!first.accepted);
        assert_eq!(ledger.airline_votes(airline(4)).await.unwrap(), 1);

        let outcome = service.propose_airline(airline(4), airline(1)).await.unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.votes, 2);
    }
}
