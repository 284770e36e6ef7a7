//! Integration tests wiring governance to the ledger: an approved mint
//! proposal produces the capability the ledger accepts, and the directives
//! for pause/freeze apply through the admin entry points.

use agc_governance::{GovernanceEngine, ProposalAction, ProposalEffect};
use agc_ledger::Ledger;
use agc_types::{AccountAddress, ProposalId, Timestamp};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn addr(n: u8) -> AccountAddress {
    AccountAddress::new(format!("agc_{n:0>40}"))
}

fn setup() -> (GovernanceEngine, Ledger) {
    let admin = addr(0);
    let engine = GovernanceEngine::new(admin.clone(), 3);
    let mut ledger = Ledger::new(admin);
    ledger.opt_in(&addr(1)).unwrap();
    ledger.opt_in(&addr(2)).unwrap();
    (engine, ledger)
}

// ---------------------------------------------------------------------------
// Mint via governance
// ---------------------------------------------------------------------------

#[test]
fn approved_mint_proposal_mints_on_ledger() {
    let (mut engine, mut ledger) = setup();
    let id = ProposalId::new("mint-farmer-1");
    let now = Timestamp::new(10_000);

    engine
        .propose(
            id.clone(),
            addr(1),
            ProposalAction::MintCredits {
                recipient: addr(1),
                amount: 250_000,
            },
            now,
        )
        .unwrap();
    engine.vote(&id, true, now).unwrap();
    engine.vote(&id, true, now).unwrap();

    let effect = engine.execute(&id, now).unwrap();
    let ProposalEffect::Mint {
        recipient,
        amount,
        authorization,
    } = effect
    else {
        panic!("expected mint effect");
    };

    ledger.mint(&recipient, amount, authorization).unwrap();
    assert_eq!(ledger.balance(&addr(1)).unwrap(), 250_000);
    assert_eq!(ledger.total_supply(), 250_000);
}

#[test]
fn unapproved_mint_never_reaches_the_ledger() {
    let (mut engine, ledger) = setup();
    let id = ProposalId::new("mint-farmer-2");
    let now = Timestamp::new(10_000);

    engine
        .propose(
            id.clone(),
            addr(1),
            ProposalAction::MintCredits {
                recipient: addr(1),
                amount: 250_000,
            },
            now,
        )
        .unwrap();

    assert!(engine.execute(&id, now).is_err());
    assert_eq!(ledger.total_supply(), 0);
}

// ---------------------------------------------------------------------------
// Administrative directives
// ---------------------------------------------------------------------------

#[test]
fn pause_proposal_applies_through_admin_entry_point() {
    let (mut engine, mut ledger) = setup();
    let admin = addr(0);
    let id = ProposalId::new("pause-ledger");
    let now = Timestamp::new(20_000);

    engine
        .propose(id.clone(), addr(1), ProposalAction::SetPaused(true), now)
        .unwrap();
    engine.vote(&id, true, now).unwrap();
    engine.vote(&id, true, now).unwrap();

    match engine.execute(&id, now).unwrap() {
        ProposalEffect::SetPaused(paused) => ledger.set_paused(&admin, paused).unwrap(),
        other => panic!("expected pause directive, got {other:?}"),
    }
    assert!(ledger.is_paused());
}

#[test]
fn freeze_proposal_applies_through_admin_entry_point() {
    let (mut engine, mut ledger) = setup();
    let admin = addr(0);
    let id = ProposalId::new("freeze-account");
    let now = Timestamp::new(30_000);

    engine
        .propose(
            id.clone(),
            addr(1),
            ProposalAction::SetFrozen {
                account: addr(2),
                frozen: true,
            },
            now,
        )
        .unwrap();
    engine.vote(&id, true, now).unwrap();
    engine.vote(&id, true, now).unwrap();

    match engine.execute(&id, now).unwrap() {
        ProposalEffect::SetFrozen { account, frozen } => {
            ledger.set_frozen(&admin, &account, frozen).unwrap()
        }
        other => panic!("expected freeze directive, got {other:?}"),
    }
    assert!(ledger.is_frozen(&addr(2)).unwrap());
}
