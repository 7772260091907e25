//! Interconnect Unit Tests.
//!
//! Verifies bus locking, lock release when the owner drops its request, round counting,
//! and forwarding of granted transactions to the memory port.

use housekeeping_core::common::{MemoryRequest, RequesterId};
use housekeeping_core::soc::{
    BusPort, Grant, Interconnect, PendingRequests, Sram, WeightedRoundRobinArbiter,
};
use mockall::predicate::eq;

use crate::common::mocks::bus::MockBus;

fn interconnect(weights: &[u32]) -> Interconnect {
    Interconnect::new(WeightedRoundRobinArbiter::with_weights(weights.len(), weights).unwrap())
}

fn both() -> PendingRequests {
    PendingRequests::with_pending(2, &[RequesterId(0), RequesterId(1)])
}

#[test]
fn idle_bus_runs_a_round_with_no_grant() {
    let mut bus = interconnect(&[1, 1]);
    assert_eq!(bus.cycle(&PendingRequests::new(2)), Ok(Grant::Idle));
    assert_eq!(bus.rounds(), 1);
    assert_eq!(Grant::Idle.holder(), None);
}

#[test]
fn unlocked_bus_arbitrates_every_tick() {
    let mut bus = interconnect(&[1, 1]);
    assert_eq!(bus.cycle(&both()), Ok(Grant::Arbitrated(RequesterId(0))));
    assert_eq!(bus.cycle(&both()), Ok(Grant::Arbitrated(RequesterId(1))));
    assert_eq!(bus.rounds(), 2);
}

#[test]
fn locked_owner_keeps_the_bus_while_requesting() {
    let mut bus = interconnect(&[1, 1]);
    assert_eq!(bus.cycle(&both()), Ok(Grant::Arbitrated(RequesterId(0))));
    bus.lock(RequesterId(0));
    let state = bus.arbiter_state();

    for _ in 0..3 {
        let grant = bus.cycle(&both()).unwrap();
        assert_eq!(grant, Grant::Held(RequesterId(0)));
        assert!(grant.is_granted(RequesterId(0)));
        assert!(!grant.is_granted(RequesterId(1)));
    }
    // Held ticks run no round and leave the arbiter untouched.
    assert_eq!(bus.rounds(), 1);
    assert_eq!(bus.arbiter_state(), state);
}

#[test]
fn lock_is_released_when_owner_drops_request() {
    let mut bus = interconnect(&[1, 1]);
    let _ = bus.cycle(&both()).unwrap();
    bus.lock(RequesterId(0));
    assert_eq!(bus.locked_by(), Some(RequesterId(0)));

    let others = PendingRequests::with_pending(2, &[RequesterId(1)]);
    assert_eq!(bus.cycle(&others), Ok(Grant::Arbitrated(RequesterId(1))));
    assert_eq!(bus.locked_by(), None);
}

#[test]
fn reset_clears_lock_and_arbiter() {
    let mut bus = interconnect(&[2, 1]);
    let _ = bus.cycle(&both()).unwrap();
    bus.lock(RequesterId(0));

    bus.reset();
    assert_eq!(bus.locked_by(), None);
    assert_eq!(bus.arbiter_state().current_index, 0);
    assert_eq!(bus.arbiter_state().remaining_credits, 2);
}

#[test]
fn width_errors_propagate() {
    let mut bus = interconnect(&[1, 1]);
    assert!(bus.cycle(&PendingRequests::new(1)).is_err());
}

#[test]
fn forward_delivers_the_request_once() {
    let bus = interconnect(&[1, 1]);
    let request = MemoryRequest::write_word(0x10, 0xCAFE_F00D);

    let mut port = MockBus::new();
    let _ = port
        .expect_transfer()
        .with(eq(request))
        .times(1)
        .returning(|mut r| {
            r.ready = true;
            r
        });

    let response = bus.forward(RequesterId(1), request, &mut port);
    assert!(response.ready);
}

#[test]
fn forward_into_sram_writes_memory() {
    let bus = interconnect(&[1]);
    let mut sram = Sram::new(64);
    let _ = bus.forward(
        RequesterId(0),
        MemoryRequest::write_word(0x20, 0x0102_0304),
        &mut sram,
    );
    assert_eq!(sram.word_at(0x20), Some(0x0102_0304));
    assert_eq!(sram.read(0x20).read_data, 0x0102_0304);
}
