//! Initiator Unit Tests.

use housekeeping_core::common::{AccessType, MemoryRequest, RequesterId};
use housekeeping_core::soc::Initiator;

#[test]
fn idle_initiator_does_not_request() {
    let initiator = Initiator::new(RequesterId(2));
    assert_eq!(initiator.id(), RequesterId(2));
    assert!(!initiator.is_requesting());
    assert_eq!(initiator.outstanding(), 0);
}

#[test]
fn queue_is_served_in_order() {
    let mut initiator = Initiator::new(RequesterId(1));
    initiator.write_word(0x10, 7);
    initiator.read(0x10);
    initiator.submit(MemoryRequest::fetch(0x20));
    assert!(initiator.is_requesting());
    assert_eq!(initiator.outstanding(), 3);

    let kinds: Vec<AccessType> = std::iter::from_fn(|| initiator.take_request())
        .map(|r| r.access_type())
        .collect();
    assert_eq!(
        kinds,
        vec![AccessType::Write, AccessType::Read, AccessType::Fetch]
    );
    assert!(!initiator.is_requesting());
}

#[test]
fn completions_are_recorded() {
    let mut initiator = Initiator::new(RequesterId(1));
    initiator.write(0x4, 0xFF, 0b0001);
    let mut response = initiator.take_request().unwrap();
    assert_eq!(response.write_strobe, 0b0001);

    response.ready = true;
    initiator.complete(response);
    assert_eq!(initiator.completed(), &[response]);
}

#[test]
fn clear_drops_outstanding_work() {
    let mut initiator = Initiator::new(RequesterId(3));
    initiator.read(0);
    initiator.read(4);
    initiator.clear();
    assert!(!initiator.is_requesting());
    assert!(initiator.take_request().is_none());
}
