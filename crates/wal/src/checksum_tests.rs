// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn matches_crc32c_check_value() {
    let mut chain = CrcChain::default();
    chain.write(b"123456789");
    assert_eq!(chain.sum(), 0xe306_9283);
}

#[test]
fn empty_chain_sums_to_zero() {
    let mut chain = CrcChain::default();
    chain.write(&[]);
    assert_eq!(chain.sum(), 0);
}

#[test]
fn chained_writes_equal_one_write() {
    let mut split = CrcChain::default();
    split.write(b"hello ");
    split.write(b"world");

    let mut whole = CrcChain::default();
    whole.write(b"hello world");

    assert_eq!(split.sum(), whole.sum());
}

#[test]
fn reseeded_chain_continues_where_the_old_one_stopped() {
    let mut original = CrcChain::default();
    original.write(b"first segment");
    let checkpoint = original.sum();
    original.write(b"second segment");

    // a fresh reader only knows the checkpoint value
    let mut resumed = CrcChain::default();
    resumed.write(b"unrelated bytes");
    resumed.reseed(checkpoint);
    resumed.write(b"second segment");

    assert_eq!(resumed.sum(), original.sum());
}

#[test]
fn new_with_seed_equals_reseed() {
    let mut a = CrcChain::new(0x1234_5678);
    let mut b = CrcChain::default();
    b.reseed(0x1234_5678);
    a.write(b"payload");
    b.write(b"payload");
    assert_eq!(a, b);
}
