use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ballot_core::{AccountAddress, Ballot, ProposalName};

fn account(i: u32) -> AccountAddress {
    let mut bytes = [0u8; 20];
    bytes[16..].copy_from_slice(&i.to_be_bytes());
    AccountAddress::new(bytes)
}

fn ballot_with(proposals: usize, voters: u32) -> (Ballot, Vec<AccountAddress>) {
    let names = (0..proposals)
        .map(|i| ProposalName::new(format!("P{i}")).unwrap())
        .collect();
    let chair = account(0);
    let mut ballot = Ballot::new(chair, names).unwrap();
    let accounts: Vec<AccountAddress> = (1..=voters).map(account).collect();
    ballot.grant_rights(&chair, &accounts).unwrap();
    (ballot, accounts)
}

fn bench_delegate_fan_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("delegate_fan_in");

    for voters in [10u32, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("delegate_all", voters), &voters, |b, &n| {
            b.iter_batched(
                || ballot_with(3, n),
                |(mut ballot, accounts)| {
                    let sink = accounts[0];
                    for from in &accounts[1..] {
                        black_box(ballot.delegate(from, &sink).unwrap());
                    }
                    ballot
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_winning_proposal(c: &mut Criterion) {
    let mut group = c.benchmark_group("winning_proposal");

    for proposals in [3usize, 100, 10_000] {
        let (mut ballot, accounts) = ballot_with(proposals, 100);
        for (i, voter) in accounts.iter().enumerate() {
            ballot.vote(voter, (i * 7) % proposals).unwrap();
        }
        group.bench_with_input(
            BenchmarkId::new("scan", proposals),
            &proposals,
            |b, _| b.iter(|| black_box(ballot.winning_proposal())),
        );
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let (ballot, _) = ballot_with(10, 1000);
    let bytes = ballot.save_state().unwrap();
    c.bench_function("save_state_1000_voters", |b| {
        b.iter(|| black_box(ballot.save_state().unwrap()))
    });
    c.bench_function("load_state_1000_voters", |b| {
        b.iter(|| black_box(Ballot::load_state(black_box(&bytes)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_delegate_fan_in,
    bench_winning_proposal,
    bench_snapshot
);
criterion_main!(benches);
