#![allow(dead_code)]

use criterion::{BenchmarkId, Criterion, black_box};
use doppler_sdk::builders::market_cap_preset_curves;
use doppler_sdk::constants::{FeeTier, MarketCapPreset};
use doppler_sdk::math::{gamma, price, tick_math};
use doppler_sdk::miner::{self, MineParams, TokenInitCode};
use doppler_sdk::types::TokenKind;
use doppler_sdk::{Address, Bytes, U256};

pub fn bench_tick_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_math");
    for tick in [tick_math::MIN_TICK, -200_000, 0, 200_000, tick_math::MAX_TICK] {
        group.bench_with_input(BenchmarkId::new("sqrt_ratio_at_tick", tick), &tick, |b, &tick| {
            b.iter(|| tick_math::get_sqrt_ratio_at_tick(black_box(tick)))
        });

        let sqrt_price = tick_math::get_sqrt_ratio_at_tick(tick).unwrap_or(U256::ZERO);
        group.bench_with_input(
            BenchmarkId::new("tick_at_sqrt_ratio", tick),
            &sqrt_price,
            |b, &sqrt_price| b.iter(|| tick_math::get_tick_at_sqrt_ratio(black_box(sqrt_price))),
        );
    }
    group.finish();
}

pub fn bench_price(c: &mut Criterion) {
    c.bench_function("price_to_usable_tick", |b| {
        b.iter(|| price::price_to_usable_tick(black_box(0.000_123_4), black_box(60)))
    });
    c.bench_function("sqrt_price_x96_to_price", |b| {
        let sqrt_price = tick_math::get_sqrt_ratio_at_tick(-92_100).unwrap_or(U256::ZERO);
        b.iter(|| price::sqrt_price_x96_to_price(black_box(sqrt_price)))
    });
}

pub fn bench_gamma(c: &mut Criterion) {
    c.bench_function("compute_optimal_gamma", |b| {
        b.iter(|| {
            gamma::compute_optimal_gamma(
                black_box(-100_020),
                black_box(60_000),
                black_box(7 * 86_400),
                black_box(43_200),
                black_box(60),
            )
        })
    });
}

pub fn bench_presets(c: &mut Criterion) {
    c.bench_function("market_cap_preset_curves", |b| {
        b.iter(|| market_cap_preset_curves(black_box(FeeTier::Low), &MarketCapPreset::ALL, &[]))
    });
}

fn mine_params(prefix: &str, max_iterations: u64) -> MineParams {
    MineParams {
        prefix: prefix.to_string(),
        deployer: Address::repeat_byte(0x42),
        token: TokenKind::Standard,
        token_factory_data: Bytes::new(),
        initial_supply: U256::ZERO,
        airlock: Address::repeat_byte(0x43),
        init_code: TokenInitCode::Custom(Bytes::from_static(&[0x60, 0x80, 0x60, 0x40])),
        max_iterations,
        start_salt: U256::ZERO,
        hook: None,
    }
}

pub fn bench_miner(c: &mut Criterion) {
    let mut group = c.benchmark_group("miner");
    for prefix in ["a", "ab", "abc"] {
        let params = mine_params(prefix, 1_000_000);
        group.bench_with_input(BenchmarkId::new("mine", prefix), &params, |b, params| {
            b.iter(|| miner::mine(black_box(params)))
        });
    }
    group.bench_function("compute_create2_address", |b| {
        b.iter(|| {
            miner::compute_create2_address(
                black_box(Address::repeat_byte(0x42)),
                black_box(Default::default()),
                black_box(Default::default()),
            )
        })
    });
    group.finish();
}
