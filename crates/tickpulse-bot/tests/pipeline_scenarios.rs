//! Deterministic tick sequences through the full pipeline.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tickpulse_bot::TickPipeline;
use tickpulse_core::{Price, TradeEvent, TradeOutcome};
use tickpulse_detector::DetectorConfig;
use tickpulse_trade::TradeConfig;

fn pipeline(cooldown_ms: i64, ticks_per_trade: usize) -> TickPipeline {
    TickPipeline::new(
        1000,
        DetectorConfig { cooldown_ms },
        TradeConfig {
            ticks_per_trade,
            ..Default::default()
        },
    )
}

fn run(pipeline: &mut TickPipeline, prices: &[Decimal], start_ms: i64, step_ms: i64) -> Vec<TradeEvent> {
    prices
        .iter()
        .enumerate()
        .flat_map(|(i, p)| pipeline.process_tick(Price::new(*p), start_ms + i as i64 * step_ms))
        .collect()
}

fn kinds(events: &[TradeEvent]) -> Vec<&'static str> {
    events.iter().map(TradeEvent::kind).collect()
}

#[test]
fn test_reference_scenario() {
    let mut p = pipeline(0, 3);
    let prices = [
        dec!(10.00),
        dec!(10.11),
        dec!(10.11),
        dec!(10.20),
        dec!(10.30),
        dec!(10.40),
        dec!(10.50),
    ];
    let events = run(&mut p, &prices, 1_000, 1_000);

    let digits: Vec<u8> = p.history().last_digits().map(|d| d.value()).collect();
    assert_eq!(digits, vec![0, 1, 1, 0, 0, 0, 0]);

    // 10.11 signals; every tick from 10.30 on repeats "0,0"
    assert_eq!(
        kinds(&events),
        vec!["SIGNAL", "SIGNAL", "SIGNAL", "TRADE_RESULT", "SIGNAL"]
    );

    let TradeEvent::Signal(first_signal) = &events[0] else {
        panic!("expected SIGNAL");
    };
    assert_eq!(first_signal.price.inner(), dec!(10.11));
    assert_eq!(first_signal.pattern.to_string(), "[1,1]");

    let TradeEvent::TradeResult(result) = &events[3] else {
        panic!("expected TRADE_RESULT");
    };
    assert_eq!(result.start_price.inner(), dec!(10.11));
    let collected: Vec<_> = result.prices.iter().map(|p| p.inner()).collect();
    assert_eq!(collected, vec![dec!(10.20), dec!(10.30), dec!(10.40)]);
    assert_eq!(result.upper_barrier.inner(), dec!(12.11));
    assert_eq!(result.lower_barrier.inner(), dec!(9.21));
    assert_eq!(result.outcome, TradeOutcome::Win);

    assert_eq!(p.pending_trades(), 3);
    let stats = p.stats();
    assert_eq!(stats.ticks, 7);
    assert_eq!(stats.signals, 4);
    assert_eq!(stats.wins, 1);
}

#[test]
fn test_barriers_around_ten() {
    let mut p = pipeline(0, 3);
    // 10.00 then 10.00 repeats "0,0" and opens a trade at 10.00
    let events = run(
        &mut p,
        &[dec!(10.01), dec!(10.00), dec!(10.00), dec!(10.21), dec!(10.32), dec!(10.43)],
        1_000,
        1_000,
    );
    let result = events
        .iter()
        .find_map(|e| match e {
            TradeEvent::TradeResult(r) => Some(r),
            _ => None,
        })
        .unwrap();
    assert_eq!(result.start_price.inner(), dec!(10.00));
    assert_eq!(result.upper_barrier.inner(), dec!(12.00));
    assert_eq!(result.lower_barrier.inner(), dec!(9.10));
    assert_eq!(result.outcome, TradeOutcome::Win);
}

#[test]
fn test_cooldown_suppresses_second_pattern() {
    let mut p = pipeline(20_000, 5);

    // First pattern at t=30s fires
    let events = run(&mut p, &[dec!(5.11), dec!(5.21)], 29_000, 1_000);
    assert_eq!(kinds(&events), vec!["SIGNAL"]);

    // Second pattern 5s later is suppressed
    let events = run(&mut p, &[dec!(5.33), dec!(5.43)], 34_000, 1_000);
    assert!(events.is_empty());
    assert_eq!(p.pending_trades(), 1);

    // After the cooldown it fires again
    let events = run(&mut p, &[dec!(5.55), dec!(5.65)], 49_000, 1_000);
    assert_eq!(kinds(&events), vec!["SIGNAL"]);
    assert_eq!(p.detector().last_signal_ms(), 50_000);
}

#[test]
fn test_breach_gives_loss() {
    let mut p = pipeline(0, 2);
    let events = run(&mut p, &[dec!(10.07), dec!(10.07), dec!(13.00), dec!(10.01)], 1_000, 1_000);
    let outcomes: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            TradeEvent::TradeResult(r) => Some(r.outcome),
            _ => None,
        })
        .collect();
    assert_eq!(outcomes, vec![TradeOutcome::Loss]);
}

#[test]
fn test_signal_precedes_result_on_same_tick() {
    let mut p = pipeline(0, 1);
    let events = run(&mut p, &[dec!(1.22), dec!(1.22), dec!(1.32)], 1_000, 1_000);
    // tick 3 completes trade #1 and repeats "2,2"
    assert_eq!(
        kinds(&events),
        vec!["SIGNAL", "SIGNAL", "TRADE_RESULT"]
    );
}

#[test]
fn test_trade_results_are_unique() {
    let mut p = pipeline(0, 5);
    // 10.00, 10.00, 10.11, 10.11, 10.22, 10.22, ... repeats on every odd tick
    let prices: Vec<Decimal> = (0..200)
        .map(|i| Decimal::new(1000 + ((i / 2) % 3) * 11, 2))
        .collect();
    let events = run(&mut p, &prices, 1_000, 500);

    let signals = events.iter().filter(|e| e.kind() == "SIGNAL").count();
    let results = events.iter().filter(|e| e.kind() == "TRADE_RESULT").count();
    assert_eq!(signals, 100);
    assert_eq!(signals, results + p.pending_trades());
    assert!(p.pending_trades() <= 5);
    assert!(p.history().len() <= p.history().capacity());
}

#[test]
fn test_extreme_quote_does_not_overflow_barriers() {
    let mut p = pipeline(0, 1);
    let events = run(&mut p, &[Decimal::MAX, Decimal::MAX, Decimal::MAX], 1_000, 1_000);

    assert_eq!(kinds(&events), vec!["SIGNAL", "SIGNAL", "TRADE_RESULT"]);
    let TradeEvent::TradeResult(result) = &events[2] else {
        panic!("expected TRADE_RESULT");
    };
    assert_eq!(result.upper_barrier.inner(), Decimal::MAX);
    assert_eq!(result.outcome, TradeOutcome::Win);
}
