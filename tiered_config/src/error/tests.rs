//! Tests for error folding and display attribution.

use std::sync::Arc;

use super::helpers::{access_error, decode_error};
use super::{AggregatedErrors, ConfigError, fold_errors};
use crate::tier::Tier;

fn io_error(message: &str) -> std::io::Error {
    std::io::Error::other(message.to_owned())
}

#[test]
fn folding_no_errors_is_success() {
    assert!(fold_errors(Vec::new()).is_ok());
}

#[test]
fn folding_a_single_error_returns_it_unchanged() {
    let err = access_error(Tier::System, "/etc/app/app.yml", io_error("denied"));
    let folded = fold_errors(vec![Arc::clone(&err)]).expect_err("one error supplied");
    assert!(Arc::ptr_eq(&folded, &err));
    assert!(matches!(*folded, ConfigError::SourceAccess { .. }));
}

#[test]
fn folding_multiple_errors_aggregates_in_tier_order() {
    let first = access_error(Tier::System, "/etc/app/app.yml", io_error("denied"));
    let second = decode_error(Tier::Local, ".app.yml", io_error("bad yaml"));
    let folded = fold_errors(vec![first, second]).expect_err("two errors supplied");
    match folded.as_ref() {
        ConfigError::Aggregate(agg) => {
            assert_eq!(agg.len(), 2);
            assert!(!agg.is_empty());
            assert!(matches!(
                *agg.errors()[0],
                ConfigError::SourceAccess { tier: Tier::System, .. }
            ));
            assert!(matches!(
                *agg.errors()[1],
                ConfigError::SourceDecode { tier: Tier::Local, .. }
            ));
        }
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn display_attributes_tier_and_location() {
    let err = decode_error(Tier::Local, ".app.yml", io_error("bad yaml"));
    let rendered = err.to_string();
    assert!(rendered.contains("local"), "missing tier in: {rendered}");
    assert!(rendered.contains(".app.yml"), "missing location in: {rendered}");
}

#[test]
fn aggregate_display_numbers_each_error() {
    let agg = AggregatedErrors::new(vec![
        access_error(Tier::System, "/etc/app/app.yml", io_error("denied")),
        decode_error(Tier::User, "app.yml", io_error("bad yaml")),
    ]);
    let rendered = agg.to_string();
    assert!(rendered.starts_with("1. "), "unexpected rendering: {rendered}");
    assert!(rendered.contains("\n2. "), "unexpected rendering: {rendered}");
}
