//! Resolution pipeline tests against mock exchange and aggregator ports.
//!
//! Tests cover:
//! - ISIN-first search order and the symbol fallback
//! - No indicator fetch when no aggregator id is found
//! - Fetch failures and per-symbol independence
//! - Classification of the fetched payload

mod common;

use common::*;
use techdash::domain::classify::{Category, Classifier};
use techdash::domain::error::{LookupFailure, TechdashError};
use techdash::domain::pipeline::{Pipeline, PipelineSettings};
use techdash::domain::security::QueryKind;

const TCS_ISIN: &str = "INE467B01029";

fn with_fallback() -> PipelineSettings {
    PipelineSettings {
        symbol_fallback: true,
    }
}

fn without_fallback() -> PipelineSettings {
    PipelineSettings {
        symbol_fallback: false,
    }
}

mod resolution {
    use super::*;

    #[test]
    fn isin_search_is_tried_first() {
        let exchange = MockExchange::new().with_isin("TCS", TCS_ISIN);
        let aggregator = MockAggregator::new()
            .with_match(TCS_ISIN, QueryKind::Isin, "TCS", "Tata Consultancy Services Ltd.")
            .with_match("TCS", QueryKind::Symbol, "WRONG", "Other")
            .with_payload("TCS", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let fetched = pipeline.run("TCS").unwrap();

        assert_eq!(fetched.resolved.security.sc_id, "TCS");
        assert_eq!(fetched.resolved.matched_by, QueryKind::Isin);
        assert_eq!(fetched.resolved.isin.as_deref(), Some(TCS_ISIN));
        assert_eq!(
            aggregator.search_log(),
            vec![(TCS_ISIN.to_string(), QueryKind::Isin)]
        );
        assert_eq!(aggregator.fetch_log(), vec!["TCS"]);
    }

    #[test]
    fn isin_failure_falls_back_to_symbol_search() {
        let exchange = MockExchange::new().with_failure("TCS", LookupFailure::Status(500));
        let aggregator = MockAggregator::new()
            .with_match("TCS", QueryKind::Symbol, "TCS", "Tata Consultancy Services Ltd.")
            .with_payload("TCS", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let fetched = pipeline.run("TCS").unwrap();

        assert!(fetched.resolved.isin.is_none());
        assert_eq!(fetched.resolved.matched_by, QueryKind::Symbol);
        assert_eq!(
            aggregator.search_log(),
            vec![("TCS".to_string(), QueryKind::Symbol)]
        );
        assert_eq!(exchange.calls.borrow().as_slice(), ["TCS".to_string()]);
    }

    #[test]
    fn empty_isin_search_falls_back_to_symbol() {
        let exchange = MockExchange::new().with_isin("INFY", "INE009A01021");
        let aggregator = MockAggregator::new()
            .with_match("INFY", QueryKind::Symbol, "IT", "Infosys Ltd.")
            .with_payload("IT", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let fetched = pipeline.run("INFY").unwrap();

        assert_eq!(fetched.resolved.security.sc_id, "IT");
        assert_eq!(
            aggregator.search_log(),
            vec![
                ("INE009A01021".to_string(), QueryKind::Isin),
                ("INFY".to_string(), QueryKind::Symbol),
            ]
        );
    }

    #[test]
    fn isin_search_transport_error_falls_back() {
        let exchange = MockExchange::new().with_isin("SBIN", "INE062A01020");
        let aggregator = MockAggregator::new()
            .with_search_failure("INE062A01020", QueryKind::Isin, LookupFailure::Timeout)
            .with_match("SBIN", QueryKind::Symbol, "SBI", "State Bank of India")
            .with_payload("SBI", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        assert_eq!(pipeline.run("SBIN").unwrap().resolved.security.sc_id, "SBI");
    }

    #[test]
    fn no_match_in_either_mode_never_fetches() {
        let exchange = MockExchange::new().with_isin("XYZ", "INE000X00000");
        let aggregator = MockAggregator::new();

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let err = pipeline.run("XYZ").unwrap_err();

        assert!(matches!(err, TechdashError::Resolution { ref symbol } if symbol == "XYZ"));
        assert_eq!(aggregator.search_log().len(), 2);
        assert!(aggregator.fetch_log().is_empty());
    }

    #[test]
    fn no_isin_and_empty_symbol_search_never_fetches() {
        let exchange = MockExchange::new();
        let aggregator = MockAggregator::new();

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let err = pipeline.run("XYZ").unwrap_err();

        assert!(matches!(err, TechdashError::Resolution { .. }));
        assert_eq!(
            aggregator.search_log(),
            vec![("XYZ".to_string(), QueryKind::Symbol)]
        );
        assert!(aggregator.fetch_log().is_empty());
    }

    #[test]
    fn fallback_disabled_stops_after_isin_search() {
        let exchange = MockExchange::new().with_isin("INFY", "INE009A01021");
        let aggregator = MockAggregator::new()
            .with_match("INFY", QueryKind::Symbol, "IT", "Infosys Ltd.")
            .with_payload("IT", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, without_fallback());
        let err = pipeline.run("INFY").unwrap_err();

        assert!(matches!(err, TechdashError::Resolution { .. }));
        assert_eq!(
            aggregator.search_log(),
            vec![("INE009A01021".to_string(), QueryKind::Isin)]
        );
        assert!(aggregator.fetch_log().is_empty());
    }

    #[test]
    fn fallback_disabled_without_isin_searches_nothing() {
        let exchange = MockExchange::new().with_failure("INFY", LookupFailure::Timeout);
        let aggregator = MockAggregator::new();

        let pipeline = Pipeline::new(&exchange, &aggregator, without_fallback());
        assert!(pipeline.resolve("INFY").is_err());
        assert!(aggregator.search_log().is_empty());
    }
}

mod fetching {
    use super::*;

    #[test]
    fn fetch_failure_reports_symbol_and_id() {
        let exchange = MockExchange::new().with_isin("TCS", TCS_ISIN);
        let aggregator = MockAggregator::new()
            .with_match(TCS_ISIN, QueryKind::Isin, "TCS", "TCS")
            .with_fetch_failure("TCS", LookupFailure::Status(404));

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let err = pipeline.run("TCS").unwrap_err();

        match err {
            TechdashError::Fetch {
                symbol,
                sc_id,
                reason,
            } => {
                assert_eq!(symbol, "TCS");
                assert_eq!(sc_id, "TCS");
                assert_eq!(reason, "upstream returned HTTP 404");
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        assert_eq!(aggregator.fetch_log().len(), 1);
    }

    #[test]
    fn one_failure_does_not_stop_other_symbols() {
        let exchange = MockExchange::new()
            .with_isin("TCS", TCS_ISIN)
            .with_failure("BAD", LookupFailure::Status(500));
        let aggregator = MockAggregator::new()
            .with_match(TCS_ISIN, QueryKind::Isin, "TCS", "TCS")
            .with_match("INFY", QueryKind::Symbol, "IT", "Infosys")
            .with_payload("TCS", sample_payload())
            .with_payload("IT", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let results = pipeline.run_all(["TCS", "BAD", "INFY"]);

        let symbols: Vec<&str> = results.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["TCS", "BAD", "INFY"]);
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(TechdashError::Resolution { .. })));
        assert!(results[2].1.is_ok());
        assert_eq!(aggregator.fetch_log(), vec!["TCS", "IT"]);
    }

    #[test]
    fn fetched_payload_classifies_sample_indicators() {
        let exchange = MockExchange::new().with_isin("TCS", TCS_ISIN);
        let aggregator = MockAggregator::new()
            .with_match(TCS_ISIN, QueryKind::Isin, "TCS", "TCS")
            .with_payload("TCS", sample_payload());

        let pipeline = Pipeline::new(&exchange, &aggregator, with_fallback());
        let fetched = pipeline.run("TCS").unwrap();

        let classifier = Classifier::default();
        let records = fetched.payload.indicators();
        assert_eq!(classifier.classify(&records[0].name), Category::Momentum);
        assert_eq!(records[0].name, "RSI(14)");
        assert_eq!(classifier.classify(&records[1].name), Category::Trend);
        assert_eq!(records[1].name, "20 Day MA");
    }
}
