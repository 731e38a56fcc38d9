//! Structured events seen through a `tracing-subscriber` fmt layer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use fuzzycol::{
    score_columns, JaroWinkler, Scalar, ScalarLookup, ScalarType, Scorer, ScorerConfig,
    StringMetric,
};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.buffer.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }
}

struct CapturedGuard {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for CapturedGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("log buffer lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedGuard {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Run `f` with a debug-level subscriber for this thread and return its output.
fn capture<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

#[test]
fn clamped_jaro_winkler_parameters_warn() {
    let output = capture(|| {
        let scorer = JaroWinkler::new()
            .with_prefix_weight(f64::NAN)
            .with_max_prefix_length(10);
        assert_eq!(scorer.prefix_weight, 0.1);
        assert_eq!(scorer.max_prefix_length, 4);
    });
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("jaro-winkler prefix weight clamped"), "{output}");
    assert!(output.contains("jaro-winkler prefix length clamped"), "{output}");
}

#[test]
fn in_range_parameters_are_silent() {
    let output = capture(|| {
        let _ = JaroWinkler::new()
            .with_prefix_weight(0.2)
            .with_max_prefix_length(3);
    });
    assert!(!output.contains("WARN"), "{output}");
}

#[test]
fn config_validation_warns_on_clamp() {
    let output = capture(|| {
        let config = ScorerConfig::from_json_str(
            r#"{ "jaro_winkler": { "prefix_weight": 0.5, "max_prefix_length": 6 } }"#,
        )
        .unwrap();
        assert_eq!(config.jaro_winkler.prefix_weight, 0.25);
        assert_eq!(config.jaro_winkler.max_prefix_length, 4);
    });
    assert!(output.contains("configured prefix weight clamped"), "{output}");
    assert!(output.contains("configured prefix length clamped"), "{output}");
}

#[test]
fn column_work_emits_debug_events() {
    let output = capture(|| {
        let scorer = Scorer::from(StringMetric::NGram2);
        let left = [Some("asdfg"), None];
        let right = [Some("asdfg"), Some("ads")];
        score_columns(&scorer, &left, &right).unwrap();

        let lookup = ScalarLookup::from_entries(
            [(Scalar::from("a"), Scalar::from("AA"))],
            Scalar::from("__"),
            ScalarType::String,
        )
        .unwrap();
        let _ = fuzzycol::map_scalar_column(&lookup, &[Scalar::from("a")], usize::MAX);
    });
    assert!(output.contains("scoring string columns"), "{output}");
    assert!(output.contains("metric=nGram2"), "{output}");
    assert!(output.contains("rows=2"), "{output}");
    assert!(output.contains("built scalar lookup"), "{output}");
    assert!(output.contains("mapping scalar column"), "{output}");
}
