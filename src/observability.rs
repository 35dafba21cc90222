use crate::protocol::ResponseKind;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

const LATENCY_WINDOW: usize = 10_000;

pub struct Observability {
    connections_total: AtomicU64,
    requests_total: AtomicU64,
    api_versions_responses_total: AtomicU64,
    describe_topic_partitions_responses_total: AtomicU64,
    unsupported_version_responses_total: AtomicU64,
    frames_dropped_total: AtomicU64,
    empty_frames_skipped_total: AtomicU64,
    request_latency_us: Mutex<VecDeque<u64>>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub connections_total: u64,
    pub requests_total: u64,
    pub api_versions_responses_total: u64,
    pub describe_topic_partitions_responses_total: u64,
    pub unsupported_version_responses_total: u64,
    pub frames_dropped_total: u64,
    pub empty_frames_skipped_total: u64,
}

impl Observability {
    fn new() -> Self {
        Self {
            connections_total: AtomicU64::new(0),
            requests_total: AtomicU64::new(0),
            api_versions_responses_total: AtomicU64::new(0),
            describe_topic_partitions_responses_total: AtomicU64::new(0),
            unsupported_version_responses_total: AtomicU64::new(0),
            frames_dropped_total: AtomicU64::new(0),
            empty_frames_skipped_total: AtomicU64::new(0),
            request_latency_us: Mutex::new(VecDeque::with_capacity(LATENCY_WINDOW)),
        }
    }

    pub fn record_connection(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_frame(&self) {
        self.empty_frames_skipped_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_frame(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.frames_dropped_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_response(&self, kind: ResponseKind, latency: Duration) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        let counter = match kind {
            ResponseKind::ApiVersions => &self.api_versions_responses_total,
            ResponseKind::DescribeTopicPartitions => {
                &self.describe_topic_partitions_responses_total
            }
            ResponseKind::UnsupportedVersion => &self.unsupported_version_responses_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let us = latency.as_micros() as u64;
        let mut lock = self
            .request_latency_us
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if lock.len() >= LATENCY_WINDOW {
            lock.pop_front();
        }
        lock.push_back(us);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            requests_total: self.requests_total.load(Ordering::Relaxed),
            api_versions_responses_total: self.api_versions_responses_total.load(Ordering::Relaxed),
            describe_topic_partitions_responses_total: self
                .describe_topic_partitions_responses_total
                .load(Ordering::Relaxed),
            unsupported_version_responses_total: self
                .unsupported_version_responses_total
                .load(Ordering::Relaxed),
            frames_dropped_total: self.frames_dropped_total.load(Ordering::Relaxed),
            empty_frames_skipped_total: self.empty_frames_skipped_total.load(Ordering::Relaxed),
        }
    }

    fn p99_latency_us(&self) -> u64 {
        let lock = self
            .request_latency_us
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if lock.is_empty() {
            return 0;
        }
        let mut v: Vec<u64> = lock.iter().copied().collect();
        v.sort_unstable();
        let idx = ((v.len() as f64) * 0.99).floor() as usize;
        v[idx.min(v.len() - 1)]
    }

    pub fn render_prometheus(&self) -> String {
        let s = self.snapshot();
        let mut out = String::new();
        let counters = [
            ("tidewire_connections_total", s.connections_total),
            ("tidewire_requests_total", s.requests_total),
            ("tidewire_api_versions_responses_total", s.api_versions_responses_total),
            (
                "tidewire_describe_topic_partitions_responses_total",
                s.describe_topic_partitions_responses_total,
            ),
            (
                "tidewire_unsupported_version_responses_total",
                s.unsupported_version_responses_total,
            ),
            ("tidewire_frames_dropped_total", s.frames_dropped_total),
            ("tidewire_empty_frames_skipped_total", s.empty_frames_skipped_total),
        ];
        for (name, value) in counters {
            out.push_str(&format!("# TYPE {} counter\n", name));
            out.push_str(&format!("{} {}\n", name, value));
        }
        out.push_str("# TYPE tidewire_request_latency_p99_us gauge\n");
        out.push_str(&format!(
            "tidewire_request_latency_p99_us {}\n",
            self.p99_latency_us()
        ));
        out
    }
}

static OBS: OnceLock<Observability> = OnceLock::new();

pub fn observability() -> &'static Observability {
    OBS.get_or_init(Observability::new)
}
