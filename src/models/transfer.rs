/// Status of the one upload slot, published through a watch channel while a
/// transfer runs. `percent` is `None` when the byte total is unknown (or
/// zero), instead of dividing by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferStatus {
    #[default]
    Idle,
    InProgress {
        percent: Option<u8>,
    },
    Succeeded,
    Failed,
}

impl TransferStatus {
    /// In-progress status for a byte count, guarding the division.
    pub fn progress(bytes_sent: u64, bytes_total: Option<u64>) -> Self {
        let percent = match bytes_total {
            Some(total) if total > 0 => {
                let sent = bytes_sent.min(total);
                Some((sent as f64 * 100.0 / total as f64).round() as u8)
            }
            _ => None,
        };
        TransferStatus::InProgress { percent }
    }

    /// A progress indicator is rendered only while a transfer is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, TransferStatus::InProgress { .. })
    }
}

/// Keeps the percent sequence of one upload monotonically non-decreasing,
/// whatever order the transport reports bytes in.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    peak: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes_sent: u64, bytes_total: Option<u64>) -> TransferStatus {
        match TransferStatus::progress(bytes_sent, bytes_total) {
            TransferStatus::InProgress {
                percent: Some(pct),
            } => {
                let pct = self.peak.map_or(pct, |peak| peak.max(pct));
                self.peak = Some(pct);
                TransferStatus::InProgress { percent: Some(pct) }
            }
            other => other,
        }
    }
}
