use crate::timezone::TargetTimezone;

/// What to do with a record that violates the export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRecordPolicy {
    /// Exclude the record, report it and keep going.
    #[default]
    Skip,
    /// Stop the run at the first malformed record.
    Abort,
}

/// Options that drive a single normalization run.
#[derive(Debug, Clone, Default)]
pub struct ProcessingOptions {
    pub timezone: TargetTimezone,
    pub malformed_records: MalformedRecordPolicy,
}

impl ProcessingOptions {
    pub fn new(timezone: TargetTimezone) -> Self {
        Self {
            timezone,
            ..Self::default()
        }
    }

    /// Strict processing: any malformed record aborts the run.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.malformed_records = MalformedRecordPolicy::Abort;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.malformed_records == MalformedRecordPolicy::Abort
    }
}
