//! Emergency-room triage on top of the sequenced heap
//!
//! Patients are admitted one at a time, each tagged with the next sequence
//! number. A simulation serves them lowest priority level first (1 is the most
//! urgent), assigns each a finishing time, and then reports them back in the
//! order they were admitted.
//!
//! The two passes are separate steps:
//!
//! 1. [`annotate_finish_times`]: drained entries in served order become
//!    [`ReportRow`]s with finishing times `1, 2, 3, ...`
//! 2. [`into_submission_order`]: rows are stably re-sorted by sequence number
//!
//! # Example
//!
//! ```rust
//! use triage_queue::triage::{Patient, TriageQueue};
//!
//! let mut queue = TriageQueue::new();
//! queue.admit("p1 3 CV".parse::<Patient>().unwrap()).unwrap();
//! queue.admit("p2 1 TR".parse::<Patient>().unwrap()).unwrap();
//!
//! let report = queue.simulate().unwrap();
//! let times: Vec<u64> = report.rows().iter().map(|r| r.finished_at()).collect();
//! assert_eq!(times, vec![2, 1]);
//! ```

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::entry::HeapEntry;
use crate::min_heap::{MinHeap, TieBreak};
use crate::sort::{sort_by_sequence, stable_sort_by_key};
use crate::traits::{HeapError, Sequenced, SequencedHeap};

/// Longest accepted patient identifier
pub const MAX_ID_LEN: usize = 10;

/// Header line printed above the report rows
pub const REPORT_HEADER: &str = "PatientID Priority Symptom Code Time Finished";

/// Errors from parsing a single patient record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("patient id is empty")]
    EmptyId,
    #[error("patient id `{0}` is longer than 10 characters")]
    IdTooLong(String),
    #[error("patient id `{0}` contains whitespace")]
    InvalidId(String),
    #[error("invalid priority `{0}` (expected 1-5)")]
    InvalidPriority(String),
    #[error("unknown symptom code `{0}`")]
    UnknownSymptom(String),
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
}

/// Errors from loading records or running a simulation
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error("line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] RecordError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Heap(#[from] HeapError),
    #[error("No data available for simulation. Please add patient data.")]
    NoPatients,
}

/// Urgency level from 1 (most urgent) to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(u8);

impl Priority {
    pub const MOST_URGENT: Priority = Priority(1);
    pub const LEAST_URGENT: Priority = Priority(5);

    pub fn new(level: u8) -> Result<Self, RecordError> {
        if (Self::MOST_URGENT.0..=Self::LEAST_URGENT.0).contains(&level) {
            Ok(Priority(level))
        } else {
            Err(RecordError::InvalidPriority(level.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for Priority {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .parse::<u8>()
            .map_err(|_| RecordError::InvalidPriority(s.to_string()))?;
        Priority::new(level)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two-letter symptom category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymptomCode {
    CV,
    HN,
    EV,
    GI,
    MH,
    NC,
    EC,
    RC,
    SK,
    SA,
    TR,
}

impl SymptomCode {
    pub const ALL: [SymptomCode; 11] = [
        SymptomCode::CV,
        SymptomCode::HN,
        SymptomCode::EV,
        SymptomCode::GI,
        SymptomCode::MH,
        SymptomCode::NC,
        SymptomCode::EC,
        SymptomCode::RC,
        SymptomCode::SK,
        SymptomCode::SA,
        SymptomCode::TR,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SymptomCode::CV => "CV",
            SymptomCode::HN => "HN",
            SymptomCode::EV => "EV",
            SymptomCode::GI => "GI",
            SymptomCode::MH => "MH",
            SymptomCode::NC => "NC",
            SymptomCode::EC => "EC",
            SymptomCode::RC => "RC",
            SymptomCode::SK => "SK",
            SymptomCode::SA => "SA",
            SymptomCode::TR => "TR",
        }
    }
}

impl FromStr for SymptomCode {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SymptomCode::ALL
            .into_iter()
            .find(|code| code.code() == s)
            .ok_or_else(|| RecordError::UnknownSymptom(s.to_string()))
    }
}

impl fmt::Display for SymptomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

/// A patient waiting to be seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    id: String,
    priority: Priority,
    symptom: SymptomCode,
}

impl Patient {
    pub fn new(
        id: impl Into<String>,
        priority: Priority,
        symptom: SymptomCode,
    ) -> Result<Self, RecordError> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self {
            id,
            priority,
            symptom,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn symptom(&self) -> SymptomCode {
        self.symptom
    }
}

impl FromStr for Patient {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record_line(s)
    }
}

/// Checks the rules every patient id follows, whichever way it was entered
///
/// An id is 1 to [`MAX_ID_LEN`] characters with no whitespace, so that it
/// always survives a round trip through the record format.
pub fn validate_id(id: &str) -> Result<(), RecordError> {
    if id.is_empty() {
        return Err(RecordError::EmptyId);
    }
    if id.chars().any(char::is_whitespace) {
        return Err(RecordError::InvalidId(id.to_string()));
    }
    if id.chars().count() > MAX_ID_LEN {
        return Err(RecordError::IdTooLong(id.to_string()));
    }
    Ok(())
}

/// Parses one `ID PRIORITY SYMPTOM` record
pub fn parse_record_line(line: &str) -> Result<Patient, RecordError> {
    let mut fields = line.split_whitespace();
    let id = fields.next().ok_or(RecordError::MissingField("id"))?;
    let priority = fields
        .next()
        .ok_or(RecordError::MissingField("priority"))?
        .parse::<Priority>()?;
    let symptom = fields
        .next()
        .ok_or(RecordError::MissingField("symptom"))?
        .parse::<SymptomCode>()?;
    if let Some(extra) = fields.next() {
        return Err(RecordError::TrailingField(extra.to_string()));
    }
    Patient::new(id, priority, symptom)
}

/// Reads every non-blank line of `reader` as a patient record
pub fn load_records<R: BufRead>(reader: R) -> Result<Vec<Patient>, TriageError> {
    let mut patients = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TriageError::Read {
            line: index + 1,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let patient = parse_record_line(&line).map_err(|source| TriageError::Record {
            line: index + 1,
            source,
        })?;
        patients.push(patient);
    }
    debug!(count = patients.len(), "loaded patient records");
    Ok(patients)
}

/// One line of a simulation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    sequence: u64,
    patient: Patient,
    finished_at: u64,
}

impl ReportRow {
    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    /// Simulated time at which the patient was seen, starting at 1
    pub fn finished_at(&self) -> u64 {
        self.finished_at
    }
}

impl Sequenced for ReportRow {
    fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<9}     {}       {}         {}",
            self.patient.id, self.patient.priority, self.patient.symptom, self.finished_at
        )
    }
}

/// Annotates drained entries, given in served order, with finishing times
pub fn annotate_finish_times(drained: Vec<HeapEntry<Patient, Priority>>) -> Vec<ReportRow> {
    drained
        .into_iter()
        .zip(1..)
        .map(|(entry, finished_at)| {
            let (_, patient, sequence) = entry.into_parts();
            ReportRow {
                sequence,
                patient,
                finished_at,
            }
        })
        .collect()
}

/// Puts report rows back into admission order
pub fn into_submission_order(mut rows: Vec<ReportRow>) -> Vec<ReportRow> {
    sort_by_sequence(&mut rows);
    rows
}

/// Outcome of a simulation, rows in admission order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by finishing time
    pub fn served_order(&self) -> Vec<&ReportRow> {
        let mut rows: Vec<&ReportRow> = self.rows.iter().collect();
        stable_sort_by_key(&mut rows, |row| row.finished_at);
        rows
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", REPORT_HEADER)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Patients waiting for a simulation run
///
/// The queue assigns sequence numbers starting at 1 and is consumed by
/// [`simulate`](Self::simulate).
#[derive(Debug)]
pub struct TriageQueue<H = MinHeap<Patient, Priority>> {
    heap: H,
    next_sequence: u64,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::with_tie_break(TieBreak::default())
    }

    /// Creates a queue whose heap orders equal priorities with `tie_break`
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self::from_heap(MinHeap::with_tie_break(tie_break))
    }
}

impl Default for TriageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SequencedHeap<Patient, Priority>> TriageQueue<H> {
    /// Wraps an empty heap
    pub fn from_heap(heap: H) -> Self {
        Self {
            heap,
            next_sequence: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queues a patient, returning the sequence number it was given
    pub fn admit(&mut self, patient: Patient) -> Result<u64, TriageError> {
        let sequence = self.next_sequence;
        debug!(
            id = patient.id(),
            priority = patient.priority().get(),
            sequence,
            "admitting patient"
        );
        self.heap.insert(patient.priority(), patient, sequence)?;
        self.next_sequence += 1;
        Ok(sequence)
    }

    /// Queues every patient in iteration order
    pub fn admit_all<I>(&mut self, patients: I) -> Result<(), TriageError>
    where
        I: IntoIterator<Item = Patient>,
    {
        for patient in patients {
            self.admit(patient)?;
        }
        Ok(())
    }

    /// Serves every patient in priority order and reports them in admission order
    ///
    /// # Errors
    /// Returns [`TriageError::NoPatients`] when nobody was admitted.
    pub fn simulate(mut self) -> Result<Report, TriageError> {
        if self.heap.is_empty() {
            return Err(TriageError::NoPatients);
        }

        let drained = self.heap.drain_sorted()?;
        let rows = into_submission_order(annotate_finish_times(drained));
        info!(patients = rows.len(), "simulation finished");
        Ok(Report { rows })
    }
}
