//! Interactive intake menu
//!
//! A [`Session`] reads menu choices and patient details from any `BufRead`
//! and writes prompts and reports to any `Write`, so it can be driven by a
//! terminal or by an in-memory script.
//!
//! The session keeps the intake list itself. Every simulation run builds a
//! fresh [`TriageQueue`] from it, which keeps each heap on its build-once,
//! drain-once lifecycle while still allowing more patients to be added
//! between runs.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::min_heap::TieBreak;
use crate::triage::{
    validate_id, Patient, Priority, SymptomCode, TriageError, TriageQueue, MAX_ID_LEN,
};

const MENU: &str = "1) Add a new patient\n2) Run simulation\n3) Exit\noption> ";

/// A menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    AddPatient,
    RunSimulation,
    Exit,
}

impl Choice {
    /// Anything other than `1` or `2` exits
    fn parse(input: &str) -> Choice {
        match input.trim() {
            "1" => Choice::AddPatient,
            "2" => Choice::RunSimulation,
            _ => Choice::Exit,
        }
    }
}

/// Menu-driven intake and simulation loop
pub struct Session<R, W> {
    input: R,
    output: W,
    intake: Vec<Patient>,
    tie_break: TieBreak,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, tie_break: TieBreak) -> Self {
        Self {
            input,
            output,
            intake: Vec::new(),
            tie_break,
        }
    }

    /// Adds already-parsed patients (e.g. from a data file) to the intake
    pub fn admit_all<I: IntoIterator<Item = Patient>>(&mut self, patients: I) {
        self.intake.extend(patients);
    }

    /// Patients admitted so far, in admission order
    pub fn intake(&self) -> &[Patient] {
        &self.intake
    }

    /// Gives back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until the user exits or input ends
    pub fn run(&mut self) -> Result<(), TriageError> {
        loop {
            let Some(line) = self.prompt(MENU)? else {
                return Ok(());
            };
            match Choice::parse(&line) {
                Choice::AddPatient => {
                    if !self.add_patient()? {
                        return Ok(());
                    }
                }
                Choice::RunSimulation => self.run_simulation()?,
                Choice::Exit => return Ok(()),
            }
        }
    }

    /// Simulates the current intake and prints the report
    ///
    /// An empty intake prints a notice instead of failing.
    pub fn run_simulation(&mut self) -> Result<(), TriageError> {
        let mut queue = TriageQueue::with_tie_break(self.tie_break);
        queue.admit_all(self.intake.iter().cloned())?;

        match queue.simulate() {
            Ok(report) => {
                debug!(patients = report.len(), "printing report");
                write!(self.output, "{}", report)?;
                writeln!(self.output)?;
            }
            Err(TriageError::NoPatients) => {
                info!("simulation requested with no patients");
                writeln!(self.output, "{}", TriageError::NoPatients)?;
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Prompts for one patient. Returns false if input ended mid-way.
    fn add_patient(&mut self) -> Result<bool, TriageError> {
        let id_prompt = format!("Introduce the client ID (max {} digits): ", MAX_ID_LEN);
        let Some(id) =
            self.prompt_until(&id_prompt, |s| validate_id(s).ok().map(|()| s.to_string()))?
        else {
            return Ok(false);
        };

        let Some(priority) = self.prompt_until("Introduce the priority (1-5): ", |s| {
            s.parse::<Priority>().ok()
        })?
        else {
            return Ok(false);
        };

        let codes: Vec<&str> = SymptomCode::ALL.iter().map(|c| c.code()).collect();
        let symptom_prompt = format!(
            "Introduce the 2-digit symptom code ({}): ",
            codes.join(", ")
        );
        let Some(symptom) =
            self.prompt_until(&symptom_prompt, |s| s.parse::<SymptomCode>().ok())?
        else {
            return Ok(false);
        };

        let patient = Patient::new(id, priority, symptom)?;
        debug!(id = patient.id(), "patient entered interactively");
        self.intake.push(patient);
        writeln!(self.output, "Data entered successfully")?;
        Ok(true)
    }

    /// Re-prompts until `accept` yields a value; `None` at end of input
    fn prompt_until<T, F>(&mut self, text: &str, mut accept: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            if let Some(value) = accept(&line) {
                return Ok(Some(value));
            }
        }
    }

    /// Writes `text` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
