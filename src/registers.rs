use thiserror::Error;

use crate::grader::evaluate;

pub const BLOCK_LEN: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Sourcing,
    Requested,
    Responded,
    Graded,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    SourceFailed,
    ServiceFailed,
    GradingFailed,
    ConversionFailed,
}

impl Stage {
    pub fn word(self) -> u16 {
        match self {
            Stage::Idle => 0,
            Stage::Sourcing => 1,
            Stage::Requested => 2,
            Stage::Responded => 3,
            Stage::Graded => 4,
            Stage::Published => 5,
        }
    }
}

impl Fault {
    pub fn word(self) -> u16 {
        match self {
            Fault::None => 0,
            Fault::SourceFailed => 1,
            Fault::ServiceFailed => 2,
            Fault::GradingFailed => 4,
            Fault::ConversionFailed => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterBlock {
    pub status: u16,
    pub fault: u16,
    pub grade: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    #[error("register block starting at {base} does not fit the 16-bit address space")]
    AddressOverflow { base: u16 },
}

impl RegisterBlock {
    pub fn words(&self) -> [u16; BLOCK_LEN as usize] {
        [self.status, self.fault, self.grade]
    }

    pub fn addressed(&self, base: u16) -> Result<Vec<(u16, u16)>, RegisterError> {
        base.checked_add(BLOCK_LEN - 1)
            .ok_or(RegisterError::AddressOverflow { base })?;
        Ok((0..BLOCK_LEN)
            .zip(self.words())
            .map(|(offset, value)| (base + offset, value))
            .collect())
    }
}

/// Progress of one trigger on the bridge: source an image, post it to the
/// inference service, grade the response, publish the grade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradingCycle {
    stage: Stage,
    fault: Fault,
    grade: u16,
}

impl Default for GradingCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl GradingCycle {
    pub fn new() -> Self {
        Self {
            stage: Stage::Idle,
            fault: Fault::None,
            grade: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn fault(&self) -> Fault {
        self.fault
    }

    pub fn begin_sourcing(&mut self) {
        self.stage = Stage::Sourcing;
    }

    pub fn requested(&mut self) {
        self.stage = Stage::Requested;
    }

    pub fn responded(&mut self) {
        self.stage = Stage::Responded;
        self.fault = Fault::None;
    }

    pub fn fail(&mut self, fault: Fault) {
        tracing::warn!(stage = ?self.stage, ?fault, "grading cycle faulted");
        self.fault = fault;
    }

    /// A blank body grades like an absent payload.
    pub fn grade_response(&mut self, body: &str) {
        let parsed = if body.trim().is_empty() {
            Ok(serde_json::Value::Null)
        } else {
            serde_json::from_str::<serde_json::Value>(body)
        };
        let payload = match parsed {
            Ok(v) => v,
            Err(err) => {
                tracing::warn!("grading response: {err}");
                self.fail(Fault::GradingFailed);
                return;
            }
        };

        self.stage = Stage::Graded;
        self.fault = Fault::None;

        let grade = evaluate(&payload);
        tracing::info!(%grade, "response graded");
        self.grade = grade.as_u16();
        self.stage = Stage::Published;
    }

    pub fn registers(&self) -> RegisterBlock {
        RegisterBlock {
            status: self.stage.word(),
            fault: self.fault.word(),
            grade: self.grade,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/registers.rs"]
mod tests;
