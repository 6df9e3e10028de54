use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("No such environment: {0}")]
    Unknown(String),
}

/// Task variants the simulator scenes are built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    NaoWalking,
    NaoBalancing,
    NaoTracking,
}

impl EnvironmentKind {
    pub const ALL: &[EnvironmentKind] = &[
        EnvironmentKind::NaoWalking,
        EnvironmentKind::NaoBalancing,
        EnvironmentKind::NaoTracking,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnvironmentKind::NaoWalking => "NaoWalking",
            EnvironmentKind::NaoBalancing => "NaoBalancing",
            EnvironmentKind::NaoTracking => "NaoTracking",
        }
    }

    /// Scene file, relative to the configured scenes directory.
    pub fn scene_file(self) -> &'static str {
        match self {
            EnvironmentKind::NaoWalking | EnvironmentKind::NaoBalancing => "nao_test2.ttt",
            EnvironmentKind::NaoTracking => "nao_ball.ttt",
        }
    }

    /// Whether the task consumes camera frames through the blob locator.
    pub fn uses_camera(self) -> bool {
        matches!(self, EnvironmentKind::NaoTracking)
    }
}

impl fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnvironmentKind {
    type Err = EnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvironmentKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EnvironmentError::Unknown(s.to_string()))
    }
}

/// Per-task façade over a running simulator and robot daemon.
pub trait Environment {
    fn kind(&self) -> EnvironmentKind;

    /// Connects to the remote endpoints and resets the task state.
    fn initialize(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Steps the task until it finishes or `timeout` elapses.
    fn run(&mut self, timeout: Duration) -> Result<(), Box<dyn std::error::Error>>;

    fn close(&mut self);
}
