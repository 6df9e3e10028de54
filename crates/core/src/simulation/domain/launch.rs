use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::shared::constants::{DAEMON_STARTUP_SECS, GUI_STARTUP_SECS, HEADLESS_STARTUP_SECS};

/// A program and its arguments, ready to hand to a process launcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl LaunchCommand {
    /// Builds (but does not spawn) the equivalent `std::process::Command`.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Command line for the physics simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorLaunch {
    pub port: u16,
    pub scene: PathBuf,
    pub headless: bool,
    /// Quit the simulator once the simulation stops.
    pub exit_after_sim: bool,
}

impl SimulatorLaunch {
    pub fn command(&self, simulator_dir: &Path) -> LaunchCommand {
        let mut args = vec![format!("-gREMOTEAPISERVERSERVICE_{}_TRUE_TRUE", self.port)];
        if self.headless {
            args.push("-h".to_string());
        }
        if self.exit_after_sim {
            args.push("-q".to_string());
        }
        args.push("-s".to_string());
        args.push(self.scene.display().to_string());

        LaunchCommand {
            program: simulator_dir.join("vrep.sh"),
            args,
        }
    }

    /// How long the remote API needs before it accepts connections.
    pub fn startup_delay(&self) -> Duration {
        let secs = if self.headless {
            HEADLESS_STARTUP_SECS
        } else {
            GUI_STARTUP_SECS
        };
        Duration::from_secs_f64(secs)
    }
}

/// Command lines for one robot-control daemon per port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaemonLaunch {
    pub ports: Vec<u16>,
}

impl DaemonLaunch {
    pub fn commands(&self, daemon_dir: &Path) -> Vec<LaunchCommand> {
        self.ports
            .iter()
            .map(|port| LaunchCommand {
                program: daemon_dir.join("naoqi-bin"),
                args: vec!["-p".to_string(), port.to_string()],
            })
            .collect()
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs_f64(DAEMON_STARTUP_SECS)
    }
}
