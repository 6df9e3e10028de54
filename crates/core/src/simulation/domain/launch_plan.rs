use std::time::Duration;

use crate::shared::settings::SimulationSettings;
use crate::simulation::domain::environment::EnvironmentKind;
use crate::simulation::domain::launch::{DaemonLaunch, LaunchCommand, SimulatorLaunch};

/// Caller-chosen knobs for one environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub headless: bool,
    pub exit_after_sim: bool,
    /// Daemon port; `None` uses the configured default.
    pub nao_port: Option<u16>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            exit_after_sim: false,
            nao_port: None,
        }
    }
}

/// Everything needed to bring one environment up, resolved from settings.
///
/// Nothing is spawned here; a process supervisor consumes the commands and
/// waits the given delays.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchPlan {
    pub kind: EnvironmentKind,
    pub simulator: SimulatorLaunch,
    pub daemon: DaemonLaunch,
    /// Remote API endpoint as `ip:port`.
    pub endpoint: String,
}

impl LaunchPlan {
    pub fn new(
        kind: EnvironmentKind,
        sim_port: u16,
        settings: &SimulationSettings,
        options: &LaunchOptions,
    ) -> Self {
        let nao_port = options.nao_port.unwrap_or(settings.nao_port);
        Self {
            kind,
            simulator: SimulatorLaunch {
                port: sim_port,
                scene: settings.scenes_dir.join(kind.scene_file()),
                headless: options.headless,
                exit_after_sim: options.exit_after_sim,
            },
            daemon: DaemonLaunch {
                ports: vec![nao_port],
            },
            endpoint: format!("{}:{}", settings.local_ip, sim_port),
        }
    }

    pub fn simulator_command(&self, settings: &SimulationSettings) -> LaunchCommand {
        self.simulator.command(&settings.simulator_dir)
    }

    pub fn daemon_commands(&self, settings: &SimulationSettings) -> Vec<LaunchCommand> {
        self.daemon.commands(&settings.daemon_dir)
    }

    /// Total settle time before the environment can be initialized.
    pub fn startup_delay(&self) -> Duration {
        self.simulator.startup_delay() + self.daemon.startup_delay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::domain::port_allocator::PortAllocator;
    use std::path::PathBuf;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            simulator_dir: PathBuf::from("/opt/vrep"),
            daemon_dir: PathBuf::from("/opt/chore"),
            scenes_dir: PathBuf::from("/data/scenes"),
            local_ip: "127.0.0.1".to_string(),
            sim_port: 19997,
            nao_port: 5995,
        }
    }

    #[test]
    fn test_tracking_plan() {
        let s = settings();
        let plan = LaunchPlan::new(
            EnvironmentKind::NaoTracking,
            19997,
            &s,
            &LaunchOptions::default(),
        );
        assert_eq!(plan.endpoint, "127.0.0.1:19997");
        assert_eq!(
            plan.simulator_command(&s).to_string(),
            "/opt/vrep/vrep.sh -gREMOTEAPISERVERSERVICE_19997_TRUE_TRUE -h -s /data/scenes/nao_ball.ttt"
        );
        assert_eq!(
            plan.daemon_commands(&s)[0].to_string(),
            "/opt/chore/naoqi-bin -p 5995"
        );
        assert_eq!(plan.startup_delay(), Duration::from_millis(6500));
    }

    #[test]
    fn test_options_override_defaults() {
        let s = settings();
        let options = LaunchOptions {
            headless: false,
            exit_after_sim: true,
            nao_port: Some(6000),
        };
        let plan = LaunchPlan::new(EnvironmentKind::NaoWalking, 19990, &s, &options);
        assert_eq!(plan.simulator.scene, PathBuf::from("/data/scenes/nao_test2.ttt"));
        assert!(!plan.simulator.headless);
        assert!(plan.simulator.exit_after_sim);
        assert_eq!(plan.daemon.ports, vec![6000]);
        assert_eq!(plan.startup_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_successive_plans_get_distinct_ports() {
        let s = settings();
        let mut ports = PortAllocator::new(s.sim_port);
        let plans: Vec<LaunchPlan> = EnvironmentKind::ALL
            .iter()
            .map(|&kind| {
                LaunchPlan::new(kind, ports.allocate().unwrap(), &s, &LaunchOptions::default())
            })
            .collect();
        let used: Vec<u16> = plans.iter().map(|p| p.simulator.port).collect();
        assert_eq!(used, vec![19997, 19996, 19995]);
    }
}
