pub mod replay_environment;
