pub mod pipeline_logger;
pub mod track_ball_use_case;
