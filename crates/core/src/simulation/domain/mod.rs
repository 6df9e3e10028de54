pub mod environment;
pub mod launch;
pub mod launch_plan;
pub mod port_allocator;
