pub mod backward_pass;
pub mod critical_paths;
pub mod forward_pass;
