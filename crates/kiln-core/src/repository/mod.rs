pub mod descriptor;
pub mod display_name;
pub mod java_runner;
pub mod release_index;
