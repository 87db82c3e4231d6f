pub mod statuspage;
