pub mod command;
pub mod graph;
pub mod iface;
pub mod provision;
