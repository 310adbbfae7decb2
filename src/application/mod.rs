pub mod aggregator;
pub mod checkers;
pub mod collector;
pub mod mesh_service;

pub use aggregator::Aggregator;
pub use checkers::{CheckRegistry, CheckVerdict, Checker};
pub use collector::ClusterInfoCollector;
pub use mesh_service::MeshService;
