//! Control-plane adapters implementing the domain ports.

pub mod mock;
pub mod remote;

pub use mock::{MockAnswer, MockControlPlaneClient, MockNamespaceAccess};
pub use remote::RemoteControlPlaneClient;
