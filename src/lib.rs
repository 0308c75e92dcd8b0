#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod history;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod records;
pub mod session;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, load_config};
pub use history::History;
pub use layout::{Layout, PositionedNode, RegionKey, RegionLayout, compute_layout};
pub use model::{Category, Change, Edge, Graph, Node, Polarity, Weight};
pub use records::{EdgeRecord, GraphPayload, LoadError, NodeRecord};
pub use session::{EdgePatch, GraphSession, NodePatch, PlacedNode, SessionState};
