//! DropSync Engine
//!
//! This crate is the **service layer** over `dropsync-core`: it hosts the
//! collection store, the simulated upload transfer, the intake orchestration,
//! and the query engine, and re-exports a unified API so embedders depend on
//! a single facade. Keep coordination and state here; presentation layers
//! consume the observer events and derived views.

pub mod events;
pub mod intake;
pub mod query;
pub mod simulator;
pub mod state;
pub mod store;
pub mod telemetry;

pub use events::{ChannelObserver, IntakeEvent, IntakeObserver, NoOpObserver};
pub use intake::{AdmissionReport, IntakeService, RejectedFile, UploadOutcome};
pub use query::{available_categories, folder_view, view, FolderView};
pub use simulator::{PacingPolicy, ProgressSink, SimulatedTransfer, TransferError, TransferSimulator};
pub use state::AppState;
pub use store::CollectionStore;
pub use telemetry::init_telemetry;
