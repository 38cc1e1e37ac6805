pub mod agent_pack;
pub mod checks;
pub mod coach;
pub mod context;
pub mod error;
pub mod flow;
pub mod io;
pub mod paths;
pub mod report;
pub mod roadmap;
pub mod scaffold;
pub mod score;
pub mod triage;
pub mod types;

pub use error::{Result, SentinelError};
