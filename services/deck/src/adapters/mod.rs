pub mod candidates;
pub mod chat;
pub mod matches;
pub mod oracle;
pub mod scheduling;

pub use candidates::FixtureCandidateSource;
pub use chat::InMemoryChat;
pub use matches::InMemoryMatchSource;
pub use oracle::{ProbabilisticOracle, ScriptedOracle};
pub use scheduling::InMemoryScheduling;
