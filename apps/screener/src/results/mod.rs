// Result state and every view derived from it.
// Views are pure functions over a snapshot of the store and are recomputed on each read.

pub mod detail;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod store;
pub mod summary;

pub use detail::{compose, DetailView, Profile};
pub use export::to_csv;
pub use filter::{visible, Threshold};
pub use normalize::{CandidateRecord, ResultId};
pub use store::{ResultStore, SubmissionTicket};
pub use summary::{render_cards, SummaryCard};
