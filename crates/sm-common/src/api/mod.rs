pub mod results_response;
pub mod worker_card;

pub use results_response::{ResultsResponse, ResultsStatus};
pub use worker_card::{StarBreakdown, WorkerCard};
