mod corpus_record;
mod ranked;
mod search_outcome;

pub use corpus_record::CorpusRecord;
pub use ranked::{RankedHit, RankedIndex};
pub use search_outcome::{SearchOutcome, SearchPhase, SearchResponse, SearchStatus};
