use thiserror::Error;

/// Why a single campaign record was left out of a derived view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing start date")]
    MissingStartDate,

    #[error("unparseable start date {value:?}")]
    UnparseableStartDate { value: String },
}
