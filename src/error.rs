use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Surname is empty")]
    EmptySurname,

    #[error("Reference prefix {0} is exhausted (suffix would exceed 9999)")]
    PrefixExhausted(String),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load font: {0}")]
    FontLoad(String),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate reference: {0}")]
    DuplicateReference(String),

    #[error("Failed to read records file: {0}")]
    Load(String),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}
