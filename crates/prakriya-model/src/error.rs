use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown {kind}: {value}")]
    UnknownVocabulary { kind: &'static str, value: String },
    #[error("unknown sound class: {0}")]
    UnknownSoundClass(String),
    #[error("upadesha has no sounds: {0:?}")]
    EmptyUpadesha(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
