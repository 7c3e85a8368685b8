pub mod loader;

pub use loader::{
    APPLICABILITY_SECTION, FEES_SECTION, LoadError, MatrixLoader, MatrixSet,
};
