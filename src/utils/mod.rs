pub mod error;
pub mod formats;
pub mod fs;

pub use error::{OptimizerError, OptimizerResult, PathError, ValidationError};
pub use formats::{
    PROCESSED_MARKER,
    extract_filename,
    is_jpeg_candidate,
    is_processed,
    processed_path,
};
pub use fs::{file_exists, find_jpeg_files, find_program, find_program_in, validate_dir};
