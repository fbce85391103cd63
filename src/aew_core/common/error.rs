use thiserror::Error;

#[derive(Error, Debug)]
pub enum AewError {
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Segmentation factor {0} outside supported range 10-100")]
    SegmentationOutOfRange(u8),

    #[error("Region of interest percentage {0} outside supported range 1-100")]
    RoiPercentageOutOfRange(u8),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid window geometry: {0}")]
    WindowGeometry(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Failed to acquire statistics: {0}")]
    Acquisition(String),

    #[error("Hardware call failed: {0}")]
    HardwareCall(String),

    #[error("Statistics sequence is empty")]
    EmptyStatistics,

    #[error("Active metering mode has no region of interest")]
    NoRegionOfInterest,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AewError>;
