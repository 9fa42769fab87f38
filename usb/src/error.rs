#[derive(thiserror::Error, Debug)]
pub enum MatcherError {
    #[error("No endpoints provided for interface {0}")]
    NoEndpoints(u8),
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("No matching device was found")]
    NoMatchingDevice,

    #[error("USB error: {0}")]
    UsbError(#[from] rusb::Error),
}
