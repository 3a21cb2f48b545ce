use snafu::Snafu;

/// The `Result` type returned by this library.
pub type Result<T> = std::result::Result<T, Error>;

/// The public error type returned by this library.
#[derive(Debug, Snafu)]
pub struct Error(InnerError);

/// The private error type returned by this library.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum InnerError {
    #[snafu(display("Error deserializing resource '{}': {}", what, source))]
    ResourceSerde {
        what: String,
        source: serde_json::Error,
    },
}
