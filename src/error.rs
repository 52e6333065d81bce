use thiserror::Error;

/// Errors that may be encountered while configuring or
/// running a desk simulation.
///
/// The [`InvalidParameter`] variant originates from
/// [`DeskParameters::validate()`] and is the only error a
/// correctly written caller should ever see: it rejects a
/// horizon or mean delay that would make the day's event
/// stream undefined.
///
/// The [`BackInTime`] and [`NonFiniteTime`] variants
/// originate from the [`EventQueue`] to indicate that an
/// event's scheduled execution time cannot be honored. They
/// likely correspond to a logical bug on the client side,
/// e.g. a custom service-time distribution that produces
/// negative or NaN draws.
///
/// [`DeskParameters::validate()`]: crate::DeskParameters::validate
/// [`EventQueue`]: crate::day::EventQueue
/// [`InvalidParameter`]: Error::InvalidParameter
/// [`BackInTime`]: Error::BackInTime
/// [`NonFiniteTime`]: Error::NonFiniteTime
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The event queue rejected an event that would
    /// have been scheduled for a time that has
    /// already passed.
    #[error("event execution time is less than current simulation time")]
    BackInTime,

    /// The event queue rejected an event whose
    /// execution time is NaN or infinite.
    #[error("event execution time {0} is not a finite number of seconds")]
    NonFiniteTime(f64),

    /// A configuration value was rejected before any
    /// simulation started.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// [`std::result::Result`]`<T, `[`deskq::Error`]`>`, with `T` defaulting to `()`.
///
/// [`deskq::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_names_the_parameter() {
        let error = Error::InvalidParameter {
            name: "service_mean_minutes",
            value: -1.0,
            reason: "must be positive",
        };
        assert_eq!(
            "invalid parameter `service_mean_minutes` = -1: must be positive",
            error.to_string()
        );
    }
}
